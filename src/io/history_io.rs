// src/io/history_io.rs

//! Reading and writing whole histories as folders of workflow documents.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::catalog::ActionCatalog;
use crate::config::model::WorkflowMetadata;
use crate::errors::{CacheboundError, Result};
use crate::fs::FileSystem;
use crate::history::WorkflowHistory;
use crate::io::workflow_file::WorkflowDocument;

/// File name of the `index`-th workflow. Zero-padded so that name order is
/// history order.
pub fn workflow_file_name(prefix: &str, index: usize) -> String {
    format!("{prefix}_{index:06}.json")
}

/// Write one document per non-empty workflow into `folder`.
///
/// Returns the written paths in history order.
pub fn write_history(
    fs: &dyn FileSystem,
    folder: &Path,
    catalog: &ActionCatalog,
    history: &WorkflowHistory,
    metadata: &WorkflowMetadata,
) -> Result<Vec<PathBuf>> {
    fs.create_dir_all(folder)?;

    let mut written = Vec::with_capacity(history.len());
    for (index, workflow) in history.iter().enumerate() {
        let Some(doc) = WorkflowDocument::from_workflow(workflow, catalog, metadata, index)? else {
            warn!(index, "skipping empty workflow");
            continue;
        };
        let path = folder.join(workflow_file_name(&metadata.name, index));
        fs.write(&path, doc.to_json()?.as_bytes())?;
        debug!(?path, actions = doc.actions.len(), "wrote workflow");
        written.push(path);
    }

    info!(folder = ?folder, files = written.len(), "history written");
    Ok(written)
}

/// Read every `*.json` document in `folder`, in file-name order, into a
/// catalog and a history.
///
/// An action appearing in several documents must carry the same metadata
/// each time.
pub fn read_history(
    fs: &dyn FileSystem,
    folder: &Path,
) -> Result<(ActionCatalog, WorkflowHistory)> {
    if !fs.is_dir(folder) {
        return Err(CacheboundError::ConfigError(format!(
            "history folder {} is not a directory",
            folder.display()
        )));
    }
    let paths: Vec<PathBuf> = fs
        .list_files(folder)?
        .into_iter()
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();

    let mut catalog = ActionCatalog::new();
    let mut history = WorkflowHistory::new();
    for path in &paths {
        let contents = fs.read_to_string(path)?;
        // Error variants are kept intact; the path goes to the log.
        let doc = WorkflowDocument::from_json(&contents).inspect_err(|e| {
            error!(?path, error = %e, "unreadable workflow document");
        })?;
        let (actions, graph) = doc.into_parts().inspect_err(|e| {
            error!(?path, error = %e, "invalid workflow document");
        })?;
        for action in actions {
            catalog.insert(action)?;
        }
        history.push(graph);
    }

    info!(
        folder = ?folder,
        workflows = history.len(),
        actions = catalog.len(),
        "history loaded"
    );
    Ok((catalog, history))
}
