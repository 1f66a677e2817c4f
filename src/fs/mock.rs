// src/fs/mock.rs

use super::FileSystem;
use anyhow::{Result, anyhow};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(Vec<u8>),
    Dir,
}

/// In-memory filesystem. Directories are implicit parents of the files
/// written under them, or created explicitly.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    entries: Arc<Mutex<BTreeMap<PathBuf, MockEntry>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> Result<()> {
        let path = path.as_ref();
        let mut entries = self.lock()?;
        if let Some(parent) = path.parent() {
            ensure_dirs(&mut entries, parent);
        }
        entries.insert(path.to_path_buf(), MockEntry::File(content.into()));
        Ok(())
    }

    /// Paths of every file currently stored, in order.
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        Ok(self
            .lock()?
            .iter()
            .filter(|(_, e)| matches!(e, MockEntry::File(_)))
            .map(|(p, _)| p.clone())
            .collect())
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<PathBuf, MockEntry>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow!("mock filesystem lock poisoned"))
    }
}

fn ensure_dirs(entries: &mut BTreeMap<PathBuf, MockEntry>, dir: &Path) {
    for ancestor in dir.ancestors() {
        if ancestor.as_os_str().is_empty() {
            continue;
        }
        entries
            .entry(ancestor.to_path_buf())
            .or_insert(MockEntry::Dir);
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let entries = self.lock()?;
        match entries.get(path) {
            Some(MockEntry::File(content)) => {
                String::from_utf8(content.clone())
                    .map_err(|e| anyhow!("{} is not UTF-8: {e}", path.display()))
            }
            Some(MockEntry::Dir) => Err(anyhow!("{} is a directory", path.display())),
            None => Err(anyhow!("no such file: {}", path.display())),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.add_file(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let mut entries = self.lock()?;
        ensure_dirs(&mut entries, path);
        Ok(())
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.lock()
            .map(|entries| matches!(entries.get(path), Some(MockEntry::Dir)))
            .unwrap_or(false)
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = self.lock()?;
        match entries.get(dir) {
            Some(MockEntry::Dir) => Ok(entries
                .iter()
                .filter(|(p, e)| matches!(e, MockEntry::File(_)) && p.parent() == Some(dir))
                .map(|(p, _)| p.clone())
                .collect()),
            _ => Err(anyhow!("not a directory: {}", dir.display())),
        }
    }
}
