// src/io/mod.rs

//! Adapters between the in-memory history and workflow documents on disk.

pub mod history_io;
pub mod workflow_file;

pub use history_io::{read_history, workflow_file_name, write_history};
pub use workflow_file::{ActionRecord, KeyValue, WorkflowDocument, validate_document};
