use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use streamlink_types::formatting::{format_counter, format_grouped};
use thiserror::Error;

use super::StateSink;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to create directory {path:?}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to write {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// One output file with its own write lock.
#[derive(Debug)]
struct GuardedFile {
    path: PathBuf,
    lock: Mutex<()>,
}

impl GuardedFile {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// Overwrite the file, creating missing parent directories first.
    fn write(&self, contents: &str) -> Result<(), SinkError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| SinkError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, contents).map_err(|source| SinkError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Writes the counter and grouped flag to plain text files for the overlay tool.
#[derive(Debug)]
pub struct FileSink {
    counter: GuardedFile,
    grouped: GuardedFile,
}

impl FileSink {
    pub fn new(counter_path: PathBuf, grouped_path: PathBuf) -> Self {
        Self {
            counter: GuardedFile::new(counter_path),
            grouped: GuardedFile::new(grouped_path),
        }
    }

    pub fn counter_path(&self) -> &Path {
        &self.counter.path
    }

    pub fn grouped_path(&self) -> &Path {
        &self.grouped.path
    }

    pub fn try_write_counter(&self, value: u32) -> Result<(), SinkError> {
        self.counter.write(&format_counter(value))
    }

    pub fn try_write_grouped(&self, grouped: bool) -> Result<(), SinkError> {
        self.grouped.write(format_grouped(grouped))
    }
}

impl StateSink for FileSink {
    fn persist_counter(&self, value: u32) {
        if let Err(e) = self.try_write_counter(value) {
            tracing::warn!(error = %e, "Failed to persist kill streak");
        }
    }

    fn persist_grouped(&self, grouped: bool) {
        if let Err(e) = self.try_write_grouped(grouped) {
            tracing::warn!(error = %e, "Failed to persist group status");
        }
    }
}
