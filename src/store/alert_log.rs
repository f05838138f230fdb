use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::models::{LogRow, LOG_COLUMNS};
use super::{ensure_parent, StoreError};

/// Append-only CSV alert log
#[derive(Debug, Clone)]
pub struct AlertLog {
    path: PathBuf,
}

impl AlertLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row, writing the header only when the file is new
    pub fn append(&self, row: &LogRow) -> Result<(), StoreError> {
        let needs_header = match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        ensure_parent(&self.path)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            writer.write_record(LOG_COLUMNS)?;
        }
        writer.serialize(row)?;
        writer.flush().map_err(|e| StoreError::io(&self.path, e))?;

        Ok(())
    }
}
