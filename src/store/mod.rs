//! File-backed stores: the append-only alert log and the latest-alert map
//!
//! Neither store takes a lock. Concurrent requests may interleave writes.

pub mod alert_log;
pub mod map;

use thiserror::Error;

pub use alert_log::AlertLog;
pub use map::MapRenderer;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl StoreError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Create the parent directory of a store file if needed
pub(crate) fn ensure_parent(path: &std::path::Path) -> Result<(), StoreError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))
        }
        _ => Ok(()),
    }
}
