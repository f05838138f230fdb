//! Feature Template - ordered model input columns
//!
//! The template is the single source of truth for vector shape. It is
//! loaded once at startup and never mutated afterward.

use std::collections::HashMap;
use std::path::Path;

use super::LoadError;

#[derive(Debug, Clone)]
pub struct FeatureTemplate {
    columns: Vec<String>,
    index: HashMap<String, usize>,
}

impl FeatureTemplate {
    /// Load a JSON array of column names
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let columns: Vec<String> = serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_columns(columns)
    }

    pub fn from_columns(columns: Vec<String>) -> Result<Self, LoadError> {
        if columns.is_empty() {
            return Err(LoadError::EmptyTemplate);
        }

        let mut index = HashMap::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(LoadError::DuplicateColumn(name.clone()));
            }
        }

        Ok(Self { columns, index })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    #[cfg(test)]
    pub fn contains(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }
}
