//! Function catalog
//!
//! The list of formula function names to look for, loaded once per run from a
//! JSON array such as:
//!
//! ```json
//! ["SUM", "AVG", "DateDiff"]
//! ```

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{Result, UsageError};

#[derive(Debug, Clone, Default)]
pub struct FunctionCatalog {
    names: Vec<String>,
    /// Lowercased name followed by `(`, parallel to `names`
    patterns: Vec<String>,
}

impl FunctionCatalog {
    /// Names are kept as given: no validation, no de-duplication
    pub fn new(names: Vec<String>) -> Self {
        let patterns = names
            .iter()
            .map(|name| format!("{}(", name.to_lowercase()))
            .collect();
        Self { names, patterns }
    }

    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        let names: Vec<String> = serde_json::from_str(json)?;
        Ok(Self::new(names))
    }

    /// Load a catalog from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| UsageError::Catalog {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let catalog = Self::from_json_str(&content).map_err(|e| UsageError::Catalog {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        debug!("Loaded {} function names from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Each name paired with the lowercase `name(` pattern it is detected by
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.patterns.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for FunctionCatalog {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
