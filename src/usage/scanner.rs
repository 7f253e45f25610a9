//! Function usage detection in cell text
//!
//! Detection is a case-insensitive substring test for `name(`. It does not
//! parse formulas: a match inside a string literal counts, and no word
//! boundary is required before the name (`MYSUM(` matches `SUM`).

use log::trace;

use super::catalog::FunctionCatalog;
use crate::report::Report;

/// Insertion-ordered set of function names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionSet {
    names: Vec<String>,
}

impl FunctionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name, returning `false` if it was already present
    pub fn insert(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<'a> IntoIterator for &'a FunctionSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

/// Collect the catalog functions used anywhere in the report's cell texts
pub fn scan_usage(report: &Report, catalog: &FunctionCatalog) -> FunctionSet {
    let mut used = FunctionSet::new();

    for cell in &report.cell {
        let Some(text) = cell.text() else {
            continue;
        };
        let text = text.to_lowercase();

        for (name, pattern) in catalog.entries() {
            if text.contains(pattern) && used.insert(name) {
                trace!(
                    "Report '{}' uses {} (cell {})",
                    report.main.report_name,
                    name,
                    cell.id.as_deref().unwrap_or("?")
                );
            }
        }
    }

    used
}
