//! Accumulated usage per report

use std::collections::HashMap;

use log::warn;

use super::scanner::FunctionSet;

/// Report name to function set, in the order reports were first recorded
#[derive(Debug, Clone, Default)]
pub struct UsageTable {
    entries: Vec<(String, FunctionSet)>,
    index: HashMap<String, usize>,
    recorded: usize,
}

impl UsageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a report's usage.
    ///
    /// A name seen before has its set replaced in place and keeps its original
    /// position. Returns `true` when an earlier entry was overwritten.
    pub fn record(&mut self, report_name: &str, functions: FunctionSet) -> bool {
        self.recorded += 1;
        if let Some(&position) = self.index.get(report_name) {
            warn!(
                "Duplicate report name '{}': replacing earlier usage ({} functions) with {} functions",
                report_name,
                self.entries[position].1.len(),
                functions.len()
            );
            self.entries[position].1 = functions;
            return true;
        }

        self.index.insert(report_name.to_string(), self.entries.len());
        self.entries.push((report_name.to_string(), functions));
        false
    }

    pub fn get(&self, report_name: &str) -> Option<&FunctionSet> {
        self.index.get(report_name).map(|&i| &self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FunctionSet)> {
        self.entries.iter().map(|(name, set)| (name.as_str(), set))
    }

    /// Every (report, function) pair in emission order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .flat_map(|(report, set)| set.iter().map(move |function| (report, function)))
    }

    /// Number of `record` calls, duplicate names included
    pub fn recorded(&self) -> usize {
        self.recorded
    }

    /// Number of distinct report names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
