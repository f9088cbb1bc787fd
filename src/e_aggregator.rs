//! Groups compiler errors by the raw path they were reported against.

use crate::{Diagnostic, ErrorEntry};
use std::collections::HashMap;

/// All compiler errors reported against one raw path string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileErrorGroup {
    pub path: String,
    pub entries: Vec<ErrorEntry>,
}

impl FileErrorGroup {
    fn new(path: &str) -> Self {
        FileErrorGroup {
            path: path.to_string(),
            entries: Vec::new(),
        }
    }
}

/// Insertion-ordered map from path to its group.
///
/// Groups live in a `Vec` in first-seen order; `index` only answers "where is
/// this path". Iteration never touches the `HashMap`, so ordering does not
/// depend on hashing.
#[derive(Debug, Default, Clone)]
pub struct ErrorAggregator {
    groups: Vec<FileErrorGroup>,
    index: HashMap<String, usize>,
}

impl ErrorAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `diagnostic` if it is a [`Diagnostic::CompilerError`]; ignores anything else.
    pub fn observe(&mut self, diagnostic: &Diagnostic) {
        if let Diagnostic::CompilerError {
            path,
            line,
            col,
            message,
        } = diagnostic
        {
            self.push(
                path,
                ErrorEntry {
                    line: *line,
                    col: *col,
                    message: message.clone(),
                },
            );
        }
    }

    fn push(&mut self, path: &str, entry: ErrorEntry) {
        let slot = match self.index.get(path) {
            Some(&slot) => slot,
            None => {
                let slot = self.groups.len();
                self.groups.push(FileErrorGroup::new(path));
                self.index.insert(path.to_string(), slot);
                slot
            }
        };
        self.groups[slot].entries.push(entry);
    }

    /// Groups in the order their path was first seen.
    pub fn groups(&self) -> &[FileErrorGroup] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<FileErrorGroup> {
        self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Total number of compiler errors across every group.
    pub fn error_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }
}
