//! Clean result types

use std::path::PathBuf;

/// Result of a clean operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanResult {
    /// Targets that existed and were deleted
    pub removed: Vec<PathBuf>,
    /// Targets that did not exist
    pub missing: Vec<PathBuf>,
}

impl CleanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_removed(&mut self, path: PathBuf) {
        self.removed.push(path);
    }

    pub fn add_missing(&mut self, path: PathBuf) {
        self.missing.push(path);
    }

    /// Nothing was on disk
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty()
    }
}
