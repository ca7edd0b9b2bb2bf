//! Content cache for change detection

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::ports::FileSystem;

/// Tracks the content hash of every watched source.
///
/// Editors often touch a file without changing it; those saves are skipped.
#[derive(Debug, Default)]
pub struct ContentCache {
    file_hashes: HashMap<PathBuf, String>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current hashes of `paths`. Unreadable files are skipped.
    pub fn seed<FS: FileSystem>(&mut self, fs: &FS, paths: &[PathBuf]) {
        for path in paths {
            if let Ok(hash) = fs.hash(path) {
                self.file_hashes.insert(path.clone(), hash);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.file_hashes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.file_hashes.len()
    }

    /// Whether `hash` is what was last recorded for `path`
    pub fn is_current(&self, path: &Path, hash: &str) -> bool {
        self.file_hashes.get(path).is_some_and(|cached| cached == hash)
    }

    pub fn record(&mut self, path: &Path, hash: String) {
        self.file_hashes.insert(path.to_path_buf(), hash);
    }

    pub fn forget(&mut self, path: &Path) {
        self.file_hashes.remove(path);
    }
}
