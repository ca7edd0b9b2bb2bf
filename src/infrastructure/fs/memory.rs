//! In-memory file system for unit tests
//!
//! Uses `Arc<Mutex<>>` internally so it can be cloned and shared.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use sha2::{Digest, Sha256};

use crate::domain::ports::FileSystem;
use crate::error::{BuildError, BuildResult};

#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
    removed: Arc<Mutex<Vec<PathBuf>>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), content.to_string());
        self
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.lock().unwrap().keys().cloned().collect()
    }

    pub fn content(&self, path: &Path) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }

    /// Paths passed to `remove_all`, in call order
    pub fn removed(&self) -> Vec<PathBuf> {
        self.removed.lock().unwrap().clone()
    }
}

fn not_found(path: &Path) -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("{} not found", path.display()),
    )
}

impl FileSystem for MemoryFs {
    fn read(&self, path: &Path) -> BuildResult<String> {
        self.content(path).ok_or_else(|| BuildError::Read {
            path: path.to_path_buf(),
            source: not_found(path),
        })
    }

    fn write(&self, path: &Path, content: &str) -> BuildResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> BuildResult<()> {
        let content = self.content(from).ok_or_else(|| BuildError::Copy {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source: not_found(from),
        })?;
        self.write(to, &content)
    }

    fn exists(&self, path: &Path) -> bool {
        self.files
            .lock()
            .unwrap()
            .keys()
            .any(|p| p.starts_with(path))
    }

    fn remove_all(&self, path: &Path) -> BuildResult<bool> {
        self.removed.lock().unwrap().push(path.to_path_buf());
        let mut files = self.files.lock().unwrap();
        let before = files.len();
        files.retain(|p, _| !p.starts_with(path));
        Ok(files.len() != before)
    }

    fn hash(&self, path: &Path) -> BuildResult<String> {
        let content = self.read(path)?;
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        Ok(format!("sha256:{:x}", hasher.finalize()))
    }
}
