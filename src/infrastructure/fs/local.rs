//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::io::{self, Write};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::domain::ports::FileSystem;
use crate::error::{BuildError, BuildResult};

/// Local file system implementation
///
/// Writes go through a temp file in the destination directory and are
/// renamed into place, so a watching process never sees half a file.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

fn ensure_parent(path: &Path) -> BuildResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| BuildError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> BuildResult<String> {
        std::fs::read_to_string(path).map_err(|source| BuildError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write(&self, path: &Path, content: &str) -> BuildResult<()> {
        ensure_parent(path)?;
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let to_write_error = |source: io::Error| BuildError::Write {
            path: path.to_path_buf(),
            source,
        };

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(to_write_error)?;
        tmp.write_all(content.as_bytes()).map_err(to_write_error)?;
        tmp.persist(path).map_err(|e| to_write_error(e.error))?;
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> BuildResult<()> {
        ensure_parent(to)?;
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|source| BuildError::Copy {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
                source,
            })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_all(&self, path: &Path) -> BuildResult<bool> {
        let metadata = match std::fs::symlink_metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(source) => {
                return Err(BuildError::Remove {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let result = if metadata.is_dir() {
            std::fs::remove_dir_all(path)
        } else {
            std::fs::remove_file(path)
        };

        match result {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(BuildError::Remove {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn hash(&self, path: &Path) -> BuildResult<String> {
        let bytes = std::fs::read(path).map_err(|source| BuildError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(format!("sha256:{:x}", hasher.finalize()))
    }
}
