//! FileSystem port - abstraction over file I/O operations
//!
//! Tasks delete, copy and rewrite files through this trait so the pipeline can
//! be exercised against an in-memory implementation.

use std::path::Path;

use crate::error::BuildResult;

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O
/// - `MemoryFs` - in-memory, tests only
pub trait FileSystem {
    /// Read file content as string
    fn read(&self, path: &Path) -> BuildResult<String>;

    /// Write content to file, creating parent directories
    fn write(&self, path: &Path, content: &str) -> BuildResult<()>;

    /// Copy a file, creating parent directories of the destination
    fn copy(&self, from: &Path, to: &Path) -> BuildResult<()>;

    /// Check if a file or directory exists
    fn exists(&self, path: &Path) -> bool;

    /// Delete a file or a directory tree.
    ///
    /// A missing path is not an error; returns whether anything was removed.
    fn remove_all(&self, path: &Path) -> BuildResult<bool>;

    /// Compute content hash (SHA256)
    fn hash(&self, path: &Path) -> BuildResult<String>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn read(&self, path: &Path) -> BuildResult<String> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, content: &str) -> BuildResult<()> {
        (**self).write(path, content)
    }

    fn copy(&self, from: &Path, to: &Path) -> BuildResult<()> {
        (**self).copy(from, to)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn remove_all(&self, path: &Path) -> BuildResult<bool> {
        (**self).remove_all(path)
    }

    fn hash(&self, path: &Path) -> BuildResult<String> {
        (**self).hash(path)
    }
}
