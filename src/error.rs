//! Error types for tsdev
//!
//! Library code returns [`BuildResult`]; the binary wraps it in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tsdev operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Main error type for build tasks
#[derive(Error, Debug)]
pub enum BuildError {
    /// Recursive delete failed for a reason other than "already gone"
    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Copying an asset into the output directory failed
    #[error("failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading a file failed
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a file failed
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An external program could not be started
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A configured command line has no program in it
    #[error("{role} command is empty")]
    EmptyCommand { role: &'static str },

    /// Compiler reported errors and `fail_on_compile_error` is set
    #[error("compilation failed with {count} diagnostic line(s)")]
    CompileFailed { count: usize },

    /// An emitted source map is not valid JSON
    #[error("invalid source map {path}: {message}")]
    SourceMap { path: PathBuf, message: String },

    /// Config file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Source directory does not exist
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Glob pattern or directory walk failure
    #[error("file selection error: {0}")]
    Selection(#[from] ignore::Error),

    /// Filesystem watcher failure
    #[error("file watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
