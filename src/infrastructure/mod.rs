//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File system implementations
//! - `tsc` - TypeScript compiler adapter
//! - `process` - Child process launcher for the supervisor
//! - `watcher` - Recursive `notify` watcher

pub mod fs;
pub mod process;
pub mod tsc;
pub mod watcher;

// Re-export for convenience
pub use fs::LocalFs;
pub use process::{ChildHandle, SystemLauncher};
pub use tsc::TscCompiler;
pub use watcher::DirectoryWatcher;
