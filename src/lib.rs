//! tsdev - build runner for TypeScript services
//!
//! Compiles a `src/` tree with `tsc`, copies the assets the compiler does not
//! handle, rebuilds single files as they change and keeps the compiled server
//! running, restarting it when its output changes or it crashes.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{BuildContext, Task, TaskEvent, TaskRunner};
pub use config::BuildConfig;
pub use error::{BuildError, BuildResult};
