//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod compiler;
pub mod file_system;
pub mod process;

pub use compiler::{CompileOutcome, CompileRequest, Compiler};
pub use file_system::FileSystem;
pub use process::{ExitKind, LaunchSpec, ProcessHandle, ProcessLauncher};
