//! Application Layer
//!
//! Use cases that orchestrate the build flow.
//! This layer:
//! - Depends on Domain layer (services, value objects, ports)
//! - Does NOT contain path or selection rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `CleanUseCase` - Delete output directories
//! - `CompileUseCase` - Compile sources and fix their source maps
//! - `CopyFilesUseCase` - Copy assets verbatim
//! - `WatchUseCase` - Incremental rebuilds on source changes
//! - `SupervisorUseCase` - Run and restart the server
//! - `TaskRunner` - Expand named tasks into stages and run them

pub mod clean;
pub mod compile;
pub mod context;
pub mod copy;
pub mod events;
pub mod supervisor;
pub mod tasks;
#[cfg(test)]
pub(crate) mod test_support;
pub mod watch;

pub use clean::{CleanResult, CleanUseCase};
pub use compile::{CompileReport, CompileUseCase};
pub use context::BuildContext;
pub use copy::{copy_plan, CopyEntry, CopyFilesUseCase};
pub use events::TaskEvent;
pub use supervisor::{RestartReason, SupervisorLoop, SupervisorUseCase};
pub use tasks::{Stage, Task, TaskRunner};
pub use watch::{ChangeKind, WatchUseCase};
