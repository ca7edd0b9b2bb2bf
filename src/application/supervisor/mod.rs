//! Process Supervisor
//!
//! Runs the compiled server and keeps it running while developing:
//! - restarts it when the output directory changes (debounced)
//! - restarts it once, after a short delay, each time it crashes
//! - leaves it stopped after a clean exit until the output changes
//!
//! `SupervisorState` holds the decisions and has no clock or I/O.
//! `SupervisorLoop` drives a [`ProcessLauncher`](crate::domain::ports::ProcessLauncher)
//! from it, and `SupervisorUseCase` wires that loop to a directory watcher.

mod state;
mod use_case;


pub use state::{Phase, RestartReason, SupervisorAction, SupervisorState};
pub use use_case::{is_relevant_output_change, SupervisorLoop, SupervisorUseCase};
