//! Process port
//!
//! Lets the supervisor start, poll and stop the server without knowing
//! whether it is talking to a real child process.

use std::path::PathBuf;

use crate::error::BuildResult;

/// Program, arguments and working directory of a supervised process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl LaunchSpec {
    /// Render as a shell-like command line for display
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// How a process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitKind {
    /// Exit status 0
    Success,
    /// Non-zero exit code, or `None` when terminated by a signal
    Failure(Option<i32>),
}

impl ExitKind {
    pub fn is_crash(&self) -> bool {
        matches!(self, ExitKind::Failure(_))
    }
}

/// A running process
pub trait ProcessHandle {
    /// OS process id
    fn id(&self) -> u32;

    /// Non-blocking exit check
    fn try_wait(&mut self) -> BuildResult<Option<ExitKind>>;

    /// Terminate and reap the process. Stopping an already exited process is a no-op.
    fn kill(&mut self) -> BuildResult<()>;
}

/// Starts processes
pub trait ProcessLauncher {
    type Handle: ProcessHandle;

    fn launch(&self, spec: &LaunchSpec) -> BuildResult<Self::Handle>;
}

impl<T: ProcessLauncher + ?Sized> ProcessLauncher for &T {
    type Handle = T::Handle;

    fn launch(&self, spec: &LaunchSpec) -> BuildResult<Self::Handle> {
        (**self).launch(spec)
    }
}
