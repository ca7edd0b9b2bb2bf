//! Child process launcher
//!
//! Supervised processes inherit stdio so the server's own logs reach the terminal.

use std::io;
use std::process::{Child, Command, Stdio};

use crate::domain::ports::{ExitKind, LaunchSpec, ProcessHandle, ProcessLauncher};
use crate::error::{BuildError, BuildResult};

/// Launches real OS processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl SystemLauncher {
    pub fn new() -> Self {
        Self
    }
}

/// A spawned child process
#[derive(Debug)]
pub struct ChildHandle {
    child: Child,
}

impl ProcessLauncher for SystemLauncher {
    type Handle = ChildHandle;

    fn launch(&self, spec: &LaunchSpec) -> BuildResult<ChildHandle> {
        let child = Command::new(&spec.program)
            .args(&spec.args)
            .current_dir(&spec.cwd)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| BuildError::Spawn {
                program: spec.program.clone(),
                source,
            })?;
        log::debug!("started `{}` as pid {}", spec.display(), child.id());
        Ok(ChildHandle { child })
    }
}

impl ProcessHandle for ChildHandle {
    fn id(&self) -> u32 {
        self.child.id()
    }

    fn try_wait(&mut self) -> BuildResult<Option<ExitKind>> {
        let status = self.child.try_wait()?;
        Ok(status.map(|status| {
            if status.success() {
                ExitKind::Success
            } else {
                ExitKind::Failure(status.code())
            }
        }))
    }

    fn kill(&mut self) -> BuildResult<()> {
        match self.child.kill() {
            Ok(()) => {}
            // already exited
            Err(e) if e.kind() == io::ErrorKind::InvalidInput => {}
            Err(e) => return Err(e.into()),
        }
        self.child.wait()?;
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn spec(program: &str, args: &[&str]) -> LaunchSpec {
        LaunchSpec {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            cwd: std::env::temp_dir(),
        }
    }

    fn wait_for_exit(handle: &mut ChildHandle) -> ExitKind {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(exit) = handle.try_wait().unwrap() {
                return exit;
            }
            assert!(Instant::now() < deadline, "process did not exit");
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn successful_exit() {
        let mut handle = SystemLauncher::new().launch(&spec("true", &[])).unwrap();
        assert_eq!(wait_for_exit(&mut handle), ExitKind::Success);
    }

    #[test]
    fn failing_exit_is_a_crash() {
        let mut handle = SystemLauncher::new()
            .launch(&spec("sh", &["-c", "exit 3"]))
            .unwrap();
        let exit = wait_for_exit(&mut handle);
        assert_eq!(exit, ExitKind::Failure(Some(3)));
        assert!(exit.is_crash());
    }

    #[test]
    fn kill_stops_a_running_process() {
        let mut handle = SystemLauncher::new()
            .launch(&spec("sleep", &["30"]))
            .unwrap();
        handle.kill().unwrap();
        // killing twice is harmless
        handle.kill().unwrap();
    }

    #[test]
    fn unknown_program_is_a_spawn_error() {
        let err = SystemLauncher::new()
            .launch(&spec("definitely-not-a-real-runtime", &[]))
            .unwrap_err();
        assert!(matches!(err, BuildError::Spawn { .. }));
    }
}
