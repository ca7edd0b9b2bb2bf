//! Supervisor loop and use case

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use notify::event::{EventKind, ModifyKind};
use notify::Event;

use crate::application::context::BuildContext;
use crate::application::events::TaskEvent;
use crate::application::watch::DEBOUNCE_MS;
use crate::domain::ports::{ExitKind, LaunchSpec, ProcessHandle, ProcessLauncher};
use crate::error::{BuildError, BuildResult};
use crate::infrastructure::watcher::DirectoryWatcher;

use super::state::{RestartReason, SupervisorAction, SupervisorState};

/// Output extensions that trigger a restart
const WATCHED_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "json"];

/// Whether a raw event in the output directory should restart the server
pub fn is_relevant_output_change(event: &Event) -> bool {
    if matches!(
        event.kind,
        EventKind::Access(_) | EventKind::Modify(ModifyKind::Metadata(_))
    ) {
        return false;
    }
    event.paths.iter().any(|path| {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| WATCHED_EXTENSIONS.contains(&e))
    })
}

/// Drives one supervised process from explicit clock ticks
pub struct SupervisorLoop<L: ProcessLauncher> {
    launcher: L,
    spec: LaunchSpec,
    state: SupervisorState,
    child: Option<L::Handle>,
    restart_at: Option<Instant>,
    last_change: Option<Instant>,
}

impl<L: ProcessLauncher> SupervisorLoop<L> {
    pub fn new(launcher: L, spec: LaunchSpec, restart_delay: Duration) -> Self {
        Self {
            launcher,
            spec,
            state: SupervisorState::new(restart_delay),
            child: None,
            restart_at: None,
            last_change: None,
        }
    }

    pub fn state(&self) -> &SupervisorState {
        &self.state
    }

    pub fn start(&mut self, on_event: &impl Fn(TaskEvent)) -> BuildResult<()> {
        let child = self.launcher.launch(&self.spec)?;
        on_event(TaskEvent::ServerStarted {
            command: self.spec.display(),
            pid: child.id(),
        });
        self.child = Some(child);
        self.state.on_started();
        Ok(())
    }

    /// Record an output change; acted on once changes settle
    pub fn notice_change(&mut self, now: Instant) {
        self.last_change = Some(now);
    }

    /// One pass of the supervise loop; `false` once `running` is cleared.
    ///
    /// An interrupt reaches the child as well, so its exit after the flag is
    /// cleared is a shutdown and not a crash.
    pub fn step(
        &mut self,
        output_changed: bool,
        running: &AtomicBool,
        now: Instant,
        on_event: &impl Fn(TaskEvent),
    ) -> BuildResult<bool> {
        if !running.load(Ordering::SeqCst) {
            return Ok(false);
        }
        if output_changed {
            self.notice_change(now);
        }
        self.tick(now, on_event)?;
        Ok(true)
    }

    /// Advance the loop to `now`
    pub fn tick(&mut self, now: Instant, on_event: &impl Fn(TaskEvent)) -> BuildResult<()> {
        if let Some(last) = self.last_change {
            if now.saturating_duration_since(last) >= Duration::from_millis(DEBOUNCE_MS) {
                self.last_change = None;
                if let SupervisorAction::Restart(reason) = self.state.on_output_changed() {
                    self.restart_at = None;
                    self.restart(reason, on_event)?;
                }
            }
        }

        if let Some(exit) = self.poll_exit()? {
            self.child = None;
            match self.state.on_exit(exit) {
                SupervisorAction::RestartAfter(delay) => {
                    let code = match exit {
                        ExitKind::Failure(code) => code,
                        ExitKind::Success => None,
                    };
                    log::warn!("server crashed (code {code:?}), restarting in {delay:?}");
                    on_event(TaskEvent::ServerCrashed {
                        code,
                        restart_in_ms: delay.as_millis() as u64,
                    });
                    self.restart_at = Some(now + delay);
                }
                SupervisorAction::WaitForChanges => {
                    log::info!("server exited, waiting for changes");
                    on_event(TaskEvent::ServerExited);
                }
                SupervisorAction::None | SupervisorAction::Restart(_) => {}
            }
        }

        if let Some(at) = self.restart_at {
            if now >= at {
                self.restart_at = None;
                if let SupervisorAction::Restart(reason) = self.state.on_delay_elapsed() {
                    self.restart(reason, on_event)?;
                }
            }
        }
        Ok(())
    }

    fn poll_exit(&mut self) -> BuildResult<Option<ExitKind>> {
        match self.child.as_mut() {
            Some(child) => child.try_wait(),
            None => Ok(None),
        }
    }

    fn restart(&mut self, reason: RestartReason, on_event: &impl Fn(TaskEvent)) -> BuildResult<()> {
        if let Some(mut child) = self.child.take() {
            child.kill()?;
        }
        let child = self.launcher.launch(&self.spec)?;
        log::info!("Server restarted!");
        on_event(TaskEvent::ServerRestarted {
            reason,
            pid: child.id(),
        });
        self.child = Some(child);
        self.state.on_restarted();
        Ok(())
    }

    /// Stop the process if it is still running
    pub fn shutdown(&mut self) -> BuildResult<()> {
        self.restart_at = None;
        if let Some(mut child) = self.child.take() {
            child.kill()?;
        }
        Ok(())
    }
}

/// Entry point of the `serve` task
pub struct SupervisorUseCase<'a, L: ProcessLauncher> {
    ctx: &'a BuildContext,
    launcher: L,
}

impl<'a, L: ProcessLauncher> SupervisorUseCase<'a, L> {
    pub fn new(ctx: &'a BuildContext, launcher: L) -> Self {
        Self { ctx, launcher }
    }

    /// Run until `running` is cleared, then stop the server
    pub fn run<F>(&self, running: &AtomicBool, on_event: F) -> BuildResult<()>
    where
        F: Fn(TaskEvent),
    {
        let dir = self.ctx.server_watch_dir();
        std::fs::create_dir_all(&dir).map_err(|source| BuildError::Write {
            path: dir.clone(),
            source,
        })?;
        let spec = self.ctx.launch_spec()?;
        let watcher = DirectoryWatcher::new(&dir)?;

        let mut supervisor = SupervisorLoop::new(
            &self.launcher,
            spec,
            self.ctx.config().server.restart_delay(),
        );
        supervisor.start(&on_event)?;

        let result = self.supervise(&mut supervisor, &watcher, running, &on_event);
        let stopped = supervisor.shutdown();
        log::debug!("supervisor stopped");
        result.and(stopped)
    }

    fn supervise(
        &self,
        supervisor: &mut SupervisorLoop<&L>,
        watcher: &DirectoryWatcher,
        running: &AtomicBool,
        on_event: &impl Fn(TaskEvent),
    ) -> BuildResult<()> {
        while running.load(Ordering::SeqCst) {
            let changed = watcher
                .next_event(Duration::from_millis(50))
                .is_some_and(|event| is_relevant_output_change(&event));
            if !supervisor.step(changed, running, Instant::now(), on_event)? {
                break;
            }
        }
        Ok(())
    }
}
