//! Supervisor state machine

use std::time::Duration;

use serde::Serialize;

use crate::domain::ports::ExitKind;

/// Why the server was started again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RestartReason {
    OutputChanged,
    Crashed,
}

/// Lifecycle of the supervised process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not started yet
    Idle,
    Running,
    /// Exited cleanly; nothing happens until the output changes
    Exited,
    /// Crashed; a restart is scheduled
    RestartPending,
}

/// What the driver must do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorAction {
    None,
    Restart(RestartReason),
    RestartAfter(Duration),
    WaitForChanges,
}

#[derive(Debug, Clone)]
pub struct SupervisorState {
    phase: Phase,
    restart_delay: Duration,
}

impl SupervisorState {
    pub fn new(restart_delay: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            restart_delay,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn on_started(&mut self) {
        self.phase = Phase::Running;
    }

    /// A restart was carried out
    pub fn on_restarted(&mut self) {
        self.phase = Phase::Running;
    }

    /// The running process exited on its own.
    ///
    /// Only an exit observed while running counts, so one crash yields one restart.
    pub fn on_exit(&mut self, exit: ExitKind) -> SupervisorAction {
        if self.phase != Phase::Running {
            return SupervisorAction::None;
        }
        if exit.is_crash() {
            self.phase = Phase::RestartPending;
            SupervisorAction::RestartAfter(self.restart_delay)
        } else {
            self.phase = Phase::Exited;
            SupervisorAction::WaitForChanges
        }
    }

    /// Output files settled after a change.
    ///
    /// Supersedes a pending crash restart.
    pub fn on_output_changed(&mut self) -> SupervisorAction {
        match self.phase {
            Phase::Idle => SupervisorAction::None,
            Phase::Running | Phase::Exited | Phase::RestartPending => {
                SupervisorAction::Restart(RestartReason::OutputChanged)
            }
        }
    }

    /// The crash delay elapsed
    pub fn on_delay_elapsed(&mut self) -> SupervisorAction {
        if self.phase == Phase::RestartPending {
            SupervisorAction::Restart(RestartReason::Crashed)
        } else {
            SupervisorAction::None
        }
    }
}
