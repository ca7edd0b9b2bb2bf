//! Task events
//!
//! Every task reports progress through a callback receiving [`TaskEvent`]s.
//! The CLI renders them as human-readable lines or as NDJSON.

use serde::Serialize;

use super::supervisor::RestartReason;
use super::watch::ChangeKind;

/// Event types for NDJSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TaskEvent {
    /// A primitive task began
    TaskStarted { task: String },
    /// A primitive task completed
    TaskFinished { task: String },
    /// An output file or directory is being deleted
    Removing { path: String },
    /// The compiler is about to run
    CompileStarted { files: usize },
    /// The compiler reported errors; the task chain continues
    CompileFailed { diagnostics: Vec<String> },
    /// Compilation finished
    CompileComplete { files: usize, emitted: usize },
    /// Assets were copied into the output directory
    CopyComplete { copied: usize },
    /// The source watcher is up
    WatchStarted { source: String },
    /// A watched source changed and is being rebuilt
    SourceChanged { path: String, change: ChangeKind },
    /// The supervised process was started for the first time
    ServerStarted { command: String, pid: u32 },
    /// The supervised process was started again
    ServerRestarted { reason: RestartReason, pid: u32 },
    /// The supervised process crashed; a restart is scheduled
    ServerCrashed {
        code: Option<i32>,
        restart_in_ms: u64,
    },
    /// The supervised process exited cleanly; waiting for changes
    ServerExited,
    /// Non-fatal problem
    Warning { message: String },
    /// Fatal problem, the task is about to fail
    Error { message: String },
    /// Long-running tasks stopped
    Shutdown,
}

impl TaskEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, TaskEvent::Error { .. } | TaskEvent::CompileFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_event_to_json_started() {
        let event = TaskEvent::TaskStarted {
            task: "compile-ts".to_string(),
        };
        insta::assert_snapshot!(event.to_json(), @r#"{"event":"task_started","task":"compile-ts"}"#);
    }

    #[test]
    fn task_event_to_json_source_changed() {
        let event = TaskEvent::SourceChanged {
            path: "src/index.ts".to_string(),
            change: ChangeKind::Modified,
        };
        let json = event.to_json();
        assert!(json.contains("\"event\":\"source_changed\""));
        assert!(json.contains("\"change\":\"modified\""));
    }

    #[test]
    fn task_event_to_json_crash() {
        let event = TaskEvent::ServerCrashed {
            code: Some(1),
            restart_in_ms: 10,
        };
        insta::assert_snapshot!(event.to_json(), @r#"{"event":"server_crashed","code":1,"restart_in_ms":10}"#);
    }

    #[test]
    fn task_event_to_json_restart_reason() {
        let event = TaskEvent::ServerRestarted {
            reason: RestartReason::OutputChanged,
            pid: 42,
        };
        let json = event.to_json();
        assert!(json.contains("\"reason\":\"output_changed\""));
    }

    #[test]
    fn task_event_to_json_escapes() {
        let event = TaskEvent::Error {
            message: "Something \"failed\"".to_string(),
        };
        let json = event.to_json();
        assert!(json.contains("\"event\":\"error\""));
        assert!(json.contains("\\\"failed\\\""));
    }

    #[test]
    fn compile_failures_count_as_errors() {
        assert!(TaskEvent::CompileFailed {
            diagnostics: vec![]
        }
        .is_error());
        assert!(!TaskEvent::ServerExited.is_error());
    }
}
