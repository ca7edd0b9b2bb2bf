use tsdev::application::{ChangeKind, RestartReason, TaskEvent};

use crate::ui::primitives::icon::Icon;

pub fn render_task_header(
    task: &str,
    composition: &str,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    format!(
        "{} tsdev {}\n  Plan: {}\n\n",
        Icon::Progress.colored(supports_color, supports_unicode),
        task,
        composition
    )
}

pub fn render_task_event(
    timestamp: &str,
    event: &TaskEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let prefix = format!("[{}]", timestamp);
    let icon = |icon: Icon| icon.colored(supports_color, supports_unicode);

    match event {
        TaskEvent::TaskStarted { task } => {
            format!("{} {} Starting '{}'...\n", prefix, icon(Icon::Progress), task)
        }
        TaskEvent::TaskFinished { task } => {
            format!("{} {} Finished '{}'\n", prefix, icon(Icon::Success), task)
        }
        TaskEvent::Removing { path } => {
            format!("{} {} Removing: {}\n", prefix, icon(Icon::Trash), path)
        }
        TaskEvent::CompileStarted { files } => format!(
            "{} {} Compiling {} file(s)\n",
            prefix,
            icon(Icon::Progress),
            files
        ),
        TaskEvent::CompileFailed { diagnostics } => {
            let mut out = format!(
                "{} {} Compiler reported errors (continuing)\n",
                prefix,
                icon(Icon::Warning)
            );
            for line in diagnostics {
                out.push_str("    ");
                out.push_str(line);
                out.push('\n');
            }
            out
        }
        TaskEvent::CompileComplete { files, emitted } => format!(
            "{} {} Compiled {} file(s), {} output(s)\n",
            prefix,
            icon(Icon::Success),
            files,
            emitted
        ),
        TaskEvent::CopyComplete { copied } => format!(
            "{} {} Copied {} file(s)\n",
            prefix,
            icon(Icon::Success),
            copied
        ),
        TaskEvent::WatchStarted { source } => {
            format!("{} {} Watching: {}\n", prefix, icon(Icon::Watch), source)
        }
        TaskEvent::SourceChanged { path, change } => {
            let verb = match change {
                ChangeKind::Added => "Compiling",
                ChangeKind::Modified => "Recompiling",
                ChangeKind::Removed => "Removed",
            };
            format!("{} {} {}: {}\n", prefix, icon(Icon::Arrow), verb, path)
        }
        TaskEvent::ServerStarted { command, pid } => format!(
            "{} {} Server started: {} (pid {})\n",
            prefix,
            icon(Icon::Server),
            command,
            pid
        ),
        TaskEvent::ServerRestarted { reason, pid } => {
            let why = match reason {
                RestartReason::OutputChanged => "output changed",
                RestartReason::Crashed => "after crash",
            };
            format!(
                "{} {} Server restarted! ({}, pid {})\n",
                prefix,
                icon(Icon::Server),
                why,
                pid
            )
        }
        TaskEvent::ServerCrashed {
            code,
            restart_in_ms,
        } => {
            let status = code.map_or_else(|| "signal".to_string(), |c| format!("exit code {c}"));
            format!(
                "{} {} Server crashed ({}), restarting in {}ms\n",
                prefix,
                icon(Icon::Error),
                status,
                restart_in_ms
            )
        }
        TaskEvent::ServerExited => format!(
            "{} {} Server exited cleanly, waiting for changes\n",
            prefix,
            icon(Icon::Server)
        ),
        TaskEvent::Warning { message } => {
            format!("{} {} {}\n", prefix, icon(Icon::Warning), message)
        }
        TaskEvent::Error { message } => {
            format!("{} {} Error: {}\n", prefix, icon(Icon::Error), message)
        }
        TaskEvent::Shutdown => format!("\n{} {} Watch stopped.\n", prefix, icon(Icon::Watch)),
    }
}
