//! Task command handler
//!
//! Loads configuration, builds the context and runs the requested task with
//! the real compiler, file system and process launcher.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use tsdev::application::{BuildContext, Task, TaskEvent, TaskRunner};
use tsdev::config::{load_layered, BuildConfig, PROJECT_CONFIG_FILE};
use tsdev::domain::value_objects::{lexical_normalize, PathResolver};
use tsdev::infrastructure::{LocalFs, SystemLauncher, TscCompiler};

use crate::cli::Cli;
use crate::ui::context::UiContext;
use crate::ui::views::task::{render_task_event, render_task_header};

pub fn cmd_run(cli: &Cli) -> Result<()> {
    let base_dir = resolve_base_dir(cli.cwd.as_deref())?;
    let config = load_config(cli, &base_dir)?;
    let ctx = BuildContext::new(config, base_dir);
    let task = Task::from(cli.task);
    let ui = UiContext::new(cli.json);

    let running = Arc::new(AtomicBool::new(true));
    if task.runs_until_stopped() {
        let running_clone = running.clone();
        ctrlc::set_handler(move || {
            running_clone.store(false, Ordering::SeqCst);
        })
        .context("failed to set Ctrl+C handler")?;
    }

    if !ui.json {
        print!(
            "{}",
            render_task_header(task.name(), &task.composition(), ui.color, ui.unicode)
        );
    }

    let compiler = TscCompiler::from_config(&ctx.config().compiler)?;
    let runner = TaskRunner::new(&ctx, compiler, LocalFs::new(), SystemLauncher::new());
    runner
        .run(task, &running, &|event| print_event(&ui, &event))
        .with_context(|| format!("task '{task}' failed"))?;
    Ok(())
}

fn resolve_base_dir(cwd: Option<&Path>) -> Result<PathBuf> {
    let dir = match cwd {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().context("failed to read the current directory")?,
    };
    dir.canonicalize()
        .with_context(|| format!("working directory {} not found", dir.display()))
}

/// CLI flags > environment > config file > defaults
fn load_config(cli: &Cli, base_dir: &Path) -> Result<BuildConfig> {
    // the project file is located with the command-line flags alone
    let resolver = PathResolver::new(cli.production, cli.from_plugin);
    let project_config = lexical_normalize(&base_dir.join(resolver.path(PROJECT_CONFIG_FILE)));

    let (config, warnings) = load_layered(cli.config.as_deref(), &project_config)?;
    for warning in &warnings {
        log::warn!("{warning}");
    }
    Ok(config
        .with_env_overrides()
        .with_flags(cli.production, cli.from_plugin))
}

fn print_event(ui: &UiContext, event: &TaskEvent) {
    if ui.json {
        println!("{}", event.to_json());
        return;
    }

    let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
    let rendered = render_task_event(&timestamp, event, ui.color, ui.unicode);
    if event.is_error() {
        eprint!("{rendered}");
    } else {
        print!("{rendered}");
    }
}
