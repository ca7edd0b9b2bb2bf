use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use tsdev::application::Task;

/// tsdev - build runner for TypeScript services
#[derive(Parser, Debug)]
#[command(name = "tsdev")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'tsdev --list' to see what each task runs.")]
pub struct Cli {
    /// Task to run
    #[arg(value_enum, default_value_t = TaskName::Dev)]
    pub task: TaskName,

    /// Production build (output goes one directory further up)
    #[arg(long)]
    pub production: bool,

    /// Run from inside the project instead of its build folder
    #[arg(long = "from-plugin", alias = "fromPlugin")]
    pub from_plugin: bool,

    /// Directory resolved paths are relative to
    #[arg(short = 'C', long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Config file (default: tsdev.toml in the project)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output NDJSON events
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// List tasks and exit
    #[arg(long)]
    pub list: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskName {
    Clean,
    CompileTs,
    CopyFiles,
    Compile,
    Watch,
    Serve,
    Rebuild,
    Dev,
}

impl From<TaskName> for Task {
    fn from(name: TaskName) -> Self {
        match name {
            TaskName::Clean => Task::Clean,
            TaskName::CompileTs => Task::CompileTs,
            TaskName::CopyFiles => Task::CopyFiles,
            TaskName::Compile => Task::Compile,
            TaskName::Watch => Task::Watch,
            TaskName::Serve => Task::Serve,
            TaskName::Rebuild => Task::Rebuild,
            TaskName::Dev => Task::Dev,
        }
    }
}

/// Default log filter for a `-v` count
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
