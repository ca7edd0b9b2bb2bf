//! tsdev CLI - build runner for TypeScript services
//!
//! Usage: tsdev [OPTIONS] [TASK]
//!
//! Tasks:
//!   clean       Delete dist/ and maps/
//!   compile     Compile TypeScript, then copy assets
//!   watch       Rebuild files as they change
//!   serve       Run the server, restarting on output changes and crashes
//!   dev         clean, compile, then watch and serve (default)

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::init_from_env(
        env_logger::Env::default().default_filter_or(cli::log_filter(cli.verbose)),
    );

    if cli.list {
        return commands::list::cmd_list(cli.json);
    }
    commands::run::cmd_run(&cli)
}
