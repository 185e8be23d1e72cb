//! lintbridge CLI
//!
//! Runs the linter bridge outside an editor to show which code actions it
//! would add for a given file and line.

mod cli;
mod commands;
mod utils;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{ActionsArgs, run_actions, run_check_config};
use crate::utils::load_config;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Actions {
            file,
            line,
            linter,
            filetype,
            no_disable_comments,
            timeout,
        } => {
            let config = load_config(cli.config.as_deref())?;
            run_actions(
                config,
                ActionsArgs {
                    file,
                    line: *line,
                    linter: linter.as_deref(),
                    filetype: filetype.as_deref(),
                    no_disable_comments: *no_disable_comments,
                    timeout: Duration::from_secs(*timeout),
                },
            )
        }
        Commands::CheckConfig { path } => {
            run_check_config(path.as_deref().or(cli.config.as_deref()))
        }
    }
}
