//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// lintbridge - ESLint fixes as LSP code actions
#[derive(Parser)]
#[command(name = "lintbridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the code actions offered for a line of a file
    Actions {
        /// File to lint
        file: PathBuf,

        /// 0-based line the cursor is on
        #[arg(short, long, default_value_t = 0)]
        line: u32,

        /// Linter executable (overrides the configuration)
        #[arg(long)]
        linter: Option<String>,

        /// Editor filetype (defaults to one derived from the extension)
        #[arg(long)]
        filetype: Option<String>,

        /// Do not offer eslint-disable comments
        #[arg(long)]
        no_disable_comments: bool,

        /// Seconds to wait for the linter
        #[arg(long, default_value_t = 10)]
        timeout: u64,
    },

    /// Validate a configuration file and print the effective settings
    CheckConfig {
        /// Config file (defaults to --config or the one in the current directory)
        path: Option<PathBuf>,
    },
}
