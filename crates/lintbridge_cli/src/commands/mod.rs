//! Subcommand implementations

mod actions;
mod check_config;

pub use actions::{ActionsArgs, run_actions};
pub use check_config::run_check_config;
