//! # lintbridge_core
//!
//! Core of lintbridge: turns the JSON output of an ESLint-compatible linter
//! into LSP code actions.
//!
//! This crate provides:
//! - The linter process pipeline
//! - Diagnostic decoding and coordinate conversion
//! - Code action synthesis
//! - Configuration loading
//!
//! ## Example
//!
//! ```rust,ignore
//! use lintbridge_core::{BridgeConfig, BufferSnapshot, TracingSink, lint_actions};
//!
//! let config = BridgeConfig::from_file(".lintbridge.json")?;
//! let actions = lint_actions(&config, &buffer, &TracingSink).await?;
//! for action in actions {
//!     println!("{}", action.title);
//! }
//! ```

pub mod actions;
mod buffer;
mod config;
mod error;
mod lint;
mod notify;
pub mod position;
pub mod problem;
pub mod process;

pub use actions::{APPLY_WORKSPACE_EDIT_COMMAND, ActionSynthesizer, make_action, merge_actions};
pub use buffer::{BufferSnapshot, filetype_for_path};
pub use config::{BridgeConfig, OffsetEncoding};
pub use error::{BridgeError, OutputError, ProcessError};
pub use lint::lint_actions;
pub use notify::{CollectingSink, TracingSink, WarningSink};
pub use problem::{FileReport, Problem, ProblemFix, Suggestion, decode_problems, parse_output};
