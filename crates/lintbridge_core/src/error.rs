//! Error types.

use thiserror::Error;
use tower_lsp::jsonrpc;

/// Errors that can fail a bridged request.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A dispatcher function was not supplied at setup time.
    #[error("Configuration error: the `{0}` handler was not provided")]
    MissingHandler(&'static str),

    /// The buffer's filetype is not one the linter handles.
    #[error("Unsupported filetype: {0}")]
    UnsupportedFiletype(String),

    /// The linter process failed.
    #[error("Linter process error: {0}")]
    Process(#[from] ProcessError),

    /// The wrapped language server answered with an error.
    #[error("Request failed: {0}")]
    Response(#[from] jsonrpc::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an unsupported filetype error.
    pub fn unsupported_filetype(filetype: impl Into<String>) -> Self {
        Self::UnsupportedFiletype(filetype.into())
    }
}

/// Errors raised while driving the linter executable.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The executable could not be started.
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The linter wrote to standard error.
    #[error("linter reported an error: {0}")]
    Stderr(String),

    /// Reading or writing one of the standard streams failed.
    #[error("stream error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while decoding linter output.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The linter could not find a configuration file for the buffer.
    #[error("no ESLint configuration found")]
    MissingConfig,

    /// The output was not the expected JSON document.
    #[error("failed to parse linter output: {0}")]
    Decode(#[from] serde_json::Error),
}
