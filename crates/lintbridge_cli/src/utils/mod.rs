//! CLI utility functions

use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result};
use tokio::runtime::Runtime;
use tracing::{debug, info};

use lintbridge_core::BridgeConfig;

pub fn create_tokio_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()
}

/// Resolves the config file to use: the explicit path, else one discovered
/// in the current directory.
pub fn find_config(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        return Ok(Some(path.to_path_buf()));
    }
    let cwd = std::env::current_dir().into_diagnostic()?;
    Ok(BridgeConfig::discover(cwd))
}

/// Loads the configuration, falling back to defaults when no file exists.
pub fn load_config(explicit: Option<&Path>) -> Result<BridgeConfig> {
    match find_config(explicit)? {
        Some(path) => {
            info!("Using config file: {}", path.display());
            BridgeConfig::from_file(&path).into_diagnostic()
        }
        None => {
            debug!("No config file found, using defaults");
            Ok(BridgeConfig::default())
        }
    }
}
