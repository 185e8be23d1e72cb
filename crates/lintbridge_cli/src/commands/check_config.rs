//! Check-config command implementation

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use tracing::info;

use lintbridge_core::BridgeConfig;

use crate::utils::find_config;

pub fn run_check_config(path: Option<&Path>) -> Result<()> {
    let Some(path) = find_config(path)? else {
        return Err(miette::miette!(
            "No config file found. Expected one of: {}",
            BridgeConfig::CONFIG_FILES.join(", ")
        ));
    };

    let config = BridgeConfig::from_file(&path).into_diagnostic()?;
    info!("{} is valid", path.display());

    println!(
        "{}",
        serde_json::to_string_pretty(&config).into_diagnostic()?
    );
    Ok(())
}
