//! Actions command implementation

use std::path::Path;
use std::time::Duration;

use miette::{IntoDiagnostic, Result};
use serde_json::Value;
use tower_lsp::lsp_types::Url;
use tracing::debug;

use lintbridge_core::{BridgeConfig, BufferSnapshot, filetype_for_path};
use lintbridge_lsp::{CODE_ACTION_METHOD, CodeActionBridge, Handlers};

use crate::utils::create_tokio_runtime;

pub struct ActionsArgs<'a> {
    pub file: &'a Path,
    pub line: u32,
    pub linter: Option<&'a str>,
    pub filetype: Option<&'a str>,
    pub no_disable_comments: bool,
    pub timeout: Duration,
}

/// Runs the bridge against a file with no language server behind it and
/// prints the resulting actions.
pub fn run_actions(mut config: BridgeConfig, args: ActionsArgs<'_>) -> Result<()> {
    if let Some(linter) = args.linter {
        config.linter_bin = linter.to_string();
    }
    if args.no_disable_comments {
        config.enable_disable_comments = false;
    }

    let buffer = snapshot(args.file, args.filetype, args.line)?;
    debug!("Requesting actions for {} line {}", buffer.uri, buffer.cursor_line);

    let runtime = create_tokio_runtime()?;
    let handlers = Handlers::new().with_request_sync(|_: &str, _, _| Ok(Value::Array(Vec::new())));
    let bridge = CodeActionBridge::new(config, handlers, runtime.handle().clone());

    let actions = bridge
        .request_blocking(buffer, CODE_ACTION_METHOD, Value::Null, args.timeout)
        .into_diagnostic()?;

    println!(
        "{}",
        serde_json::to_string_pretty(&actions).into_diagnostic()?
    );
    Ok(())
}

fn snapshot(file: &Path, filetype: Option<&str>, line: u32) -> Result<BufferSnapshot> {
    let path = file.canonicalize().into_diagnostic()?;
    let text = std::fs::read_to_string(&path).into_diagnostic()?;

    let filetype = match filetype.or_else(|| filetype_for_path(&path)) {
        Some(ft) => ft.to_string(),
        None => {
            return Err(miette::miette!(
                "Cannot tell the filetype of {}. Pass --filetype.",
                path.display()
            ));
        }
    };

    let uri = Url::from_file_path(&path)
        .map_err(|_| miette::miette!("Not an absolute path: {}", path.display()))?;

    Ok(BufferSnapshot::new(
        uri,
        filetype,
        path.display().to_string(),
        &text,
        line,
    ))
}
