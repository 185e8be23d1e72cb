//! Linter run to code actions, end to end.

use tower_lsp::lsp_types::CodeAction;
use tracing::debug;

use crate::actions::ActionSynthesizer;
use crate::buffer::BufferSnapshot;
use crate::config::BridgeConfig;
use crate::error::ProcessError;
use crate::notify::WarningSink;
use crate::problem::decode_problems;
use crate::process::{LinterCommand, run_linter};

/// Lints the buffer and synthesizes the actions for its cursor line.
///
/// Undecodable linter output is reported to `sink` and yields no actions.
pub async fn lint_actions(
    config: &BridgeConfig,
    buffer: &BufferSnapshot,
    sink: &dyn WarningSink,
) -> Result<Vec<CodeAction>, ProcessError> {
    let command = LinterCommand::new(config.linter_bin.as_str(), buffer.file_name.as_str());
    let output = run_linter(&command, &buffer.text()).await?;

    let problems = decode_problems(&output, sink);
    debug!("{} problem(s) reported for {}", problems.len(), buffer.uri);

    Ok(ActionSynthesizer::new(config).synthesize(buffer, &problems))
}
