//! Code action synthesis from linter problems.

use std::collections::HashSet;

use serde_json::Value;
use tower_lsp::lsp_types::{
    CodeAction, CodeActionKind, Command, DocumentChanges, OneOf,
    OptionalVersionedTextDocumentIdentifier, Position, Range, TextDocumentEdit, TextEdit,
    WorkspaceEdit,
};
use tracing::{debug, warn};

use crate::buffer::BufferSnapshot;
use crate::config::{BridgeConfig, OffsetEncoding};
use crate::position::{BufferOffsets, direct_range, fix_range};
use crate::problem::Problem;

/// Command the editor runs to apply a synthesized edit.
pub const APPLY_WORKSPACE_EDIT_COMMAND: &str = "_typescript.applyWorkspaceEdit";

/// Builds code actions for the problems reported on the cursor line.
#[derive(Debug, Clone)]
pub struct ActionSynthesizer {
    enable_disable_comments: bool,
    offset_encoding: OffsetEncoding,
}

impl ActionSynthesizer {
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            enable_disable_comments: config.enable_disable_comments,
            offset_encoding: config.offset_encoding,
        }
    }

    /// Returns the actions for every problem eligible on the cursor line.
    ///
    /// Per problem: one action per suggestion, then the fix, then the pair of
    /// disable actions the first time its rule is seen.
    pub fn synthesize(&self, buffer: &BufferSnapshot, problems: &[Problem]) -> Vec<CodeAction> {
        let current_line = buffer.cursor_line;
        let identity = buffer.document_identity();
        let mut offsets = BufferOffsets::new(&buffer.lines, self.offset_encoding);
        let mut disabled_rules = HashSet::new();
        let mut actions = Vec::new();

        for problem in problems.iter().filter(|p| p.is_eligible(current_line)) {
            self.push_suggestion_actions(problem, &identity, &mut actions);
            push_fix_action(problem, &mut offsets, &identity, &mut actions);

            if self.enable_disable_comments
                && let Some(rule) = problem.rule_id.as_deref()
                && disabled_rules.insert(rule.to_string())
            {
                push_disable_actions(rule, buffer, &identity, &mut actions);
            }
        }

        debug!(
            "Synthesized {} action(s) for line {} of {}",
            actions.len(),
            current_line,
            buffer.uri
        );
        actions
    }

    fn push_suggestion_actions(
        &self,
        problem: &Problem,
        identity: &OptionalVersionedTextDocumentIdentifier,
        actions: &mut Vec<CodeAction>,
    ) {
        if problem.suggestions.is_empty() {
            return;
        }
        let Some(range) = direct_range(problem) else {
            return;
        };

        for suggestion in &problem.suggestions {
            actions.push(make_action(
                suggestion.desc.clone(),
                identity,
                range,
                suggestion.fix.text.clone(),
            ));
        }
    }

}

/// Line tables come from `offsets`, so problems sharing a line share one scan.
fn push_fix_action(
    problem: &Problem,
    offsets: &mut BufferOffsets<'_>,
    identity: &OptionalVersionedTextDocumentIdentifier,
    actions: &mut Vec<CodeAction>,
) {
    let Some(fix) = problem.fix.as_ref() else {
        return;
    };
    let row = problem.line.and_then(|line| line.checked_sub(1));
    let table = match row {
        Some(row) => offsets.line(row),
        None => None,
    };
    let Some(range) = table.and_then(|table| fix_range(problem, table)) else {
        warn!(
            "Dropping fix for {} with unusable range {:?}",
            problem.rule_id.as_deref().unwrap_or("problem"),
            fix.range
        );
        return;
    };

    let title = match problem.rule_id.as_deref() {
        Some(rule) => format!("Apply suggested fix for {}", rule),
        None => "Apply suggested fix".to_string(),
    };
    actions.push(make_action(title, identity, range, fix.text.clone()));
}

fn push_disable_actions(
    rule: &str,
    buffer: &BufferSnapshot,
    identity: &OptionalVersionedTextDocumentIdentifier,
    actions: &mut Vec<CodeAction>,
) {
    let line = buffer.cursor_line;
    let indent: String = buffer
        .line(line)
        .unwrap_or_default()
        .chars()
        .take_while(|c| c.is_whitespace())
        .collect();

    let line_start = Position::new(line, 0);
    actions.push(make_action(
        format!("Disable ESLint rule {} for this line", rule),
        identity,
        Range::new(line_start, line_start),
        format!("{}// eslint-disable-next-line {}\n", indent, rule),
    ));

    let file_start = Position::new(0, 0);
    actions.push(make_action(
        format!("Disable ESLint rule {} for the entire file", rule),
        identity,
        Range::new(file_start, file_start),
        format!("/* eslint-disable {} */\n", rule),
    ));
}

/// Builds an action whose command applies a single text replacement.
pub fn make_action(
    title: String,
    identity: &OptionalVersionedTextDocumentIdentifier,
    range: Range,
    new_text: String,
) -> CodeAction {
    let edit = WorkspaceEdit {
        document_changes: Some(DocumentChanges::Edits(vec![TextDocumentEdit {
            text_document: identity.clone(),
            edits: vec![OneOf::Left(TextEdit { range, new_text })],
        }])),
        ..Default::default()
    };

    let arguments = serde_json::to_value(&edit).ok().map(|value| vec![value]);

    CodeAction {
        title: title.clone(),
        kind: Some(CodeActionKind::QUICKFIX),
        command: Some(Command {
            title,
            command: APPLY_WORKSPACE_EDIT_COMMAND.to_string(),
            arguments,
        }),
        ..Default::default()
    }
}

/// Appends `extra` after the actions already in `original`.
///
/// A `null` response becomes a plain list of the synthesized actions.
pub fn merge_actions(original: Value, extra: Vec<CodeAction>) -> Value {
    let mut merged = match original {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    };

    merged.extend(
        extra
            .into_iter()
            .filter_map(|action| serde_json::to_value(action).ok()),
    );
    Value::Array(merged)
}
