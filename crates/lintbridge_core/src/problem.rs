//! Linter diagnostics as reported in the ESLint JSON format.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::OutputError;
use crate::notify::WarningSink;

const MISSING_CONFIG_MARKER: &str = "no eslint configuration";

/// Results for one linted file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,

    #[serde(default)]
    pub messages: Vec<Problem>,

    #[serde(default)]
    pub error_count: u32,

    #[serde(default)]
    pub warning_count: u32,
}

/// One issue reported by the linter.
///
/// Lines and columns are 1-based, as the linter reports them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// Rule that produced the problem. Absent for syntax errors.
    #[serde(default)]
    pub rule_id: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    /// 1 for warnings, 2 for errors.
    #[serde(default)]
    pub severity: Option<u8>,

    /// Set for parse errors.
    #[serde(default)]
    pub fatal: bool,

    #[serde(default)]
    pub line: Option<u32>,

    #[serde(default)]
    pub column: Option<u32>,

    #[serde(default)]
    pub end_line: Option<u32>,

    #[serde(default)]
    pub end_column: Option<u32>,

    #[serde(default)]
    pub fix: Option<ProblemFix>,

    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

/// Automatic fix: replace the absolute offset range with `text`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemFix {
    pub range: [usize; 2],
    #[serde(default)]
    pub text: String,
}

impl ProblemFix {
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            range: [start, end],
            text: text.into(),
        }
    }

    pub fn start(&self) -> usize {
        self.range[0]
    }

    pub fn end(&self) -> usize {
        self.range[1]
    }
}

/// Alternative fix the user applies by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub desc: String,
    pub fix: SuggestionFix,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionFix {
    #[serde(default)]
    pub text: String,
}

impl Suggestion {
    pub fn new(desc: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            desc: desc.into(),
            fix: SuggestionFix { text: text.into() },
        }
    }
}

impl Problem {
    /// Creates a problem at a 1-based position.
    pub fn new(line: u32, column: u32) -> Self {
        Self {
            line: Some(line),
            column: Some(column),
            ..Default::default()
        }
    }

    pub fn with_rule(mut self, rule_id: impl Into<String>) -> Self {
        self.rule_id = Some(rule_id.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_end(mut self, end_line: u32, end_column: u32) -> Self {
        self.end_line = Some(end_line);
        self.end_column = Some(end_column);
        self
    }

    pub fn with_fix(mut self, fix: ProblemFix) -> Self {
        self.fix = Some(fix);
        self
    }

    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    /// Returns whether this problem yields actions for a request on
    /// `current_line` (0-based).
    ///
    /// Problems with an end line match any line they span. Problems with
    /// only a fix match their start line. Anything else has no usable range.
    pub fn is_eligible(&self, current_line: u32) -> bool {
        let (Some(line), Some(_)) = (self.line, self.column) else {
            return false;
        };
        let start = line.saturating_sub(1);

        if let Some(end_line) = self.end_line {
            start <= current_line && current_line <= end_line.saturating_sub(1)
        } else if self.fix.is_some() {
            start == current_line
        } else {
            false
        }
    }
}

/// Decodes linter stdout into the problems of the first file report.
pub fn parse_output(raw: &str) -> Result<Vec<Problem>, OutputError> {
    match serde_json::from_str::<Vec<FileReport>>(raw) {
        Ok(reports) => {
            trace!("Decoded {} file report(s)", reports.len());
            Ok(reports
                .into_iter()
                .next()
                .map(|report| report.messages)
                .unwrap_or_default())
        }
        Err(e) => {
            if raw.to_lowercase().contains(MISSING_CONFIG_MARKER) {
                Err(OutputError::MissingConfig)
            } else {
                Err(OutputError::Decode(e))
            }
        }
    }
}

/// Like [`parse_output`], but reports failures to `sink` and yields no
/// problems instead of an error.
pub fn decode_problems(raw: &str, sink: &dyn WarningSink) -> Vec<Problem> {
    match parse_output(raw) {
        Ok(problems) => problems,
        Err(OutputError::MissingConfig) => {
            sink.warn("failed to get ESLint code actions: no ESLint configuration found");
            Vec::new()
        }
        Err(e) => {
            debug!("Raw linter output: {}", raw);
            sink.warn(&format!("failed to get ESLint code actions: {}", e));
            Vec::new()
        }
    }
}
