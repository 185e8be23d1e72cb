//! Read-only view of the editor buffer a request was issued from.

use std::path::Path;

use tower_lsp::lsp_types::{OptionalVersionedTextDocumentIdentifier, Url};

/// Buffer state captured when a request is issued.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferSnapshot {
    /// Document URI.
    pub uri: Url,
    /// Document version, if the editor tracks one.
    pub version: Option<i32>,
    /// Editor filetype (e.g. `typescriptreact`).
    pub filetype: String,
    /// File name handed to the linter as `--stdin-filename`.
    pub file_name: String,
    /// Buffer lines without line terminators.
    pub lines: Vec<String>,
    /// 0-based cursor line.
    pub cursor_line: u32,
}

impl BufferSnapshot {
    /// Creates a snapshot from full buffer text.
    pub fn new(
        uri: Url,
        filetype: impl Into<String>,
        file_name: impl Into<String>,
        text: &str,
        cursor_line: u32,
    ) -> Self {
        Self {
            uri,
            version: None,
            filetype: filetype.into(),
            file_name: file_name.into(),
            lines: text.lines().map(str::to_string).collect(),
            cursor_line,
        }
    }

    /// Sets the document version.
    pub fn with_version(mut self, version: i32) -> Self {
        self.version = Some(version);
        self
    }

    /// Full buffer text as the linter sees it.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Returns the line at `row`, if it exists.
    pub fn line(&self, row: u32) -> Option<&str> {
        self.lines.get(row as usize).map(String::as_str)
    }

    /// Identity shared by every edit produced for this buffer.
    pub fn document_identity(&self) -> OptionalVersionedTextDocumentIdentifier {
        OptionalVersionedTextDocumentIdentifier {
            uri: self.uri.clone(),
            version: self.version,
        }
    }
}

/// Maps a file extension to the editor filetype used by default.
pub fn filetype_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    let filetype = match ext {
        "js" | "cjs" | "mjs" => "javascript",
        "jsx" => "javascriptreact",
        "ts" | "cts" | "mts" => "typescript",
        "tsx" => "typescriptreact",
        _ => return None,
    };
    Some(filetype)
}
