//! Conversion from linter coordinates to LSP ranges.

use std::collections::HashMap;

use tower_lsp::lsp_types::{Position, Range};
use tracing::debug;

use crate::config::OffsetEncoding;
use crate::problem::Problem;

/// Converts the problem's 1-based line/column fields to a 0-based range.
///
/// A missing end falls back to the start position.
pub fn direct_range(problem: &Problem) -> Option<Range> {
    let line = problem.line?.checked_sub(1)?;
    let column = problem.column?.checked_sub(1)?;
    let start = Position::new(line, column);

    let end = match (problem.end_line, problem.end_column) {
        (Some(end_line), Some(end_column)) => Position::new(
            end_line.saturating_sub(1),
            end_column.saturating_sub(1),
        ),
        _ => start,
    };

    Some(Range::new(start, end))
}

/// Converts the problem's fix offsets to a range on the problem's line.
///
/// `offsets` is the table for that line. Returns `None` when the table is
/// for another line or either offset does not fall on a character boundary
/// of the line.
pub fn fix_range(problem: &Problem, offsets: &LineOffsets) -> Option<Range> {
    let fix = problem.fix.as_ref()?;
    let row = problem.line?.checked_sub(1)?;
    if offsets.row() != row {
        return None;
    }

    let (Some(start), Some(end)) = (offsets.column(fix.start()), offsets.column(fix.end())) else {
        debug!(
            "Fix range {:?} does not lie on line {} (starts at offset {})",
            fix.range,
            row,
            offsets.line_start()
        );
        return None;
    };

    Some(Range::new(Position::new(row, start), Position::new(row, end)))
}

/// Absolute offset of every character boundary on one line.
///
/// Columns are UTF-16 code units, so lines with multi-byte characters map
/// correctly regardless of the offset encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOffsets {
    row: u32,
    /// `(absolute offset, column)`, ascending in both.
    boundaries: Vec<(usize, u32)>,
}

impl LineOffsets {
    /// Builds the table for `row`. Lines are joined by single `\n` characters.
    pub fn new(lines: &[String], row: u32, encoding: OffsetEncoding) -> Option<Self> {
        let line = lines.get(row as usize)?;
        let line_start: usize = lines[..row as usize]
            .iter()
            .map(|l| encoding.len_of_str(l) + 1)
            .sum();
        Some(Self::from_line(line, row, line_start, encoding))
    }

    /// Builds the table for a line whose first character sits at `line_start`.
    pub fn from_line(line: &str, row: u32, line_start: usize, encoding: OffsetEncoding) -> Self {
        let mut boundaries = Vec::with_capacity(line.len() + 1);
        let mut offset = line_start;
        let mut column = 0u32;
        for ch in line.chars() {
            boundaries.push((offset, column));
            offset += encoding.len_of(ch);
            column += ch.len_utf16() as u32;
        }
        boundaries.push((offset, column));

        Self { row, boundaries }
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    /// Absolute offset of the first character of the line.
    pub fn line_start(&self) -> usize {
        self.boundaries[0].0
    }

    /// Column for an absolute offset, if it is a boundary on this line.
    pub fn column(&self, offset: usize) -> Option<u32> {
        self.boundaries
            .binary_search_by_key(&offset, |&(o, _)| o)
            .ok()
            .map(|idx| self.boundaries[idx].1)
    }
}

/// Line tables for one buffer, built on first use and kept for the request.
///
/// Line start offsets are summed once up front, so building a table only
/// scans its own line.
#[derive(Debug)]
pub struct BufferOffsets<'a> {
    lines: &'a [String],
    encoding: OffsetEncoding,
    line_starts: Vec<usize>,
    tables: HashMap<u32, LineOffsets>,
}

impl<'a> BufferOffsets<'a> {
    pub fn new(lines: &'a [String], encoding: OffsetEncoding) -> Self {
        let mut line_starts = Vec::with_capacity(lines.len());
        let mut start = 0usize;
        for line in lines {
            line_starts.push(start);
            start += encoding.len_of_str(line) + 1;
        }

        Self {
            lines,
            encoding,
            line_starts,
            tables: HashMap::new(),
        }
    }

    /// Table for `row`, or `None` when the row is outside the buffer.
    pub fn line(&mut self, row: u32) -> Option<&LineOffsets> {
        let idx = row as usize;
        let lines = self.lines;
        let line = lines.get(idx)?;
        let line_start = self.line_starts[idx];
        let encoding = self.encoding;

        Some(
            self.tables
                .entry(row)
                .or_insert_with(|| LineOffsets::from_line(line, row, line_start, encoding)),
        )
    }

    /// Number of line tables built so far.
    pub fn built(&self) -> usize {
        self.tables.len()
    }
}
