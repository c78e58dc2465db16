//! Grid coordinates and session-scoped focus state
//!
//! Coordinates address columns as `(line, column)` pairs; the active cell
//! additionally carries an optional box index. Both are ephemeral UI-session
//! state and are never serialized with the document.

use crate::models::core::SongComposition;

/// A `(line, column)` grid coordinate addressing one column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coordinate {
    pub line: usize,
    pub column: usize,
}

impl Coordinate {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// The single cell currently targeted by symbol entry.
///
/// `box_index` is `Some` when a notation box is focused and `None` when the
/// column's lyrics field is focused. A lyrics-focused cell is terminal for
/// advancing purposes and symbol entry ignores it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveCell {
    pub line: usize,
    pub column: usize,
    pub box_index: Option<usize>,
}

impl ActiveCell {
    /// Focus a notation box.
    pub fn in_box(line: usize, column: usize, box_index: usize) -> Self {
        Self {
            line,
            column,
            box_index: Some(box_index),
        }
    }

    /// Focus a lyrics field.
    pub fn in_lyrics(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            box_index: None,
        }
    }

    /// Whether a notation box (rather than a lyrics field) is focused.
    pub fn is_box(&self) -> bool {
        self.box_index.is_some()
    }
}

/// Pure successor query over `(line, column, box)`.
///
/// Box-major within a column, column-major within a line, line-major across
/// the document, wrapping to `(0, 0, 0)` after the last box of the last
/// line. There is always a next cell. A lyrics-focused cell has no
/// successor. Lines without columns are a caller-guarded precondition.
pub fn next_cell(doc: &SongComposition, cell: &ActiveCell) -> Option<ActiveCell> {
    let box_index = cell.box_index?;
    let line = &doc.lines[cell.line];
    let column = &line.columns[cell.column];

    if box_index + 1 < column.boxes.len() {
        return Some(ActiveCell::in_box(cell.line, cell.column, box_index + 1));
    }
    if cell.column + 1 < line.len() {
        return Some(ActiveCell::in_box(cell.line, cell.column + 1, 0));
    }
    if cell.line + 1 < doc.lines.len() {
        return Some(ActiveCell::in_box(cell.line + 1, 0, 0));
    }
    Some(ActiveCell::in_box(0, 0, 0))
}
