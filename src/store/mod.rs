//! Composition store: canonical document ownership and mutation
//!
//! All direct edits to the [`SongComposition`] go through this store. Index
//! arguments are caller-validated preconditions: the navigator and selector
//! never construct out-of-range coordinates, so the store indexes directly
//! and panics on violation instead of silently corrupting state. Every
//! operation resolves its target before writing any field, so a violated
//! precondition fails before the document is touched.

use crate::models::core::{
    BeatSignature, Column, Line, LyricsAlign, LyricsWidth, SongComposition,
};

/// Owns the working document and applies all mutations to it.
///
/// The original editor rebuilt the document on every edit to keep renderer
/// snapshots from aliasing; here exclusive `&mut` access gives the same
/// guarantee in place.
#[derive(Clone, Debug, Default)]
pub struct CompositionStore {
    doc: SongComposition,
}

impl CompositionStore {
    /// Create a store holding an empty composition.
    pub fn new() -> Self {
        Self {
            doc: SongComposition::new(),
        }
    }

    /// Create a store holding an existing composition.
    pub fn with_document(doc: SongComposition) -> Self {
        Self { doc }
    }

    /// The current document.
    pub fn document(&self) -> &SongComposition {
        &self.doc
    }

    /// Replace the whole working document, e.g. after load or import.
    /// Documents are always swapped wholesale, never merged.
    pub fn replace(&mut self, doc: SongComposition) {
        self.doc = doc;
    }

    /// Set the composition title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.doc.title = title.into();
    }

    /// Set the tempo.
    pub fn set_bpm(&mut self, bpm: u32) {
        self.doc.bpm = bpm;
    }

    /// Append one line of `columns_per_line` fresh columns sized for `beat`.
    ///
    /// The beat and column count are snapshotted into the document's
    /// top-level fields at the same time, so the header reflects the
    /// settings used for the most recently added line. Existing lines keep
    /// the shape they were created with.
    pub fn add_line(&mut self, beat: BeatSignature, columns_per_line: usize) {
        self.doc.beat = beat;
        self.doc.columns_per_line = columns_per_line;
        self.doc.lines.push(Line::new(beat, columns_per_line));
        log::debug!(
            "added line {} ({} columns, {} boxes each)",
            self.doc.lines.len() - 1,
            columns_per_line,
            beat.boxes_per_column()
        );
    }

    /// Write a note into one box.
    ///
    /// With `append` set, `value` is concatenated directly onto the existing
    /// text with no separator. Multi-character symbols therefore cannot be
    /// split back into individual picks; known ambiguity, kept as is.
    pub fn set_notation(
        &mut self,
        line: usize,
        column: usize,
        box_index: usize,
        value: &str,
        append: bool,
    ) {
        let target = &mut self.doc.lines[line].columns[column].boxes[box_index];
        if append {
            let joined = format!("{}{}", target.note(), value);
            target.set_note(joined);
        } else {
            target.set_note(value);
        }
    }

    /// Replace a column's lyric fragment verbatim.
    pub fn set_lyrics(&mut self, line: usize, column: usize, value: &str) {
        self.doc.lines[line].columns[column].lyrics = value.to_string();
    }

    /// Advance a column's lyrics width one step through the fixed cycle
    /// none → 1/4 → 1/2 → 3/4 → full → none.
    ///
    /// Triggered by a context (non-primary) interaction on the lyrics
    /// field; primary clicks set alignment instead.
    pub fn cycle_lyrics_width(&mut self, line: usize, column: usize) {
        let col = &mut self.doc.lines[line].columns[column];
        col.lyrics_width = LyricsWidth::cycle_next(col.lyrics_width);
    }

    /// Set a column's lyrics alignment from a pointer position within the
    /// field (left band → start, right band → end, middle → center).
    pub fn set_lyrics_align_from_pointer(
        &mut self,
        line: usize,
        column: usize,
        relative_x: f64,
        field_width: f64,
    ) {
        self.doc.lines[line].columns[column].lyrics_align =
            LyricsAlign::from_pointer(relative_x, field_width);
    }

    /// Reset one column's notes, lyrics, width, and alignment to creation
    /// defaults without changing its box count.
    pub fn clear_column(&mut self, line: usize, column: usize) {
        self.doc.lines[line].columns[column].clear();
    }

    /// Overwrite one column wholesale (boxes, lyrics, width, alignment).
    /// Used by paste; callers clone clipboard entries so pasted copies
    /// never share data.
    pub fn replace_column(&mut self, line: usize, column: usize, data: Column) {
        self.doc.lines[line].columns[column] = data;
    }

    /// Remove one line by index.
    ///
    /// The store holds no cross-references; the navigator and selector are
    /// responsible for invalidating coordinates that referenced the removed
    /// or shifted lines.
    pub fn delete_line(&mut self, line: usize) {
        self.doc.lines.remove(line);
        log::debug!("deleted line {}", line);
    }
}
