//! Segment selector: rectangular range selection and column copy/paste
//!
//! While selection mode is on, cell clicks are routed here instead of the
//! navigator. The first click sets the anchor; every later click recomputes
//! the selected set in full against that same anchor. The expansion rule is
//! anchor-dependent and deliberately not a true rectangle: the anchor's
//! column only bounds its own line when the anchor sits on the upper line,
//! and the clicked column only bounds its own line when the click sits on
//! the lower line. Confirmed product behavior, reproduced exactly.

use crate::models::core::{Column, SongComposition};
use crate::models::position::Coordinate;
use crate::store::CompositionStore;

/// Tracks selection mode, the anchor, the derived selected set, and the
/// column clipboard.
#[derive(Clone, Debug, Default)]
pub struct SegmentSelector {
    selection_mode: bool,
    anchor: Option<Coordinate>,
    selected: Vec<Coordinate>,
    clipboard: Option<Vec<Column>>,
}

impl SegmentSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection_mode(&self) -> bool {
        self.selection_mode
    }

    /// The currently selected coordinates, in the order they were produced.
    pub fn selected(&self) -> &[Coordinate] {
        &self.selected
    }

    pub fn anchor(&self) -> Option<Coordinate> {
        self.anchor
    }

    /// Copied columns, if any. Survives [`cancel`](Self::cancel).
    pub fn clipboard(&self) -> Option<&[Column]> {
        self.clipboard.as_deref()
    }

    /// Enter or leave selection mode. Leaving clears the in-progress
    /// selection like [`cancel`](Self::cancel); entering does not disturb
    /// the navigator's active cell (it is restored as the paste anchor).
    pub fn set_selection_mode(&mut self, enabled: bool) {
        if enabled {
            self.selection_mode = true;
        } else {
            self.cancel();
        }
    }

    /// Handle a cell click while in selection mode (no-op otherwise).
    ///
    /// First click anchors; later clicks re-derive the full selected set
    /// between the anchor and the clicked cell. The anchor persists until
    /// selection mode ends.
    pub fn select_cell(&mut self, doc: &SongComposition, line: usize, column: usize) {
        if !self.selection_mode {
            return;
        }
        let clicked = Coordinate::new(line, column);
        match self.anchor {
            None => {
                self.anchor = Some(clicked);
                self.selected = vec![clicked];
            }
            Some(anchor) => {
                self.selected = expand_range(doc, anchor, clicked);
            }
        }
    }

    /// Deep-clone every selected column into the clipboard, in the order
    /// the selected set was produced. No-op while nothing is selected.
    pub fn copy_selected(&mut self, doc: &SongComposition) {
        if self.selected.is_empty() {
            return;
        }
        let copied: Vec<Column> = self
            .selected
            .iter()
            .map(|coord| doc.lines[coord.line].columns[coord.column].clone())
            .collect();
        log::debug!("copied {} columns", copied.len());
        self.clipboard = Some(copied);
    }

    /// Paste the clipboard starting at `(line, column)`.
    ///
    /// Targets advance row-major, wrapping to the next line at each line's
    /// own length. Unlike focus advance there is no wraparound past the
    /// last line: clipboard entries whose target falls out of range are
    /// silently skipped. Each placement fully overwrites the destination
    /// column with a deep clone of the clipboard entry.
    pub fn paste_at(&self, store: &mut CompositionStore, line: usize, column: usize) {
        let Some(clipboard) = &self.clipboard else {
            return;
        };
        let mut target_line = line;
        let mut target_column = column;
        for entry in clipboard {
            while target_line < store.document().lines.len()
                && target_column >= store.document().lines[target_line].len()
            {
                target_line += 1;
                target_column = 0;
            }
            if target_line >= store.document().lines.len() {
                break;
            }
            store.replace_column(target_line, target_column, entry.clone());
            target_column += 1;
        }
    }

    /// Leave selection mode and clear the anchor and selected set. The
    /// clipboard persists so pasting after cancelling still works.
    pub fn cancel(&mut self) {
        self.selection_mode = false;
        self.anchor = None;
        self.selected.clear();
    }

    /// Invalidate the in-progress selection after a line deletion; its
    /// coordinates may reference removed or shifted lines. Clipboard and
    /// mode are kept.
    pub fn handle_line_removed(&mut self, _removed: usize) {
        self.anchor = None;
        self.selected.clear();
    }
}

/// The anchor-dependent range expansion.
///
/// Same line: the contiguous column span between the two clicks. Across
/// lines: the upper line runs from its endpoint's column (when that
/// endpoint is the anchor, else column 0) to its end; the lower line runs
/// from column 0 to its endpoint's column (when that endpoint is the
/// click, else its end); every line strictly between contributes all of
/// its columns.
fn expand_range(
    doc: &SongComposition,
    anchor: Coordinate,
    clicked: Coordinate,
) -> Vec<Coordinate> {
    let mut selected = Vec::new();

    if anchor.line == clicked.line {
        let lo = anchor.column.min(clicked.column);
        let hi = anchor.column.max(clicked.column);
        for column in lo..=hi {
            selected.push(Coordinate::new(anchor.line, column));
        }
        return selected;
    }

    let min_line = anchor.line.min(clicked.line);
    let max_line = anchor.line.max(clicked.line);

    for line in min_line..=max_line {
        let line_len = doc.lines[line].len();
        let (start, end_excl) = if line == min_line {
            let start = if line == anchor.line { anchor.column } else { 0 };
            (start, line_len)
        } else if line == max_line {
            let end_excl = if line == clicked.line {
                clicked.column + 1
            } else {
                line_len
            };
            (0, end_excl)
        } else {
            (0, line_len)
        };
        for column in start..end_excl {
            selected.push(Coordinate::new(line, column));
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::core::BeatSignature;

    fn store_with_grid(lines: usize, columns: usize) -> CompositionStore {
        let mut store = CompositionStore::new();
        for _ in 0..lines {
            store.add_line(BeatSignature::TwoFour, columns);
        }
        store
    }

    fn coords(pairs: &[(usize, usize)]) -> Vec<Coordinate> {
        pairs.iter().map(|&(l, c)| Coordinate::new(l, c)).collect()
    }

    #[test]
    fn test_clicks_ignored_outside_selection_mode() {
        let store = store_with_grid(1, 2);
        let mut sel = SegmentSelector::new();
        sel.select_cell(store.document(), 0, 0);
        assert!(sel.selected().is_empty());
        assert_eq!(sel.anchor(), None);
    }

    #[test]
    fn test_first_click_anchors() {
        let store = store_with_grid(2, 2);
        let mut sel = SegmentSelector::new();
        sel.set_selection_mode(true);
        sel.select_cell(store.document(), 1, 1);
        assert_eq!(sel.anchor(), Some(Coordinate::new(1, 1)));
        assert_eq!(sel.selected(), coords(&[(1, 1)]).as_slice());
    }

    #[test]
    fn test_same_line_range_is_symmetric_in_columns() {
        let store = store_with_grid(1, 4);
        let mut sel = SegmentSelector::new();
        sel.set_selection_mode(true);
        sel.select_cell(store.document(), 0, 3);
        sel.select_cell(store.document(), 0, 1);
        assert_eq!(sel.selected(), coords(&[(0, 1), (0, 2), (0, 3)]).as_slice());
    }

    #[test]
    fn test_downward_expansion_uses_both_endpoint_columns() {
        let store = store_with_grid(3, 2);
        let mut sel = SegmentSelector::new();
        sel.set_selection_mode(true);
        sel.select_cell(store.document(), 0, 0);
        sel.select_cell(store.document(), 2, 1);
        assert_eq!(
            sel.selected(),
            coords(&[(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]).as_slice()
        );
    }

    #[test]
    fn test_upward_expansion_ignores_endpoint_columns() {
        // Anchoring below and clicking above selects whole lines at both
        // ends: the rule is anchor-dependent, not a true rectangle.
        let store = store_with_grid(3, 2);
        let mut sel = SegmentSelector::new();
        sel.set_selection_mode(true);
        sel.select_cell(store.document(), 2, 1);
        sel.select_cell(store.document(), 0, 0);
        assert_eq!(
            sel.selected(),
            coords(&[(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]).as_slice()
        );

        // Same endpoints, narrower anchor: still the full first line.
        let mut sel = SegmentSelector::new();
        sel.set_selection_mode(true);
        sel.select_cell(store.document(), 2, 0);
        sel.select_cell(store.document(), 0, 1);
        assert_eq!(
            sel.selected(),
            coords(&[(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]).as_slice()
        );
    }

    #[test]
    fn test_anchor_persists_across_clicks() {
        let store = store_with_grid(3, 2);
        let mut sel = SegmentSelector::new();
        sel.set_selection_mode(true);
        sel.select_cell(store.document(), 0, 0);
        sel.select_cell(store.document(), 2, 1);
        sel.select_cell(store.document(), 1, 0);
        assert_eq!(sel.anchor(), Some(Coordinate::new(0, 0)));
        assert_eq!(
            sel.selected(),
            coords(&[(0, 0), (0, 1), (1, 0)]).as_slice()
        );
    }

    #[test]
    fn test_copy_paste_deep_clones() {
        let mut store = store_with_grid(2, 2);
        store.set_notation(0, 0, 0, "सा", false);
        store.set_lyrics(0, 0, "sa");

        let mut sel = SegmentSelector::new();
        sel.set_selection_mode(true);
        sel.select_cell(store.document(), 0, 0);
        sel.copy_selected(store.document());
        sel.cancel();

        sel.paste_at(&mut store, 1, 0);
        store.set_notation(1, 0, 0, "रे", false);

        // Source column unaffected by editing the pasted copy
        assert_eq!(store.document().lines[0].columns[0].boxes[0].note(), "सा");
        assert_eq!(store.document().lines[1].columns[0].lyrics, "sa");
    }

    #[test]
    fn test_paste_wraps_to_next_line_and_skips_past_end() {
        let mut store = store_with_grid(2, 2);
        store.set_lyrics(0, 0, "a");
        store.set_lyrics(0, 1, "b");

        let mut sel = SegmentSelector::new();
        sel.set_selection_mode(true);
        sel.select_cell(store.document(), 0, 0);
        sel.select_cell(store.document(), 0, 1);
        sel.copy_selected(store.document());

        // Start at the last column of the last line: one placed, one skipped
        sel.paste_at(&mut store, 1, 1);
        assert_eq!(store.document().lines[1].columns[1].lyrics, "a");
        assert_eq!(store.document().lines.len(), 2);
        assert_eq!(store.document().lines[1].len(), 2);

        // Start at the end of the first line: both wrap onto the second
        sel.paste_at(&mut store, 0, 2);
        assert_eq!(store.document().lines[1].columns[0].lyrics, "a");
        assert_eq!(store.document().lines[1].columns[1].lyrics, "b");
    }

    #[test]
    fn test_cancel_keeps_clipboard() {
        let mut store = store_with_grid(2, 1);
        store.set_lyrics(0, 0, "keep");

        let mut sel = SegmentSelector::new();
        sel.set_selection_mode(true);
        sel.select_cell(store.document(), 0, 0);
        sel.copy_selected(store.document());
        sel.cancel();

        assert!(!sel.selection_mode());
        assert!(sel.selected().is_empty());
        assert_eq!(sel.anchor(), None);

        sel.paste_at(&mut store, 1, 0);
        assert_eq!(store.document().lines[1].columns[0].lyrics, "keep");
    }

    #[test]
    fn test_copy_with_empty_selection_is_noop() {
        let store = store_with_grid(1, 1);
        let mut sel = SegmentSelector::new();
        sel.copy_selected(store.document());
        assert!(sel.clipboard().is_none());
    }
}
