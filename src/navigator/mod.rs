//! Grid navigator: active-cell tracking and auto-advance
//!
//! Implements the palette entry contract: a plain symbol pick replaces the
//! focused box's note and moves focus to the next box; a pick with the
//! append modifier concatenates into the same box and holds focus until the
//! modifier is released, at which point the deferred advance fires. The
//! modifier is an explicit injected signal, not a process-wide key
//! listener, so the navigator is testable without input devices.

use crate::models::core::SongComposition;
use crate::models::position::{next_cell, ActiveCell};
use crate::store::CompositionStore;

/// Tracks the single active cell and drives advance-after-entry.
#[derive(Clone, Debug, Default)]
pub struct GridNavigator {
    active: Option<ActiveCell>,
    modifier_held: bool,
    /// Whether the most recent entry was made in append mode, so the
    /// advance is still owed when the modifier is released.
    pending_advance: bool,
}

impl GridNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cell focus currently targets, if any.
    pub fn active_cell(&self) -> Option<ActiveCell> {
        self.active
    }

    /// Whether the append modifier is currently held.
    pub fn modifier_held(&self) -> bool {
        self.modifier_held
    }

    /// Focus a notation box. Coordinates are caller-validated.
    pub fn focus_box(&mut self, line: usize, column: usize, box_index: usize) {
        self.active = Some(ActiveCell::in_box(line, column, box_index));
        self.pending_advance = false;
    }

    /// Focus a column's lyrics field. Terminal for advancing; symbol picks
    /// are ignored while a lyrics field is active.
    pub fn focus_lyrics(&mut self, line: usize, column: usize) {
        self.active = Some(ActiveCell::in_lyrics(line, column));
        self.pending_advance = false;
    }

    /// Drop focus entirely.
    pub fn clear_focus(&mut self) {
        self.active = None;
        self.pending_advance = false;
    }

    /// Handle a palette pick: `choose_symbol(symbol, modifier_held)`.
    ///
    /// No-op unless a notation box is focused. Append mode (the explicit
    /// flag or the held modifier) writes into the same box and defers the
    /// advance; replace mode writes and advances immediately.
    pub fn choose_symbol(
        &mut self,
        store: &mut CompositionStore,
        symbol: &str,
        append_requested: bool,
    ) {
        let Some(cell) = self.active else {
            return;
        };
        let Some(box_index) = cell.box_index else {
            return;
        };

        let using_append = append_requested || self.modifier_held;
        store.set_notation(cell.line, cell.column, box_index, symbol, using_append);

        if using_append {
            self.pending_advance = true;
        } else {
            self.advance(store.document());
            self.pending_advance = false;
        }
    }

    /// Mirror the external append-modifier signal.
    ///
    /// On the held→released transition with an advance still owed, the
    /// deferred advance fires: hold, enter several symbols into one box,
    /// release to move on.
    pub fn set_modifier_held(&mut self, doc: &SongComposition, held: bool) {
        let was_held = self.modifier_held;
        self.modifier_held = held;
        if was_held && !held && self.pending_advance {
            self.advance(doc);
            self.pending_advance = false;
        }
    }

    /// Move the active cell to its successor (wrapping past the end of the
    /// grid to the first box). No-op when nothing is focused or a lyrics
    /// field is focused.
    pub fn advance(&mut self, doc: &SongComposition) {
        if let Some(cell) = &self.active {
            if let Some(next) = next_cell(doc, cell) {
                self.active = Some(next);
            }
        }
    }

    /// Invalidate focus after a line deletion: focus on the removed line is
    /// dropped, focus below it shifts up with the lines.
    pub fn handle_line_removed(&mut self, removed: usize) {
        if let Some(cell) = &mut self.active {
            if cell.line == removed {
                self.active = None;
                self.pending_advance = false;
            } else if cell.line > removed {
                cell.line -= 1;
            }
        }
    }
}
