//! Keyboard navigation over table grids.
//!
//! A stateless dispatcher: the host feeds raw key events through
//! [`handle_key_down`] while the cursor sits inside a table cell (probe with
//! [`should_handle`] first), and a `true` return means the host must
//! suppress its own default handling of that key.
//!
//! Tab and Shift+Tab always belong to the grid and move cell-to-cell with
//! row wrapping. Arrow keys only escalate to grid navigation when the caret
//! is already pinned at offset 0 of the cell's content and a neighbor exists
//! in that direction; otherwise the event falls through so ordinary
//! intra-text caret movement keeps priority. Enter, Backspace and Delete
//! always fall through: a table-internal Enter inserts a block break inside
//! the cell, never a new row, and content-level deletion is the host's job.

use crate::editing::document::Document;
use crate::editing::tables::{
    Location, is_in_table_cell, locate_in_grid, move_to_next_cell, move_to_previous_cell,
    select_cell_start,
};

/// Keys the dispatcher distinguishes. Everything else maps to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    Enter,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Backspace,
    Delete,
    Other,
}

/// A raw key event as delivered by the host's key pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            shift: false,
            ctrl: false,
            alt: false,
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

#[derive(Debug, Clone, Copy)]
enum ArrowDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Whether the dispatcher wants first refusal of key events right now:
/// exactly "the cursor is inside a table cell".
pub fn should_handle(doc: &Document) -> bool {
    is_in_table_cell(doc, &Location::Cursor)
}

/// Interpret one key event. Returns `true` when the event was consumed and
/// the host must suppress its default handling.
pub fn handle_key_down(doc: &mut Document, event: &KeyEvent) -> bool {
    if !should_handle(doc) {
        return false;
    }
    match event.key {
        Key::Tab => {
            if event.shift {
                move_to_previous_cell(doc, &Location::Cursor);
            } else {
                move_to_next_cell(doc, &Location::Cursor);
            }
            true
        }
        Key::ArrowUp => arrow_move(doc, ArrowDirection::Up),
        Key::ArrowDown => arrow_move(doc, ArrowDirection::Down),
        Key::ArrowLeft => arrow_move(doc, ArrowDirection::Left),
        Key::ArrowRight => arrow_move(doc, ArrowDirection::Right),
        Key::Enter | Key::Backspace | Key::Delete | Key::Other => false,
    }
}

/// Arrow keys never wrap: up/down stay in the same column, left/right in the
/// same row, and at the grid boundary the event is not handled.
fn arrow_move(doc: &mut Document, direction: ArrowDirection) -> bool {
    let at_cell_start = doc.selection().is_some_and(|sel| sel.offset == 0);
    if !at_cell_start {
        return false;
    }
    let Some((row, column, grid)) = locate_in_grid(doc, &Location::Cursor) else {
        return false;
    };
    let (row, column) = match direction {
        ArrowDirection::Up if row > 0 => (row - 1, column),
        ArrowDirection::Down if row + 1 < grid.row_count => (row + 1, column),
        ArrowDirection::Left if column > 0 => (row, column - 1),
        ArrowDirection::Right if column + 1 < grid.row_width(row) => (row, column + 1),
        _ => return false,
    };
    let dest = grid.cell_path(row, column);
    // A ragged neighbor row may lack this column; fall through to the host.
    if !doc.has_path(&dest) {
        return false;
    }
    select_cell_start(doc, &dest);
    true
}
