//! Structural table editing operations.
//!
//! Every operation takes the document handle plus a [`Location`] that is
//! either an explicit path or "the current cursor position". Operations are
//! total: when the location does not resolve to the required enclosing
//! table/row/cell, they silently do nothing. Callers probe with the
//! `is_in_*` wrappers when they need to know in advance.
//!
//! Paths are only valid until the next mutation, so no path computed here is
//! ever carried across one: the per-row loops in the column operations
//! re-derive each row's path from the table's current children, and every
//! operation starts from a fresh `find_*` lookup.

use crate::editing::document::Document;
use crate::models::{Node, NodeKind, Path, Table, TableCell, TableRow};

/// Default grid size for [`insert_table`].
pub const DEFAULT_ROWS: usize = 2;
pub const DEFAULT_COLS: usize = 2;

/// Where an operation should look for its target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Location {
    /// Use the document's current cursor position.
    #[default]
    Cursor,
    /// Use an explicit path.
    At(Path),
}

impl From<Path> for Location {
    fn from(path: Path) -> Self {
        Location::At(path)
    }
}

impl<const N: usize> From<[usize; N]> for Location {
    fn from(indices: [usize; N]) -> Self {
        Location::At(Path::from(indices))
    }
}

/// Whether a new row lands above or below the reference row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPosition {
    Above,
    #[default]
    Below,
}

/// Whether a new column lands left or right of the reference column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnPosition {
    Left,
    #[default]
    Right,
}

fn resolve(doc: &Document, at: &Location) -> Option<Path> {
    match at {
        Location::Cursor => doc.selection().map(|sel| sel.path.clone()),
        Location::At(path) => Some(path.clone()),
    }
}

fn find_kind<'a>(doc: &'a Document, at: &Location, kind: NodeKind) -> Option<(&'a Node, Path)> {
    let start = resolve(doc, at)?;
    doc.ancestor_matching(&start, |node| node.kind() == kind)
}

/// Nearest enclosing table of the location, with its path.
pub fn find_table<'a>(doc: &'a Document, at: &Location) -> Option<(&'a Node, Path)> {
    find_kind(doc, at, NodeKind::Table)
}

/// Nearest enclosing table row of the location, with its path.
pub fn find_table_row<'a>(doc: &'a Document, at: &Location) -> Option<(&'a Node, Path)> {
    find_kind(doc, at, NodeKind::Row)
}

/// Nearest enclosing table cell of the location, with its path. Tolerates
/// the location pointing anywhere inside the cell's nested content.
pub fn find_table_cell<'a>(doc: &'a Document, at: &Location) -> Option<(&'a Node, Path)> {
    find_kind(doc, at, NodeKind::Cell)
}

pub fn is_in_table(doc: &Document, at: &Location) -> bool {
    find_table(doc, at).is_some()
}

pub fn is_in_table_row(doc: &Document, at: &Location) -> bool {
    find_table_row(doc, at).is_some()
}

pub fn is_in_table_cell(doc: &Document, at: &Location) -> bool {
    find_table_cell(doc, at).is_some()
}

/// Insert a `rows × cols` table, each cell seeded with one empty block, and
/// place the cursor in its first cell.
///
/// Counts below 1 are clamped to 1. With an explicit location the table is
/// inserted at that path; at the cursor it lands after the cursor's
/// top-level block, or at the end of an unselected document.
pub fn insert_table(doc: &mut Document, rows: usize, cols: usize, at: &Location) {
    let rows = rows.max(1);
    let cols = cols.max(1);

    let dest = match at {
        Location::At(path) => path.clone(),
        Location::Cursor => match doc.selection() {
            Some(sel) if !sel.path.is_empty() => Path::from(vec![sel.path[0] + 1]),
            _ => Path::from(vec![doc.roots().len()]),
        },
    };

    if doc.insert_node(&dest, Node::Table(Table::grid(rows, cols))).is_err() {
        return;
    }
    select_cell_start(doc, &dest.child(0).child(0));
}

/// [`insert_table`] with the default 2×2 grid.
pub fn insert_default_table(doc: &mut Document, at: &Location) {
    insert_table(doc, DEFAULT_ROWS, DEFAULT_COLS, at);
}

/// Delete the nearest enclosing table of the location. No-op when the
/// location is not inside a table.
pub fn remove_table(doc: &mut Document, at: &Location) {
    let Some((_, table_path)) = find_table(doc, at) else {
        return;
    };
    let _ = doc.remove_node(&table_path);
}

/// Insert a new row above or below the row enclosing the location.
///
/// The new row is sized from the table's *first* row, the source of truth
/// for the column count, not from the row being split at.
pub fn insert_table_row(doc: &mut Document, at: &Location, position: RowPosition) {
    let Some((_, row_path)) = find_table_row(doc, at) else {
        return;
    };
    let Some((table, _)) = find_table(doc, at) else {
        return;
    };
    let width = match table.as_table() {
        Some(table) => table.column_count(),
        None => return,
    };
    if width == 0 {
        return;
    }
    let Some(row_index) = row_path.last() else {
        return;
    };
    let dest = match position {
        RowPosition::Above => row_path,
        RowPosition::Below => row_path.sibling(row_index + 1),
    };
    let _ = doc.insert_node(&dest, Node::Row(TableRow::with_width(width)));
}

/// Remove the row enclosing the location. Removing the only row of a table
/// deletes the whole table instead: a table never exists with zero rows.
pub fn remove_table_row(doc: &mut Document, at: &Location) {
    let Some((_, row_path)) = find_table_row(doc, at) else {
        return;
    };
    let Some((table, _)) = find_table(doc, at) else {
        return;
    };
    if table.children().len() <= 1 {
        remove_table(doc, at);
        return;
    }
    let _ = doc.remove_node(&row_path);
}

/// Insert a new column left or right of the cell enclosing the location:
/// one fresh cell per row, at the same column offset, which preserves
/// rectangularity by construction.
pub fn insert_table_column(doc: &mut Document, at: &Location, position: ColumnPosition) {
    let Some((_, cell_path)) = find_table_cell(doc, at) else {
        return;
    };
    let Some((table, table_path)) = find_table(doc, at) else {
        return;
    };
    let Some(column) = cell_path.last() else {
        return;
    };
    let row_count = table.children().len();
    let offset = match position {
        ColumnPosition::Left => column,
        ColumnPosition::Right => column + 1,
    };

    // Rows are siblings: inserting a cell into row i never shifts row i+1's
    // path, but each row path is still derived from the table's current
    // children rather than captured up front.
    for row_index in 0..row_count {
        let row_path = table_path.child(row_index);
        let Some(row) = doc.node_at(&row_path) else {
            continue;
        };
        // Clamp for rows that drifted short of the reference width.
        let index = offset.min(row.children().len());
        let _ = doc.insert_node(&row_path.child(index), Node::Cell(TableCell::empty()));
    }
}

/// Remove the column of the cell enclosing the location from every row.
/// Removing the last column deletes the whole table instead.
pub fn remove_table_column(doc: &mut Document, at: &Location) {
    let Some((_, cell_path)) = find_table_cell(doc, at) else {
        return;
    };
    let Some((table, table_path)) = find_table(doc, at) else {
        return;
    };
    let Some(column) = cell_path.last() else {
        return;
    };
    let width = match table.as_table() {
        Some(table) => table.column_count(),
        None => return,
    };
    if width <= 1 {
        remove_table(doc, at);
        return;
    }
    let row_count = table.children().len();

    for row_index in 0..row_count {
        let row_path = table_path.child(row_index);
        let Some(row) = doc.node_at(&row_path) else {
            continue;
        };
        // Rows shorter than the target column are left alone.
        if column < row.children().len() {
            let _ = doc.remove_node(&row_path.child(column));
        }
    }
}

/// Move the cursor to the next cell, wrapping to the first cell of the next
/// row at the end of a row. At the last cell of the table the cursor does
/// not move.
pub fn move_to_next_cell(doc: &mut Document, at: &Location) {
    let Some((row, column, grid)) = locate_in_grid(doc, at) else {
        return;
    };
    let target = if column + 1 < grid.row_width(row) {
        Some((row, column + 1))
    } else if row + 1 < grid.row_count {
        Some((row + 1, 0))
    } else {
        None
    };
    if let Some((row, column)) = target {
        select_cell_start(doc, &grid.cell_path(row, column));
    }
}

/// Move the cursor to the previous cell, wrapping to the last cell of the
/// previous row at the start of a row. At the first cell of the table the
/// cursor does not move.
pub fn move_to_previous_cell(doc: &mut Document, at: &Location) {
    let Some((row, column, grid)) = locate_in_grid(doc, at) else {
        return;
    };
    let target = if column > 0 {
        Some((row, column - 1))
    } else if row > 0 {
        let width = grid.row_width(row - 1);
        if width == 0 {
            None
        } else {
            Some((row - 1, width - 1))
        }
    } else {
        None
    };
    if let Some((row, column)) = target {
        select_cell_start(doc, &grid.cell_path(row, column));
    }
}

/// Snapshot of a table's shape, valid only until the next mutation.
pub(crate) struct GridPosition {
    pub table_path: Path,
    pub row_count: usize,
    row_widths: Vec<usize>,
}

impl GridPosition {
    pub fn row_width(&self, row: usize) -> usize {
        self.row_widths.get(row).copied().unwrap_or(0)
    }

    pub fn cell_path(&self, row: usize, column: usize) -> Path {
        self.table_path.child(row).child(column)
    }
}

/// Resolve the location to `(row, column)` coordinates within its enclosing
/// table, plus the table's current shape.
pub(crate) fn locate_in_grid(doc: &Document, at: &Location) -> Option<(usize, usize, GridPosition)> {
    let (_, cell_path) = find_table_cell(doc, at)?;
    let (table, table_path) = find_table(doc, at)?;
    // Cells of this engine's tables sit exactly two levels below the table.
    if cell_path.len() != table_path.len() + 2 || !cell_path.starts_with(&table_path) {
        return None;
    }
    let row = cell_path[table_path.len()];
    let column = cell_path[table_path.len() + 1];
    let grid = GridPosition {
        table_path,
        row_count: table.children().len(),
        row_widths: table
            .children()
            .iter()
            .map(|row| row.children().len())
            .collect(),
    };
    Some((row, column, grid))
}

/// Put the cursor at offset 0 of a cell's content: its first block when one
/// exists, the cell node itself otherwise.
pub(crate) fn select_cell_start(doc: &mut Document, cell_path: &Path) {
    let target = match doc.node_at(cell_path) {
        Some(cell) if !cell.children().is_empty() => cell_path.child(0),
        Some(_) => cell_path.clone(),
        None => return,
    };
    doc.select(target, 0);
}
