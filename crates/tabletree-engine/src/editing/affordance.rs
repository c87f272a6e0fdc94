//! Per-table deletion-affordance state.
//!
//! While a table is on screen its gutters expose "arm then confirm" delete
//! controls. This state records which row/column/cell currently has a delete
//! armed, and which cells carry the transient selected mark that goes with
//! it. One value per mounted table, owned by the presentation scope; it is
//! never part of the document tree and arming never mutates structure.

use crate::editing::document::Document;
use crate::editing::tables::{
    Location, find_table, remove_table, remove_table_column, remove_table_row,
};
use crate::models::Node;

/// What the pending delete is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmedTarget {
    /// A whole row, armed from the row gutter.
    Row(usize),
    /// A whole column, armed from the column gutter.
    Column(usize),
    /// A single cell.
    Cell { row: usize, column: usize },
    /// The whole table, armed from the corner control.
    Table,
}

/// Ephemeral armed-for-deletion state of one table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AffordanceState {
    armed: Option<ArmedTarget>,
}

impl AffordanceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn armed(&self) -> Option<&ArmedTarget> {
        self.armed.as_ref()
    }

    /// Row index of the armed target, when one is row-specific.
    pub fn row_index(&self) -> Option<usize> {
        match self.armed {
            Some(ArmedTarget::Row(row)) | Some(ArmedTarget::Cell { row, .. }) => Some(row),
            _ => None,
        }
    }

    /// Column index of the armed target as gutter UIs expect it: `-1` stands
    /// for the whole table armed via the corner control.
    pub fn column_index(&self) -> Option<i64> {
        match self.armed {
            Some(ArmedTarget::Column(column)) | Some(ArmedTarget::Cell { column, .. }) => {
                Some(column as i64)
            }
            Some(ArmedTarget::Table) => Some(-1),
            _ => None,
        }
    }

    /// Row-gutter click: arm the whole row.
    pub fn arm_row(&mut self, row: usize) {
        self.armed = Some(ArmedTarget::Row(row));
    }

    /// Column-gutter click: arm the whole column.
    pub fn arm_column(&mut self, column: usize) {
        self.armed = Some(ArmedTarget::Column(column));
    }

    /// Arm a single cell.
    pub fn arm_cell(&mut self, row: usize, column: usize) {
        self.armed = Some(ArmedTarget::Cell { row, column });
    }

    /// Corner-control click: arm the whole table.
    pub fn arm_table(&mut self) {
        self.armed = Some(ArmedTarget::Table);
    }

    pub fn clear(&mut self) {
        self.armed = None;
    }

    /// The transient display marks implied by the armed target: grid
    /// coordinates of every cell that should render as selected. Derived
    /// from the table's current shape, so it never goes stale and marks
    /// nothing structural.
    pub fn selected_cells(&self, table: &Node) -> Vec<(usize, usize)> {
        let rows = table.children();
        let row_width = |row: usize| rows.get(row).map(|r| r.children().len()).unwrap_or(0);
        match self.armed {
            None => Vec::new(),
            Some(ArmedTarget::Row(row)) => (0..row_width(row)).map(|col| (row, col)).collect(),
            Some(ArmedTarget::Column(column)) => (0..rows.len())
                .filter(|&row| column < row_width(row))
                .map(|row| (row, column))
                .collect(),
            Some(ArmedTarget::Cell { row, column }) => {
                if column < row_width(row) {
                    vec![(row, column)]
                } else {
                    Vec::new()
                }
            }
            Some(ArmedTarget::Table) => (0..rows.len())
                .flat_map(|row| (0..row_width(row)).map(move |col| (row, col)))
                .collect(),
        }
    }

    /// Delete-control click: perform the structural removal the armed target
    /// calls for (with the usual last-row/last-column cascade to whole-table
    /// deletion), then disarm. `at` locates the table this state belongs to.
    ///
    /// A cell-armed state has no structural delete of its own; confirming it
    /// only disarms.
    pub fn confirm(&mut self, doc: &mut Document, at: &Location) {
        let Some(target) = self.armed.take() else {
            return;
        };
        let Some((_, table_path)) = find_table(doc, at) else {
            return;
        };
        match target {
            ArmedTarget::Row(row) => {
                remove_table_row(doc, &Location::At(table_path.child(row)));
            }
            ArmedTarget::Column(column) => {
                remove_table_column(doc, &Location::At(table_path.child(0).child(column)));
            }
            ArmedTarget::Cell { .. } => {}
            ArmedTarget::Table => {
                remove_table(doc, &Location::At(table_path));
            }
        }
    }

    /// Document-level click capture. The caller decides containment against
    /// the table's own subtree (controls included); a click landing outside
    /// clears the armed state and with it the transient selection marks.
    pub fn handle_document_click(&mut self, click_inside_table: bool) {
        if !click_inside_table {
            self.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Path, Table, TableRow};
    use pretty_assertions::assert_eq;

    fn table_node(rows: usize, cols: usize) -> Node {
        Node::Table(Table::grid(rows, cols))
    }

    #[test]
    fn row_gutter_arms_row_and_marks_its_cells() {
        let table = table_node(3, 2);
        let mut state = AffordanceState::new();

        state.arm_row(1);

        assert_eq!(state.row_index(), Some(1));
        assert_eq!(state.column_index(), None);
        assert_eq!(state.selected_cells(&table), vec![(1, 0), (1, 1)]);
    }

    #[test]
    fn column_gutter_arms_column_down_every_row() {
        let table = table_node(3, 2);
        let mut state = AffordanceState::new();

        state.arm_column(0);

        assert_eq!(state.row_index(), None);
        assert_eq!(state.column_index(), Some(0));
        assert_eq!(state.selected_cells(&table), vec![(0, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn corner_control_arms_whole_table() {
        let table = table_node(2, 2);
        let mut state = AffordanceState::new();

        state.arm_table();

        assert_eq!(state.column_index(), Some(-1));
        assert_eq!(
            state.selected_cells(&table),
            vec![(0, 0), (0, 1), (1, 0), (1, 1)]
        );
    }

    #[test]
    fn arming_a_cell_sets_both_indices() {
        let table = table_node(2, 2);
        let mut state = AffordanceState::new();

        state.arm_cell(1, 0);

        assert_eq!(state.row_index(), Some(1));
        assert_eq!(state.column_index(), Some(0));
        assert_eq!(state.selected_cells(&table), vec![(1, 0)]);
    }

    #[test]
    fn rearming_replaces_the_target() {
        let mut state = AffordanceState::new();

        state.arm_row(0);
        state.arm_column(1);

        assert_eq!(state.armed(), Some(&ArmedTarget::Column(1)));
        assert_eq!(state.row_index(), None);
    }

    #[test]
    fn outside_click_clears_inside_click_does_not() {
        let mut state = AffordanceState::new();
        state.arm_row(2);

        state.handle_document_click(true);
        assert!(state.is_armed());

        state.handle_document_click(false);
        assert!(!state.is_armed());
        assert_eq!(state.selected_cells(&table_node(3, 3)), Vec::new());
    }

    #[test]
    fn confirm_removes_armed_row_and_disarms() {
        let mut doc = Document::with_roots(vec![table_node(3, 2)]);
        let mut state = AffordanceState::new();
        state.arm_row(1);

        state.confirm(&mut doc, &Location::At(Path::from([0])));

        assert_eq!(doc.roots()[0].children().len(), 2);
        assert!(!state.is_armed());
    }

    #[test]
    fn confirm_on_last_column_cascades_to_table_removal() {
        let mut doc = Document::with_roots(vec![table_node(3, 1)]);
        let mut state = AffordanceState::new();
        state.arm_column(0);

        state.confirm(&mut doc, &Location::At(Path::from([0])));

        assert!(doc.is_empty());
        assert!(!state.is_armed());
    }

    #[test]
    fn confirm_whole_table_removes_it() {
        let mut doc = Document::with_roots(vec![table_node(2, 2)]);
        let mut state = AffordanceState::new();
        state.arm_table();

        state.confirm(&mut doc, &Location::At(Path::from([0, 1, 1])));

        assert!(doc.is_empty());
    }

    #[test]
    fn confirm_armed_cell_only_disarms() {
        let mut doc = Document::with_roots(vec![table_node(2, 2)]);
        let mut state = AffordanceState::new();
        state.arm_cell(0, 1);

        state.confirm(&mut doc, &Location::At(Path::from([0])));

        assert_eq!(doc.roots().len(), 1);
        assert!(!state.is_armed());
    }

    #[test]
    fn selected_cells_tolerate_ragged_rows() {
        let table = Node::Table(Table::with_rows(vec![
            TableRow::with_width(3),
            TableRow::with_width(1),
        ]));
        let mut state = AffordanceState::new();

        state.arm_column(2);

        assert_eq!(state.selected_cells(&table), vec![(0, 2)]);
    }
}
