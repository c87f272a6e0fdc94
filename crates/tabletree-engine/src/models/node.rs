use serde::{Deserialize, Serialize};

/// Discriminant for the node kinds this engine operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Table,
    Row,
    Cell,
    Block,
}

/// Horizontal alignment carried on a cell. Pass-through bookkeeping only;
/// the engine never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellAlign {
    Left,
    Center,
    Right,
}

/// A tagged node in the document tree.
///
/// Tables contain rows, rows contain cells, cells contain opaque block
/// content. The engine addresses nodes purely by position (see
/// [`Path`](crate::models::Path)), so children are stored as a uniform
/// sequence on every container variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Table(Table),
    Row(TableRow),
    Cell(TableCell),
    Block(Block),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Table(_) => NodeKind::Table,
            Node::Row(_) => NodeKind::Row,
            Node::Cell(_) => NodeKind::Cell,
            Node::Block(_) => NodeKind::Block,
        }
    }

    /// Child sequence of this node. Blocks are leaves as far as this engine
    /// is concerned: their content is counted and relocated, never entered.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Table(table) => &table.children,
            Node::Row(row) => &row.children,
            Node::Cell(cell) => &cell.children,
            Node::Block(_) => &[],
        }
    }

    /// Mutable child sequence, or `None` for leaf nodes.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Table(table) => Some(&mut table.children),
            Node::Row(row) => Some(&mut row.children),
            Node::Cell(cell) => Some(&mut cell.children),
            Node::Block(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Node::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_row(&self) -> Option<&TableRow> {
        match self {
            Node::Row(row) => Some(row),
            _ => None,
        }
    }

    pub fn as_cell(&self) -> Option<&TableCell> {
        match self {
            Node::Cell(cell) => Some(cell),
            _ => None,
        }
    }
}

/// A table node. Children are rows by convention.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    pub children: Vec<Node>,
}

impl Table {
    pub fn with_rows(rows: Vec<TableRow>) -> Self {
        Self {
            children: rows.into_iter().map(Node::Row).collect(),
        }
    }

    /// Build a `rows × cols` grid, each cell seeded with one empty block.
    pub fn grid(rows: usize, cols: usize) -> Self {
        Self::with_rows((0..rows).map(|_| TableRow::with_width(cols)).collect())
    }

    pub fn row_count(&self) -> usize {
        self.children.len()
    }

    /// Cell count of the first row: the source of truth for the table's
    /// column count when sizing new rows and columns.
    pub fn column_count(&self) -> usize {
        self.children
            .first()
            .map(|row| row.children().len())
            .unwrap_or(0)
    }
}

/// A table row node. Children are cells by convention.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableRow {
    pub children: Vec<Node>,
}

impl TableRow {
    pub fn with_cells(cells: Vec<TableCell>) -> Self {
        Self {
            children: cells.into_iter().map(Node::Cell).collect(),
        }
    }

    /// Build a row of `width` freshly seeded cells.
    pub fn with_width(width: usize) -> Self {
        Self::with_cells((0..width).map(|_| TableCell::empty()).collect())
    }
}

/// A table cell. Span/alignment/width properties are carried verbatim for
/// the host's benefit; the engine only reads `children`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableCell {
    pub row_span: Option<u32>,
    pub col_span: Option<u32>,
    pub align: Option<CellAlign>,
    pub width: Option<u32>,
    pub hidden: bool,
    pub children: Vec<Node>,
}

impl TableCell {
    /// A cell containing a single empty block, the seed content of every
    /// freshly inserted cell.
    pub fn empty() -> Self {
        Self::with_children(vec![Node::Block(Block::empty())])
    }

    pub fn with_children(children: Vec<Node>) -> Self {
        Self {
            children,
            ..Self::default()
        }
    }
}

/// Opaque block content inside a cell (a paragraph, in the simplest case).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    pub text: String,
}

impl Block {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}
