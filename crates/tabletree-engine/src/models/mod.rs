//! Path-addressed document tree model.
//!
//! Defines the node kinds the engine operates on (tables, rows, cells,
//! opaque blocks) and the positional [`Path`] addressing convention shared
//! by every operation in [`crate::editing`].

mod node;
mod path;

pub use node::{Block, CellAlign, Node, NodeKind, Table, TableCell, TableRow};
pub use path::Path;
