use thiserror::Error;

use crate::models::{Node, Path};

/// Errors surfaced by the structural transform primitives.
///
/// These stay inside the engine: the public table operations in
/// [`crate::editing::tables`] resolve their own preconditions first and
/// degrade to no-ops, so callers never see an `EditError` from them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("no node exists at path {0}")]
    InvalidPath(Path),
    #[error("node at path {0} cannot contain children")]
    NotAContainer(Path),
}

/// Cursor anchored at a path with a character offset inside that node's
/// content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorPosition {
    pub path: Path,
    pub offset: usize,
}

/// In-memory host editor handle.
///
/// Owns the document tree, the cursor, and a version counter bumped on each
/// structural mutation (enables change detection by the host). Exposes the
/// primitive operations everything in [`crate::editing::tables`] builds on:
/// path dereference, ancestor lookup, single-node insert/remove, and cursor
/// placement.
///
/// The insert/remove primitives transform the stored selection through the
/// edit: the cursor follows its node when later siblings shift, and
/// collapses to the nearest surviving neighbor when its own subtree is
/// removed. That keeps the selection a valid path at every stable point
/// without the table operations having to reason about it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    roots: Vec<Node>,
    selection: Option<CursorPosition>,
    version: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roots(roots: Vec<Node>) -> Self {
        Self {
            roots,
            ..Self::default()
        }
    }

    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Version counter, incremented on every structural mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Dereference a path. The empty path addresses the document itself,
    /// which is not a node, so it resolves to `None`.
    pub fn node_at(&self, path: &Path) -> Option<&Node> {
        let mut indices = path.indices().iter().copied();
        let mut node = self.roots.get(indices.next()?)?;
        for index in indices {
            node = node.children().get(index)?;
        }
        Some(node)
    }

    /// Mutable dereference, for property bookkeeping on existing nodes.
    pub fn node_at_mut(&mut self, path: &Path) -> Option<&mut Node> {
        let mut indices = path.indices().iter().copied();
        let mut node = self.roots.get_mut(indices.next()?)?;
        for index in indices {
            node = node.children_mut()?.get_mut(index)?;
        }
        Some(node)
    }

    /// Existence probe used before dereferencing.
    pub fn has_path(&self, path: &Path) -> bool {
        self.node_at(path).is_some()
    }

    /// Nearest enclosing node satisfying `pred`, starting from `at` and
    /// walking toward the root. The node at `at` itself is considered first,
    /// so a path pointing directly at a cell finds that cell.
    ///
    /// Prefixes that no longer dereference (stale or malformed paths) are
    /// skipped rather than treated as errors.
    pub fn ancestor_matching<F>(&self, at: &Path, pred: F) -> Option<(&Node, Path)>
    where
        F: Fn(&Node) -> bool,
    {
        for depth in (1..=at.len()).rev() {
            let prefix = at.truncate(depth);
            let Some(node) = self.node_at(&prefix) else {
                continue;
            };
            if pred(node) {
                return Some((node, prefix));
            }
        }
        None
    }

    /// Insert `node` so that it ends up addressed by `at`. The parent must
    /// exist and the final index may be at most the parent's child count.
    pub fn insert_node(&mut self, at: &Path, node: Node) -> Result<(), EditError> {
        let (parent, index) = match (at.parent(), at.last()) {
            (Some(parent), Some(index)) => (parent, index),
            _ => return Err(EditError::InvalidPath(at.clone())),
        };
        let children = self.container_mut(&parent)?;
        if index > children.len() {
            return Err(EditError::InvalidPath(at.clone()));
        }
        children.insert(index, node);
        self.shift_selection_for_insert(at);
        self.version += 1;
        Ok(())
    }

    /// Remove and return the node addressed by `at`.
    pub fn remove_node(&mut self, at: &Path) -> Result<Node, EditError> {
        let (parent, index) = match (at.parent(), at.last()) {
            (Some(parent), Some(index)) => (parent, index),
            _ => return Err(EditError::InvalidPath(at.clone())),
        };
        let children = self.container_mut(&parent)?;
        if index >= children.len() {
            return Err(EditError::InvalidPath(at.clone()));
        }
        let removed = children.remove(index);
        self.shift_selection_for_remove(at);
        self.version += 1;
        Ok(removed)
    }

    /// Place the cursor at `offset` within the node at `path`.
    pub fn select(&mut self, path: Path, offset: usize) {
        self.selection = Some(CursorPosition { path, offset });
    }

    pub fn deselect(&mut self) {
        self.selection = None;
    }

    pub fn selection(&self) -> Option<&CursorPosition> {
        self.selection.as_ref()
    }

    /// Child vector of the node at `parent`; the empty path addresses the
    /// document root sequence.
    fn container_mut(&mut self, parent: &Path) -> Result<&mut Vec<Node>, EditError> {
        if parent.is_root() {
            return Ok(&mut self.roots);
        }
        let node = self
            .node_at_mut(parent)
            .ok_or_else(|| EditError::InvalidPath(parent.clone()))?;
        node.children_mut()
            .ok_or_else(|| EditError::NotAContainer(parent.clone()))
    }

    /// Shift the cursor right by one sibling when a node is inserted at or
    /// before it under the same parent.
    fn shift_selection_for_insert(&mut self, inserted: &Path) {
        let Some(sel) = self.selection.as_mut() else {
            return;
        };
        let depth = inserted.len();
        if sel.path.len() < depth {
            return;
        }
        let same_parent = sel.path.truncate(depth - 1) == inserted.truncate(depth - 1);
        if same_parent && sel.path[depth - 1] >= inserted[depth - 1] {
            let mut indices = sel.path.indices().to_vec();
            indices[depth - 1] += 1;
            sel.path = Path::new(indices);
        }
    }

    /// Transform the cursor through a removal: collapse it to the nearest
    /// surviving neighbor when its own subtree was removed, otherwise shift
    /// it left past the removed sibling.
    fn shift_selection_for_remove(&mut self, removed: &Path) {
        let Some(sel) = self.selection.as_ref() else {
            return;
        };
        if sel.path.starts_with(removed) {
            self.selection = self.collapse_to_neighbor(removed);
            return;
        }
        let depth = removed.len();
        if sel.path.len() < depth {
            return;
        }
        let same_parent = sel.path.truncate(depth - 1) == removed.truncate(depth - 1);
        if same_parent && sel.path[depth - 1] > removed[depth - 1] {
            let mut indices = sel.path.indices().to_vec();
            indices[depth - 1] -= 1;
            let offset = sel.offset;
            self.selection = Some(CursorPosition {
                path: Path::new(indices),
                offset,
            });
        }
    }

    /// Cursor position replacing one that pointed into a removed subtree:
    /// the node now occupying the removed slot, else the previous sibling,
    /// else the parent; descended to its first leaf, at offset 0. `None`
    /// when nothing around the removal site survives.
    fn collapse_to_neighbor(&self, removed: &Path) -> Option<CursorPosition> {
        let candidate = if self.has_path(removed) {
            removed.clone()
        } else if let Some(prev) = removed
            .last()
            .filter(|&index| index > 0)
            .map(|index| removed.sibling(index - 1))
            .filter(|prev| self.has_path(prev))
        {
            prev
        } else {
            let parent = removed.parent()?;
            if parent.is_root() || !self.has_path(&parent) {
                return None;
            }
            parent
        };
        Some(CursorPosition {
            path: self.descend_to_first_leaf(candidate),
            offset: 0,
        })
    }

    /// Extend a path downward along first children until it hits a leaf, so
    /// a collapsed cursor lands on content rather than a container.
    fn descend_to_first_leaf(&self, mut path: Path) -> Path {
        while let Some(node) = self.node_at(&path) {
            if node.children().is_empty() {
                break;
            }
            path = path.child(0);
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Block, NodeKind, Table};
    use pretty_assertions::assert_eq;

    fn doc_with_table(rows: usize, cols: usize) -> Document {
        Document::with_roots(vec![Node::Table(Table::grid(rows, cols))])
    }

    #[test]
    fn node_at_walks_nested_children() {
        let doc = doc_with_table(2, 3);

        let cell = doc.node_at(&Path::from([0, 1, 2])).unwrap();
        assert_eq!(cell.kind(), NodeKind::Cell);

        let block = doc.node_at(&Path::from([0, 1, 2, 0])).unwrap();
        assert_eq!(block.kind(), NodeKind::Block);

        assert_eq!(doc.node_at(&Path::from([0, 2])), None);
        assert_eq!(doc.node_at(&Path::root()), None);
    }

    #[test]
    fn ancestor_matching_finds_nearest_kind() {
        let doc = doc_with_table(2, 2);

        // Start from deep inside a cell's content.
        let at = Path::from([0, 1, 0, 0]);
        let (node, path) = doc
            .ancestor_matching(&at, |n| n.kind() == NodeKind::Row)
            .unwrap();
        assert_eq!(node.kind(), NodeKind::Row);
        assert_eq!(path, Path::from([0, 1]));

        // A path pointing directly at the cell still finds the cell.
        let at = Path::from([0, 1, 0]);
        let (_, path) = doc
            .ancestor_matching(&at, |n| n.kind() == NodeKind::Cell)
            .unwrap();
        assert_eq!(path, Path::from([0, 1, 0]));

        assert!(
            doc.ancestor_matching(&Path::from([0, 0, 0]), |n| n.kind() == NodeKind::Block)
                .is_none()
        );
    }

    #[test]
    fn ancestor_matching_tolerates_stale_paths() {
        let doc = doc_with_table(1, 1);

        // Deeper than anything in the tree: shallow prefixes still resolve.
        let at = Path::from([0, 0, 0, 0, 7, 3]);
        let (_, path) = doc
            .ancestor_matching(&at, |n| n.kind() == NodeKind::Table)
            .unwrap();
        assert_eq!(path, Path::from([0]));
    }

    #[test]
    fn insert_and_remove_bump_version() {
        let mut doc = Document::new();
        assert_eq!(doc.version(), 0);

        doc.insert_node(&Path::from([0]), Node::Block(Block::new("a")))
            .unwrap();
        assert_eq!(doc.version(), 1);
        assert_eq!(doc.roots().len(), 1);

        let removed = doc.remove_node(&Path::from([0])).unwrap();
        assert_eq!(removed, Node::Block(Block::new("a")));
        assert_eq!(doc.version(), 2);
        assert!(doc.is_empty());
    }

    #[test]
    fn insert_rejects_invalid_paths() {
        let mut doc = Document::new();

        let err = doc
            .insert_node(&Path::from([3]), Node::Block(Block::empty()))
            .unwrap_err();
        assert_eq!(err, EditError::InvalidPath(Path::from([3])));

        let err = doc
            .insert_node(&Path::root(), Node::Block(Block::empty()))
            .unwrap_err();
        assert_eq!(err, EditError::InvalidPath(Path::root()));
    }

    #[test]
    fn insert_rejects_children_under_blocks() {
        let mut doc = Document::with_roots(vec![Node::Block(Block::new("leaf"))]);

        let err = doc
            .insert_node(&Path::from([0, 0]), Node::Block(Block::empty()))
            .unwrap_err();
        assert_eq!(err, EditError::NotAContainer(Path::from([0])));
    }

    #[test]
    fn selection_follows_sibling_inserts() {
        let mut doc = doc_with_table(2, 2);
        doc.select(Path::from([0, 1, 0, 0]), 0);

        // Inserting a row above the cursor's row shifts the cursor's row index.
        doc.insert_node(&Path::from([0, 0]), Node::Row(crate::models::TableRow::with_width(2)))
            .unwrap();
        assert_eq!(doc.selection().unwrap().path, Path::from([0, 2, 0, 0]));

        // Inserting after the cursor's row leaves it alone.
        doc.insert_node(&Path::from([0, 3]), Node::Row(crate::models::TableRow::with_width(2)))
            .unwrap();
        assert_eq!(doc.selection().unwrap().path, Path::from([0, 2, 0, 0]));
    }

    #[test]
    fn selection_collapses_to_surviving_neighbor() {
        let mut doc = doc_with_table(2, 2);
        doc.select(Path::from([0, 0, 1, 0]), 3);

        // The old row 1 slides into the removed slot; the cursor lands on
        // its first leaf at offset 0.
        doc.remove_node(&Path::from([0, 0])).unwrap();
        assert_eq!(
            doc.selection(),
            Some(&CursorPosition {
                path: Path::from([0, 0, 0, 0]),
                offset: 0,
            })
        );
    }

    #[test]
    fn selection_dropped_when_nothing_survives() {
        let mut doc = doc_with_table(1, 1);
        doc.select(Path::from([0, 0, 0, 0]), 0);

        doc.remove_node(&Path::from([0])).unwrap();
        assert_eq!(doc.selection(), None);
    }

    #[test]
    fn selection_falls_back_to_previous_sibling() {
        let mut doc = Document::with_roots(vec![
            Node::Block(Block::new("first")),
            Node::Block(Block::new("second")),
        ]);
        doc.select(Path::from([1]), 2);

        doc.remove_node(&Path::from([1])).unwrap();
        assert_eq!(
            doc.selection(),
            Some(&CursorPosition {
                path: Path::from([0]),
                offset: 0,
            })
        );
    }

    #[test]
    fn selection_shifts_left_past_removed_sibling() {
        let mut doc = doc_with_table(3, 2);
        doc.select(Path::from([0, 2, 0, 0]), 0);

        doc.remove_node(&Path::from([0, 0])).unwrap();
        assert_eq!(doc.selection().unwrap().path, Path::from([0, 1, 0, 0]));
    }
}
