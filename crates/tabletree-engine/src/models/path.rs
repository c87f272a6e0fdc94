use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

/// Positional address of a node: the sequence of child indices leading from
/// the tree root to the node.
///
/// Paths are **not stable handles**. Any structural mutation at or before a
/// given depth shifts the indices of later siblings and their descendants,
/// so a path is only trustworthy between the lookup that produced it and the
/// next mutation. Operations re-derive paths through the `find_*` lookups
/// instead of caching them across edits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Path(Vec<usize>);

impl Path {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// The root path (empty index sequence).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Index of the node among its siblings, `None` for the root.
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Path of the parent node, `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        if self.0.is_empty() {
            return None;
        }
        Some(Path(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Path of the `index`-th child of this node.
    pub fn child(&self, index: usize) -> Path {
        let mut indices = self.0.clone();
        indices.push(index);
        Path(indices)
    }

    /// Path of the sibling at `index` (same parent, different last step).
    /// Returns the root path unchanged when called on the root.
    pub fn sibling(&self, index: usize) -> Path {
        match self.parent() {
            Some(parent) => parent.child(index),
            None => self.clone(),
        }
    }

    /// Whether `prefix` addresses this node or one of its ancestors.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }

    pub fn truncate(&self, depth: usize) -> Path {
        Path(self.0[..depth.min(self.0.len())].to_vec())
    }

    pub fn get(&self, depth: usize) -> Option<usize> {
        self.0.get(depth).copied()
    }
}

impl Index<usize> for Path {
    type Output = usize;

    fn index(&self, depth: usize) -> &usize {
        &self.0[depth]
    }
}

impl From<Vec<usize>> for Path {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl<const N: usize> From<[usize; N]> for Path {
    fn from(indices: [usize; N]) -> Self {
        Self(indices.to_vec())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{index}")?;
        }
        write!(f, "]")
    }
}
