//! Node identity and annotation side tables.
//!
//! Trees are never mutated after construction. Passes that need to attach
//! information to nodes (resolved types, inferred effects) record it in a
//! `SideTable` keyed by `NodePath`, the node's position under a root.

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use crate::node::Node;

/// Child indices leading from a root to a node, as numbered by
/// `Node::children`. The empty path is the root itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    /// The path of this node's `index`-th child.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl Display for NodePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

impl Node {
    /// Look up a descendant by path.
    pub fn at(&self, path: &NodePath) -> Option<&Node> {
        path.indices()
            .iter()
            .try_fold(self, |node, &index| node.children().get(index).copied())
    }
}

/// Every node under `root` with its path, in pre-order.
///
/// Functions of an interface implementation are not nodes and get no path
/// of their own: their body nodes are numbered as direct children of the
/// implementation, one function after another. Annotations about such a
/// function are keyed by the implementation's path.
pub fn node_paths(root: &Node) -> Vec<(NodePath, &Node)> {
    fn collect<'a>(node: &'a Node, path: NodePath, out: &mut Vec<(NodePath, &'a Node)>) {
        let children = node.children();
        out.push((path.clone(), node));
        for (index, child) in children.into_iter().enumerate() {
            collect(child, path.child(index), out);
        }
    }

    let mut out = Vec::new();
    collect(root, NodePath::root(), &mut out);
    out
}

/// Builder for a `SideTable`.
#[derive(Debug)]
pub struct SideTableBuilder<T> {
    entries: HashMap<NodePath, T>,
}

impl<T> Default for SideTableBuilder<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> SideTableBuilder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value for a node, returning the previous one.
    pub fn insert(&mut self, path: NodePath, value: T) -> Option<T> {
        self.entries.insert(path, value)
    }

    pub fn finish(self) -> SideTable<T> {
        SideTable(Arc::new(self.entries))
    }
}

/// Immutable `NodePath → T` annotations for one tree.
///
/// Cloning is cheap and the table can be shared between threads when `T` can.
#[derive(Debug)]
pub struct SideTable<T>(Arc<HashMap<NodePath, T>>);

impl<T> Clone for SideTable<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> SideTable<T> {
    pub fn get(&self, path: &NodePath) -> Option<&T> {
        self.0.get(path)
    }

    pub fn contains(&self, path: &NodePath) -> bool {
        self.0.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
