//! Generic traversal over syntax trees.
//!
//! Implement `Visitor` and override the hooks you care about; the default
//! methods keep descending, so calling `walk_node` from an override resumes
//! the traversal.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::decl::FunctionDefinition;
use crate::node::{Node, NodeKind};

pub trait Visitor {
    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node);
    }

    /// Called for each function of an interface implementation, which is
    /// a function definition but not a standalone `Node`.
    fn visit_impl_function(&mut self, function: &FunctionDefinition) {
        walk_body(self, &function.body);
    }
}

/// Visit every child of `node`.
pub fn walk_node<V: Visitor + ?Sized>(visitor: &mut V, node: &Node) {
    match node {
        Node::InterfaceImplementation(imp) => {
            for function in &imp.functions {
                visitor.visit_impl_function(function);
            }
        }
        _ => {
            for child in node.children() {
                visitor.visit_node(child);
            }
        }
    }
}

pub fn walk_body<V: Visitor + ?Sized>(visitor: &mut V, body: &[Node]) {
    for node in body {
        visitor.visit_node(node);
    }
}

/// Number of nodes of each kind in a tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, salsa::Update)]
pub struct KindCensus {
    counts: BTreeMap<NodeKind, usize>,
}

impl KindCensus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: NodeKind) {
        *self.counts.entry(kind).or_default() += 1;
    }

    pub fn count(&self, kind: NodeKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Kinds that occur at least once, in `NodeKind` order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeKind, usize)> + '_ {
        self.counts.iter().map(|(kind, count)| (*kind, *count))
    }
}

impl Visitor for KindCensus {
    fn visit_node(&mut self, node: &Node) {
        self.record(node.kind());
        walk_node(self, node);
    }

    fn visit_impl_function(&mut self, function: &FunctionDefinition) {
        self.record(NodeKind::FunctionDefinition);
        walk_body(self, &function.body);
    }
}

impl Display for KindCensus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, (kind, count)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{kind}: {count}")?;
        }
        Ok(())
    }
}

/// Count the nodes of `root` and all its descendants by kind.
pub fn census(root: &Node) -> KindCensus {
    census_all(std::slice::from_ref(root))
}

pub fn census_all(roots: &[Node]) -> KindCensus {
    let mut census = KindCensus::new();
    walk_body(&mut census, roots);
    census
}
