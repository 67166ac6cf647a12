use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Yellow,
    Purple,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub price: f64,
    pub strength: f64,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

impl Node {
    pub const fn new(price: f64, strength: f64, kind: NodeKind) -> Self {
        Self {
            price,
            strength,
            kind,
        }
    }
}

const FALLBACK_NODES: [Node; 5] = [
    Node::new(220.5, 9.2, NodeKind::Yellow),
    Node::new(225.1, -12.4, NodeKind::Purple),
    Node::new(230.3, 6.1, NodeKind::Yellow),
    Node::new(235.7, -8.7, NodeKind::Purple),
    Node::new(240.2, 11.0, NodeKind::Yellow),
];

/// Ordered, non-empty sequence of nodes produced by one load.
///
/// The last node stands for the latest price. A set is never edited in
/// place; each load builds a new one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NodeSet {
    nodes: Vec<Node>,
}

impl NodeSet {
    pub fn new(nodes: Vec<Node>) -> Result<Self> {
        if nodes.is_empty() {
            return Err(Error::EmptyNodeSet);
        }
        Ok(Self { nodes })
    }

    pub fn fallback() -> Self {
        Self {
            nodes: FALLBACK_NODES.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    pub fn as_slice(&self) -> &[Node] {
        &self.nodes
    }

    pub fn latest(&self) -> &Node {
        &self.nodes[self.nodes.len() - 1]
    }

    /// `(min, max)` over node prices.
    pub fn price_bounds(&self) -> (f64, f64) {
        self.nodes.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), n| {
            (lo.min(n.price), hi.max(n.price))
        })
    }
}

impl<'a> IntoIterator for &'a NodeSet {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
