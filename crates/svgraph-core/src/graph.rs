//! The extracted graph model.
//!
//! A [`Graph`] holds the nodes found in a diagram (one per labeled text
//! element, in document order) and the directed edges resolved between them.
//! Serializing a graph yields the external contract consumed by callers:
//!
//! ```json
//! {
//!   "nodes": [{ "id": "client", "label": "Client" }],
//!   "edges": [{ "source": "client", "target": "server" }]
//! }
//! ```
//!
//! Node anchors are an extraction detail and are not serialized.

use serde::Serialize;

use crate::geometry::Point;

/// One labeled diagram element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    id: String,
    label: String,
    #[serde(skip)]
    anchor: Point,
}

impl Node {
    /// Creates a node.
    ///
    /// # Arguments
    ///
    /// * `id` - Identifier derived from the label, or a fallback token.
    /// * `label` - The trimmed visible text.
    /// * `anchor` - Representative point of the node's visual shape.
    pub fn new(id: impl Into<String>, label: impl Into<String>, anchor: Point) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            anchor,
        }
    }

    /// Returns the node identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the visible label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the anchor point used for nearest-node matching
    pub fn anchor(&self) -> Point {
        self.anchor
    }
}

/// A directed connection between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    source: String,
    target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Nodes and edges extracted from one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Creates a graph from already resolved nodes and edges.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Returns the nodes in document order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the deduplicated edges
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns true when neither nodes nor edges were extracted
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
