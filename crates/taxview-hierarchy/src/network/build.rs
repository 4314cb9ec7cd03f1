//! Graph construction from validated edges.
//!
//! ## Edge Direction
//!
//! An edge `A → B` means "B is a child of A": the parent in a presentation
//! network, the summation total in a calculation network, the assertion or
//! variable set in a formula network.
//!
//! ## Identity
//!
//! Concept networks key nodes by their emitted identifier: `a:X` and `b:X`
//! are one node `X` in a network named by local name. The formula network
//! keys nodes by [`ObjectId`], so two resources that share a label stay two
//! nodes. See [`NodeIdentity`].
//!
//! ## Fingerprint
//!
//! The network carries a BLAKE3 hash of its edge list in input order. Equal
//! hashes mean equal input, so two runs over the same snapshot can be
//! compared without diffing the output trees.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use taxview_core::arcrole::NetworkKind;
use taxview_core::model::{ArcAttributes, ObjectId};
use tracing::{instrument, trace};

use crate::edge::{Edge, Endpoint};

// ---------------------------------------------------------------------------
// RawNetwork
// ---------------------------------------------------------------------------

/// What makes two endpoints the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeIdentity {
    /// One node per model object.
    Object,
    /// One node per identifier; the first object seen stands for it.
    Name,
}

impl NodeIdentity {
    #[must_use]
    pub const fn for_network(kind: NetworkKind) -> Self {
        match kind {
            NetworkKind::Formula => Self::Object,
            NetworkKind::Presentation | NetworkKind::Calculation | NetworkKind::Dimensional => {
                Self::Name
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum NodeKey {
    Object(ObjectId),
    Name(String),
}

/// Node payload: the object behind the node and its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeData {
    pub object: ObjectId,
    pub name: String,
    pub is_abstract: bool,
}

impl From<&Endpoint> for NodeData {
    fn from(endpoint: &Endpoint) -> Self {
        Self {
            object: endpoint.object,
            name: endpoint.name.clone(),
            is_abstract: endpoint.is_abstract,
        }
    }
}

/// A directed graph for one network scope.
///
/// Edge weights are the arc attributes of the first relationship seen for
/// each `(source, target)` pair; later duplicates are ignored. Cycles and
/// self-loops are kept as-is; materialization breaks them.
#[derive(Debug)]
pub struct RawNetwork {
    /// Scope label used in diagnostics, e.g. `calculation [Balance] Balance Sheet`.
    pub scope: String,
    pub graph: DiGraph<NodeData, ArcAttributes>,
    identity: NodeIdentity,
    node_map: HashMap<NodeKey, NodeIndex>,
    /// BLAKE3 content hash of the edge list.
    pub content_hash: String,
}

impl RawNetwork {
    /// Build an object-keyed [`RawNetwork`] from edges in discovery order.
    pub fn from_edges(scope: &str, edges: &[Edge]) -> Self {
        Self::from_edges_keyed(scope, edges, NodeIdentity::Object)
    }

    /// Build a [`RawNetwork`] from edges in discovery order, merging
    /// endpoints per `identity`.
    ///
    /// A node first seen as a target is created before the edge that links
    /// it, so node indices follow first mention.
    #[instrument(skip(edges), fields(edges = edges.len()))]
    pub fn from_edges_keyed(scope: &str, edges: &[Edge], identity: NodeIdentity) -> Self {
        let content_hash = compute_edge_hash(edges);

        let mut network = Self {
            scope: scope.to_string(),
            graph: DiGraph::new(),
            identity,
            node_map: HashMap::new(),
            content_hash,
        };

        for edge in edges {
            let source = network.ensure_node(NodeData::from(&edge.source));
            let target = network.ensure_node(NodeData::from(&edge.target));

            // First relationship wins for a repeated pair.
            if network.graph.contains_edge(source, target) {
                trace!(
                    source = %edge.source.name,
                    target = %edge.target.name,
                    "duplicate edge ignored"
                );
                continue;
            }
            network
                .graph
                .add_edge(source, target, edge.attributes.clone());
        }

        network
    }

    #[must_use]
    pub const fn identity(&self) -> NodeIdentity {
        self.identity
    }

    /// Return the node `data` maps to, adding it if absent.
    pub fn ensure_node(&mut self, data: NodeData) -> NodeIndex {
        let key = match self.identity {
            NodeIdentity::Object => NodeKey::Object(data.object),
            NodeIdentity::Name => NodeKey::Name(data.name.clone()),
        };
        if let Some(idx) = self.node_map.get(&key) {
            return *idx;
        }
        let idx = self.graph.add_node(data);
        self.node_map.insert(key, idx);
        idx
    }

    /// Nodes that are the source of some edge and the target of none, in
    /// discovery order.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|idx| self.has_children(*idx) && !self.has_parents(*idx))
            .collect()
    }

    /// Every node with at least one outgoing edge, in discovery order.
    #[must_use]
    pub fn sources(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|idx| self.has_children(*idx))
            .collect()
    }

    /// Children of `idx` with the attributes of the linking arc, in edge
    /// insertion order.
    #[must_use]
    pub fn children(&self, idx: NodeIndex) -> Vec<(NodeIndex, &ArcAttributes)> {
        let mut edges: Vec<_> = self.graph.edges(idx).collect();
        // petgraph walks outgoing edges newest first.
        edges.sort_unstable_by_key(|edge| edge.id());
        edges
            .into_iter()
            .map(|edge| (edge.target(), edge.weight()))
            .collect()
    }

    #[must_use]
    pub fn has_children(&self, idx: NodeIndex) -> bool {
        self.graph
            .neighbors_directed(idx, Direction::Outgoing)
            .next()
            .is_some()
    }

    #[must_use]
    pub fn has_parents(&self, idx: NodeIndex) -> bool {
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .next()
            .is_some()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up the `NodeIndex` for a model object. Always `None` in a
    /// name-keyed network; use [`RawNetwork::node_named`] there.
    #[must_use]
    pub fn node_index(&self, object: ObjectId) -> Option<NodeIndex> {
        self.node_map.get(&NodeKey::Object(object)).copied()
    }

    /// Look up the `NodeIndex` for an identifier in a name-keyed network.
    #[must_use]
    pub fn node_named(&self, name: &str) -> Option<NodeIndex> {
        self.node_map.get(&NodeKey::Name(name.to_string())).copied()
    }

    #[must_use]
    pub fn node(&self, idx: NodeIndex) -> Option<&NodeData> {
        self.graph.node_weight(idx)
    }

    /// Identifier of a node, or `#<index>` for an index not in this graph.
    #[must_use]
    pub fn name(&self, idx: NodeIndex) -> String {
        self.node(idx)
            .map_or_else(|| format!("#{}", idx.index()), |data| data.name.clone())
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Compute a BLAKE3 hash of the edge list in input order.
fn compute_edge_hash(edges: &[Edge]) -> String {
    let mut hasher = blake3::Hasher::new();
    for edge in edges {
        hasher.update(edge.arcrole.as_bytes());
        hasher.update(b"\x00");
        hasher.update(edge.source.name.as_bytes());
        hasher.update(b"\x00");
        hasher.update(edge.target.name.as_bytes());
        hasher.update(b"\x00");
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
