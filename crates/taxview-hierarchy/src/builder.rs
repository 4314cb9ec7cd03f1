//! The hierarchy builder.
//!
//! # Overview
//!
//! [`HierarchyBuilder::build`] turns one scope's edges into a forest:
//!
//! 1. Load the edges into a [`RawNetwork`] (adjacency in discovery order).
//! 2. Roots are exactly the nodes that are sources and never targets.
//! 3. Expand each root depth first.
//!
//! ## Cycles
//!
//! Expansion keeps the set of ancestors on the current path, not a global
//! visited set. A child that is already an ancestor is not emitted and a
//! [`Diagnostic::CycleDetected`] is recorded; sibling branches are
//! unaffected, so a node shared by two branches appears under both.
//!
//! ## Depth
//!
//! Roots sit at depth 0. A node at `max_depth` is emitted without children
//! and, if it had any, a [`Diagnostic::DepthExceeded`] is recorded.
//!
//! Expansion runs on an explicit stack; the host stack does not grow with
//! tree depth.

use std::collections::HashSet;

use petgraph::graph::NodeIndex;
use taxview_core::config::DEFAULT_MAX_DEPTH;
use taxview_core::model::ArcAttributes;
use tracing::{debug, instrument};

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::edge::Edge;
use crate::network::RawNetwork;
use crate::tree::{Hierarchy, TreeNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    pub max_depth: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchyBuilder {
    options: BuildOptions,
}

impl HierarchyBuilder {
    #[must_use]
    pub const fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> BuildOptions {
        self.options
    }

    /// Build the forest for one scope's edges, one node per model object.
    #[instrument(skip(self, edges, sink), fields(edges = edges.len()))]
    pub fn build(&self, scope: &str, edges: &[Edge], sink: &mut dyn DiagnosticSink) -> Hierarchy {
        let network = RawNetwork::from_edges(scope, edges);
        self.build_network(&network, sink)
    }

    /// Build the forest for an already constructed network.
    ///
    /// A network with edges but no natural root yields an empty hierarchy
    /// and a [`Diagnostic::NoNaturalRoot`].
    pub fn build_network(&self, network: &RawNetwork, sink: &mut dyn DiagnosticSink) -> Hierarchy {
        let roots = network.roots();
        if roots.is_empty() {
            if network.edge_count() > 0 {
                sink.record(Diagnostic::NoNaturalRoot {
                    scope: network.scope.clone(),
                });
            }
            return Hierarchy::new();
        }

        debug!(scope = %network.scope, roots = roots.len(), "expanding roots");
        Hierarchy::from(self.expand_all(network, &roots, 0, sink))
    }

    /// Expand each start node independently, starting at `depth`.
    ///
    /// Every start gets a fresh ancestor set.
    pub fn expand_all(
        &self,
        network: &RawNetwork,
        starts: &[NodeIndex],
        depth: usize,
        sink: &mut dyn DiagnosticSink,
    ) -> Vec<TreeNode> {
        starts
            .iter()
            .filter_map(|start| self.expand(network, *start, depth, sink))
            .collect()
    }

    /// Materialize the subtree under `start`.
    ///
    /// Returns `None` only when `start` is not a node of `network`.
    pub fn expand(
        &self,
        network: &RawNetwork,
        start: NodeIndex,
        depth: usize,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<TreeNode> {
        let mut walk = Walk {
            network,
            max_depth: self.options.max_depth,
            ancestors: HashSet::new(),
            stack: Vec::new(),
            sink,
        };
        walk.open(start, ArcAttributes::NotApplicable, depth)?;
        walk.run()
    }
}

// ---------------------------------------------------------------------------
// Explicit-stack expansion
// ---------------------------------------------------------------------------

struct Frame {
    index: NodeIndex,
    node: TreeNode,
    pending: std::vec::IntoIter<(NodeIndex, ArcAttributes)>,
    depth: usize,
}

struct Walk<'a> {
    network: &'a RawNetwork,
    max_depth: usize,
    /// Nodes on the path from the start to the top frame.
    ancestors: HashSet<NodeIndex>,
    stack: Vec<Frame>,
    sink: &'a mut dyn DiagnosticSink,
}

impl Walk<'_> {
    /// Push a frame for `index`. Returns `None` if the index is unknown.
    fn open(&mut self, index: NodeIndex, arc: ArcAttributes, depth: usize) -> Option<()> {
        let data = self.network.node(index)?;
        let mut node = TreeNode::leaf(data.name.clone(), data.object, data.is_abstract);
        node.arc = arc;

        let pending: Vec<(NodeIndex, ArcAttributes)> = if depth >= self.max_depth {
            if self.network.has_children(index) {
                self.sink.record(Diagnostic::DepthExceeded {
                    scope: self.network.scope.clone(),
                    node: node.id.clone(),
                    depth,
                });
            }
            Vec::new()
        } else {
            self.network
                .children(index)
                .into_iter()
                .map(|(child, arc)| (child, arc.clone()))
                .collect()
        };

        self.ancestors.insert(index);
        self.stack.push(Frame {
            index,
            node,
            pending: pending.into_iter(),
            depth,
        });
        Some(())
    }

    fn run(mut self) -> Option<TreeNode> {
        let mut finished = None;

        while let Some(top) = self.stack.last_mut() {
            match top.pending.next() {
                Some((child, _)) if self.ancestors.contains(&child) => {
                    let parent = top.node.id.clone();
                    self.sink.record(Diagnostic::CycleDetected {
                        scope: self.network.scope.clone(),
                        parent,
                        node: self.network.name(child),
                    });
                }
                Some((child, arc)) => {
                    let depth = top.depth + 1;
                    let opened = self.open(child, arc, depth);
                    debug_assert!(
                        opened.is_some(),
                        "child #{} missing from its own graph",
                        child.index()
                    );
                }
                None => {
                    let Some(done) = self.stack.pop() else { break };
                    self.ancestors.remove(&done.index);
                    match self.stack.last_mut() {
                        Some(parent) => parent.node.children.push(done.node),
                        None => finished = Some(done.node),
                    }
                }
            }
        }

        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;
    use crate::edge::Endpoint;
    use taxview_core::model::ObjectId;

    fn chain_edges(names: &[&str]) -> Vec<Edge> {
        names
            .windows(2)
            .map(|pair| edge(pair[0], pair[1]))
            .collect()
    }

    /// Edge between single-letter-or-numbered names; the object id is
    /// derived from the name so equal names mean the same node.
    fn edge(source: &str, target: &str) -> Edge {
        Edge {
            source: endpoint(source),
            target: endpoint(target),
            role: "r".to_string(),
            arcrole: "a".to_string(),
            attributes: ArcAttributes::NotApplicable,
        }
    }

    fn endpoint(name: &str) -> Endpoint {
        let id = name
            .bytes()
            .fold(0_u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));
        Endpoint {
            object: ObjectId::new(id),
            name: name.to_string(),
            is_abstract: false,
        }
    }

    fn ids(hierarchy: &Hierarchy) -> Vec<&str> {
        hierarchy.iter().map(|root| root.id.as_str()).collect()
    }

    #[test]
    fn roots_exclude_targets() {
        let edges = vec![edge("A", "B"), edge("B", "C"), edge("D", "C")];
        let mut sink = Diagnostics::new();
        let hierarchy = HierarchyBuilder::default().build("t", &edges, &mut sink);

        assert_eq!(ids(&hierarchy), vec!["A", "D"]);
        let a = hierarchy.get("A").expect("root A");
        assert!(a.child("B").and_then(|b| b.child("C")).is_some());
        assert!(sink.is_empty());
    }

    #[test]
    fn shared_child_appears_under_each_parent() {
        let edges = vec![edge("A", "C"), edge("B", "C")];
        let mut sink = Diagnostics::new();
        let hierarchy = HierarchyBuilder::default().build("t", &edges, &mut sink);

        assert!(hierarchy.get("A").and_then(|a| a.child("C")).is_some());
        assert!(hierarchy.get("B").and_then(|b| b.child("C")).is_some());
    }

    #[test]
    fn cycle_below_root_is_broken_once() {
        let edges = vec![edge("R", "A"), edge("A", "B"), edge("B", "A")];
        let mut sink = Diagnostics::new();
        let hierarchy = HierarchyBuilder::default().build("t", &edges, &mut sink);

        let r = hierarchy.get("R").expect("root");
        let b = r.child("A").and_then(|a| a.child("B")).expect("R/A/B");
        assert!(b.children.is_empty());
        assert_eq!(
            sink.entries(),
            &[Diagnostic::CycleDetected {
                scope: "t".to_string(),
                parent: "B".to_string(),
                node: "A".to_string(),
            }]
        );
    }

    #[test]
    fn fully_cyclic_scope_has_no_natural_root() {
        let edges = vec![edge("X", "Y"), edge("Y", "X")];
        let mut sink = Diagnostics::new();
        let hierarchy = HierarchyBuilder::default().build("calc", &edges, &mut sink);

        assert!(hierarchy.is_empty());
        assert_eq!(sink.count("no_natural_root"), 1);
    }

    #[test]
    fn empty_scope_is_silent() {
        let mut sink = Diagnostics::new();
        let hierarchy = HierarchyBuilder::default().build("t", &[], &mut sink);
        assert!(hierarchy.is_empty());
        assert!(sink.is_empty());
    }

    #[test]
    fn depth_limit_emits_leaf() {
        let names: Vec<String> = (0..150).map(|i| format!("N{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let edges = chain_edges(&refs);
        let mut sink = Diagnostics::new();
        let hierarchy = HierarchyBuilder::default().build("deep", &edges, &mut sink);

        let root = hierarchy.get("N0").expect("root");
        assert_eq!(root.height(), 100);
        assert_eq!(root.node_count(), 101);
        let deepest = root
            .iter_with_depth()
            .find(|(_, depth)| *depth == 100)
            .map(|(node, _)| node)
            .expect("node at depth 100");
        assert_eq!(deepest.id, "N100");
        assert!(deepest.children.is_empty());
        assert_eq!(
            sink.entries(),
            &[Diagnostic::DepthExceeded {
                scope: "deep".to_string(),
                node: "N100".to_string(),
                depth: 100,
            }]
        );
    }

    #[test]
    fn leaf_at_depth_limit_is_not_reported() {
        let edges = chain_edges(&["A", "B", "C"]);
        let mut sink = Diagnostics::new();
        let builder = HierarchyBuilder::new(BuildOptions { max_depth: 2 });
        let hierarchy = builder.build("t", &edges, &mut sink);

        assert_eq!(hierarchy.node_count(), 3);
        assert!(sink.is_empty());
    }

    #[test]
    fn child_order_follows_edges() {
        let edges = vec![edge("P", "Z"), edge("P", "A"), edge("P", "M")];
        let mut sink = Diagnostics::new();
        let hierarchy = HierarchyBuilder::default().build("t", &edges, &mut sink);
        let children: Vec<&str> = hierarchy.roots()[0]
            .children
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(children, vec!["Z", "A", "M"]);
    }

    #[test]
    fn expand_all_uses_fresh_ancestors_per_start() {
        let edges = vec![edge("X", "Y"), edge("Y", "X")];
        let network = RawNetwork::from_edges("t", &edges);
        let mut sink = Diagnostics::new();
        let trees =
            HierarchyBuilder::default().expand_all(&network, &network.sources(), 1, &mut sink);

        let ids: Vec<&str> = trees.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["X", "Y"]);
        assert!(trees[0].child("Y").is_some());
        assert!(trees[1].child("X").is_some());
        assert_eq!(sink.count("cycle_detected"), 2);
    }

    #[test]
    fn unknown_start_expands_to_nothing() {
        let network = RawNetwork::from_edges("t", &[edge("A", "B")]);
        let mut sink = Diagnostics::new();
        let builder = HierarchyBuilder::default();

        assert!(builder.expand(&network, NodeIndex::new(7), 0, &mut sink).is_none());
        let a = builder
            .expand(&network, NodeIndex::new(0), 0, &mut sink)
            .expect("A expands");
        assert!(a.child("B").is_some());
        assert!(sink.is_empty());
    }

    #[test]
    fn child_carries_arc_attributes() {
        use taxview_core::model::CalculationArc;

        let mut weighted = edge("T", "I");
        weighted.attributes = ArcAttributes::Calculation(CalculationArc {
            weight: Some(-1.0),
            order: None,
        });
        let mut sink = Diagnostics::new();
        let hierarchy = HierarchyBuilder::default().build("t", &[weighted], &mut sink);

        let root = hierarchy.get("T").expect("root");
        assert_eq!(root.arc, ArcAttributes::NotApplicable);
        let child = root.child("I").expect("child");
        assert_eq!(
            child.arc.as_calculation().and_then(|arc| arc.weight),
            Some(-1.0)
        );
    }
}
