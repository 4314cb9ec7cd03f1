//! Cycle detection over a network scope.
//!
//! Materialization breaks cycles silently (one diagnostic per broken arc),
//! which says little about the cycle itself. These helpers report each
//! cycle as the full strongly connected component it belongs to.

#![allow(clippy::module_name_repetitions)]

use petgraph::algo::tarjan_scc;
use petgraph::graph::NodeIndex;

use super::RawNetwork;

/// Find all cycles currently present in `network`.
///
/// Each entry is a sorted list of node identifiers in one strongly
/// connected component (SCC). Self-loops are reported as a one-element
/// cycle.
#[must_use]
pub fn find_all_cycles(network: &RawNetwork) -> Vec<Vec<String>> {
    let mut cycles: Vec<Vec<String>> = tarjan_scc(&network.graph)
        .into_iter()
        .filter(|component| {
            component.len() > 1
                || component
                    .first()
                    .is_some_and(|node| has_self_loop(network, *node))
        })
        .map(|component| {
            let mut names: Vec<String> = component
                .into_iter()
                .map(|idx| network.name(idx))
                .collect();
            names.sort_unstable();
            names
        })
        .collect();

    cycles.sort_unstable();
    cycles
}

#[must_use]
fn has_self_loop(network: &RawNetwork, node: NodeIndex) -> bool {
    network.graph.find_edge(node, node).is_some()
}
