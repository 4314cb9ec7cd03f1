//! Calculation network (`summation-item`, both arcrole generations).

use taxview_core::arcrole::{CALCULATION_ARCROLES, NetworkKind};
use taxview_core::source::RelationshipSource;
use tracing::{debug, info, instrument};

use crate::builder::HierarchyBuilder;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::edge::{NodeNaming, edges_from_relationships};
use crate::role::{RoleGroup, group_by_role_with};
use crate::tree::{Hierarchy, TreeNode};

/// Build the calculation network grouped by role. Node identifiers are
/// concept local names.
///
/// Legacy and 2023 summation-item relationships are merged, legacy first.
/// With `synthesize_role_root`, a role whose network has no natural root is
/// wrapped in one synthetic node named after the role label, holding the
/// subtree of every source node in discovery order.
#[instrument(skip(model, builder, sink))]
pub fn extract_calculations<S: RelationshipSource + ?Sized>(
    model: &S,
    builder: &HierarchyBuilder,
    synthesize_role_root: bool,
    sink: &mut dyn DiagnosticSink,
) -> RoleGroup {
    let mut relationships = Vec::new();
    for arcrole in CALCULATION_ARCROLES {
        let found = model.relationships(arcrole, None);
        debug!(%arcrole, relationships = found.len(), "calculation arcrole");
        relationships.extend(found);
    }
    if relationships.is_empty() {
        sink.record(Diagnostic::EmptyNetwork {
            network: NetworkKind::Calculation,
            arcrole: CALCULATION_ARCROLES.join(" "),
        });
    }

    let edges = edges_from_relationships(model, &relationships, NodeNaming::LocalName, sink);
    let group = group_by_role_with(
        model,
        NetworkKind::Calculation,
        edges,
        sink,
        |label, network, sink| {
            let hierarchy = builder.build_network(network, sink);
            if !hierarchy.is_empty() || !synthesize_role_root || network.edge_count() == 0 {
                return hierarchy;
            }
            // Each source is expanded one level below the synthetic root.
            let children = builder.expand_all(network, &network.sources(), 1, sink);
            Hierarchy::from(vec![TreeNode::synthetic(label, children)])
        },
    );

    info!(roles = group.len(), "calculations extracted");
    group
}
