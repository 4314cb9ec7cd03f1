//! Cycle report across all networks.

use serde::Serialize;
use taxview_core::arcrole::NetworkKind;
use taxview_core::source::RelationshipSource;
use tracing::{info, instrument};

use crate::diagnostics::DiagnosticSink;
use crate::edge::{NodeNaming, edges_from_relationships};
use crate::network::{NodeIdentity, RawNetwork, find_all_cycles};
use crate::role::{partition_by_role, role_label};

/// One strongly connected component of a role's graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub network: NetworkKind,
    pub role: String,
    pub label: String,
    /// Sorted identifiers of the component's members.
    pub members: Vec<String>,
}

/// Naming used for each network's identifiers.
const fn naming_for(kind: NetworkKind) -> NodeNaming {
    match kind {
        NetworkKind::Presentation => NodeNaming::QualifiedName,
        NetworkKind::Calculation | NetworkKind::Dimensional => NodeNaming::LocalName,
        NetworkKind::Formula => NodeNaming::ObjectLabel,
    }
}

/// Every cycle in every network, per role.
///
/// All arcroles of a network share one graph per role, so a cycle that
/// runs through dimension-domain and domain-member arcs is reported.
#[instrument(skip_all)]
pub fn network_cycles<S: RelationshipSource + ?Sized>(
    model: &S,
    sink: &mut dyn DiagnosticSink,
) -> Vec<CycleReport> {
    let mut reports = Vec::new();

    for kind in NetworkKind::ALL {
        let relationships: Vec<_> = kind
            .arcroles()
            .iter()
            .flat_map(|arcrole| model.relationships(arcrole, None))
            .collect();
        let edges = edges_from_relationships(model, &relationships, naming_for(kind), sink);

        for (role, edges) in partition_by_role(edges) {
            let label = role_label(&role, model.role_definition(&role));
            let network = RawNetwork::from_edges_keyed(
                &format!("{kind} {label}"),
                &edges,
                NodeIdentity::for_network(kind),
            );
            for members in find_all_cycles(&network) {
                reports.push(CycleReport {
                    network: kind,
                    role: role.clone(),
                    label: label.clone(),
                    members,
                });
            }
        }
    }

    info!(cycles = reports.len(), "cycle report built");
    reports
}
