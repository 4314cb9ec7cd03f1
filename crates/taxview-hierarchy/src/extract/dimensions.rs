//! Dimensional networks (hypercube-dimension, dimension-domain,
//! domain-member).

use taxview_core::arcrole::{DimensionalAxis, NetworkKind, uri_suffix};
use taxview_core::source::RelationshipSource;
use tracing::{debug, info, instrument};

use crate::builder::HierarchyBuilder;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::edge::{NodeNaming, edges_from_relationships};
use crate::role::group_by_role;
use crate::tree::Hierarchy;

/// Build the combined dimensional forest.
///
/// Each axis is built on its own and split by role. Roots are renamed to
/// `[<role-suffix>] <local-name>` so the same concept rooted under two roles
/// stays two entries; below the root, identifiers are bare local names.
/// A later axis replaces an earlier root with the same identifier.
#[instrument(skip_all)]
pub fn extract_dimensions<S: RelationshipSource + ?Sized>(
    model: &S,
    builder: &HierarchyBuilder,
    sink: &mut dyn DiagnosticSink,
) -> Hierarchy {
    let mut combined = Hierarchy::new();

    for axis in DimensionalAxis::ALL {
        let relationships = model.relationships(axis.arcrole(), None);
        if relationships.is_empty() {
            sink.record(Diagnostic::EmptyNetwork {
                network: NetworkKind::Dimensional,
                arcrole: axis.arcrole().to_string(),
            });
            continue;
        }

        let edges = edges_from_relationships(model, &relationships, NodeNaming::LocalName, sink);
        let group = group_by_role(model, NetworkKind::Dimensional, edges, builder, sink);
        debug!(axis = axis.short_name(), roles = group.len(), "dimensional axis built");

        for role in group {
            let suffix = uri_suffix(&role.role).to_string();
            for mut root in role.hierarchy {
                root.id = format!("[{suffix}] {}", root.id);
                combined.upsert(root);
            }
        }
    }

    info!(roots = combined.len(), "dimensions extracted");
    combined
}
