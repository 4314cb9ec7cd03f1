//! Presentation network (`parent-child`).

use serde::Serialize;
use taxview_core::arcrole::{self, NetworkKind, uri_suffix};
use taxview_core::source::RelationshipSource;
use tracing::{info, instrument};

use crate::builder::HierarchyBuilder;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::edge::{NodeNaming, edges_from_relationships};
use crate::role::{RoleGroup, group_by_role};
use crate::tree::Hierarchy;

/// Presentation output in one of two layouts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationView {
    /// One hierarchy per extended link role, sorted by role.
    ByRole(RoleGroup),
    /// All roles in one forest; root identifiers are role-prefixed.
    Flat(Hierarchy),
}

impl PresentationView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::ByRole(group) => group.is_empty(),
            Self::Flat(hierarchy) => hierarchy.is_empty(),
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Self::ByRole(group) => group.iter().map(|g| g.hierarchy.node_count()).sum(),
            Self::Flat(hierarchy) => hierarchy.node_count(),
        }
    }
}

impl Default for PresentationView {
    fn default() -> Self {
        Self::ByRole(RoleGroup::default())
    }
}

/// Build the presentation network. Node identifiers are qualified names.
#[instrument(skip(model, builder, sink))]
pub fn extract_presentation<S: RelationshipSource + ?Sized>(
    model: &S,
    builder: &HierarchyBuilder,
    by_role: bool,
    sink: &mut dyn DiagnosticSink,
) -> PresentationView {
    let relationships = model.relationships(arcrole::PARENT_CHILD, None);
    if relationships.is_empty() {
        sink.record(Diagnostic::EmptyNetwork {
            network: NetworkKind::Presentation,
            arcrole: arcrole::PARENT_CHILD.to_string(),
        });
    }

    let edges = edges_from_relationships(model, &relationships, NodeNaming::QualifiedName, sink);
    let group = group_by_role(model, NetworkKind::Presentation, edges, builder, sink);

    let view = if by_role {
        PresentationView::ByRole(group)
    } else {
        PresentationView::Flat(flatten(group))
    };

    info!(nodes = view.node_count(), "presentation extracted");
    view
}

/// Merge role groups into one forest keyed by `[<role-suffix>] <root>`.
fn flatten(group: RoleGroup) -> Hierarchy {
    let mut merged = Hierarchy::new();
    for role in group {
        let suffix = uri_suffix(&role.role).to_string();
        for mut root in role.hierarchy {
            root.id = format!("[{suffix}] {}", root.id);
            merged.upsert(root);
        }
    }
    merged
}
