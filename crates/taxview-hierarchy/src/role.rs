//! Role grouping.
//!
//! A network's edges are partitioned by extended link role; each partition
//! is built independently and stored under a human-readable label. Roles are
//! visited in sorted URI order, so the output order does not depend on the
//! order relationships were declared in.

use std::collections::BTreeMap;

use serde::Serialize;
use taxview_core::arcrole::{NetworkKind, uri_suffix};
use taxview_core::source::RelationshipSource;
use tracing::debug;

use crate::builder::HierarchyBuilder;
use crate::diagnostics::DiagnosticSink;
use crate::edge::Edge;
use crate::network::{NodeIdentity, RawNetwork};
use crate::tree::Hierarchy;

/// `[<last path segment>] <definition, or the role URI>`. A blank
/// definition counts as none.
#[must_use]
pub fn role_label(role: &str, definition: Option<&str>) -> String {
    let text = definition
        .filter(|text| !text.trim().is_empty())
        .unwrap_or(role);
    format!("[{}] {text}", uri_suffix(role))
}

/// Split edges by role, keeping each role's edges in input order.
#[must_use]
pub fn partition_by_role(edges: Vec<Edge>) -> BTreeMap<String, Vec<Edge>> {
    let mut partitions: BTreeMap<String, Vec<Edge>> = BTreeMap::new();
    for edge in edges {
        partitions.entry(edge.role.clone()).or_default().push(edge);
    }
    partitions
}

/// One role's hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleHierarchy {
    pub role: String,
    pub label: String,
    /// Fingerprint of the role's edge list.
    pub content_hash: String,
    pub hierarchy: Hierarchy,
}

/// Role hierarchies in sorted role order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RoleGroup {
    groups: Vec<RoleHierarchy>,
}

impl RoleGroup {
    /// Group by label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&RoleHierarchy> {
        self.groups.iter().find(|group| group.label == label)
    }

    /// Group by role URI.
    #[must_use]
    pub fn get_role(&self, role: &str) -> Option<&RoleHierarchy> {
        self.groups.iter().find(|group| group.role == role)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RoleHierarchy> {
        self.groups.iter()
    }

    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.groups.iter().map(|group| group.label.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for &'a RoleGroup {
    type Item = &'a RoleHierarchy;
    type IntoIter = std::slice::Iter<'a, RoleHierarchy>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl IntoIterator for RoleGroup {
    type Item = RoleHierarchy;
    type IntoIter = std::vec::IntoIter<RoleHierarchy>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Build one hierarchy per role with the plain builder.
pub fn group_by_role<S: RelationshipSource + ?Sized>(
    model: &S,
    kind: NetworkKind,
    edges: Vec<Edge>,
    builder: &HierarchyBuilder,
    sink: &mut dyn DiagnosticSink,
) -> RoleGroup {
    group_by_role_with(model, kind, edges, sink, |_, network, sink| {
        builder.build_network(network, sink)
    })
}

/// Build one hierarchy per role with a custom shaping step.
///
/// `shape` receives the role label and the role's network.
pub fn group_by_role_with<S, F>(
    model: &S,
    kind: NetworkKind,
    edges: Vec<Edge>,
    sink: &mut dyn DiagnosticSink,
    mut shape: F,
) -> RoleGroup
where
    S: RelationshipSource + ?Sized,
    F: FnMut(&str, &RawNetwork, &mut dyn DiagnosticSink) -> Hierarchy,
{
    let groups = partition_by_role(edges)
        .into_iter()
        .map(|(role, edges)| {
            let label = role_label(&role, model.role_definition(&role));
            let network = RawNetwork::from_edges_keyed(
                &format!("{kind} {label}"),
                &edges,
                NodeIdentity::for_network(kind),
            );
            let hierarchy = shape(&label, &network, sink);
            debug!(%role, roots = hierarchy.len(), "role hierarchy built");
            RoleHierarchy {
                role,
                label,
                content_hash: network.content_hash,
                hierarchy,
            }
        })
        .collect();

    RoleGroup { groups }
}
