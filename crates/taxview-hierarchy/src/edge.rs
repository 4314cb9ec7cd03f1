//! Validated edges.
//!
//! [`edges_from_relationships`] turns adapter relationships into [`Edge`]s
//! with resolved, named endpoints. Relationships that cannot be resolved
//! are dropped with a [`Diagnostic::MalformedEdge`].

use serde::Serialize;
use taxview_core::model::{ArcAttributes, ModelObject, ObjectId, Relationship};
use taxview_core::source::RelationshipSource;

use crate::diagnostics::{Diagnostic, DiagnosticSink, MalformedReason};

/// How endpoint identifiers are derived for a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeNaming {
    /// `prefix:local`; endpoints must be concepts.
    QualifiedName,
    /// Bare local name; endpoints must be concepts.
    LocalName,
    /// Any object: its own name, or `Unnamed_<index>`.
    ObjectLabel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub object: ObjectId,
    pub name: String,
    pub is_abstract: bool,
}

impl Endpoint {
    fn resolve<S: RelationshipSource + ?Sized>(
        model: &S,
        id: ObjectId,
        naming: NodeNaming,
    ) -> Result<Self, MalformedReason> {
        let object = model
            .object(id)
            .ok_or(MalformedReason::UnknownObject(id))?;

        let name = match (naming, object) {
            (NodeNaming::QualifiedName, ModelObject::Concept(concept)) => {
                concept.qname.to_string()
            }
            (NodeNaming::LocalName, ModelObject::Concept(concept)) => {
                concept.local_name().to_string()
            }
            (NodeNaming::QualifiedName | NodeNaming::LocalName, ModelObject::Resource(_)) => {
                return Err(MalformedReason::NotAConcept(id));
            }
            (NodeNaming::ObjectLabel, object) => object.display_name(id),
        };

        Ok(Self {
            object: id,
            name,
            is_abstract: object.is_abstract(),
        })
    }
}

/// A directed edge ready for adjacency construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub source: Endpoint,
    pub target: Endpoint,
    pub role: String,
    pub arcrole: String,
    pub attributes: ArcAttributes,
}

/// Resolve relationships into edges, skipping malformed ones.
///
/// Input order is preserved; it drives child order downstream.
pub fn edges_from_relationships<S: RelationshipSource + ?Sized>(
    model: &S,
    relationships: &[&Relationship],
    naming: NodeNaming,
    sink: &mut dyn DiagnosticSink,
) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(relationships.len());

    for rel in relationships {
        match resolve_edge(model, rel, naming) {
            Ok(edge) => edges.push(edge),
            Err(reason) => sink.record(Diagnostic::MalformedEdge {
                arcrole: rel.arcrole.clone(),
                role: rel.link_role.clone(),
                reason,
            }),
        }
    }

    edges
}

fn resolve_edge<S: RelationshipSource + ?Sized>(
    model: &S,
    rel: &Relationship,
    naming: NodeNaming,
) -> Result<Edge, MalformedReason> {
    let from = rel.from.ok_or(MalformedReason::MissingSource)?;
    let to = rel.to.ok_or(MalformedReason::MissingTarget)?;

    Ok(Edge {
        source: Endpoint::resolve(model, from, naming)?,
        target: Endpoint::resolve(model, to, naming)?,
        role: rel.link_role.clone(),
        arcrole: rel.arcrole.clone(),
        attributes: rel.attributes.clone(),
    })
}
