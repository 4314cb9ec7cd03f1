//! Shared fixtures for unit tests.

use taxview_core::arcrole::{DimensionalAxis, FormulaArc, NetworkKind};
use taxview_core::model::{
    ArcAttributes, CalculationArc, Concept, DimensionalArc, FormulaArcAttributes,
    FormulaResource, ObjectId, PresentationArc, Relationship,
};
use taxview_core::snapshot::SnapshotBuilder;
use taxview_core::TaxonomySnapshot;

pub const ROLE_A: &str = "http://example.com/role/A";
pub const ROLE_B: &str = "http://example.com/role/B";

/// Snapshot builder that creates concepts on first mention.
///
/// Keys containing `:` are concept qnames; anything else must have been
/// declared with [`Fixture::resource`] first.
pub struct Fixture {
    builder: SnapshotBuilder,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            builder: SnapshotBuilder::new(),
        }
    }

    pub fn concept(&mut self, qname: &str) -> ObjectId {
        if let Some(id) = self.builder.resolve(qname) {
            return id;
        }
        let concept = Concept::new(qname.parse().expect("valid qname"));
        self.builder.try_concept(concept).expect("unique concept")
    }

    pub fn abstract_concept(&mut self, qname: &str) -> ObjectId {
        let mut concept = Concept::new(qname.parse().expect("valid qname"));
        concept.is_abstract = true;
        self.builder.try_concept(concept).expect("unique concept")
    }

    pub fn resource(&mut self, id: &str, kind: &str) -> ObjectId {
        self.builder
            .try_resource(id, FormulaResource::new(kind).with_xlink_label(id))
            .expect("unique resource")
    }

    /// A resource addressable by `id` that carries no xlink label.
    pub fn unlabeled_resource(&mut self, id: &str, kind: &str) -> ObjectId {
        self.builder
            .try_resource(id, FormulaResource::new(kind))
            .expect("unique resource")
    }

    pub fn role(&mut self, uri: &str, definition: &str) {
        self.builder.role(uri, definition);
    }

    pub fn edge(&mut self, arcrole: &str, role: &str, from: &str, to: &str) {
        self.edge_with(arcrole, role, from, to, default_attributes(arcrole));
    }

    pub fn edge_with(
        &mut self,
        arcrole: &str,
        role: &str,
        from: &str,
        to: &str,
        attributes: ArcAttributes,
    ) {
        let from = self.key(from);
        let to = self.key(to);
        self.builder.relationship(Relationship {
            arcrole: arcrole.to_string(),
            link_role: role.to_string(),
            from: Some(from),
            to: Some(to),
            attributes,
        });
    }

    pub fn dangling_edge(
        &mut self,
        arcrole: &str,
        role: &str,
        from: Option<&str>,
        to: Option<&str>,
    ) {
        let from = from.map(|key| self.key(key));
        let to = to.map(|key| self.key(key));
        self.builder.relationship(Relationship {
            arcrole: arcrole.to_string(),
            link_role: role.to_string(),
            from,
            to,
            attributes: default_attributes(arcrole),
        });
    }

    pub fn build(self) -> TaxonomySnapshot {
        self.builder.build()
    }

    fn key(&mut self, key: &str) -> ObjectId {
        if let Some(id) = self.builder.resolve(key) {
            return id;
        }
        assert!(key.contains(':'), "undeclared resource {key}");
        self.concept(key)
    }
}

pub fn default_attributes(arcrole: &str) -> ArcAttributes {
    match NetworkKind::classify(arcrole) {
        Some(NetworkKind::Presentation) => ArcAttributes::Presentation(PresentationArc::default()),
        Some(NetworkKind::Calculation) => ArcAttributes::Calculation(CalculationArc {
            weight: Some(1.0),
            order: None,
        }),
        Some(NetworkKind::Dimensional) => DimensionalAxis::from_arcrole(arcrole)
            .map_or(ArcAttributes::NotApplicable, |axis| {
                ArcAttributes::Dimensional(DimensionalArc::new(axis))
            }),
        Some(NetworkKind::Formula) => FormulaArc::from_arcrole(arcrole)
            .map_or(ArcAttributes::NotApplicable, |arc| {
                ArcAttributes::Formula(FormulaArcAttributes::new(arc))
            }),
        None => ArcAttributes::NotApplicable,
    }
}
