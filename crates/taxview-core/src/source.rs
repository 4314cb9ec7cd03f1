//! The relationship source adapter seam.
//!
//! The hierarchy engine reads the taxonomy only through
//! [`RelationshipSource`]. Implementations own the loaded model; the engine
//! borrows it read-only for the duration of an extraction batch.

use crate::model::{Concept, FormulaResource, ModelObject, ObjectId, Relationship};

pub trait RelationshipSource {
    /// The object arena. An [`ObjectId`] is an index into this slice.
    fn objects(&self) -> &[ModelObject];

    /// Relationships with the given arcrole, optionally restricted to one
    /// extended link role, in document order.
    ///
    /// An arcrole the taxonomy does not use yields an empty list.
    fn relationships(&self, arcrole: &str, link_role: Option<&str>) -> Vec<&Relationship>;

    /// Human-readable definition of a role type, when declared.
    fn role_definition(&self, link_role: &str) -> Option<&str>;

    fn object(&self, id: ObjectId) -> Option<&ModelObject> {
        self.objects().get(id.index())
    }

    /// All concepts with their ids, in model order.
    fn concepts(&self) -> Vec<(ObjectId, &Concept)> {
        self.objects()
            .iter()
            .enumerate()
            .filter_map(|(index, object)| {
                let id = ObjectId::new(u32::try_from(index).ok()?);
                object.as_concept().map(|concept| (id, concept))
            })
            .collect()
    }

    /// All formula resources with their ids, in model order.
    fn resources(&self) -> Vec<(ObjectId, &FormulaResource)> {
        self.objects()
            .iter()
            .enumerate()
            .filter_map(|(index, object)| {
                let id = ObjectId::new(u32::try_from(index).ok()?);
                object.as_resource().map(|resource| (id, resource))
            })
            .collect()
    }
}
