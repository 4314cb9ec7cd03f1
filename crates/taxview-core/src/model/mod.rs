//! Taxonomy model objects.
//!
//! Every object the adapter exposes lives in one arena; an [`ObjectId`] is
//! its index there. Identity, cycle detection and children maps all key on
//! the index, never on display labels, so two distinct objects that share a
//! label never collide.
//!
//! ## Submodules
//!
//! - [`qname`]: qualified names (`prefix:local`).
//! - [`concept`]: concept definitions (type, period, balance, abstract).
//! - [`resource`]: formula objects (assertions, variables, filters).
//! - [`relationship`]: typed relationships and per-network arc attributes.

pub mod concept;
pub mod qname;
pub mod relationship;
pub mod resource;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use concept::{Balance, Concept, PeriodType};
pub use qname::{QName, QNameError};
pub use relationship::{
    ArcAttributes, CalculationArc, ContextElement, DimensionalArc, FormulaArcAttributes,
    PresentationArc, Relationship, RoleType,
};
pub use resource::FormulaResource;

/// Arena index of a model object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(u32);

impl ObjectId {
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Name used for an object that carries no name of its own.
    ///
    /// Unique per object within one snapshot and stable for its lifetime.
    #[must_use]
    pub fn synthesized_name(self) -> String {
        format!("Unnamed_{}", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One object in the model arena.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelObject {
    Concept(Concept),
    Resource(FormulaResource),
}

impl ModelObject {
    #[must_use]
    pub const fn as_concept(&self) -> Option<&Concept> {
        match self {
            Self::Concept(concept) => Some(concept),
            Self::Resource(_) => None,
        }
    }

    #[must_use]
    pub const fn as_resource(&self) -> Option<&FormulaResource> {
        match self {
            Self::Resource(resource) => Some(resource),
            Self::Concept(_) => None,
        }
    }

    #[must_use]
    pub const fn is_abstract(&self) -> bool {
        match self {
            Self::Concept(concept) => concept.is_abstract,
            Self::Resource(_) => false,
        }
    }

    /// The object's own name: the qualified name for a concept, the xlink
    /// label for a resource. `None` when the object carries no name.
    #[must_use]
    pub fn own_name(&self) -> Option<String> {
        match self {
            Self::Concept(concept) => Some(concept.qname.to_string()),
            Self::Resource(resource) => resource.xlink_label.clone(),
        }
    }

    /// Own name, or the synthesized `Unnamed_<index>` fallback.
    #[must_use]
    pub fn display_name(&self, id: ObjectId) -> String {
        self.own_name().unwrap_or_else(|| id.synthesized_name())
    }
}
