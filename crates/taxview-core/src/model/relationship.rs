//! Typed relationships.
//!
//! Each relationship carries an [`ArcAttributes`] record matching the
//! network its arcrole belongs to. Arcroles outside the known networks get
//! [`ArcAttributes::NotApplicable`]; nothing downstream probes for fields
//! that may or may not be present.

use serde::{Deserialize, Serialize};

use super::ObjectId;
use crate::arcrole::{DimensionalAxis, FormulaArc};

/// An extended link role declared by the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleType {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
}

/// A directed relationship between two model objects.
///
/// Endpoints are `None` when the adapter could not resolve them. Such
/// relationships are reported as malformed and skipped by the hierarchy
/// engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub arcrole: String,
    pub link_role: String,
    pub from: Option<ObjectId>,
    pub to: Option<ObjectId>,
    pub attributes: ArcAttributes,
}

/// Network-specific arc attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "network", rename_all = "snake_case")]
pub enum ArcAttributes {
    Presentation(PresentationArc),
    Calculation(CalculationArc),
    Dimensional(DimensionalArc),
    Formula(FormulaArcAttributes),
    NotApplicable,
}

impl ArcAttributes {
    #[must_use]
    pub const fn as_presentation(&self) -> Option<&PresentationArc> {
        match self {
            Self::Presentation(arc) => Some(arc),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_calculation(&self) -> Option<&CalculationArc> {
        match self {
            Self::Calculation(arc) => Some(arc),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_dimensional(&self) -> Option<&DimensionalArc> {
        match self {
            Self::Dimensional(arc) => Some(arc),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_formula(&self) -> Option<&FormulaArcAttributes> {
        match self {
            Self::Formula(arc) => Some(arc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PresentationArc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CalculationArc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
}

/// `xbrldt:contextElement` on an all/notAll arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextElement {
    Segment,
    Scenario,
}

impl ContextElement {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Segment => "segment",
            Self::Scenario => "scenario",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionalArc {
    pub axis: DimensionalAxis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_element: Option<ContextElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_role: Option<String>,
}

impl DimensionalArc {
    #[must_use]
    pub const fn new(axis: DimensionalAxis) -> Self {
        Self {
            axis,
            closed: None,
            context_element: None,
            usable: None,
            target_role: None,
        }
    }
}

/// Cover/complement only carry meaning on variable-filter arcs; they are
/// `false` on every other formula arc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormulaArcAttributes {
    pub arc: FormulaArc,
    pub cover: bool,
    pub complement: bool,
}

impl FormulaArcAttributes {
    #[must_use]
    pub const fn new(arc: FormulaArc) -> Self {
        Self {
            arc,
            cover: false,
            complement: false,
        }
    }
}
