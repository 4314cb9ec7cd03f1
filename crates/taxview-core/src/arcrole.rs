//! Arcrole identifiers and the network kinds they belong to.
//!
//! A network is the set of relationships sharing one or more related
//! arcroles. The hierarchy engine never matches arcrole strings directly;
//! it goes through [`NetworkKind`], [`DimensionalAxis`] and [`FormulaArc`].

use serde::{Deserialize, Serialize};

pub const PARENT_CHILD: &str = "http://www.xbrl.org/2003/arcrole/parent-child";

/// Summation-item arcrole from XBRL 2.1.
pub const SUMMATION_ITEM: &str = "http://www.xbrl.org/2003/arcrole/summation-item";
/// Summation-item arcrole from Calculations 1.1.
pub const SUMMATION_ITEM_2023: &str = "https://xbrl.org/2023/arcrole/summation-item";

pub const HYPERCUBE_DIMENSION: &str = "http://xbrl.org/int/dim/arcrole/hypercube-dimension";
pub const DIMENSION_DOMAIN: &str = "http://xbrl.org/int/dim/arcrole/dimension-domain";
pub const DOMAIN_MEMBER: &str = "http://xbrl.org/int/dim/arcrole/domain-member";

pub const ASSERTION_SET: &str = "http://xbrl.org/arcrole/2008/assertion-set";
pub const VARIABLE_SET: &str = "http://xbrl.org/arcrole/2008/variable-set";
pub const VARIABLE_SET_FILTER: &str = "http://xbrl.org/arcrole/2008/variable-set-filter";
pub const VARIABLE_FILTER: &str = "http://xbrl.org/arcrole/2008/variable-filter";

/// Calculation arcroles, legacy first.
pub const CALCULATION_ARCROLES: [&str; 2] = [SUMMATION_ITEM, SUMMATION_ITEM_2023];

/// The relationship networks the viewer knows how to reshape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkKind {
    Presentation,
    Calculation,
    Dimensional,
    Formula,
}

impl NetworkKind {
    pub const ALL: [Self; 4] = [
        Self::Presentation,
        Self::Calculation,
        Self::Dimensional,
        Self::Formula,
    ];

    /// Classify an arcrole URI. Unknown arcroles return `None`.
    #[must_use]
    pub fn classify(arcrole: &str) -> Option<Self> {
        match arcrole {
            PARENT_CHILD => Some(Self::Presentation),
            SUMMATION_ITEM | SUMMATION_ITEM_2023 => Some(Self::Calculation),
            HYPERCUBE_DIMENSION | DIMENSION_DOMAIN | DOMAIN_MEMBER => Some(Self::Dimensional),
            ASSERTION_SET | VARIABLE_SET | VARIABLE_SET_FILTER | VARIABLE_FILTER => {
                Some(Self::Formula)
            }
            _ => None,
        }
    }

    /// Arcroles consulted for this network, in processing order.
    #[must_use]
    pub const fn arcroles(self) -> &'static [&'static str] {
        match self {
            Self::Presentation => &[PARENT_CHILD],
            Self::Calculation => &CALCULATION_ARCROLES,
            Self::Dimensional => &[HYPERCUBE_DIMENSION, DIMENSION_DOMAIN, DOMAIN_MEMBER],
            Self::Formula => &[
                ASSERTION_SET,
                VARIABLE_SET,
                VARIABLE_SET_FILTER,
                VARIABLE_FILTER,
            ],
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Presentation => "presentation",
            Self::Calculation => "calculation",
            Self::Dimensional => "dimensional",
            Self::Formula => "formula",
        }
    }
}

impl std::fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three dimensional arcroles, processed independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DimensionalAxis {
    HypercubeDimension,
    DimensionDomain,
    DomainMember,
}

impl DimensionalAxis {
    pub const ALL: [Self; 3] = [
        Self::HypercubeDimension,
        Self::DimensionDomain,
        Self::DomainMember,
    ];

    #[must_use]
    pub fn from_arcrole(arcrole: &str) -> Option<Self> {
        match arcrole {
            HYPERCUBE_DIMENSION => Some(Self::HypercubeDimension),
            DIMENSION_DOMAIN => Some(Self::DimensionDomain),
            DOMAIN_MEMBER => Some(Self::DomainMember),
            _ => None,
        }
    }

    #[must_use]
    pub const fn arcrole(self) -> &'static str {
        match self {
            Self::HypercubeDimension => HYPERCUBE_DIMENSION,
            Self::DimensionDomain => DIMENSION_DOMAIN,
            Self::DomainMember => DOMAIN_MEMBER,
        }
    }

    /// Short name shown in the Arcrole column.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::HypercubeDimension => "hypercube-dimension",
            Self::DimensionDomain => "dimension-domain",
            Self::DomainMember => "domain-member",
        }
    }
}

/// The four formula arcroles merged when expanding a formula object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormulaArc {
    AssertionSet,
    VariableSet,
    VariableSetFilter,
    VariableFilter,
}

impl FormulaArc {
    /// Merge order for a formula object's children.
    pub const ALL: [Self; 4] = [
        Self::AssertionSet,
        Self::VariableSet,
        Self::VariableSetFilter,
        Self::VariableFilter,
    ];

    #[must_use]
    pub fn from_arcrole(arcrole: &str) -> Option<Self> {
        match arcrole {
            ASSERTION_SET => Some(Self::AssertionSet),
            VARIABLE_SET => Some(Self::VariableSet),
            VARIABLE_SET_FILTER => Some(Self::VariableSetFilter),
            VARIABLE_FILTER => Some(Self::VariableFilter),
            _ => None,
        }
    }

    #[must_use]
    pub const fn arcrole(self) -> &'static str {
        match self {
            Self::AssertionSet => ASSERTION_SET,
            Self::VariableSet => VARIABLE_SET,
            Self::VariableSetFilter => VARIABLE_SET_FILTER,
            Self::VariableFilter => VARIABLE_FILTER,
        }
    }
}

/// Last path segment of a role or arcrole URI.
///
/// `http://example.com/role/BalanceSheet` → `BalanceSheet`. A trailing slash
/// yields an empty suffix, matching a plain split on `/`.
#[must_use]
pub fn uri_suffix(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_arcrole_classifies_back_to_its_network() {
        for kind in NetworkKind::ALL {
            for arcrole in kind.arcroles() {
                assert_eq!(NetworkKind::classify(arcrole), Some(kind), "{arcrole}");
            }
        }
    }

    #[test]
    fn unknown_arcrole_is_unclassified() {
        assert_eq!(NetworkKind::classify("http://example.com/arcrole/custom"), None);
    }

    #[test]
    fn calculation_consults_legacy_arcrole_first() {
        assert_eq!(
            NetworkKind::Calculation.arcroles(),
            &[SUMMATION_ITEM, SUMMATION_ITEM_2023]
        );
    }

    #[test]
    fn axis_and_formula_arc_round_trip_through_arcrole() {
        for axis in DimensionalAxis::ALL {
            assert_eq!(DimensionalAxis::from_arcrole(axis.arcrole()), Some(axis));
        }
        for arcrole in NetworkKind::Formula.arcroles() {
            let arc = FormulaArc::from_arcrole(arcrole).expect("formula arcrole");
            assert_eq!(arc.arcrole(), *arcrole);
        }
    }

    #[test]
    fn uri_suffix_takes_last_segment() {
        assert_eq!(uri_suffix("http://x/role/Balance"), "Balance");
        assert_eq!(uri_suffix("plain"), "plain");
        assert_eq!(uri_suffix("http://x/role/"), "");
    }
}
