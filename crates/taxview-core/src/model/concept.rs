//! Concept definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::QName;

/// `xbrli:periodType` of a concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Instant,
    Duration,
}

impl PeriodType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Instant => "instant",
            Self::Duration => "duration",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `xbrli:balance` of a monetary concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Balance {
    Debit,
    Credit,
}

impl Balance {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concept as seen by the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    pub qname: QName,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<QName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substitution_group: Option<QName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_type: Option<PeriodType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Balance>,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// Reference citations attached to the concept (shown in the
    /// presentation References column).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
}

impl Concept {
    /// A non-abstract concept with no type information.
    #[must_use]
    pub const fn new(qname: QName) -> Self {
        Self {
            qname,
            type_name: None,
            substitution_group: None,
            period_type: None,
            balance: None,
            is_abstract: false,
            references: Vec::new(),
        }
    }

    #[must_use]
    pub fn local_name(&self) -> &str {
        self.qname.local_name()
    }
}
