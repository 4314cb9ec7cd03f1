//! Formula linkbase resources (assertions, formulas, variables, filters).

use serde::{Deserialize, Serialize};

/// Element local names of objects that anchor a formula tree.
const ROOT_KINDS: [&str; 5] = [
    "assertionSet",
    "valueAssertion",
    "existenceAssertion",
    "consistencyAssertion",
    "formula",
];

/// A formula object.
///
/// `kind` is the element's local name (`valueAssertion`, `factVariable`,
/// `conceptName`, ...). Fields that do not apply to the object's kind are
/// `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xlink_label: Option<String>,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind_as_sequence: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl FormulaResource {
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            xlink_label: None,
            kind: kind.into(),
            label: None,
            bind_as_sequence: None,
            expression: None,
            value: None,
        }
    }

    #[must_use]
    pub fn with_xlink_label(mut self, label: impl Into<String>) -> Self {
        self.xlink_label = Some(label.into());
        self
    }

    /// Whether this object can stand at the top of a formula tree on its
    /// own (assertion sets, assertions, formulas).
    #[must_use]
    pub fn is_root_kind(&self) -> bool {
        ROOT_KINDS.contains(&self.kind.as_str())
    }

    /// Human label: the explicit label, else the xlink label.
    #[must_use]
    pub fn log_label(&self) -> Option<&str> {
        self.label.as_deref().or(self.xlink_label.as_deref())
    }
}
