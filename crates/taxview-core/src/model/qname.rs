//! Qualified names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A qualified name written as `prefix:local` or bare `local`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QName {
    prefix: Option<String>,
    local_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QNameError {
    #[error("qualified name is empty")]
    Empty,
    #[error("qualified name '{0}' has an empty local part")]
    EmptyLocalName(String),
    #[error("qualified name '{0}' contains whitespace")]
    Whitespace(String),
}

impl QName {
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }
}

impl FromStr for QName {
    type Err = QNameError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QNameError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(QNameError::Whitespace(raw.to_string()));
        }

        match trimmed.split_once(':') {
            Some((_, "")) => Err(QNameError::EmptyLocalName(raw.to_string())),
            Some((prefix, local)) => Ok(Self {
                prefix: (!prefix.is_empty()).then(|| prefix.to_string()),
                local_name: local.to_string(),
            }),
            None => Ok(Self {
                prefix: None,
                local_name: trimmed.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for QName {
    type Error = QNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<QName> for String {
    fn from(value: QName) -> Self {
        value.to_string()
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{prefix}:{}", self.local_name),
            None => f.write_str(&self.local_name),
        }
    }
}
