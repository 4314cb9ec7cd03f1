use std::fmt;
use std::path::PathBuf;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    SnapshotNotFound,
    SnapshotReadFailed,
    SnapshotParseError,
    UnsupportedFormat,
    DuplicateObjectKey,
    InvalidQName,
    ModelTooLarge,
    ConfigReadFailed,
    ConfigParseError,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::SnapshotNotFound => "E1001",
            Self::SnapshotReadFailed => "E1002",
            Self::SnapshotParseError => "E1003",
            Self::UnsupportedFormat => "E1004",
            Self::DuplicateObjectKey => "E1005",
            Self::InvalidQName => "E1006",
            Self::ModelTooLarge => "E1007",
            Self::ConfigReadFailed => "E2001",
            Self::ConfigParseError => "E2002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::SnapshotNotFound => "Taxonomy file not found",
            Self::SnapshotReadFailed => "Taxonomy file could not be read",
            Self::SnapshotParseError => "Taxonomy file parse error",
            Self::UnsupportedFormat => "Unsupported taxonomy file format",
            Self::DuplicateObjectKey => "Duplicate concept or resource key",
            Self::InvalidQName => "Invalid qualified name",
            Self::ModelTooLarge => "Taxonomy has too many objects",
            Self::ConfigReadFailed => "Config file could not be read",
            Self::ConfigParseError => "Config file parse error",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::SnapshotNotFound => Some("Check the taxonomy path and retry."),
            Self::SnapshotReadFailed => Some("Check file permissions and retry."),
            Self::SnapshotParseError => {
                Some("Regenerate the snapshot; it must be valid JSON or YAML.")
            }
            Self::UnsupportedFormat => Some("Use a .json, .yaml or .yml snapshot file."),
            Self::DuplicateObjectKey => {
                Some("Each concept qname and resource id must appear once.")
            }
            Self::InvalidQName => Some("Qualified names are written as prefix:localName."),
            Self::ModelTooLarge => Some("Split the taxonomy; object ids are 32-bit."),
            Self::ConfigReadFailed => Some("Check permissions on taxview.toml."),
            Self::ConfigParseError => Some("Fix syntax in taxview.toml and retry."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Failure to turn a taxonomy file into a model snapshot.
///
/// This is the only error class that crosses from the adapter into callers;
/// everything that goes wrong after a successful load degrades to partial
/// output plus diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("taxonomy file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML snapshot: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported taxonomy file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("duplicate object key '{0}'")]
    DuplicateKey(String),

    #[error("invalid qualified name in {context}: {source}")]
    InvalidQName {
        context: String,
        #[source]
        source: crate::model::QNameError,
    },

    #[error("too many objects: slot {0} has no 32-bit id")]
    TooManyObjects(usize),
}

impl LoadError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::SnapshotNotFound,
            Self::Io { .. } => ErrorCode::SnapshotReadFailed,
            Self::Json(_) | Self::Yaml(_) => ErrorCode::SnapshotParseError,
            Self::UnsupportedFormat(_) => ErrorCode::UnsupportedFormat,
            Self::DuplicateKey(_) => ErrorCode::DuplicateObjectKey,
            Self::InvalidQName { .. } => ErrorCode::InvalidQName,
            Self::TooManyObjects(_) => ErrorCode::ModelTooLarge,
        }
    }
}

/// Failure to load a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } => ErrorCode::ConfigReadFailed,
            Self::Parse { .. } => ErrorCode::ConfigParseError,
        }
    }
}
