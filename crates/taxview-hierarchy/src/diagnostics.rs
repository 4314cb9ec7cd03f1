//! Structured diagnostics recorded while building hierarchies.
//!
//! Nothing that goes wrong after a taxonomy has loaded is fatal. Malformed
//! edges, empty networks, cycles and over-deep chains all degrade to
//! partial output plus a [`Diagnostic`] handed to a [`DiagnosticSink`].
//! [`Diagnostics`] is the collecting sink; it also forwards every entry to
//! `tracing` so diagnostics show up in logs without extra plumbing.

use std::fmt;

use serde::Serialize;
use taxview_core::arcrole::NetworkKind;
use taxview_core::model::ObjectId;
use tracing::{debug, info, warn};

/// Why an edge was dropped before adjacency construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "object", rename_all = "snake_case")]
pub enum MalformedReason {
    MissingSource,
    MissingTarget,
    /// The endpoint id does not exist in the model arena.
    UnknownObject(ObjectId),
    /// A concept network endpoint that is not a concept.
    NotAConcept(ObjectId),
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSource => f.write_str("missing source"),
            Self::MissingTarget => f.write_str("missing target"),
            Self::UnknownObject(id) => write!(f, "unknown object {id}"),
            Self::NotAConcept(id) => write!(f, "object {id} is not a concept"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// An edge was skipped.
    MalformedEdge {
        arcrole: String,
        role: String,
        reason: MalformedReason,
    },
    /// The taxonomy defines no relationships for an arcrole.
    EmptyNetwork {
        network: NetworkKind,
        arcrole: String,
    },
    /// Every node in a scope is both a source and a target.
    NoNaturalRoot { scope: String },
    /// `node` is already on the path from the root to `parent`; the
    /// occurrence under `parent` was not emitted.
    CycleDetected {
        scope: String,
        parent: String,
        node: String,
    },
    /// `node` sits at the depth limit and its children were not expanded.
    DepthExceeded {
        scope: String,
        node: String,
        depth: usize,
    },
}

impl Diagnostic {
    /// Stable machine-readable kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MalformedEdge { .. } => "malformed_edge",
            Self::EmptyNetwork { .. } => "empty_network",
            Self::NoNaturalRoot { .. } => "no_natural_root",
            Self::CycleDetected { .. } => "cycle_detected",
            Self::DepthExceeded { .. } => "depth_exceeded",
        }
    }

    fn emit(&self) {
        match self {
            Self::MalformedEdge {
                arcrole,
                role,
                reason,
            } => warn!(%arcrole, %role, %reason, "skipping malformed edge"),
            Self::EmptyNetwork { network, arcrole } => {
                debug!(%network, %arcrole, "no relationships for arcrole");
            }
            Self::NoNaturalRoot { scope } => info!(%scope, "no natural root"),
            Self::CycleDetected {
                scope,
                parent,
                node,
            } => warn!(%scope, %parent, %node, "cycle detected, truncating"),
            Self::DepthExceeded { scope, node, depth } => {
                warn!(%scope, %node, depth, "max depth reached, truncating");
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedEdge {
                arcrole,
                role,
                reason,
            } => write!(f, "malformed edge in {role} ({arcrole}): {reason}"),
            Self::EmptyNetwork { network, arcrole } => {
                write!(f, "no {network} relationships for {arcrole}")
            }
            Self::NoNaturalRoot { scope } => write!(f, "{scope}: no natural root"),
            Self::CycleDetected {
                scope,
                parent,
                node,
            } => write!(f, "{scope}: cycle {parent} -> {node} broken"),
            Self::DepthExceeded { scope, node, depth } => {
                write!(f, "{scope}: {node} truncated at depth {depth}")
            }
        }
    }
}

/// Receiver for diagnostics produced during extraction.
pub trait DiagnosticSink {
    fn record(&mut self, diagnostic: Diagnostic);
}

/// Collecting sink. Every recorded entry is also emitted as a `tracing`
/// event.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries with the given [`Diagnostic::kind`].
    #[must_use]
    pub fn count(&self, kind: &str) -> usize {
        self.entries.iter().filter(|d| d.kind() == kind).count()
    }
}

impl DiagnosticSink for Diagnostics {
    fn record(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit();
        self.entries.push(diagnostic);
    }
}
