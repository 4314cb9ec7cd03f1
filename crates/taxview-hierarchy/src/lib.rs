#![forbid(unsafe_code)]
//! taxview-hierarchy library.
//!
//! Reshapes the relationship networks of a taxonomy model into rooted,
//! cycle-free hierarchies for display.
//!
//! ## Pipeline
//!
//! ```text
//! RelationshipSource (taxview-core)
//!        ↓  edge::edges_from_relationships()   malformed edges → Diagnostic
//! Vec<Edge>
//!        ↓  role::group_by_role()              one scope per extended link role
//! network::RawNetwork
//!        ↓  builder::HierarchyBuilder          roots, cycle/depth-guarded expansion
//! tree::Hierarchy / role::RoleGroup
//! ```
//!
//! [`extract`] holds one orchestrator per network plus [`extract::extract_all`].
//!
//! # Conventions
//!
//! - **Errors**: Nothing here fails once a model is loaded; problems are
//!   recorded through a [`diagnostics::DiagnosticSink`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod builder;
pub mod diagnostics;
pub mod edge;
pub mod extract;
pub mod network;
pub mod role;
pub mod tree;

#[cfg(test)]
mod test_support;

pub use builder::{BuildOptions, HierarchyBuilder};
pub use diagnostics::{Diagnostic, DiagnosticSink, Diagnostics, MalformedReason};
pub use edge::{Edge, Endpoint, NodeNaming};
pub use extract::{ExtractOptions, PresentationView, TaxonomyViews, extract_all};
pub use role::{RoleGroup, RoleHierarchy, group_by_role};
pub use tree::{Hierarchy, TreeNode};
