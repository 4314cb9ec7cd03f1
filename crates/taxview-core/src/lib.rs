#![forbid(unsafe_code)]
//! taxview-core library.
//!
//! Holds the taxonomy model the hierarchy engine reads from: concepts,
//! formula resources, typed relationships, and the [`source::RelationshipSource`]
//! adapter trait. A file-backed adapter lives in [`snapshot`].
//!
//! # Conventions
//!
//! - **Errors**: Library errors are `thiserror` enums mapped to an [`error::ErrorCode`];
//!   use `anyhow::Result` at the application edge.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod arcrole;
pub mod config;
pub mod error;
pub mod model;
pub mod snapshot;
pub mod source;

pub use error::{ErrorCode, LoadError};
pub use model::{ArcAttributes, Concept, FormulaResource, ModelObject, ObjectId, QName, Relationship};
pub use snapshot::TaxonomySnapshot;
pub use source::RelationshipSource;
