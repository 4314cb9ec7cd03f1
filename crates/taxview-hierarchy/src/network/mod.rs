//! Adjacency graphs for one network scope.
//!
//! # Overview
//!
//! A scope is one network restricted to one extended link role (or, for
//! formulas, the whole formula network). Its validated [`crate::edge::Edge`]s
//! are loaded into a [`petgraph`] directed graph keyed per
//! [`build::NodeIdentity`]: by identifier for concept networks, by model
//! object for formulas.
//!
//! ```text
//! Vec<Edge>
//!        ↓  build::RawNetwork::from_edges_keyed()
//! RawNetwork (DiGraph, possibly cyclic)
//!        ├─ roots() / children()  → crate::builder::HierarchyBuilder
//!        └─ cycles::find_all_cycles() → crate::extract::cycles
//! ```
//!
//! ## Ordering
//!
//! Node indices follow first discovery in edge order, and outgoing edges are
//! read back in insertion order, so the graph never introduces an ordering
//! of its own.

pub mod build;
pub mod cycles;

pub use build::{NodeData, NodeIdentity, RawNetwork};
pub use cycles::find_all_cycles;
