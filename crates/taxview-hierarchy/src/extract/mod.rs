//! Network orchestrators.
//!
//! # Overview
//!
//! One extractor per output structure, each reading the model through
//! [`RelationshipSource`] and shaping its network the way the viewer shows
//! it:
//!
//! | Extractor                  | Arcroles                         | Identifiers           | Output            |
//! |----------------------------|----------------------------------|-----------------------|-------------------|
//! | [`extract_concepts`]       | none                             | qname                 | `Vec<ConceptRow>` |
//! | [`extract_dimensions`]     | hypercube-dim, dim-domain, dom-member | local name, role-prefixed roots | `Hierarchy` |
//! | [`extract_presentation`]   | parent-child                     | qname                 | `PresentationView`|
//! | [`extract_formulas`]       | assertion-set, variable-set, variable-set-filter, variable-filter | object label | `Hierarchy` |
//! | [`extract_calculations`]   | summation-item (2003 and 2023)   | local name            | `RoleGroup`       |
//!
//! [`extract_all`] runs all five in that order against one snapshot and
//! returns them with the diagnostics they produced. An absent network is an
//! empty structure, never an error.

pub mod calculation;
pub mod concepts;
pub mod cycles;
pub mod dimensions;
pub mod formula;
pub mod presentation;

use serde::Serialize;
use taxview_core::config::{DEFAULT_MAX_DEPTH, ViewerConfig};
use taxview_core::source::RelationshipSource;
use tracing::{info, instrument};

use crate::builder::{BuildOptions, HierarchyBuilder};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::role::RoleGroup;
use crate::tree::Hierarchy;

pub use calculation::extract_calculations;
pub use concepts::{ConceptRow, extract_concepts};
pub use cycles::{CycleReport, network_cycles};
pub use dimensions::extract_dimensions;
pub use formula::extract_formulas;
pub use presentation::{PresentationView, extract_presentation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    pub max_depth: usize,
    pub synthesize_role_root: bool,
    pub group_by_role: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            synthesize_role_root: true,
            group_by_role: true,
        }
    }
}

impl From<&ViewerConfig> for ExtractOptions {
    fn from(config: &ViewerConfig) -> Self {
        Self {
            max_depth: config.hierarchy.max_depth,
            synthesize_role_root: config.calculation.synthesize_role_root,
            group_by_role: config.presentation.group_by_role,
        }
    }
}

impl ExtractOptions {
    #[must_use]
    pub const fn builder(&self) -> HierarchyBuilder {
        HierarchyBuilder::new(BuildOptions {
            max_depth: self.max_depth,
        })
    }
}

/// The five structures handed to the display layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaxonomyViews {
    pub concepts: Vec<ConceptRow>,
    pub dimensions: Hierarchy,
    pub presentation: PresentationView,
    pub formulas: Hierarchy,
    pub calculations: RoleGroup,
    pub diagnostics: Vec<Diagnostic>,
}

/// Run every extraction against `model`.
#[instrument(skip(model))]
pub fn extract_all<S: RelationshipSource + ?Sized>(
    model: &S,
    options: &ExtractOptions,
) -> TaxonomyViews {
    let builder = options.builder();
    let mut sink = Diagnostics::new();

    let concepts = extract_concepts(model);
    let dimensions = extract_dimensions(model, &builder, &mut sink);
    let presentation = extract_presentation(model, &builder, options.group_by_role, &mut sink);
    let formulas = extract_formulas(model, &builder, &mut sink);
    let calculations =
        extract_calculations(model, &builder, options.synthesize_role_root, &mut sink);

    info!(diagnostics = sink.len(), "extraction complete");

    TaxonomyViews {
        concepts,
        dimensions,
        presentation,
        formulas,
        calculations,
        diagnostics: sink.into_entries(),
    }
}
