//! Flat concept table.

use serde::Serialize;
use taxview_core::source::RelationshipSource;
use tracing::{info, instrument};

/// One row of the concept table. Absent properties are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConceptRow {
    pub qname: String,
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub substitution_group: String,
    pub period_type: String,
    pub balance: String,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
}

/// Every concept in model order.
#[instrument(skip_all)]
pub fn extract_concepts<S: RelationshipSource + ?Sized>(model: &S) -> Vec<ConceptRow> {
    let rows: Vec<ConceptRow> = model
        .concepts()
        .into_iter()
        .map(|(_, concept)| ConceptRow {
            qname: concept.qname.to_string(),
            name: concept.local_name().to_string(),
            type_name: concept
                .type_name
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            substitution_group: concept
                .substitution_group
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            period_type: concept
                .period_type
                .map(|period| period.as_str().to_string())
                .unwrap_or_default(),
            balance: concept
                .balance
                .map(|balance| balance.as_str().to_string())
                .unwrap_or_default(),
            is_abstract: concept.is_abstract,
        })
        .collect();

    info!(concepts = rows.len(), "concepts extracted");
    rows
}
