//! File-backed relationship source.
//!
//! # Overview
//!
//! A snapshot is a serialized taxonomy model, JSON or YAML depending on the
//! file extension, produced by whatever tool actually resolves the DTS:
//!
//! ```json
//! {
//!   "entry_point": "https://example.com/taxonomy/entry.xsd",
//!   "roles": [{ "uri": "http://example.com/role/BalanceSheet", "definition": "Balance Sheet" }],
//!   "concepts": [{ "qname": "ex:Assets", "balance": "debit", "period_type": "instant" }],
//!   "resources": [{ "id": "va1", "xlink_label": "va1", "kind": "valueAssertion" }],
//!   "relationships": [
//!     { "arcrole": "http://www.xbrl.org/2003/arcrole/summation-item",
//!       "role": "http://example.com/role/BalanceSheet",
//!       "from": "ex:Assets", "to": "ex:CurrentAssets", "weight": 1.0 }
//!   ]
//! }
//! ```
//!
//! ## Endpoint resolution
//!
//! `from`/`to` name a concept qname or a resource id. Every concept and
//! resource is placed in one arena (concepts first, in file order) and
//! referenced by [`ObjectId`]. A reference that names nothing, or is absent,
//! resolves to `None`; the relationship is kept so the hierarchy engine can
//! report it as malformed instead of failing the whole load.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::arcrole::{DimensionalAxis, FormulaArc, NetworkKind};
use crate::error::LoadError;
use crate::model::{
    ArcAttributes, CalculationArc, Concept, ContextElement, DimensionalArc,
    FormulaArcAttributes, FormulaResource, ModelObject, ObjectId, PresentationArc, QName,
    Relationship, RoleType,
};
use crate::source::RelationshipSource;

// ---------------------------------------------------------------------------
// File format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    entry_point: Option<String>,
    #[serde(default)]
    roles: Vec<RoleType>,
    #[serde(default)]
    concepts: Vec<RawConcept>,
    #[serde(default)]
    resources: Vec<RawResource>,
    #[serde(default)]
    relationships: Vec<RawRelationship>,
}

#[derive(Debug, Deserialize)]
struct RawConcept {
    qname: String,
    #[serde(default, rename = "type")]
    type_name: Option<QName>,
    #[serde(default)]
    substitution_group: Option<QName>,
    #[serde(default)]
    period_type: Option<crate::model::PeriodType>,
    #[serde(default)]
    balance: Option<crate::model::Balance>,
    #[serde(default, rename = "abstract")]
    is_abstract: bool,
    #[serde(default)]
    references: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawResource {
    id: String,
    #[serde(flatten)]
    resource: FormulaResource,
}

#[derive(Debug, Deserialize)]
struct RawRelationship {
    arcrole: String,
    role: String,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    order: Option<f64>,
    #[serde(default)]
    weight: Option<f64>,
    #[serde(default)]
    preferred_label: Option<String>,
    #[serde(default)]
    closed: Option<bool>,
    #[serde(default)]
    context_element: Option<ContextElement>,
    #[serde(default)]
    usable: Option<bool>,
    #[serde(default)]
    target_role: Option<String>,
    #[serde(default)]
    cover: Option<bool>,
    #[serde(default)]
    complement: Option<bool>,
}

impl RawRelationship {
    fn attributes(&self) -> ArcAttributes {
        match NetworkKind::classify(&self.arcrole) {
            Some(NetworkKind::Presentation) => ArcAttributes::Presentation(PresentationArc {
                order: self.order,
                preferred_label: self.preferred_label.clone(),
            }),
            Some(NetworkKind::Calculation) => ArcAttributes::Calculation(CalculationArc {
                weight: self.weight,
                order: self.order,
            }),
            Some(NetworkKind::Dimensional) => DimensionalAxis::from_arcrole(&self.arcrole)
                .map_or(ArcAttributes::NotApplicable, |axis| {
                    ArcAttributes::Dimensional(DimensionalArc {
                        axis,
                        closed: self.closed,
                        context_element: self.context_element,
                        usable: self.usable,
                        target_role: self.target_role.clone(),
                    })
                }),
            Some(NetworkKind::Formula) => FormulaArc::from_arcrole(&self.arcrole)
                .map_or(ArcAttributes::NotApplicable, |arc| {
                    let filter_arc = arc == FormulaArc::VariableFilter;
                    ArcAttributes::Formula(FormulaArcAttributes {
                        arc,
                        cover: filter_arc && self.cover.unwrap_or(false),
                        complement: filter_arc && self.complement.unwrap_or(false),
                    })
                }),
            None => ArcAttributes::NotApplicable,
        }
    }
}

// ---------------------------------------------------------------------------
// TaxonomySnapshot
// ---------------------------------------------------------------------------

/// An immutable, fully resolved taxonomy model.
#[derive(Debug, Default)]
pub struct TaxonomySnapshot {
    entry_point: Option<String>,
    objects: Vec<ModelObject>,
    keys: HashMap<String, ObjectId>,
    relationships: Vec<Relationship>,
    by_arcrole: HashMap<String, Vec<usize>>,
    role_definitions: HashMap<String, String>,
}

impl TaxonomySnapshot {
    /// Load a snapshot from disk. The format follows the extension:
    /// `.json`, or `.yaml` / `.yml`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the file is missing, unreadable, in an
    /// unsupported format, unparseable, or declares the same key twice.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let is_yaml = match extension.as_deref() {
            Some("json") => false,
            Some("yaml" | "yml") => true,
            _ => return Err(LoadError::UnsupportedFormat(path.to_path_buf())),
        };

        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let snapshot = if is_yaml {
            Self::from_yaml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };

        info!(
            objects = snapshot.objects.len(),
            relationships = snapshot.relationships.len(),
            "taxonomy snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Parse a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] on malformed JSON or duplicate keys.
    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        let file: SnapshotFile = serde_json::from_str(content)?;
        Self::from_file(file)
    }

    /// Parse a YAML snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] on malformed YAML or duplicate keys.
    pub fn from_yaml_str(content: &str) -> Result<Self, LoadError> {
        let file: SnapshotFile = serde_yaml::from_str(content)?;
        Self::from_file(file)
    }

    fn from_file(file: SnapshotFile) -> Result<Self, LoadError> {
        let mut builder = SnapshotBuilder::new();
        builder.snapshot.entry_point = file.entry_point;

        for role in file.roles {
            if let Some(definition) = role.definition {
                builder.role(role.uri, definition);
            }
        }

        for raw in file.concepts {
            let qname: QName = raw.qname.parse().map_err(|source| LoadError::InvalidQName {
                context: format!("concept '{}'", raw.qname),
                source,
            })?;
            let concept = Concept {
                qname,
                type_name: raw.type_name,
                substitution_group: raw.substitution_group,
                period_type: raw.period_type,
                balance: raw.balance,
                is_abstract: raw.is_abstract,
                references: raw.references,
            };
            builder.try_concept(concept)?;
        }

        for raw in file.resources {
            builder.try_resource(raw.id, raw.resource)?;
        }

        for raw in &file.relationships {
            let from = raw.from.as_deref().and_then(|key| builder.resolve(key));
            let to = raw.to.as_deref().and_then(|key| builder.resolve(key));
            if from.is_none() || to.is_none() {
                debug!(
                    arcrole = %raw.arcrole,
                    role = %raw.role,
                    from = ?raw.from,
                    to = ?raw.to,
                    "relationship endpoint did not resolve"
                );
            }
            builder.relationship(Relationship {
                arcrole: raw.arcrole.clone(),
                link_role: raw.role.clone(),
                from,
                to,
                attributes: raw.attributes(),
            });
        }

        Ok(builder.build())
    }

    #[must_use]
    pub fn entry_point(&self) -> Option<&str> {
        self.entry_point.as_deref()
    }

    /// Look up an object by concept qname or resource id.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<ObjectId> {
        self.keys.get(key).copied()
    }

    #[must_use]
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }
}

impl RelationshipSource for TaxonomySnapshot {
    fn objects(&self) -> &[ModelObject] {
        &self.objects
    }

    fn relationships(&self, arcrole: &str, link_role: Option<&str>) -> Vec<&Relationship> {
        self.by_arcrole
            .get(arcrole)
            .map(|indices| {
                indices
                    .iter()
                    .filter_map(|index| self.relationships.get(*index))
                    .filter(|rel| link_role.is_none_or(|role| rel.link_role == role))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn role_definition(&self, link_role: &str) -> Option<&str> {
        self.role_definitions.get(link_role).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// SnapshotBuilder
// ---------------------------------------------------------------------------

/// Incrementally assemble a [`TaxonomySnapshot`].
///
/// Used by the file loader and by adapters that resolve a DTS in-process.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    snapshot: TaxonomySnapshot,
}

impl SnapshotBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry_point(mut self, entry_point: impl Into<String>) -> Self {
        self.snapshot.entry_point = Some(entry_point.into());
        self
    }

    /// Declare a role type definition.
    pub fn role(&mut self, uri: impl Into<String>, definition: impl Into<String>) -> &mut Self {
        self.snapshot
            .role_definitions
            .insert(uri.into(), definition.into());
        self
    }

    /// Add a concept keyed by its qname.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::DuplicateKey`] if the qname is already taken.
    pub fn try_concept(&mut self, concept: Concept) -> Result<ObjectId, LoadError> {
        let key = concept.qname.to_string();
        self.insert(key, ModelObject::Concept(concept))
    }

    /// Add a formula resource keyed by `id`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::DuplicateKey`] if `id` is already taken.
    pub fn try_resource(
        &mut self,
        id: impl Into<String>,
        resource: FormulaResource,
    ) -> Result<ObjectId, LoadError> {
        self.insert(id.into(), ModelObject::Resource(resource))
    }

    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<ObjectId> {
        self.snapshot.keys.get(key).copied()
    }

    pub fn relationship(&mut self, relationship: Relationship) -> &mut Self {
        let index = self.snapshot.relationships.len();
        self.snapshot
            .by_arcrole
            .entry(relationship.arcrole.clone())
            .or_default()
            .push(index);
        self.snapshot.relationships.push(relationship);
        self
    }

    #[must_use]
    pub fn build(self) -> TaxonomySnapshot {
        self.snapshot
    }

    fn insert(&mut self, key: String, object: ModelObject) -> Result<ObjectId, LoadError> {
        if self.snapshot.keys.contains_key(&key) {
            return Err(LoadError::DuplicateKey(key));
        }
        let id = self.push(object)?;
        self.snapshot.keys.insert(key, id);
        Ok(id)
    }

    fn push(&mut self, object: ModelObject) -> Result<ObjectId, LoadError> {
        let id = next_object_id(self.snapshot.objects.len())?;
        self.snapshot.objects.push(object);
        Ok(id)
    }
}

/// The id the arena slot at `len` will get; fails once ids run out.
fn next_object_id(len: usize) -> Result<ObjectId, LoadError> {
    u32::try_from(len)
        .map(ObjectId::new)
        .map_err(|_| LoadError::TooManyObjects(len))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
