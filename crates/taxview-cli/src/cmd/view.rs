//! `taxview view`: render the extracted networks as indented trees.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};
use serde_json::Value;
use taxview_core::arcrole::uri_suffix;
use taxview_core::config::ViewerConfig;
use taxview_core::model::{Concept, FormulaResource, ModelObject};
use taxview_core::source::RelationshipSource;
use taxview_hierarchy::extract::{ConceptRow, ExtractOptions, TaxonomyViews, extract_all};
use taxview_hierarchy::{PresentationView, RoleGroup, TreeNode};

use super::load_taxonomy;
use crate::output::{OutputMode, pretty_section, render, write_table};

/// Which structure to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum NetworkArg {
    #[default]
    All,
    Concepts,
    Dimensions,
    Presentation,
    Formulas,
    Calculations,
}

impl NetworkArg {
    fn includes(self, other: Self) -> bool {
        self == Self::All || self == other
    }
}

/// Arguments for `taxview view`.
#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Taxonomy snapshot (.json, .yaml or .yml).
    pub path: PathBuf,

    /// Structure to render.
    #[arg(long, value_enum, default_value_t = NetworkArg::All)]
    pub network: NetworkArg,

    /// Deepest level expanded below each root.
    #[arg(long)]
    pub max_depth: Option<usize>,
}

/// One rendered table: a title, its columns, and the tree flattened to rows.
#[derive(Debug)]
struct Section {
    title: &'static str,
    headers: &'static [&'static str],
    rows: Vec<Vec<String>>,
}

const CONCEPT_HEADERS: &[&str] = &[
    "QName",
    "Name",
    "Type",
    "SubstitutionGroup",
    "PeriodType",
    "Balance",
    "Abstract",
];
const DIMENSION_HEADERS: &[&str] = &["QName", "Arcrole", "CntxElt", "Closed", "Usable"];
const PRESENTATION_HEADERS: &[&str] = &["QName", "PrefLabel", "Type", "References"];
const FORMULA_HEADERS: &[&str] = &[
    "Object",
    "Label",
    "Cover",
    "Complement",
    "BindAsSequence",
    "Expression",
    "Value",
];
const CALCULATION_HEADERS: &[&str] = &["QName", "Weight", "Balance"];

/// Execute `taxview view`.
pub fn run_view(args: &ViewArgs, config: &ViewerConfig, output: OutputMode) -> anyhow::Result<()> {
    let model = load_taxonomy(&args.path, output)?;

    let mut options = ExtractOptions::from(config);
    if let Some(max_depth) = args.max_depth {
        options.max_depth = max_depth;
    }
    let views = extract_all(&model, &options);

    let payload = json_payload(&views, args.network)?;
    let sections = sections(&model, &views, args.network);
    render(output, &payload, |_, w| write_sections(output, &sections, w))
}

/// JSON for the selected structures; `all` also carries the diagnostics.
fn json_payload(views: &TaxonomyViews, network: NetworkArg) -> anyhow::Result<Value> {
    let value = serde_json::to_value(views).context("failed to serialize views")?;
    let key = match network {
        NetworkArg::All => return Ok(value),
        NetworkArg::Concepts => "concepts",
        NetworkArg::Dimensions => "dimensions",
        NetworkArg::Presentation => "presentation",
        NetworkArg::Formulas => "formulas",
        NetworkArg::Calculations => "calculations",
    };
    let selected = value.get(key).cloned().unwrap_or(Value::Null);
    Ok(serde_json::json!({ key: selected }))
}

fn sections<S: RelationshipSource + ?Sized>(
    model: &S,
    views: &TaxonomyViews,
    network: NetworkArg,
) -> Vec<Section> {
    let mut out = Vec::new();

    if network.includes(NetworkArg::Concepts) {
        out.push(Section {
            title: "Concepts",
            headers: CONCEPT_HEADERS,
            rows: views.concepts.iter().map(concept_cells).collect(),
        });
    }
    if network.includes(NetworkArg::Dimensions) {
        let mut rows = Vec::new();
        push_forest(&mut rows, views.dimensions.roots(), 0, &dimension_cells);
        out.push(Section {
            title: "Dimensions",
            headers: DIMENSION_HEADERS,
            rows,
        });
    }
    if network.includes(NetworkArg::Presentation) {
        let cells = |node: &TreeNode| presentation_cells(model, node);
        let mut rows = Vec::new();
        match &views.presentation {
            PresentationView::ByRole(group) => push_roles(&mut rows, group, &cells),
            PresentationView::Flat(hierarchy) => {
                push_forest(&mut rows, hierarchy.roots(), 0, &cells);
            }
        }
        out.push(Section {
            title: "Presentation",
            headers: PRESENTATION_HEADERS,
            rows,
        });
    }
    if network.includes(NetworkArg::Formulas) {
        let mut rows = Vec::new();
        push_forest(&mut rows, views.formulas.roots(), 0, &|node| {
            formula_cells(model, node)
        });
        out.push(Section {
            title: "Formulas",
            headers: FORMULA_HEADERS,
            rows,
        });
    }
    if network.includes(NetworkArg::Calculations) {
        let mut rows = Vec::new();
        push_roles(&mut rows, &views.calculations, &|node| {
            calculation_cells(model, node)
        });
        out.push(Section {
            title: "Calculations",
            headers: CALCULATION_HEADERS,
            rows,
        });
    }

    out
}

fn write_sections(
    output: OutputMode,
    sections: &[Section],
    w: &mut dyn Write,
) -> std::io::Result<()> {
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            writeln!(w)?;
        }
        if output == OutputMode::Pretty {
            pretty_section(w, section.title)?;
        } else {
            writeln!(w, "# {}", section.title)?;
        }
        write_table(output, section.headers, &section.rows, w)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tree flattening
// ---------------------------------------------------------------------------

type Cells<'a> = dyn Fn(&TreeNode) -> Vec<String> + 'a;

/// One row per node in preorder; the first cell is the indented identifier.
fn push_forest(rows: &mut Vec<Vec<String>>, roots: &[TreeNode], base: usize, cells: &Cells<'_>) {
    for root in roots {
        for (node, depth) in root.iter_with_depth() {
            let mut row = vec![format!("{}{}", "  ".repeat(base + depth), node.id)];
            row.extend(cells(node));
            rows.push(row);
        }
    }
}

/// A heading row per role followed by its trees one level in.
fn push_roles(rows: &mut Vec<Vec<String>>, group: &RoleGroup, cells: &Cells<'_>) {
    for role in group {
        rows.push(vec![role.label.clone()]);
        push_forest(rows, role.hierarchy.roots(), 1, cells);
    }
}

fn concept_of<'a, S: RelationshipSource + ?Sized>(
    model: &'a S,
    node: &TreeNode,
) -> Option<&'a Concept> {
    node.object
        .and_then(|id| model.object(id))
        .and_then(ModelObject::as_concept)
}

fn resource_of<'a, S: RelationshipSource + ?Sized>(
    model: &'a S,
    node: &TreeNode,
) -> Option<&'a FormulaResource> {
    node.object
        .and_then(|id| model.object(id))
        .and_then(ModelObject::as_resource)
}

fn flag(value: Option<bool>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

fn concept_cells(row: &ConceptRow) -> Vec<String> {
    vec![
        row.qname.clone(),
        row.name.clone(),
        row.type_name.clone(),
        row.substitution_group.clone(),
        row.period_type.clone(),
        row.balance.clone(),
        row.is_abstract.to_string(),
    ]
}

fn dimension_cells(node: &TreeNode) -> Vec<String> {
    node.arc.as_dimensional().map_or_else(Vec::new, |arc| {
        vec![
            arc.axis.short_name().to_string(),
            arc.context_element
                .map(|element| element.as_str().to_string())
                .unwrap_or_default(),
            flag(arc.closed),
            flag(arc.usable),
        ]
    })
}

fn presentation_cells<S: RelationshipSource + ?Sized>(model: &S, node: &TreeNode) -> Vec<String> {
    let preferred = node
        .arc
        .as_presentation()
        .and_then(|arc| arc.preferred_label.as_deref())
        .map(|label| uri_suffix(label).to_string())
        .unwrap_or_default();
    let concept = concept_of(model, node);
    vec![
        preferred,
        concept
            .and_then(|c| c.type_name.as_ref())
            .map(ToString::to_string)
            .unwrap_or_default(),
        concept.map(|c| c.references.join("; ")).unwrap_or_default(),
    ]
}

fn formula_cells<S: RelationshipSource + ?Sized>(model: &S, node: &TreeNode) -> Vec<String> {
    let arc = node.arc.as_formula();
    let resource = resource_of(model, node);
    vec![
        resource
            .and_then(|r| r.label.clone())
            .unwrap_or_default(),
        flag(arc.map(|a| a.cover)),
        flag(arc.map(|a| a.complement)),
        flag(resource.and_then(|r| r.bind_as_sequence)),
        resource
            .and_then(|r| r.expression.clone())
            .unwrap_or_default(),
        resource.and_then(|r| r.value.clone()).unwrap_or_default(),
    ]
}

fn calculation_cells<S: RelationshipSource + ?Sized>(model: &S, node: &TreeNode) -> Vec<String> {
    vec![
        node.arc
            .as_calculation()
            .and_then(|arc| arc.weight)
            .map(|weight| weight.to_string())
            .unwrap_or_default(),
        concept_of(model, node)
            .and_then(|c| c.balance)
            .map(|balance| balance.as_str().to_string())
            .unwrap_or_default(),
    ]
}
