//! `taxview diagnose`: what extraction skipped, truncated or found empty.
//!
//! JSON output schema is stable for automation: fields are only ever added.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use taxview_core::TaxonomySnapshot;
use taxview_core::arcrole::NetworkKind;
use taxview_core::config::ViewerConfig;
use taxview_core::source::RelationshipSource;
use taxview_hierarchy::extract::{ExtractOptions, TaxonomyViews, extract_all};
use taxview_hierarchy::{Diagnostic, PresentationView, RoleGroup};

use super::load_taxonomy;
use crate::output::{OutputMode, pretty_kv, pretty_section, render};

/// Arguments for `taxview diagnose`.
#[derive(Args, Debug)]
pub struct DiagnoseArgs {
    /// Taxonomy snapshot (.json, .yaml or .yml).
    pub path: PathBuf,

    /// Deepest level expanded below each root.
    #[arg(long)]
    pub max_depth: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct DiagnoseReport {
    pub taxonomy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<String>,
    pub object_count: usize,
    pub relationship_count: usize,
    /// Diagnostic count per kind.
    pub counts: BTreeMap<&'static str, usize>,
    pub fingerprints: Vec<Fingerprint>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Content hash of one role-grouped network.
#[derive(Debug, Serialize)]
pub struct Fingerprint {
    pub network: NetworkKind,
    pub label: String,
    pub content_hash: String,
}

/// Execute `taxview diagnose`.
pub fn run_diagnose(
    args: &DiagnoseArgs,
    config: &ViewerConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let model = load_taxonomy(&args.path, output)?;

    let mut options = ExtractOptions::from(config);
    if let Some(max_depth) = args.max_depth {
        options.max_depth = max_depth;
    }
    let views = extract_all(&model, &options);

    let report = build_report(&args.path.display().to_string(), &model, views);
    render(output, &report, render_human)
}

fn build_report(taxonomy: &str, model: &TaxonomySnapshot, views: TaxonomyViews) -> DiagnoseReport {
    let mut counts = BTreeMap::new();
    for diagnostic in &views.diagnostics {
        *counts.entry(diagnostic.kind()).or_insert(0) += 1;
    }

    let mut fingerprints = Vec::new();
    if let PresentationView::ByRole(group) = &views.presentation {
        push_fingerprints(&mut fingerprints, NetworkKind::Presentation, group);
    }
    push_fingerprints(&mut fingerprints, NetworkKind::Calculation, &views.calculations);

    DiagnoseReport {
        taxonomy: taxonomy.to_string(),
        entry_point: model.entry_point().map(ToString::to_string),
        object_count: model.objects().len(),
        relationship_count: model.relationship_count(),
        counts,
        fingerprints,
        diagnostics: views.diagnostics,
    }
}

fn push_fingerprints(out: &mut Vec<Fingerprint>, network: NetworkKind, group: &RoleGroup) {
    out.extend(group.iter().map(|role| Fingerprint {
        network,
        label: role.label.clone(),
        content_hash: role.content_hash.clone(),
    }));
}

fn render_human(report: &DiagnoseReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Taxonomy")?;
    pretty_kv(w, "path", &report.taxonomy)?;
    if let Some(entry_point) = &report.entry_point {
        pretty_kv(w, "entry point", entry_point)?;
    }
    pretty_kv(w, "objects", report.object_count.to_string())?;
    pretty_kv(w, "arcs", report.relationship_count.to_string())?;

    writeln!(w)?;
    pretty_section(w, "Diagnostics")?;
    if report.diagnostics.is_empty() {
        writeln!(w, "No diagnostics.")?;
    } else {
        for (kind, count) in &report.counts {
            pretty_kv(w, kind, count.to_string())?;
        }
        writeln!(w)?;
        for diagnostic in &report.diagnostics {
            writeln!(w, "  [{}] {diagnostic}", diagnostic.kind())?;
        }
    }

    if !report.fingerprints.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Fingerprints")?;
        for fingerprint in &report.fingerprints {
            writeln!(
                w,
                "  {:<12} {}  {}",
                fingerprint.network.as_str(),
                fingerprint.content_hash,
                fingerprint.label
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "entry_point": "https://example.com/entry.xsd",
        "concepts": [{ "qname": "ex:A" }, { "qname": "ex:B" }],
        "relationships": [
            { "arcrole": "http://www.xbrl.org/2003/arcrole/summation-item",
              "role": "http://x/role/R", "from": "ex:A", "to": "ex:B" },
            { "arcrole": "http://www.xbrl.org/2003/arcrole/summation-item",
              "role": "http://x/role/R", "from": "ex:B", "to": "ex:A" },
            { "arcrole": "http://www.xbrl.org/2003/arcrole/parent-child",
              "role": "http://x/role/R", "from": "ex:A" }
        ]
    }"#;

    fn report() -> DiagnoseReport {
        let model = TaxonomySnapshot::from_json_str(SNAPSHOT).expect("snapshot");
        let views = extract_all(&model, &ExtractOptions::default());
        build_report("t.json", &model, views)
    }

    #[test]
    fn counts_group_diagnostics_by_kind() {
        let report = report();
        assert_eq!(report.counts.get("malformed_edge"), Some(&1));
        assert_eq!(report.counts.get("no_natural_root"), Some(&1));
        assert!(report.counts.get("cycle_detected").copied().unwrap_or(0) >= 1);
        let total: usize = report.counts.values().sum();
        assert_eq!(total, report.diagnostics.len());
    }

    #[test]
    fn calculation_roles_are_fingerprinted() {
        let report = report();
        let calc: Vec<&Fingerprint> = report
            .fingerprints
            .iter()
            .filter(|f| f.network == NetworkKind::Calculation)
            .collect();
        assert_eq!(calc.len(), 1);
        assert!(calc[0].content_hash.starts_with("blake3:"));
    }

    #[test]
    fn human_report_lists_sections() {
        let report = report();
        let mut out = Vec::new();
        render_human(&report, &mut out).expect("render");
        let rendered = String::from_utf8(out).expect("utf8");
        assert!(rendered.contains("entry point: https://example.com/entry.xsd"));
        assert!(rendered.contains("[malformed_edge] malformed edge in http://x/role/R"));
        assert!(rendered.contains("Fingerprints"));
    }
}
