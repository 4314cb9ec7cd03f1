//! `taxview cycles`: list relationship cycles (strongly connected components).

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use taxview_hierarchy::Diagnostics;
use taxview_hierarchy::extract::{CycleReport, network_cycles};

use super::load_taxonomy;
use crate::output::{OutputMode, render};

/// Arguments for `taxview cycles`.
#[derive(Args, Debug)]
pub struct CyclesArgs {
    /// Taxonomy snapshot (.json, .yaml or .yml).
    pub path: PathBuf,
}

#[derive(Debug, Serialize)]
struct CyclesOutput {
    cycles: Vec<CycleReport>,
}

/// Execute `taxview cycles`.
pub fn run_cycles(args: &CyclesArgs, output: OutputMode) -> anyhow::Result<()> {
    let model = load_taxonomy(&args.path, output)?;
    let mut sink = Diagnostics::new();
    let payload = CyclesOutput {
        cycles: network_cycles(&model, &mut sink),
    };
    render(output, &payload, render_cycles_human)
}

fn render_cycles_human(payload: &CyclesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    if payload.cycles.is_empty() {
        writeln!(w, "No relationship cycles found.")?;
        return Ok(());
    }

    writeln!(w, "Relationship cycles ({})", payload.cycles.len())?;

    for (idx, cycle) in payload.cycles.iter().enumerate() {
        writeln!(w, "\nCycle {} [{}] {}:", idx + 1, cycle.network, cycle.label)?;
        for member in &cycle.members {
            writeln!(w, "  - {member}")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxview_core::arcrole::NetworkKind;

    #[test]
    fn render_cycles_human_no_cycles() {
        let payload = CyclesOutput { cycles: Vec::new() };
        let mut out = Vec::new();

        render_cycles_human(&payload, &mut out).expect("render");

        let rendered = String::from_utf8(out).expect("utf8");
        assert!(rendered.contains("No relationship cycles found."));
    }

    #[test]
    fn render_cycles_human_lists_members() {
        let payload = CyclesOutput {
            cycles: vec![CycleReport {
                network: NetworkKind::Calculation,
                role: "http://x/role/R".to_string(),
                label: "[R] Income".to_string(),
                members: vec!["X".to_string(), "Y".to_string()],
            }],
        };
        let mut out = Vec::new();

        render_cycles_human(&payload, &mut out).expect("render");

        let rendered = String::from_utf8(out).expect("utf8");
        assert!(rendered.contains("Relationship cycles (1)"));
        assert!(rendered.contains("Cycle 1 [calculation] [R] Income:"));
        assert!(rendered.contains("  - X\n  - Y"));
    }
}
