//! E2E CLI tests covering `taxview view`:
//! - tree rendering per network in text and JSON
//! - "No data available" for empty structures
//! - single-line failure on an unloadable taxonomy
//! - config file and `--max-depth` precedence
//!
//! Each test runs the `taxview` binary as a subprocess in an isolated temp directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

const PARENT_CHILD: &str = "http://www.xbrl.org/2003/arcrole/parent-child";
const SUMMATION: &str = "http://www.xbrl.org/2003/arcrole/summation-item";

/// Build a Command targeting the taxview binary, rooted in `dir`.
fn taxview_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("taxview"));
    cmd.current_dir(dir);
    cmd.env("TAXVIEW_LOG", "error");
    cmd.env_remove("FORMAT");
    cmd
}

fn write_taxonomy(dir: &Path, json: &Value) -> PathBuf {
    let path = dir.join("taxonomy.json");
    std::fs::write(&path, serde_json::to_string_pretty(json).expect("serialize"))
        .expect("write taxonomy");
    path
}

fn balance_sheet() -> Value {
    serde_json::json!({
        "roles": [{ "uri": "http://x/role/BS", "definition": "Balance Sheet" }],
        "concepts": [
            { "qname": "ex:Assets", "balance": "debit", "period_type": "instant" },
            { "qname": "ex:Cash", "balance": "debit", "period_type": "instant" },
            { "qname": "ex:Receivables", "balance": "debit", "period_type": "instant" }
        ],
        "relationships": [
            { "arcrole": PARENT_CHILD, "role": "http://x/role/BS", "from": "ex:Assets", "to": "ex:Cash" },
            { "arcrole": PARENT_CHILD, "role": "http://x/role/BS", "from": "ex:Cash", "to": "ex:Receivables" },
            { "arcrole": SUMMATION, "role": "http://x/role/BS", "from": "ex:Assets", "to": "ex:Cash", "weight": 1.0 },
            { "arcrole": SUMMATION, "role": "http://x/role/BS", "from": "ex:Assets", "to": "ex:Receivables", "weight": 1.0 }
        ]
    })
}

fn view_json(dir: &Path, args: &[&str]) -> Value {
    let output = taxview_cmd(dir)
        .arg("view")
        .args(args)
        .args(["--format", "json"])
        .output()
        .expect("view should not crash");
    assert!(
        output.status.success(),
        "view failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("view --format json should produce valid JSON")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn view_text_renders_every_section() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_taxonomy(dir.path(), &balance_sheet());

    taxview_cmd(dir.path())
        .args(["view", path.to_str().expect("utf8 path"), "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Concepts"))
        .stdout(predicate::str::contains("# Calculations"))
        .stdout(predicate::str::contains("  ex:Assets"))
        .stdout(predicate::str::contains("    Cash\t1\tdebit"));
}

#[test]
fn empty_network_renders_placeholder() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_taxonomy(dir.path(), &balance_sheet());

    taxview_cmd(dir.path())
        .args([
            "view",
            path.to_str().expect("utf8 path"),
            "--network",
            "formulas",
            "--format",
            "pretty",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Formulas"))
        .stdout(predicate::str::contains("No data available"));
}

#[test]
fn json_selects_requested_network() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_taxonomy(dir.path(), &balance_sheet());

    let json = view_json(
        dir.path(),
        &[path.to_str().expect("utf8 path"), "--network", "calculations"],
    );
    let object = json.as_object().expect("object");
    assert_eq!(object.len(), 1);
    let roles = json["calculations"].as_array().expect("role list");
    assert_eq!(roles[0]["label"], "[BS] Balance Sheet");
    assert_eq!(roles[0]["hierarchy"][0]["id"], "Assets");
    assert_eq!(roles[0]["hierarchy"][0]["children"][1]["id"], "Receivables");
}

#[test]
fn max_depth_flag_truncates_trees() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_taxonomy(dir.path(), &balance_sheet());

    let json = view_json(
        dir.path(),
        &[
            path.to_str().expect("utf8 path"),
            "--network",
            "presentation",
            "--max-depth",
            "1",
        ],
    );
    let cash = &json["presentation"]["by_role"][0]["hierarchy"][0]["children"][0];
    assert_eq!(cash["id"], "ex:Cash");
    assert!(cash.get("children").is_none());
}

#[test]
fn config_file_disables_role_grouping() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_taxonomy(dir.path(), &balance_sheet());
    std::fs::write(
        dir.path().join("taxview.toml"),
        "[presentation]\ngroup_by_role = false\n",
    )
    .expect("write config");

    let json = view_json(
        dir.path(),
        &[path.to_str().expect("utf8 path"), "--network", "presentation"],
    );
    let roots = json["presentation"]["flat"].as_array().expect("flat forest");
    assert_eq!(roots[0]["id"], "[BS] ex:Assets");
}

#[test]
fn config_output_mode_is_honored() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_taxonomy(dir.path(), &balance_sheet());
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "output = \"json\"\n").expect("write config");

    let output = taxview_cmd(dir.path())
        .args([
            "--config",
            config.to_str().expect("utf8 path"),
            "view",
            path.to_str().expect("utf8 path"),
            "--network",
            "concepts",
        ])
        .output()
        .expect("view should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(json["concepts"][0]["qname"], "ex:Assets");
}

#[test]
fn missing_taxonomy_fails_with_one_line() {
    let dir = TempDir::new().expect("tempdir");

    let output = taxview_cmd(dir.path())
        .args(["view", "missing.json", "--format", "text"])
        .output()
        .expect("view should not crash");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert_eq!(stderr.lines().count(), 1, "stderr: {stderr}");
    assert!(stderr.starts_with("error loading taxonomy: "));
}

#[test]
fn malformed_taxonomy_reports_code_in_json() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("broken.json"), "{ not json").expect("write");

    let output = taxview_cmd(dir.path())
        .args(["view", "broken.json", "--json"])
        .output()
        .expect("view should not crash");
    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stderr).expect("json error");
    assert_eq!(json["error"]["error_code"], "E1003");
}
