//! Integration tests for tabreport CLI

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::{tempdir, TempDir};

fn run_tabreport(args: &[&str]) -> (String, String, bool) {
    let mut cmd_args = vec!["run", "-p", "tabreport", "--"];
    cmd_args.extend(args);

    let output = Command::new("cargo")
        .args(&cmd_args)
        .current_dir(env!("CARGO_MANIFEST_DIR").to_string() + "/..")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

/// A temp dir holding `orders.csv`, plus its path as a string
fn orders_fixture() -> (TempDir, String) {
    let dir = tempdir().unwrap();
    let input = dir.path().join("orders.csv");
    fs::write(&input, "item,qty,price\nbolt,40,0.25\nnut,100,0.1\n").unwrap();
    let input = input.to_string_lossy().to_string();
    (dir, input)
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_tabreport(&["--help"]);

    assert!(success);
    assert!(stdout.contains("tabreport"));
    assert!(stdout.contains("exporters"));
    assert!(stdout.contains("export"));
}

#[test]
fn test_export_help() {
    let (stdout, _, success) = run_tabreport(&["export", "--help"]);

    assert!(success);
    assert!(stdout.contains("--input"));
    assert!(stdout.contains("--exporter"));
    assert!(stdout.contains("--filename"));
    assert!(stdout.contains("--calc"));
    assert!(stdout.contains("--summary"));
    assert!(stdout.contains("--plain"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, success) = run_tabreport(&["--version"]);

    assert!(success);
    assert!(stdout.contains("tabreport"));
}

#[test]
fn test_exporters_listing() {
    let (stdout, _, success) = run_tabreport(&["exporters"]);

    assert!(success);
    assert!(stdout.contains("Kind"));
    for kind in ["TXT", "CSV", "XLSX", "JSON"] {
        assert!(stdout.contains(kind), "missing {kind}");
    }
    assert!(stdout.contains(".xlsx"));
}

#[test]
fn test_exporters_json() {
    let (stdout, _, success) = run_tabreport(&["exporters", "--json"]);

    assert!(success);
    let rows: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["index"], 1);
    assert_eq!(rows[2]["kind"], "XLSX");
    assert_eq!(rows[2]["formatting"], true);
}

#[test]
fn test_txt_export_with_calc_and_summary() {
    let (dir, input) = orders_fixture();
    let out = dir.path().join("out");

    let (stdout, stderr, success) = run_tabreport(&[
        "export",
        "--input",
        &input,
        "--exporter",
        "txt",
        "--filename",
        "orders",
        "--output-dir",
        &path_str(&out),
        "--title",
        "Orders",
        "--row-numbers",
        "--calc",
        "PROD:1,2:total",
        "--summary",
        "SUM:3:Grand total",
    ]);

    assert!(success, "stderr: {stderr}");
    assert!(stdout.contains("Exported"));
    assert!(stdout.contains("orders.txt"));

    let text = fs::read_to_string(out.join("orders.txt")).unwrap();
    assert!(text.starts_with("Orders\n"));
    assert!(text.contains("total"));
    assert!(text.contains("bolt"));
    assert!(text.contains("Summary:"));
    assert!(text.contains("Grand total: 20"));
}

#[test]
fn test_csv_export_by_index() {
    let (dir, input) = orders_fixture();

    // CSV is the second registered exporter
    let (_, stderr, success) = run_tabreport(&[
        "export",
        "-i",
        &input,
        "-e",
        "2",
        "-f",
        "orders",
        "-o",
        &path_str(dir.path()),
    ]);

    assert!(success, "stderr: {stderr}");
    let text = fs::read_to_string(dir.path().join("orders.csv")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "item,qty,price");
    assert_eq!(lines[1], "bolt,40,0.25");
    assert_eq!(lines[2], "nut,100,0.1");
}

#[test]
fn test_json_export() {
    let (dir, input) = orders_fixture();

    let (_, stderr, success) = run_tabreport(&[
        "export",
        "-i",
        &input,
        "-e",
        "json",
        "-f",
        "orders",
        "-o",
        &path_str(dir.path()),
        "--summary",
        "COUNT:0",
    ]);

    assert!(success, "stderr: {stderr}");
    let text = fs::read_to_string(dir.path().join("orders.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["headers"][0], "item");
    assert_eq!(doc["rows"].as_array().unwrap().len(), 2);
    assert_eq!(doc["summary"][0]["key"], "COUNT item");
    assert_eq!(doc["summary"][0]["value"], "2");
}

#[test]
fn test_xlsx_export_formatted() {
    let (dir, input) = orders_fixture();

    let (_, stderr, success) = run_tabreport(&[
        "export",
        "-i",
        &input,
        "-e",
        "XLSX",
        "-f",
        "orders",
        "-o",
        &path_str(dir.path()),
        "-t",
        "Orders",
        "--header-background",
        "#c0c0c0",
        "--header-align",
        "center",
        "--border-style",
        "normal",
        "--precision",
        "2",
        "--summary",
        "AVERAGE:2",
    ]);

    assert!(success, "stderr: {stderr}");
    let bytes = fs::read(dir.path().join("orders.xlsx")).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_invalid_filename() {
    let (dir, input) = orders_fixture();

    let (_, stderr, success) = run_tabreport(&[
        "export",
        "-i",
        &input,
        "-e",
        "txt",
        "-f",
        "bad name!",
        "-o",
        &path_str(dir.path()),
    ]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("bad name!"));
}

#[test]
fn test_unknown_exporter() {
    let (_dir, input) = orders_fixture();

    let (_, stderr, success) =
        run_tabreport(&["export", "-i", &input, "-e", "pdf", "-f", "orders"]);

    assert!(!success);
    assert!(stderr.contains("unknown exporter 'pdf'"));
}

#[test]
fn test_division_by_zero_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("ratios.csv");
    fs::write(&input, "a,b\n4,2\n1,0\n").unwrap();

    let (_, stderr, success) = run_tabreport(&[
        "export",
        "-i",
        &path_str(&input),
        "-e",
        "txt",
        "-f",
        "ratios",
        "-o",
        &path_str(dir.path()),
        "--calc",
        "DIV:0,1",
    ]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
    assert!(!dir.path().join("ratios.txt").exists());
}

#[test]
fn test_missing_input_file() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.csv");

    let (_, stderr, success) = run_tabreport(&[
        "export",
        "-i",
        &path_str(&missing),
        "-e",
        "txt",
        "-f",
        "x",
    ]);

    assert!(!success);
    assert!(stderr.contains("failed to load"));
}
