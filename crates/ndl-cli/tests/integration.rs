//! Integration tests for CLI commands.

use serde_json::{json, Value};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn write_json(dir: &TempDir, name: &str, value: &Value) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
    path.to_string_lossy().to_string()
}

fn run_cli(args: &[&str]) -> (Option<i32>, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_ndl"))
        .args(args)
        .env_remove("NDL_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    (output.status.code(), stdout, stderr)
}

fn float_pair(dir: &TempDir) -> (String, String) {
    (
        write_json(dir, "left.json", &json!({"a": 1.0, "b": 2.01})),
        write_json(dir, "right.json", &json!({"a": 1.01, "b": 2.011})),
    )
}

#[test]
fn test_canonicalize_sorts_keys_and_sequences() {
    let dir = TempDir::new().unwrap();
    let input = write_json(&dir, "in.json", &json!({"b": [3, 1, 2], "a": {"z": 1, "y": 2}}));

    let (code, stdout, _) = run_cli(&["canonicalize", &input]);
    assert_eq!(code, Some(0));
    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed, json!({"a": {"y": 2, "z": 1}, "b": [1, 2, 3]}));
    assert!(stdout.find("\"a\"").unwrap() < stdout.find("\"b\"").unwrap());
}

#[test]
fn test_canonicalize_report() {
    let dir = TempDir::new().unwrap();
    let input = write_json(&dir, "in.json", &json!({"l": [1, 2]}));

    let (code, _, stderr) = run_cli(&["canonicalize", &input, "--report"]);
    assert_eq!(code, Some(0));
    let report: Value = serde_json::from_str(stderr.lines().last().unwrap()).unwrap();
    assert_eq!(report["mappings"], 1);
    assert_eq!(report["sequences"], 1);
    assert_eq!(report["leaves"], 2);
}

#[test]
fn test_compare_match_and_mismatch() {
    let dir = TempDir::new().unwrap();
    let left = write_json(&dir, "left.json", &json!([{"b": 2, "a": 1}, [4, 3, 1, 2]]));
    let right = write_json(&dir, "right.json", &json!([[1, 2, 3, 4], {"a": 1, "b": 2}]));

    let (code, stdout, _) = run_cli(&["compare", &left, &right]);
    assert_eq!(code, Some(0));
    assert_eq!(stdout.trim(), "match");

    let (left, right) = float_pair(&dir);
    let (code, stdout, _) = run_cli(&["compare", &left, &right]);
    assert_eq!(code, Some(1));
    assert_eq!(stdout.trim(), "mismatch");
}

#[test]
fn test_diff_plain_output() {
    let dir = TempDir::new().unwrap();
    let (left, right) = float_pair(&dir);

    let (code, stdout, _) = run_cli(&["diff", &left, &right, "--plain", "--width", "20"]);
    assert_eq!(code, Some(1));
    assert!(stdout.contains(" | "));
    assert!(stdout.contains("{+1+}"));
    assert!(!stdout.contains('\x1b'));
}

#[test]
fn test_policy_file_rounds_floats() {
    let dir = TempDir::new().unwrap();
    let (left, right) = float_pair(&dir);
    let policy = write_json(
        &dir,
        "policy.json",
        &json!({"normalizers": [{"kind": "float_round", "places": 1}]}),
    );

    let (code, _, _) = run_cli(&["diff", &left, &right, "--policy", &policy]);
    assert_eq!(code, Some(0));

    let scoped = write_json(
        &dir,
        "scoped.json",
        &json!({"normalizers": [{"kind": "float_round", "places": 1,
            "selectors": [{"kind": "last_component", "names": ["a"]}]}]}),
    );
    let (code, _, _) = run_cli(&["compare", &left, &right, "--policy", &scoped]);
    assert_eq!(code, Some(1));
}

#[test]
fn test_str_today_date_uses_pinned_today() {
    let dir = TempDir::new().unwrap();
    let input = write_json(&dir, "in.json", &json!({"created": "2019-07-04", "name": "x"}));
    let policy = write_json(
        &dir,
        "policy.json",
        &json!({"normalizers": [{"kind": "str_today_date"}]}),
    );

    let (code, stdout, _) = run_cli(&[
        "canonicalize",
        &input,
        "--policy",
        &policy,
        "--today",
        "2031-12-31",
    ]);
    assert_eq!(code, Some(0));
    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed, json!({"created": "2031-12-31", "name": "x"}));
}

#[test]
fn test_fingerprint_ignores_order() {
    let dir = TempDir::new().unwrap();
    let a = write_json(&dir, "a.json", &json!({"x": [2, 1], "y": "z"}));
    let b = write_json(&dir, "b.json", &json!({"y": "z", "x": [1, 2]}));

    let (code_a, out_a, _) = run_cli(&["fingerprint", &a]);
    let (code_b, out_b, _) = run_cli(&["fingerprint", &b]);
    assert_eq!(code_a, Some(0));
    assert_eq!(code_b, Some(0));
    assert_eq!(out_a, out_b);
    let digest: Value = serde_json::from_str(&out_a).unwrap();
    assert_eq!(digest["alg"], "sha-256");
    assert_eq!(digest["b64"].as_str().unwrap().len(), 43);

    let (_, bytes, _) = run_cli(&["fingerprint", &a, "--bytes"]);
    assert_eq!(bytes.trim(), r#"{"x":[1,2],"y":"z"}"#);
}

#[test]
fn test_unknown_policy_kind_is_an_error() {
    let dir = TempDir::new().unwrap();
    let (left, right) = float_pair(&dir);
    let policy = write_json(&dir, "policy.json", &json!({"sorters": [{"kind": "shuffle"}]}));

    let (code, stdout, stderr) = run_cli(&["compare", &left, &right, "--policy", &policy]);
    assert_eq!(code, Some(2));
    assert!(stdout.is_empty());
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("shuffle"));
}

#[test]
fn test_missing_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");
    let (code, _, stderr) = run_cli(&["canonicalize", &missing.to_string_lossy()]);
    assert_eq!(code, Some(2));
    assert!(stderr.contains("failed to read"));
}

#[test]
fn test_invalid_json_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{not json").unwrap();
    let (code, _, stderr) = run_cli(&["fingerprint", path_str(&path)]);
    assert_eq!(code, Some(2));
    assert!(stderr.contains("invalid JSON"));
}

#[test]
fn test_json_logs_go_to_stderr() {
    let dir = TempDir::new().unwrap();
    let (left, right) = float_pair(&dir);
    let output = Command::new(env!("CARGO_BIN_EXE_ndl"))
        .args(["--log-format", "json", "compare", &left, &right])
        .env("NDL_LOG", "debug")
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stdout.trim(), "mismatch");
    let events: Vec<Value> = stderr
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert!(events
        .iter()
        .any(|e| e["fields"]["op"] == "compare" && e["fields"]["event"] == "end"));
}

fn json_events(stderr: &str) -> Vec<Value> {
    stderr
        .lines()
        .filter(|line| line.starts_with('{'))
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_command_events_carry_exit_code_and_origin() {
    let dir = TempDir::new().unwrap();
    let (left, right) = float_pair(&dir);
    let output = Command::new(env!("CARGO_BIN_EXE_ndl"))
        .args(["--log-format", "json", "diff", &left, &right])
        .env("NDL_LOG", "ndl=debug")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let events = json_events(&String::from_utf8(output.stderr).unwrap());
    let end = events
        .iter()
        .find(|e| e["fields"]["component"] == "ndl" && e["fields"]["event"] == "end")
        .unwrap();
    assert_eq!(end["fields"]["op"], "diff");
    assert_eq!(end["fields"]["exit_code"], 1);

    let missing = dir.path().join("missing.json");
    let output = Command::new(env!("CARGO_BIN_EXE_ndl"))
        .args(["--log-format", "json", "fingerprint", path_str(&missing)])
        .env("NDL_LOG", "ndl=debug")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let events = json_events(&String::from_utf8(output.stderr).unwrap());
    let failed = events
        .iter()
        .find(|e| e["fields"]["event"] == "end_error")
        .unwrap();
    assert_eq!(failed["fields"]["op"], "fingerprint");
    assert_eq!(failed["fields"]["origin"], path_str(&missing));
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}
