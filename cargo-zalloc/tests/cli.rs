//! End-to-end runs of the cargo-zalloc binary.

use std::process::{Command, Output};

use tempfile::TempDir;

fn cargo_zalloc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cargo-zalloc"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("ZALLOC_CONFIG")
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_list_json() {
    let output = cargo_zalloc(&["list", "--output", "json"]);
    assert_eq!(output.status.code(), Some(0));
    let listing = stdout_json(&output);
    let scenarios = listing.as_array().unwrap();
    assert!(scenarios.len() >= 60);
    assert!(scenarios.iter().any(|s| s["name"] == "OK_vec_refill"));
}

#[test]
fn test_list_as_cargo_subcommand() {
    let output = cargo_zalloc(&["zalloc", "list", "--group", "variadic"]);
    assert_eq!(output.status.code(), Some(0));
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("BAD_vec_tail"));
    assert!(!text.contains("OK_vec_refill"));
}

#[test]
fn test_passing_run_exits_zero() {
    let output = cargo_zalloc(&["run", "--group", "keyed-lookup", "--output", "json"]);
    assert_eq!(output.status.code(), Some(0), "{}", String::from_utf8_lossy(&output.stderr));
    let report = stdout_json(&output);
    assert_eq!(report["success"], true);
    assert_eq!(report["stats"]["passed"], 4);
}

#[test]
fn test_mismatch_exits_one() {
    let output = cargo_zalloc(&["run", "--filter", "OK_lazy_", "--warmup-rounds", "0"]);
    assert_eq!(output.status.code(), Some(1));
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("OK_lazy_table_lookup"));
}

#[test]
fn test_bad_config_exits_two() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("zalloc.toml");
    std::fs::write(&path, "[probe]\nrepetitions = 0\n").unwrap();

    let output = cargo_zalloc(&["run", "--config", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load configuration"));
}

#[test]
fn test_override_for_unknown_scenario_exits_two() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("zalloc.toml");
    std::fs::write(&path, "[scenarios.OK_not_in_catalog]\nrepetitions = 5\n").unwrap();

    let output = cargo_zalloc(&["run", "--config", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
}
