use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

const REFERENCE_ARGS: [&str; 6] = ["1000", "60", "100", "40", "5", "50"];

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_critalloc")
}

fn unique_temp_path(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("critalloc-{name}-{stamp}.json"))
}

fn critalloc() -> Command {
    let mut command = Command::new(bin());
    command.env_remove("CRITALLOC_PARAMS").env("RUST_LOG", "off");
    command
}

#[test]
fn optimize_command_emits_the_best_build() {
    let output = critalloc()
        .arg("optimize")
        .args(REFERENCE_ARGS)
        .output()
        .expect("optimize should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("optimize should emit json");
    assert_eq!(payload["x"], 3);
    assert_eq!(payload["y"], 27);
    assert_eq!(payload["z"], 10);
    assert_eq!(payload["source"], "Main Quadratic");
    assert!(payload["damage"].is_number());
}

#[test]
fn optimize_all_lists_every_scenario() {
    let output = critalloc()
        .args(["optimize", "--all"])
        .args(REFERENCE_ARGS)
        .output()
        .expect("optimize should run");

    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("optimize should emit json");
    assert_eq!(payload["best"]["source"], "Main Quadratic");
    assert_eq!(payload["all"].as_array().map(Vec::len), Some(6));
}

#[test]
fn optimize_reads_parameter_file() {
    let path = unique_temp_path("params");
    fs::write(&path, r#"{"K":1000,"I":60,"F":100,"S":40,"CR0":5,"CD0":50}"#)
        .expect("fixture should be written");

    let output = critalloc()
        .args(["optimize", "--params", path.to_string_lossy().as_ref()])
        .output()
        .expect("optimize should run");

    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("optimize should emit json");
    assert_eq!(payload["y"], 27);

    let _ = fs::remove_file(path);
}

#[test]
fn optimize_rejects_non_numeric_input() {
    let output = critalloc()
        .args(["optimize", "1000", "sixty", "100", "40", "5", "50"])
        .output()
        .expect("optimize should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid I 'sixty'"));
}

#[test]
fn optimize_without_parameters_prints_usage() {
    let output = critalloc()
        .arg("optimize")
        .output()
        .expect("optimize should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: critalloc"));
}

#[test]
fn unknown_command_prints_usage() {
    let output = critalloc()
        .arg("serve")
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn sweep_command_emits_csv_rows() {
    let output = critalloc()
        .args(["sweep", "--csv", "--workers", "2"])
        .args(REFERENCE_ARGS)
        .output()
        .expect("sweep should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "s,x,y,z,damage,source");
    assert_eq!(lines.len(), 42);
    assert!(lines[41].starts_with("40,3,27,10,"));
}

#[test]
fn damage_command_evaluates_a_build() {
    let output = critalloc()
        .args(["damage", "3", "27", "10"])
        .args(REFERENCE_ARGS)
        .output()
        .expect("damage should run");

    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("damage should emit json");
    let damage = payload["damage"].as_f64().expect("damage is a number");
    assert!((damage - 3771.6016).abs() < 1e-6);
}

#[test]
fn sweep_rejects_budgets_beyond_the_maximum() {
    let output = critalloc()
        .args(["sweep", "--csv", "1000", "60", "100", "1e12", "5", "50"])
        .output()
        .expect("sweep should run");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exceeds the maximum of 100000"));
}

#[test]
fn optimize_rejects_budget_beyond_exact_range() {
    let output = critalloc()
        .args(["optimize", "1000", "60", "100", "1e300", "5", "50"])
        .output()
        .expect("optimize should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("S must be at most 2^53"));
}
