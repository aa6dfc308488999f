// main.rsとエントリーポイントのテスト
use crate::fixtures::*;
use std::process::Command;
use tempfile::TempDir;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_fleet_pipeline"))
}

#[test]
fn test_cli_help() {
    let output = binary().arg("--help").output().expect("Failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("fleet_pipeline"));
    assert!(stdout.contains("run"));
}

#[test]
fn test_cli_run_writes_report() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(temp_dir.path(), "fleet.json", &sample_fleet());
    let output_file = temp_dir.path().join("results.txt");

    let output = binary()
        .arg("run")
        .arg(&input)
        .arg("-o")
        .arg(&output_file)
        .args(["-w", "3", "-c", "2", "--year", "2026", "--quiet"])
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    let report = std::fs::read_to_string(&output_file).unwrap();
    assert!(report.contains("INPUT DATA"));
    assert!(report.contains("OUTPUT DATA"));
}

#[test]
fn test_cli_missing_input_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();

    let output = binary()
        .arg("run")
        .arg(temp_dir.path().join("missing.json"))
        .arg("--quiet")
        .output()
        .expect("Failed to execute binary");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("missing.json"));
}

#[test]
fn test_cli_zero_workers_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(temp_dir.path(), "fleet.json", &sample_fleet());

    let output = binary()
        .arg("run")
        .arg(&input)
        .arg("-o")
        .arg(temp_dir.path().join("out.txt"))
        .args(["-w", "0", "--quiet"])
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
}
