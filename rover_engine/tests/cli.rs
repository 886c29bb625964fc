use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use tempfile::TempDir;

fn rover(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rover").unwrap();
    // Keep a stray rover.toml in the working directory from leaking in
    cmd.current_dir(dir.path()).env("RUST_LOG", "off");
    cmd
}

#[test]
fn when_moving_the_final_position_is_printed() {
    let dir = TempDir::new().unwrap();

    rover(&dir)
        .args(["move", "--x", "1", "--y", "2", "--direction", "N"])
        .args(["--instructions", "LMLMLMLMM"])
        .assert()
        .success()
        .stdout("1 3 N\n");
}

#[test]
fn when_moving_with_json_the_full_result_is_printed() {
    let dir = TempDir::new().unwrap();

    let output = rover(&dir)
        .args(["move", "--x", "0", "--y", "0", "--direction", "N"])
        .args(["--instructions", "MMRMM", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["formattedResult"], "2 2 E");
    assert_eq!(value["result"]["end"]["heading"], "E");
}

#[test]
fn when_moving_with_draw_the_grid_and_final_position_are_printed() {
    let dir = TempDir::new().unwrap();

    rover(&dir)
        .args(["move", "--x", "0", "--y", "0", "--direction", "N"])
        .args(["--instructions", "MMRMM", "--draw"])
        .assert()
        .success()
        .stdout(contains("Grid: [0, 4] x [0, 4]").and(contains("2 2 E")));
}

#[test]
fn when_leaving_the_grid_the_exit_code_marks_an_input_error() {
    let dir = TempDir::new().unwrap();

    rover(&dir)
        .args(["move", "--x", "4", "--y", "4", "--direction", "N"])
        .args(["--instructions", "M"])
        .assert()
        .code(2)
        .stderr(contains("Instruction 0").and(contains("outside of the grid")));
}

#[test]
fn when_leaving_the_grid_with_json_the_error_code_is_printed() {
    let dir = TempDir::new().unwrap();

    rover(&dir)
        .args(["move", "--x", "4", "--y", "4", "--direction", "N"])
        .args(["--instructions", "M", "--json"])
        .assert()
        .code(2)
        .stdout(contains("BOUNDARY_VIOLATION"));
}

#[test]
fn when_an_instruction_is_invalid_it_is_reported() {
    let dir = TempDir::new().unwrap();

    rover(&dir)
        .args(["move", "--x", "1", "--y", "1", "--direction", "N"])
        .args(["--instructions", "MMRX"])
        .assert()
        .code(2)
        .stderr(contains("Invalid instruction 'X' at index 3"));
}

#[test]
fn when_a_coordinate_is_missing_it_is_reported() {
    let dir = TempDir::new().unwrap();

    rover(&dir)
        .args(["move", "--x", "1", "--direction", "N", "--instructions", "M"])
        .assert()
        .code(2)
        .stderr(contains("Missing y coordinate"));
}

#[test]
fn when_recording_is_configured_runs_are_listed_by_logs() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    fs::write(
        &config,
        "[grid]\nmax_x = 9\nmax_y = 9\n\n[recorder]\npath = \"runs.jsonl\"\n",
    )
    .unwrap();

    rover(&dir)
        .arg("--config")
        .arg(&config)
        .args(["move", "--x", "8", "--y", "8", "--direction", "E"])
        .args(["--instructions", "M"])
        .assert()
        .success()
        .stdout("9 8 E\n");

    rover(&dir)
        .arg("--config")
        .arg(&config)
        .arg("logs")
        .assert()
        .success()
        .stdout(contains("8 8 E -> 9 8 E  M"));
}

#[test]
fn when_the_config_file_is_missing_the_command_fails() {
    let dir = TempDir::new().unwrap();

    rover(&dir)
        .args(["--config", "missing.toml", "logs"])
        .assert()
        .code(1)
        .stderr(contains("Could not load config"));
}
