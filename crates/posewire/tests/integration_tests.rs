//! Integration tests for the posewire CLI
//!
//! These drive the binary end to end with `--stdout` so no serial hardware
//! is needed, and check exit codes for each failure class.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const PX_ONE_FRAME: &str =
    "aa 29 05 ff 06 00 64 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00";
const PX_MINUS_ONE_FRAME: &str =
    "aa 29 05 ff 06 ff 9b 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00";

const PX_ONE_LINE: &str = "[1,0,0,0,0,0,0,0,0,0,0,0]\n";
const PX_MINUS_ONE_LINE: &str = "{\"translation\":[-1,0,0],\"velocity\":[0,0,0],\"acceleration\":[0,0,0],\"angular_velocity\":[0,0,0]}\n";

/// Test helper to create a posewire command with a clean environment
fn posewire() -> Command {
    let mut cmd = Command::cargo_bin("posewire").unwrap();
    cmd.env_remove("POSEWIRE_CONFIG")
        .env_remove("POSEWIRE_DEVICE")
        .env_remove("POSEWIRE_BAUD")
        .env_remove("RUST_LOG");
    cmd
}

// --- encode subcommand ---

#[test]
fn test_encode_prints_token_line() {
    posewire()
        .args(["encode", "1", "0", "0", "0", "0", "0", "0", "0", "0", "0", "0", "0"])
        .assert()
        .success()
        .stdout(format!("{PX_ONE_FRAME}\n"));
}

#[test]
fn test_encode_negative_and_tail_fields() {
    posewire()
        .args([
            "encode", "0.25", "-0.5", "2", "0", "0", "0", "0", "0", "0", "0", "0", "3",
        ])
        .assert()
        .success()
        .stdout(
            "aa 29 05 ff 06 00 19 ff cd 00 c8 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 2c 00\n",
        );
}

#[test]
fn test_encode_strict_rejects_out_of_range() {
    posewire()
        .args([
            "--strict", "encode", "400", "0", "0", "0", "0", "0", "0", "0", "0", "0", "0", "0",
        ])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("field 0 out of range"));
}

#[test]
fn test_encode_with_report() {
    posewire()
        .args([
            "--report", "scaled-hex", "encode", "-0.5", "0", "0", "0", "0", "0", "0", "0", "0", "0",
            "0", "0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("aa 29 05 ff 06 ff cd 00 00"))
        .stderr(predicate::str::contains("px: ffffffce\tpy: 0"));
}

// --- streaming ---

#[test]
fn test_stdout_stream_from_stdin() {
    posewire()
        .arg("--stdout")
        .write_stdin(format!("{PX_ONE_LINE}# comment\n\n{PX_MINUS_ONE_LINE}"))
        .assert()
        .success()
        .stdout(format!("{PX_ONE_FRAME} {PX_MINUS_ONE_FRAME} "));
}

#[test]
fn test_max_frames_limits_output() {
    posewire()
        .args(["--stdout", "--max-frames", "1"])
        .write_stdin(format!("{PX_ONE_LINE}{PX_MINUS_ONE_LINE}"))
        .assert()
        .success()
        .stdout(format!("{PX_ONE_FRAME} "));
}

#[test]
fn test_input_file_and_append_layout() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("poses.jsonl");
    fs::write(&input, PX_ONE_LINE).unwrap();

    posewire()
        .args(["--stdout", "--layout", "append", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout(format!("{PX_ONE_FRAME} "));
}

#[test]
fn test_report_goes_to_stderr_in_stdout_mode() {
    posewire()
        .args(["--stdout", "--report", "scaled-int"])
        .write_stdin(PX_MINUS_ONE_LINE)
        .assert()
        .success()
        .stdout(format!("{PX_MINUS_ONE_FRAME} "))
        .stderr(predicate::str::contains("px: -100\tpy: 0"));
}

// --- failures and exit codes ---

#[test]
fn test_malformed_line_exit_code() {
    posewire()
        .arg("--stdout")
        .write_stdin(format!("{PX_ONE_LINE}[1,2,3]\n"))
        .assert()
        .code(3)
        .stdout(format!("{PX_ONE_FRAME} "))
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_missing_input_file_exit_code() {
    posewire()
        .args(["--stdout", "-i", "/nonexistent/poses.jsonl"])
        .assert()
        .code(3);
}

#[test]
fn test_unsupported_baud_exit_code() {
    posewire()
        .args(["--baud", "1234", "check-config"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unsupported baud rate: 1234"));
}

#[test]
fn test_missing_config_file_exit_code() {
    posewire()
        .args(["--config", "/nonexistent/posewire.yaml", "check-config"])
        .assert()
        .code(2);
}

#[cfg(unix)]
#[test]
fn test_missing_serial_device_exit_code() {
    posewire()
        .args(["--device", "/nonexistent/ttyAMA9"])
        .write_stdin(PX_ONE_LINE)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Caused by:"));
}

// --- check-config ---

#[test]
fn test_check_config_prints_effective_yaml() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("posewire.yaml");
    fs::write(
        &config,
        "serial:\n  device: /dev/ttyS1\n  baud: 57600\nframe:\n  strict: true\n",
    )
    .unwrap();

    posewire()
        .arg("--config")
        .arg(&config)
        .args(["--layout", "append", "check-config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("device: /dev/ttyS1"))
        .stdout(predicate::str::contains("baud: 57600"))
        .stdout(predicate::str::contains("layout: append"))
        .stdout(predicate::str::contains("strict: true"));
}

#[test]
fn test_check_config_json_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("posewire.json");
    fs::write(&config, r#"{"report": {"mode": "raw"}, "max_frames": 9}"#).unwrap();

    posewire()
        .arg("--config")
        .arg(&config)
        .arg("check-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("mode: raw"))
        .stdout(predicate::str::contains("max_frames: 9"));
}

#[test]
fn test_env_baud_fallback() {
    posewire()
        .env("POSEWIRE_BAUD", "230400")
        .arg("check-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("baud: 230400"));
}
