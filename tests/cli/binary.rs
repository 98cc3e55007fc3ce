//! Running the built executable
//!
//! Each run gets an explicit empty configuration file so a user's own
//! configuration never leaks into the results.

use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Output, Stdio};

use tempfile::NamedTempFile;

use crate::common::{frame_log, json_lines};

fn empty_config() -> NamedTempFile {
    NamedTempFile::new().unwrap()
}

fn scangate(args: &[&str], config: &NamedTempFile) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scangate"));
    cmd.arg("--config-file")
        .arg(config.path())
        .args(["--log-level", "off", "--interval-ms", "1"])
        .args(args);
    cmd
}

fn run(args: &[&str]) -> Output {
    let config = empty_config();
    scangate(args, &config).output().unwrap()
}

#[test]
fn test_text_output_from_frame_log() {
    let log = frame_log(&["QR1", "QR2", "QR1"]);
    let output = run(&[
        "--no-color",
        "--cooldown-ms",
        "0",
        "--input",
        log.path().to_str().unwrap(),
    ]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Scanning...\nApproved: QR1\nApproved: QR2\nThis code has already been used.\nScanning stopped.\n"
    );
}

#[test]
fn test_json_output_from_stdin() {
    let config = empty_config();
    let mut child = scangate(&["-O", "json", "-d", "0", "-i", "-"], &config)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"A\tB\n!fail\nB\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let events: Vec<String> = json_lines(&output.stdout)
        .iter()
        .map(|v| v["event"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        events,
        vec!["status", "result", "result", "frame_error", "result", "status"]
    );
}

#[test]
fn test_export_flag_writes_file() {
    let log = frame_log(&["QR1", "QR1", "QR2"]);
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("approved.csv");
    let output = run(&[
        "--no-color",
        "-i",
        log.path().to_str().unwrap(),
        "--export",
        export.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.ends_with(&format!("Exported 2 codes to {}\n", export.display())));
    assert_eq!(std::fs::read_to_string(&export).unwrap().lines().count(), 3);
}

#[test]
fn test_closed_stdout_still_exports() {
    let codes: Vec<String> = (0..2000).map(|i| format!("QR{}", i)).collect();
    let lines: Vec<&str> = codes.iter().map(String::as_str).collect();
    let log = frame_log(&lines);
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("approved.csv");
    let config = empty_config();

    let mut child = scangate(
        &[
            "--no-color",
            "-d",
            "0",
            "-i",
            log.path().to_str().unwrap(),
            "--export",
            export.to_str().unwrap(),
        ],
        &config,
    )
    .stdout(Stdio::piped())
    .spawn()
    .unwrap();

    // read the first line, then hang up like `| head -1`
    let mut first = String::new();
    BufReader::new(child.stdout.take().unwrap())
        .read_line(&mut first)
        .unwrap();
    assert_eq!(first, "Scanning...\n");

    let status = child.wait().unwrap();
    assert!(status.success(), "exit status {:?}", status);

    let csv = std::fs::read_to_string(&export).unwrap();
    assert!(csv.starts_with("index,code,approved_at\n"));
    assert!(csv.lines().count() >= 2);
}

#[test]
fn test_startup_errors_exit_with_status_1() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.log");
    let output = run(&["-i", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    let output = Command::new(env!("CARGO_BIN_EXE_scangate"))
        .arg("--config-file")
        .arg(dir.path().join("absent.toml"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("absent.toml"));
}
