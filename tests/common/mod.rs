//! Common test utilities and helpers
//!
//! Frame log fixtures and helpers for reading renderer output.

#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use scangate::app::cli::ScanSettings;
use scangate::display::OutputFormat;
use tempfile::NamedTempFile;

/// Write a frame log, one line per frame
pub fn frame_log(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create frame log");
    for line in lines {
        writeln!(file, "{}", line).expect("write frame log");
    }
    file.flush().expect("flush frame log");
    file
}

/// Settings for a fast replay of `input` without cooldown
pub fn replay_settings(input: &Path) -> ScanSettings {
    ScanSettings {
        input: Some(input.to_path_buf()),
        interval: Duration::from_millis(1),
        cooldown: Duration::ZERO,
        output_format: OutputFormat::Json,
        export: None,
    }
}

/// Parse JSON lines renderer output
pub fn json_lines(output: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(output)
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid JSON line"))
        .collect()
}

/// The `message` field of every JSON line
pub fn messages(output: &[u8]) -> Vec<String> {
    json_lines(output)
        .iter()
        .map(|v| v["message"].as_str().unwrap_or_default().to_string())
        .collect()
}
