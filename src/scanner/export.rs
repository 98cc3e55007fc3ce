//! Session export
//!
//! Writes the codes approved during a session to a flat CSV file when the
//! session stops. The file is a one-way record; it is never read back.

use chrono::{DateTime, SecondsFormat, Utc};
use std::io::Write;
use std::path::Path;

use super::error::{ScanError, ScanOutcome};

const HEADER: [&str; 3] = ["index", "code", "approved_at"];

/// One approved code with the wall-clock time it was approved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovedRecord {
    pub code: String,
    pub approved_at: DateTime<Utc>,
}

/// CSV writer for approved records
pub struct SessionExporter {
    delimiter: char,
}

impl Default for SessionExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionExporter {
    pub fn new() -> Self {
        Self { delimiter: ',' }
    }

    pub fn new_tsv() -> Self {
        Self { delimiter: '\t' }
    }

    /// Pick the delimiter from the file extension (`.tsv`/`.tab` → tab)
    pub fn for_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("tsv") | Some("tab") => Self::new_tsv(),
            _ => Self::new(),
        }
    }

    fn escape_value(&self, value: &str) -> String {
        if value.contains(self.delimiter)
            || value.contains('"')
            || value.contains('\n')
            || value.contains('\r')
        {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }

    /// Render records, header first
    pub fn render(&self, records: &[ApprovedRecord]) -> String {
        let delimiter = self.delimiter.to_string();
        let mut out = HEADER.join(&delimiter);
        out.push('\n');

        for (index, record) in records.iter().enumerate() {
            let row = [
                (index + 1).to_string(),
                self.escape_value(&record.code),
                record
                    .approved_at
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            ];
            out.push_str(&row.join(&delimiter));
            out.push('\n');
        }
        out
    }

    /// Write records to `path`, replacing any existing file
    pub fn write(&self, path: &Path, records: &[ApprovedRecord]) -> ScanOutcome<usize> {
        let export_err = |e: std::io::Error| ScanError::Export {
            path: path.display().to_string(),
            message: format!("Cannot write '{}': {}", path.display(), e),
        };

        let mut file = std::fs::File::create(path).map_err(export_err)?;
        file.write_all(self.render(records).as_bytes())
            .map_err(export_err)?;
        file.flush().map_err(export_err)?;

        log::info!("Exported {} approved codes to {}", records.len(), path.display());
        Ok(records.len())
    }
}
