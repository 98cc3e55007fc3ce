//! CLI argument validation
//!
//! Resolves the merged command line and configuration values into the
//! settings a scan run needs, applying defaults for anything left unset.

use std::path::PathBuf;
use std::time::Duration;

use crate::core::validation::{validate_export_path, ValidationError};
use crate::display::OutputFormat;
use crate::scanner::cooldown::DEFAULT_COOLDOWN;
use crate::scanner::polling::DEFAULT_POLL_INTERVAL;

use super::args::Args;

/// Validated settings for one scan run
#[derive(Debug, Clone, PartialEq)]
pub struct ScanSettings {
    /// Frame log, `None` meaning stdin
    pub input: Option<PathBuf>,
    pub interval: Duration,
    pub cooldown: Duration,
    pub output_format: OutputFormat,
    pub export: Option<PathBuf>,
}

impl Args {
    /// Validate arguments and resolve them into [`ScanSettings`]
    pub fn validate(&self) -> Result<ScanSettings, ValidationError> {
        let interval = match self.interval_ms {
            Some(0) => {
                return Err(ValidationError::new(
                    "Polling interval must be greater than 0",
                ))
            }
            Some(ms) => Duration::from_millis(ms),
            None => DEFAULT_POLL_INTERVAL,
        };

        let cooldown = self
            .cooldown_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_COOLDOWN);

        let output_format = match self.output_format.as_deref() {
            Some(name) => OutputFormat::from_name(name).ok_or_else(|| {
                ValidationError::new(&format!(
                    "Unknown output format '{}' (expected one of: {})",
                    name,
                    OutputFormat::names().join(", ")
                ))
            })?,
            None => OutputFormat::default(),
        };

        if let Some(path) = &self.export {
            validate_export_path(path)?;
        }

        let input = self
            .input
            .clone()
            .filter(|path| path.as_os_str() != "-");
        if let Some(path) = &input {
            if !path.is_file() {
                return Err(ValidationError::new(&format!(
                    "Frame log '{}' does not exist or is not a file",
                    path.display()
                )));
            }
        }

        Ok(ScanSettings {
            input,
            interval,
            cooldown,
            output_format,
            export: self.export.clone(),
        })
    }
}
