//! Core CLI arguments structure and basic functionality
//!
//! This module contains the Args struct definition and merge logic.
//! Validation and configuration loading are handled by separate modules.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::core::logging::{LOG_FORMATS, LOG_LEVELS};
use crate::core::validation::{validate_millis, validate_positive_int};

// Every option is optional so values from the configuration file can be told
// apart from values given on the command line.
#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(name = "scangate")]
#[command(about = "Approve each scanned QR or barcode once per session")]
#[command(version, long_version = crate::core::version::long_version())]
#[command(styles = crate::core::styles::palette_to_clap(true))]
#[command(
    after_help = "Frame log format: one line per frame, codes separated by tabs, '#' comments, '!fail' marks a failed read."
)]
pub struct Args {
    /// Frame log to replay ('-' for stdin)
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Polling interval in milliseconds [default: 100]
    #[arg(short = 'n', long = "interval-ms", value_name = "MS", value_parser = validate_positive_int)]
    pub interval_ms: Option<u64>,

    /// Minimum time before the same code's result is shown again, 0 disables [default: 1000]
    #[arg(short = 'd', long = "cooldown-ms", value_name = "MS", value_parser = validate_millis)]
    pub cooldown_ms: Option<u64>,

    /// Result output format
    #[arg(short = 'O', long = "output-format", value_name = "FORMAT", value_parser = ["text", "json"])]
    pub output_format: Option<String>,

    /// Write approved codes to this CSV file when scanning stops
    #[arg(short = 'e', long = "export", value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Force coloured output
    #[arg(short = 'g', long = "color", action = ArgAction::SetTrue, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable coloured output
    #[arg(long = "no-color", action = ArgAction::SetTrue)]
    pub no_color: bool,

    /// More log output (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Less log output (repeatable)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    /// Log level (overrides -v/-q)
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = LOG_LEVELS)]
    pub log_level: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = LOG_FORMATS)]
    pub log_format: Option<String>,

    // Colour preference from the configuration file; not a CLI flag
    #[arg(skip)]
    pub config_color: Option<bool>,

    // Configuration keys that were not recognised, reported once logging is up
    #[arg(skip)]
    pub ignored_config_keys: Vec<String>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay values given on the command line onto `self` (usually loaded
    /// from the configuration file). Command line wins.
    pub fn merge_cli(&mut self, cli: Args) {
        if cli.input.is_some() {
            self.input = cli.input;
        }
        if cli.config_file.is_some() {
            self.config_file = cli.config_file;
        }
        if cli.interval_ms.is_some() {
            self.interval_ms = cli.interval_ms;
        }
        if cli.cooldown_ms.is_some() {
            self.cooldown_ms = cli.cooldown_ms;
        }
        if cli.output_format.is_some() {
            self.output_format = cli.output_format;
        }
        if cli.export.is_some() {
            self.export = cli.export;
        }
        if cli.log_level.is_some() {
            self.log_level = cli.log_level;
        }
        if cli.log_file.is_some() {
            self.log_file = cli.log_file;
        }
        if cli.log_format.is_some() {
            self.log_format = cli.log_format;
        }
        self.color |= cli.color;
        self.no_color |= cli.no_color;
        self.verbose = self.verbose.saturating_add(cli.verbose);
        self.quiet = self.quiet.saturating_add(cli.quiet);
    }

    /// Net verbosity from -v/-q counts
    pub fn verbosity(&self) -> i8 {
        (self.verbose.min(100) as i8) - (self.quiet.min(100) as i8)
    }

    /// Resolve colour: explicit flags, then configuration, then TTY detection
    pub fn use_color(&self, is_terminal: bool) -> bool {
        if self.no_color {
            false
        } else if self.color {
            true
        } else {
            self.config_color.unwrap_or(is_terminal)
        }
    }

    /// Log file, with the magic values "none" and "-" meaning no file
    pub fn effective_log_file(&self) -> Option<&PathBuf> {
        self.log_file.as_ref().filter(|path| {
            let s = path.to_string_lossy();
            !(s.eq_ignore_ascii_case("none") || s == "-")
        })
    }
}
