//! TOML configuration file parsing and loading
//!
//! Handles default config file discovery, reading, and applying config
//! values onto [`Args`] before command line values are overlaid.

use std::path::{Path, PathBuf};

use crate::core::logging::{LOG_FORMATS, LOG_LEVELS};
use crate::core::validation::{validate_millis, validate_positive_int, ValidationError};
use crate::display::OutputFormat;

use super::args::Args;

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("The specified configuration file does not exist: {path}")]
    NotFound { path: PathBuf },

    #[error("Error reading configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    Invalid {
        path: PathBuf,
        message: String,
        #[source]
        source: ValidationError,
    },
}

impl crate::core::error_handling::ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, ConfigError::Invalid { .. })
    }

    // other variants are reported through their Display text, which names the file
    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::Invalid { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Default configuration file location: `<config_dir>/Scangate/scangate.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("Scangate").join("scangate.toml"))
}

impl Args {
    /// Load the configuration file into a fresh `Args`.
    ///
    /// An explicitly named file must exist; the default location is optional.
    pub async fn load_config_file(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match config_file {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
        let table = toml::from_str::<toml::Table>(&contents).map_err(|source| {
            ConfigError::Parse {
                path: path.clone(),
                source,
            }
        })?;

        let mut args = Self::default();
        Self::apply_toml_values(&mut args, &table)
            .map_err(|source| ConfigError::Invalid {
                message: format!("Error in configuration file {}: {}", path.display(), source),
                path,
                source,
            })?;
        Ok(args)
    }

    /// Apply TOML configuration values to Args
    pub fn apply_toml_values(args: &mut Self, config: &toml::Table) -> Result<(), ValidationError> {
        if let Some(input) = config.get("input").and_then(|v| v.as_str()) {
            args.input = Some(PathBuf::from(input));
        }
        if let Some(value) = config.get("interval-ms") {
            let ms = Self::integer_field(value, "interval-ms")?;
            args.interval_ms =
                Some(validate_positive_int(&ms.to_string()).map_err(|e| Self::field_error("interval-ms", &e))?);
        }
        if let Some(value) = config.get("cooldown-ms") {
            let ms = Self::integer_field(value, "cooldown-ms")?;
            args.cooldown_ms =
                Some(validate_millis(&ms.to_string()).map_err(|e| Self::field_error("cooldown-ms", &e))?);
        }
        if let Some(format) = config.get("output-format").and_then(|v| v.as_str()) {
            if OutputFormat::from_name(format).is_none() {
                return Err(ValidationError::new(&format!(
                    "output-format: unknown format '{}' (expected one of: {})",
                    format,
                    OutputFormat::names().join(", ")
                )));
            }
            args.output_format = Some(format.to_ascii_lowercase());
        }
        if let Some(export) = config.get("export").and_then(|v| v.as_str()) {
            args.export = Some(PathBuf::from(export));
        }
        if let Some(color) = config.get("color").and_then(|v| v.as_bool()) {
            args.config_color = Some(color);
        }
        if let Some(no_color) = config.get("no-color").and_then(|v| v.as_bool()) {
            args.config_color = Some(!no_color);
        }
        if let Some(log_level) = config.get("log-level").and_then(|v| v.as_str()) {
            args.log_level = Some(Self::one_of("log-level", log_level, &LOG_LEVELS)?);
        }
        if let Some(log_file) = config.get("log-file").and_then(|v| v.as_str()) {
            args.log_file = Some(PathBuf::from(log_file));
        }
        if let Some(log_format) = config.get("log-format").and_then(|v| v.as_str()) {
            args.log_format = Some(Self::one_of("log-format", log_format, &LOG_FORMATS)?);
        }

        args.ignored_config_keys = config
            .keys()
            .filter(|key| !KNOWN_KEYS.contains(&key.as_str()))
            .cloned()
            .collect();
        Ok(())
    }

    fn integer_field(value: &toml::Value, key: &str) -> Result<i64, ValidationError> {
        value.as_integer().ok_or_else(|| {
            ValidationError::new(&format!("{}: expected an integer number of milliseconds", key))
        })
    }

    fn one_of(key: &str, value: &str, allowed: &[&str]) -> Result<String, ValidationError> {
        let lower = value.to_ascii_lowercase();
        if allowed.contains(&lower.as_str()) {
            Ok(lower)
        } else {
            Err(ValidationError::new(&format!(
                "{}: '{}' is not one of {}",
                key,
                value,
                allowed.join(", ")
            )))
        }
    }

    fn field_error(key: &str, message: &str) -> ValidationError {
        ValidationError::new(&format!("{}: {}", key, message))
    }
}

const KNOWN_KEYS: [&str; 10] = [
    "input",
    "interval-ms",
    "cooldown-ms",
    "output-format",
    "export",
    "color",
    "no-color",
    "log-level",
    "log-file",
    "log-format",
];
