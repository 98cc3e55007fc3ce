//! Validation utilities for configuration values

use std::fmt;
use std::path::Path;

/// A configuration value failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

impl crate::core::error_handling::ContextualError for ValidationError {
    fn is_user_actionable(&self) -> bool {
        true
    }

    fn user_message(&self) -> Option<&str> {
        Some(&self.message)
    }
}

/// Validate a strictly positive integer
pub fn validate_positive_int(value: &str) -> Result<u64, String> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err("Value must be greater than 0".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a valid positive integer", value)),
    }
}

/// Validate a millisecond duration that may be zero (zero disables pacing)
pub fn validate_millis(value: &str) -> Result<u64, String> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| format!("'{}' is not a valid number of milliseconds", value))
}

/// Validate that an export target can be created: parent directory must exist
/// and the path must not be a directory
pub fn validate_export_path(path: &Path) -> Result<(), ValidationError> {
    if path.as_os_str().is_empty() {
        return Err(ValidationError::new("Export path cannot be empty"));
    }
    if path.is_dir() {
        return Err(ValidationError::new(&format!(
            "Export path '{}' is a directory",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(ValidationError::new(&format!(
                "Export directory '{}' does not exist",
                parent.display()
            )));
        }
    }
    Ok(())
}
