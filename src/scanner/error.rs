//! Scanner Error Types

/// Scanner error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScanError {
    /// The frame source could not be opened
    #[error("Frame source unavailable: {message}")]
    SourceUnavailable { message: String },

    /// A single frame could not be read; polling continues
    #[error("Frame read failed: {message}")]
    FrameRead { message: String },

    /// IO operation failed
    #[error("IO error: {message}")]
    Io { message: String },

    /// Invalid configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Session export failed
    #[error("Export to '{path}' failed: {message}")]
    Export { path: String, message: String },
}

impl ScanError {
    /// Whether the polling loop may carry on after this error
    pub fn is_transient(&self) -> bool {
        matches!(self, ScanError::FrameRead { .. })
    }
}

impl From<std::io::Error> for ScanError {
    fn from(err: std::io::Error) -> Self {
        ScanError::Io {
            message: err.to_string(),
        }
    }
}

impl crate::core::error_handling::ContextualError for ScanError {
    fn is_user_actionable(&self) -> bool {
        match self {
            ScanError::Configuration { .. } => true, // User can fix config issues
            ScanError::SourceUnavailable { .. } => true, // Wrong input path
            ScanError::Export { .. } => true,        // Wrong export path
            ScanError::FrameRead { .. } => false,
            ScanError::Io { .. } => false, // System IO issues
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ScanError::Configuration { message } => Some(message),
            ScanError::SourceUnavailable { message } => Some(message),
            ScanError::Export { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Result type for scanner operations
pub type ScanOutcome<T> = Result<T, ScanError>;
