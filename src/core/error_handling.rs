//! Error reporting helpers
//!
//! Errors that reach the top of the application are split into two kinds:
//! those the user can fix (a bad flag, a missing input file) and those they
//! cannot (an IO failure half-way through a run). The first kind is shown
//! verbatim, the second with a short context line and the detail at debug
//! level.

/// Errors that know whether their message is meant for the user
///
/// When `is_user_actionable()` returns true, `user_message()` must return
/// `Some`; otherwise it returns `None`.
pub trait ContextualError: std::error::Error {
    /// True when the message tells the user what to change
    fn is_user_actionable(&self) -> bool;

    /// The message to show when the error is user-actionable
    fn user_message(&self) -> Option<&str>;
}

/// Log a fatal error with the detail level its kind calls for
///
/// ```rust,no_run
/// # use scangate::core::error_handling::log_error_with_context;
/// # use scangate::scanner::ScanError;
/// let err = ScanError::SourceUnavailable { message: "Cannot open frame log 'x.log'".into() };
/// log_error_with_context(&err, "Opening frame source");
/// // logs: "FATAL: Cannot open frame log 'x.log'"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => log::error!("FATAL: {}", user_msg),
        _ => log::error!("FATAL: {}", operation_context),
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

/// Message to print on stderr when logging may not be up yet
pub fn fatal_message<E: ContextualError>(error: &E, operation_context: &str) -> String {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => user_msg.to_string(),
        _ => format!("{}: {}", operation_context, error),
    }
}
