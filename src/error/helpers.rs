//! High-level error helper utilities for user-facing error handling.
//!
//! Structured error summaries and friendly suggestions suitable for CLI/UI
//! rendering, plus the single translated message shown in the error panel.

use super::types::{ErrorCategory, ModerationError};
use crate::config::UiCopy;
use crate::config::copy::fill;
use crate::types::ContentType;

/// Error kind for presentation (coarse-grained)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Busy,
    Timeout,
    Network,
    Client,
    Server,
    Parsing,
    Local,
}

/// Structured error summary for CLI/UI consumption
#[derive(Debug, Clone)]
pub struct ErrorSummary {
    pub kind: ErrorKind,
    pub status: Option<u16>,
    /// Message as shown to the user (translated where the client owns the text).
    pub message: String,
    /// Server-provided details, when the response carried any.
    pub details: Option<serde_json::Value>,
    pub suggestions: Vec<String>,
}

/// Summarize a ModerationError with its user-facing message and suggestions.
pub fn summarize_error(err: &ModerationError, copy: &UiCopy) -> ErrorSummary {
    let details = match err {
        ModerationError::ApiError { details, .. } => details.clone(),
        _ => None,
    };
    ErrorSummary {
        kind: map_error_kind(err),
        status: err.status_code(),
        message: user_message(err, copy),
        details,
        suggestions: suggest_fixes(err),
    }
}

/// Map ModerationError to presentation ErrorKind.
pub fn map_error_kind(err: &ModerationError) -> ErrorKind {
    match err.category() {
        ErrorCategory::Validation => ErrorKind::Input,
        ErrorCategory::Busy => ErrorKind::Busy,
        ErrorCategory::Timeout => ErrorKind::Timeout,
        ErrorCategory::Network => ErrorKind::Network,
        ErrorCategory::Client => ErrorKind::Client,
        ErrorCategory::Server => ErrorKind::Server,
        ErrorCategory::Parsing => ErrorKind::Parsing,
        ErrorCategory::Io | ErrorCategory::Configuration => ErrorKind::Local,
    }
}

/// The message rendered in the inline error panel.
///
/// Errors raised by the client are translated through `copy`; messages the
/// server sent are shown verbatim.
pub fn user_message(err: &ModerationError, copy: &UiCopy) -> String {
    match err {
        ModerationError::EmptyInput(ContentType::Text) => copy.prompt_text.clone(),
        ModerationError::EmptyInput(_) => copy.prompt_file.clone(),
        ModerationError::TextTooShort { min } => {
            fill(&copy.text_too_short, &[("min", min.to_string())])
        }
        ModerationError::FileTooLarge { limit, .. } => fill(
            &copy.file_too_large,
            &[("limit_mb", (limit / (1024 * 1024)).to_string())],
        ),
        ModerationError::UnsupportedFile { mime, .. } => {
            fill(&copy.unsupported_file, &[("mime", mime.clone())])
        }
        ModerationError::Busy => copy.busy.clone(),
        ModerationError::Timeout(_) => copy.timeout.clone(),
        ModerationError::ApiError { message, .. } => message.clone(),
        ModerationError::ServerRejected(message) => message.clone(),
        ModerationError::ConnectionError(msg) | ModerationError::HttpError(msg) => {
            fill(&copy.network_error, &[("detail", msg.clone())])
        }
        _ => err.to_string(),
    }
}

/// Suggest fixes based on error type.
pub fn suggest_fixes(err: &ModerationError) -> Vec<String> {
    let mut tips = Vec::new();
    match err.category() {
        ErrorCategory::Timeout => {
            tips.push("Large videos take long to analyse; raise --timeout".to_string());
            tips.push("Check the service is not overloaded".to_string());
        }
        ErrorCategory::Network => {
            tips.push("Verify the service is running and --api-base is correct".to_string());
        }
        ErrorCategory::Server => {
            tips.push("Check the service logs; models may still be loading".to_string());
        }
        ErrorCategory::Client => {
            tips.push("Check the content type and the uploaded file".to_string());
        }
        ErrorCategory::Parsing => {
            tips.push("The service answered with an unexpected payload".to_string());
        }
        ErrorCategory::Validation => {
            if let ModerationError::FileTooLarge { .. } = err {
                tips.push("Trim or re-encode the video before uploading".to_string());
            }
        }
        ErrorCategory::Configuration => {
            tips.push("Check environment variables and the config file".to_string());
        }
        ErrorCategory::Busy | ErrorCategory::Io => {}
    }
    tips
}

/// Render a CLI-friendly string for ErrorSummary.
pub fn format_summary(summary: &ErrorSummary, verbose: bool) -> String {
    let mut out = String::new();
    if let Some(code) = summary.status {
        out.push_str(&format!("Status: {code}\n"));
    }
    out.push_str(&format!("Message: {}\n", summary.message));
    if !summary.suggestions.is_empty() {
        out.push_str("Suggestions:\n");
        for s in &summary.suggestions {
            out.push_str(&format!("  - {s}\n"));
        }
    }
    if verbose && let Some(d) = &summary.details {
        out.push_str(&format!("Details: {d}\n"));
    }
    out
}
