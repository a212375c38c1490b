//! Core error types

use std::time::Duration;

use thiserror::Error;

use crate::types::ContentType;

/// Errors produced by the client, the UI state machine and the orchestrator.
#[derive(Debug, Clone, Error)]
pub enum ModerationError {
    /// The active tab has nothing to submit.
    #[error("No input provided for {0} moderation")]
    EmptyInput(ContentType),

    /// Text shorter than the service accepts.
    #[error("Text must contain at least {min} characters")]
    TextTooShort { min: usize },

    /// File exceeds the client-side upload cap.
    #[error("File is {size} bytes, limit is {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },

    /// File MIME type does not belong to the tab it was dropped on.
    #[error("Unsupported file type {mime} for {expected} moderation")]
    UnsupportedFile { mime: String, expected: ContentType },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A submission is already in flight.
    #[error("A moderation request is already in progress")]
    Busy,

    /// Client-side abort after the configured timeout.
    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Non-2xx HTTP response.
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// 2xx response whose envelope reports `success: false`.
    #[error("Server rejected the request: {0}")]
    ServerRejected(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("JSON error: {0}")]
    JsonError(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Coarse classification used for summaries and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Validation,
    Busy,
    Timeout,
    Network,
    Client,
    Server,
    Parsing,
    Io,
    Configuration,
}

impl ModerationError {
    /// Build an `ApiError` without details.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyInput(_)
            | Self::TextTooShort { .. }
            | Self::FileTooLarge { .. }
            | Self::UnsupportedFile { .. }
            | Self::InvalidInput(_) => ErrorCategory::Validation,
            Self::Busy => ErrorCategory::Busy,
            Self::Timeout(_) => ErrorCategory::Timeout,
            Self::ConnectionError(_) | Self::HttpError(_) => ErrorCategory::Network,
            Self::ApiError { code, .. } if *code >= 500 => ErrorCategory::Server,
            Self::ApiError { .. } => ErrorCategory::Client,
            Self::ServerRejected(_) => ErrorCategory::Server,
            Self::ParseError(_) | Self::JsonError(_) => ErrorCategory::Parsing,
            Self::IoError(_) => ErrorCategory::Io,
            Self::ConfigurationError(_) => ErrorCategory::Configuration,
        }
    }

    /// HTTP status when the error came from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether trying again later could succeed. The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self.category() {
            ErrorCategory::Timeout | ErrorCategory::Network | ErrorCategory::Busy => true,
            ErrorCategory::Server => !matches!(self, Self::ServerRejected(_)),
            _ => false,
        }
    }

    /// True for errors raised before anything was sent.
    pub fn is_validation(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }
}

pub type Result<T> = std::result::Result<T, ModerationError>;
