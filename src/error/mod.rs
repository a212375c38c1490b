//! Error Handling Module
//!
//! This module provides error handling for the moderation client, including:
//! - Core error types (`ModerationError`, `ErrorCategory`)
//! - User-facing error helpers and summaries
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust,ignore
//! use crossmod::error::{ModerationError, ErrorCategory};
//!
//! let error = ModerationError::api_error(502, "bad gateway");
//! assert_eq!(error.category(), ErrorCategory::Server);
//! assert!(error.is_retryable());
//! ```

mod conversions;
pub mod helpers;
pub mod types;

pub use helpers::*;
pub use types::*;
