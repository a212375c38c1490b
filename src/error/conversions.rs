//! Type Conversions for ModerationError
//!
//! From trait implementations for converting common error types into
//! ModerationError.

use super::types::ModerationError;

impl From<reqwest::Error> for ModerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Self::ConnectionError(err.to_string())
        } else if err.is_decode() {
            Self::ParseError(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ModerationError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for ModerationError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: ModerationError = json_err.into();
        assert!(matches!(err, ModerationError::JsonError(_)));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ModerationError = io.into();
        assert!(matches!(err, ModerationError::IoError(ref m) if m == "gone"));
    }
}
