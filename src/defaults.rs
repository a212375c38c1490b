//! Default Configuration Values
//!
//! Every constant the client, the view layer and the orchestrator fall back to
//! when nothing else is configured lives here.

use std::time::Duration;

/// HTTP client defaults
pub mod http {
    use super::*;

    /// Origin of the moderation service when none is configured.
    pub const API_BASE: &str = "http://localhost:8000";

    /// Unified moderation endpoint (multipart POST).
    pub const MODERATE_PATH: &str = "/api/moderate";

    /// Health check endpoint (GET).
    pub const HEALTH_PATH: &str = "/api/health";

    /// Client-side abort timeout for a moderation round-trip.
    ///
    /// Covers server-side frame extraction and transcription of videos.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

    /// Timeout for establishing the TCP/TLS connection.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Timeout for the health check.
    pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

    /// Default User-Agent string for HTTP requests
    pub const USER_AGENT: &str = concat!("crossmod/", env!("CARGO_PKG_VERSION"));

    /// Header carrying the per-submission request id.
    pub const REQUEST_ID_HEADER: &str = "x-request-id";
}

/// Risk classification thresholds
pub mod risk {
    /// Confidence at or above which a violation is DANGER.
    pub const DANGER_THRESHOLD: f64 = 0.8;

    /// Confidence at or above which a violation is WARNING.
    ///
    /// Violations below this value are still reported as WARNING.
    pub const WARNING_THRESHOLD: f64 = 0.6;
}

/// Client-side input limits
pub mod limits {
    /// Largest video accepted before upload (50 MB).
    pub const MAX_VIDEO_BYTES: u64 = 50 * 1024 * 1024;

    /// The service rejects text shorter than this after trimming.
    pub const MIN_TEXT_CHARS: usize = 2;

    /// Files up to this size get an inline `data:` preview.
    pub const MAX_INLINE_PREVIEW_BYTES: u64 = 8 * 1024 * 1024;

    /// Bytes read from a file head for magic-number sniffing.
    pub const SNIFF_BYTES: usize = 8192;
}

/// Loading indicator timing
pub mod loading {
    use super::*;

    /// Interval between caption changes.
    pub const CAPTION_INTERVAL: Duration = Duration::from_secs(2);

    /// The caption rotation stops by itself after this long.
    pub const AUTO_STOP: Duration = Duration::from_secs(8);
}
