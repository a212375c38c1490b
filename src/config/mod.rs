//! Configuration
//!
//! `ClientConfig` configures the HTTP side, `AppConfig` everything the
//! orchestrator and the view layer need. Both deserialize from JSON with
//! every field optional.

pub mod copy;

pub use copy::{Language, UiCopy};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::defaults;
use crate::error::ModerationError;
use crate::types::RiskThresholds;

/// HTTP configuration for the moderation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Service origin, e.g. `http://localhost:8000`
    pub base_url: String,
    /// Client-side abort timeout for `moderate`
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Connection timeout
    #[serde(with = "duration_secs")]
    pub connect_timeout: Duration,
    /// Timeout for the health check
    #[serde(with = "duration_secs")]
    pub health_timeout: Duration,
    /// User agent
    pub user_agent: String,
    /// Custom headers
    pub headers: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::http::API_BASE.to_string(),
            timeout: defaults::http::REQUEST_TIMEOUT,
            connect_timeout: defaults::http::CONNECT_TIMEOUT,
            health_timeout: defaults::http::HEALTH_TIMEOUT,
            user_agent: defaults::http::USER_AGENT.to_string(),
            headers: HashMap::new(),
        }
    }
}

impl ClientConfig {
    /// Returns a builder for constructing `ClientConfig`
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Defaults overlaid with `CROSSMOD_API_BASE` and `CROSSMOD_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ModerationError> {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(mut self) -> Result<Self, ModerationError> {
        if let Ok(base) = std::env::var("CROSSMOD_API_BASE") {
            self.base_url = base;
        }
        if let Ok(secs) = std::env::var("CROSSMOD_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                ModerationError::ConfigurationError(format!(
                    "CROSSMOD_TIMEOUT_SECS must be a number of seconds, got {secs:?}"
                ))
            })?;
            self.timeout = Duration::from_secs(secs);
        }
        Ok(self)
    }

    pub fn moderate_url(&self) -> String {
        join_url(&self.base_url, defaults::http::MODERATE_PATH)
    }

    pub fn health_url(&self) -> String {
        join_url(&self.base_url, defaults::http::HEALTH_PATH)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Builder for `ClientConfig`
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    health_timeout: Option<Duration>,
    user_agent: Option<String>,
    headers: HashMap<String, String>,
}

impl ClientConfigBuilder {
    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = Some(connect_timeout);
        self
    }
    pub fn health_timeout(mut self, health_timeout: Duration) -> Self {
        self.health_timeout = Some(health_timeout);
        self
    }
    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
    pub fn header<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> ClientConfig {
        let d = ClientConfig::default();
        ClientConfig {
            base_url: self.base_url.unwrap_or(d.base_url),
            timeout: self.timeout.unwrap_or(d.timeout),
            connect_timeout: self.connect_timeout.unwrap_or(d.connect_timeout),
            health_timeout: self.health_timeout.unwrap_or(d.health_timeout),
            user_agent: self.user_agent.unwrap_or(d.user_agent),
            headers: self.headers,
        }
    }
}

/// Loading indicator timing and captions override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    #[serde(with = "duration_secs")]
    pub caption_interval: Duration,
    #[serde(with = "duration_secs")]
    pub auto_stop: Duration,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            caption_interval: defaults::loading::CAPTION_INTERVAL,
            auto_stop: defaults::loading::AUTO_STOP,
        }
    }
}

/// Orchestrator and view configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub thresholds: RiskThresholds,
    /// Client-side cap for video uploads
    pub max_video_bytes: u64,
    /// Minimum trimmed text length
    pub min_text_chars: usize,
    /// Files up to this size get an inline preview
    pub max_inline_preview_bytes: u64,
    pub loading: LoadingConfig,
    pub language: Language,
    /// Replaces the built-in copy for `language` when present
    pub copy: Option<UiCopy>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            thresholds: RiskThresholds::default(),
            max_video_bytes: defaults::limits::MAX_VIDEO_BYTES,
            min_text_chars: defaults::limits::MIN_TEXT_CHARS,
            max_inline_preview_bytes: defaults::limits::MAX_INLINE_PREVIEW_BYTES,
            loading: LoadingConfig::default(),
            language: Language::default(),
            copy: None,
        }
    }
}

impl AppConfig {
    /// Load a JSON config file; absent fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ModerationError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ModerationError::ConfigurationError(format!("Cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ModerationError> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| ModerationError::ConfigurationError(format!("Invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ModerationError> {
        let t = &self.thresholds;
        if !(0.0..=1.0).contains(&t.warning) || !(0.0..=1.0).contains(&t.danger) {
            return Err(ModerationError::ConfigurationError(
                "Risk thresholds must be within [0, 1]".to_string(),
            ));
        }
        if t.warning > t.danger {
            return Err(ModerationError::ConfigurationError(format!(
                "Warning threshold {} exceeds danger threshold {}",
                t.warning, t.danger
            )));
        }
        if self.client.timeout.is_zero() {
            return Err(ModerationError::ConfigurationError(
                "Request timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Copy for the configured language, or the explicit override.
    pub fn copy(&self) -> UiCopy {
        self.copy.clone().unwrap_or_else(|| self.language.copy())
    }
}

// Durations are written as whole seconds.
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs_f64().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
