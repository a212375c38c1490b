//! Health check payload

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Status reported by `GET /api/health`, or synthesized when it fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `healthy` or `degraded` from the service; `unreachable` or `error`
    /// when the check itself failed
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<BTreeMap<String, ModelStatus>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<BTreeMap<String, bool>>,
    /// `production` when every model loaded, `simulation` otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Why the check failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelStatus {
    #[serde(default)]
    pub ready: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HealthStatus {
    pub const UNREACHABLE: &'static str = "unreachable";
    pub const ERROR: &'static str = "error";

    /// The request never got an answer.
    pub fn unreachable(error: impl Into<String>) -> Self {
        Self {
            status: Self::UNREACHABLE.to_string(),
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// The service answered, but not with a usable status.
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            status: Self::ERROR.to_string(),
            error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }

    pub fn is_reachable(&self) -> bool {
        self.status != Self::UNREACHABLE
    }

    /// Names of models that are not ready.
    pub fn missing_models(&self) -> Vec<&str> {
        self.models
            .iter()
            .flatten()
            .filter(|(_, m)| !m.ready)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}
