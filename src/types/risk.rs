//! Client-side risk classification

use serde::{Deserialize, Serialize};

use crate::config::UiCopy;
use crate::defaults;

/// Confidence thresholds for [`RiskLevel::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Only checked for ordering (`warning <= danger`) when the config is
    /// validated. A violation below it still classifies as WARNING.
    pub warning: f64,
    /// A violation at or above this confidence is DANGER.
    pub danger: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            warning: defaults::risk::WARNING_THRESHOLD,
            danger: defaults::risk::DANGER_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Safe,
    Warning,
    Danger,
}

impl RiskLevel {
    /// A non-violation is always SAFE. A violation is DANGER at or above
    /// `danger`, otherwise WARNING, including below `warning`.
    pub fn classify(violation: bool, confidence: f64, thresholds: &RiskThresholds) -> Self {
        if !violation {
            return Self::Safe;
        }
        if confidence >= thresholds.danger {
            Self::Danger
        } else {
            // Below the warning threshold is still a violation.
            Self::Warning
        }
    }

    /// CSS class of the result badge.
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Safe => "risk-safe",
            Self::Warning => "risk-warning",
            Self::Danger => "risk-danger",
        }
    }

    pub fn label(self, copy: &UiCopy) -> &str {
        match self {
            Self::Safe => &copy.risk_safe,
            Self::Warning => &copy.risk_warning,
            Self::Danger => &copy.risk_danger,
        }
    }

    pub const fn is_flagged(self) -> bool {
        !matches!(self, Self::Safe)
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Safe => "SAFE",
            Self::Warning => "WARNING",
            Self::Danger => "DANGER",
        })
    }
}
