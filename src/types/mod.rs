//! Data model shared by the client, the view layer and the orchestrator

pub mod file;
pub mod health;
pub mod modality;
pub mod result;
pub mod risk;

pub use file::{FileSource, SelectedFile, Submission};
pub use health::{HealthStatus, ModelStatus};
pub use modality::ContentType;
pub use result::{Features, FrameReport, FrameVerdict, ModerateResponse, ModerationResult};
pub use risk::{RiskLevel, RiskThresholds};
