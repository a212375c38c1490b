//! # crossmod - client for a cross-modal content moderation service
//!
//! Submits text, images, audio or video to a moderation service, classifies
//! the verdict into a risk level and renders it as an HTML report or as
//! terminal text.
//!
#![deny(unsafe_code)]

//! ## Layout
//!
//! - [`client`]: the [`ModerationApi`](client::ModerationApi) trait and its
//!   `reqwest` implementation (`POST /api/moderate`, `GET /api/health`).
//! - [`ui`]: view state (tabs, inputs, preview, output panel), the loading
//!   indicator and the renderers.
//! - [`app`]: the submit flow tying both together, one request at a time.
//! - [`config`], [`defaults`]: configuration and the values it falls back to.
//! - [`error`]: error type, categories and user-facing messages.
//! - [`telemetry`]: tracing subscriber setup.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use crossmod::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::default();
//!     let client = HttpModerationClient::new(config.client.clone())?;
//!     let app = App::new(client, config);
//!
//!     app.set_text("is this comment acceptable?");
//!     let result = app.submit().await?;
//!     println!("{}", result.risk_level(&app.config().thresholds));
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod client;
pub mod config;
pub mod defaults;
pub mod error;
pub mod telemetry;
pub mod types;
pub mod ui;
pub mod utils;

pub use app::App;
pub use client::{HttpModerationClient, ModerationApi};
pub use error::{ErrorCategory, ModerationError, Result};

pub mod prelude {
    pub use crate::app::App;
    pub use crate::client::{HttpModerationClient, ModerationApi};
    pub use crate::config::{AppConfig, ClientConfig, Language, LoadingConfig, UiCopy};
    pub use crate::error::{ErrorCategory, ModerationError, user_message};
    pub use crate::types::{
        ContentType, HealthStatus, ModerationResult, RiskLevel, RiskThresholds, SelectedFile,
        Submission,
    };
    pub use crate::ui::{Panel, UiState};
}
