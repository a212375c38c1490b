//! Moderation API client
//!
//! [`ModerationApi`] is the seam between the orchestrator and the transport;
//! [`HttpModerationClient`] implements it over `reqwest`.
//!
//! ```rust,no_run
//! use crossmod::prelude::*;
//!
//! # async fn run() -> Result<(), ModerationError> {
//! let client = HttpModerationClient::new(ClientConfig::default())?;
//! let result = client
//!     .moderate(&Submission::Text("some user comment".into()))
//!     .await?;
//! println!("{}", result.risk_level(&RiskThresholds::default()));
//! # Ok(())
//! # }
//! ```

use std::time::Instant;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::defaults;
use crate::error::ModerationError;
use crate::types::{HealthStatus, ModerateResponse, ModerationResult, Submission};

#[async_trait]
pub trait ModerationApi: Send + Sync {
    /// Submit content and return the service verdict.
    async fn moderate(&self, submission: &Submission) -> Result<ModerationResult, ModerationError>;

    /// Best-effort status check; never fails.
    async fn health_check(&self) -> HealthStatus;
}

/// `reqwest`-backed client for the moderation service.
#[derive(Debug, Clone)]
pub struct HttpModerationClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl HttpModerationClient {
    pub fn new(config: ClientConfig) -> Result<Self, ModerationError> {
        // Surface bad custom headers at construction time.
        build_headers(&config)?;
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout)
            .build()?;
        Ok(Self {
            config,
            http_client,
        })
    }

    /// Use a caller-provided `reqwest::Client`.
    pub fn with_http_client(config: ClientConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn build_form(&self, submission: &Submission) -> Result<Form, ModerationError> {
        let form = Form::new().text("content_type", submission.content_type().wire_name());
        match submission {
            Submission::Text(text) => Ok(form.text("text", text.clone())),
            Submission::File { file, .. } => {
                let bytes = file.read().await?;
                let part = Part::bytes(bytes)
                    .file_name(file.name.clone())
                    .mime_str(&file.mime)?;
                Ok(form.part("file", part))
            }
        }
    }
}

#[async_trait]
impl ModerationApi for HttpModerationClient {
    async fn moderate(&self, submission: &Submission) -> Result<ModerationResult, ModerationError> {
        let url = self.config.moderate_url();
        let request_id = Uuid::new_v4();
        let started = Instant::now();
        info!(
            request_id = %request_id,
            content_type = %submission.content_type(),
            url = %url,
            "Moderation request started"
        );

        let form = self.build_form(submission).await?;
        let extra_headers = build_headers(&self.config)?;
        let exchange = async {
            let response = self
                .http_client
                .post(&url)
                .headers(extra_headers)
                .header(defaults::http::REQUEST_ID_HEADER, request_id.to_string())
                .multipart(form)
                .send()
                .await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, ModerationError>((status, body))
        };

        // The whole exchange, body included, is bounded by the timeout.
        let (status, body) = match tokio::time::timeout(self.config.timeout, exchange).await {
            Ok(outcome) => outcome?,
            Err(_) => {
                warn!(
                    request_id = %request_id,
                    timeout_secs = self.config.timeout.as_secs_f64(),
                    "Moderation request aborted after timeout"
                );
                return Err(ModerationError::Timeout(self.config.timeout));
            }
        };

        debug!(request_id = %request_id, response_body = %body, "Response body");
        let result = parse_moderate_response(status, &body);
        info!(
            request_id = %request_id,
            status_code = status.as_u16(),
            duration_ms = started.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "Moderation request completed"
        );
        result
    }

    async fn health_check(&self) -> HealthStatus {
        let url = self.config.health_url();
        let headers = match build_headers(&self.config) {
            Ok(headers) => headers,
            Err(e) => return HealthStatus::error(e.to_string()),
        };
        let response = self
            .http_client
            .get(&url)
            .headers(headers)
            .timeout(self.config.health_timeout)
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                warn!(url = %url, error = %e, "Health check failed");
                return HealthStatus::unreachable(e.to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status_code = status.as_u16(), "Health check returned error status");
            return HealthStatus::error(format!("HTTP {}", status.as_u16()));
        }

        match response.json::<HealthStatus>().await {
            Ok(health) => {
                debug!(status = %health.status, mode = ?health.mode, "Health check completed");
                health
            }
            Err(e) => HealthStatus::error(format!("Invalid health payload: {e}")),
        }
    }
}

/// Turn a raw moderate response into a result or the error to show.
///
/// Non-2xx answers use the server's `error` text when the body carries one
/// and fall back to `HTTP <status>`.
pub fn parse_moderate_response(
    status: StatusCode,
    body: &str,
) -> Result<ModerationResult, ModerationError> {
    if !status.is_success() {
        let envelope = serde_json::from_str::<ModerateResponse>(body).ok();
        let message = envelope
            .as_ref()
            .and_then(ModerateResponse::error_message)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        return Err(ModerationError::ApiError {
            code: status.as_u16(),
            message,
            details: serde_json::from_str(body).ok(),
        });
    }

    let envelope: ModerateResponse = serde_json::from_str(body)
        .map_err(|e| ModerationError::ParseError(format!("Failed to parse response: {e}")))?;
    if !envelope.success {
        return Err(ModerationError::ServerRejected(
            envelope
                .error_message()
                .unwrap_or_else(|| "request was not successful".to_string()),
        ));
    }
    envelope
        .result
        .ok_or_else(|| ModerationError::ParseError("Response has no result".to_string()))
}

fn build_headers(config: &ClientConfig) -> Result<HeaderMap, ModerationError> {
    let mut headers = HeaderMap::new();
    for (key, value) in &config.headers {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
            ModerationError::ConfigurationError(format!("Invalid header name {key:?}: {e}"))
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            ModerationError::ConfigurationError(format!("Invalid value for header {key}: {e}"))
        })?;
        headers.insert(name, value);
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_uses_server_message() {
        let err = parse_moderate_response(
            StatusCode::BAD_REQUEST,
            r#"{"error": "文本内容长度必须大于2个字符"}"#,
        )
        .unwrap_err();
        match err {
            ModerationError::ApiError { code, message, details } => {
                assert_eq!(code, 400);
                assert_eq!(message, "文本内容长度必须大于2个字符");
                assert!(details.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn error_status_without_body_uses_http_status() {
        let err = parse_moderate_response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>")
            .unwrap_err();
        assert!(matches!(
            err,
            ModerationError::ApiError { code: 502, ref message, .. } if message == "HTTP 502"
        ));
    }

    #[test]
    fn unsuccessful_envelope_is_rejected() {
        let err = parse_moderate_response(StatusCode::OK, r#"{"success": false, "error": "nope"}"#)
            .unwrap_err();
        assert!(matches!(err, ModerationError::ServerRejected(ref m) if m == "nope"));
    }

    #[test]
    fn success_returns_result() {
        let r = parse_moderate_response(
            StatusCode::OK,
            r#"{"success": true, "result": {"violation": false, "type": "正常", "confidence": 0.95}}"#,
        )
        .unwrap();
        assert!(!r.violation);
        assert_eq!(r.confidence, 0.95);
    }

    #[test]
    fn success_without_result_is_parse_error() {
        let err = parse_moderate_response(StatusCode::OK, r#"{"success": true}"#).unwrap_err();
        assert!(matches!(err, ModerationError::ParseError(_)));
    }

    #[test]
    fn invalid_header_is_configuration_error() {
        let config = ClientConfig::builder().header("bad header", "x").build();
        assert!(matches!(
            HttpModerationClient::new(config),
            Err(ModerationError::ConfigurationError(_))
        ));
    }
}
