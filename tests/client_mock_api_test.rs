//! Mock API tests for the HTTP moderation client
//!
//! Payload shapes follow what the moderation service returns for each
//! endpoint, including its error envelope `{error, detail}`.

use std::time::Duration;

use crossmod::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpModerationClient {
    let config = ClientConfig::builder()
        .base_url(server.uri())
        .timeout(Duration::from_secs(5))
        .build();
    HttpModerationClient::new(config).unwrap()
}

fn text_result() -> serde_json::Value {
    json!({
        "success": true,
        "result": {
            "modality": "文本",
            "violation": true,
            "type": "辱骂",
            "confidence": 0.87,
            "method": "keyword",
            "matched_keyword": "傻"
        }
    })
}

#[tokio::test]
async fn text_is_sent_as_multipart_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/moderate"))
        .and(header_exists("x-request-id"))
        .and(body_string_contains("name=\"content_type\""))
        .and(body_string_contains("name=\"text\""))
        .and(body_string_contains("hello there"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_result()))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .moderate(&Submission::Text("hello there".into()))
        .await
        .unwrap();

    assert!(result.violation);
    assert_eq!(result.category, "辱骂");
    assert_eq!(result.matched_keyword.as_deref(), Some("傻"));
    assert_eq!(
        result.risk_level(&RiskThresholds::default()),
        RiskLevel::Danger
    );
}

#[tokio::test]
async fn file_is_sent_with_name_and_mime() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/moderate"))
        .and(body_string_contains("name=\"file\"; filename=\"clip.wav\""))
        .and(body_string_contains("Content-Type: audio/wav"))
        .and(body_string_contains("audio"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": {
                "violation": false,
                "type": "正常",
                "confidence": 0.91,
                "transcript": "今天天气很好"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let file = SelectedFile::from_bytes("clip.wav", b"RIFF....WAVE".to_vec()).with_mime("audio/wav");
    let result = client_for(&server)
        .moderate(&Submission::File {
            kind: ContentType::Audio,
            file,
        })
        .await
        .unwrap();

    assert!(!result.violation);
    assert_eq!(result.any_transcript(), Some("今天天气很好"));
}

#[tokio::test]
async fn custom_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/moderate"))
        .and(header("x-tenant", "demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_result()))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .base_url(format!("{}/", server.uri()))
        .header("x-tenant", "demo")
        .build();
    let client = HttpModerationClient::new(config).unwrap();
    assert!(client.moderate(&Submission::Text("abc".into())).await.is_ok());
}

#[tokio::test]
async fn server_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/moderate"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "文本内容长度必须大于2个字符"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .moderate(&Submission::Text("a".into()))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(400));
    assert_eq!(err.category(), ErrorCategory::Client);
    assert_eq!(
        user_message(&err, &UiCopy::english()),
        "文本内容长度必须大于2个字符"
    );
}

#[tokio::test]
async fn error_detail_is_appended() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/moderate"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "视频处理失败",
            "detail": "ffmpeg not found"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .moderate(&Submission::Text("some text".into()))
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Server);
    assert_eq!(
        user_message(&err, &UiCopy::chinese()),
        "视频处理失败 (ffmpeg not found)"
    );
}

#[tokio::test]
async fn status_is_used_when_body_has_no_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/moderate"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .moderate(&Submission::Text("some text".into()))
        .await
        .unwrap_err();

    assert_eq!(user_message(&err, &UiCopy::english()), "HTTP 503");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn timeout_yields_translated_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/moderate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_result())
                .set_delay(Duration::from_millis(800)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .base_url(server.uri())
        .timeout(Duration::from_millis(100))
        .build();
    let client = HttpModerationClient::new(config).unwrap();
    let err = client
        .moderate(&Submission::Text("some text".into()))
        .await
        .unwrap_err();

    assert!(matches!(err, ModerationError::Timeout(_)));
    let copy = UiCopy::english();
    assert_eq!(user_message(&err, &copy), copy.timeout);
}

#[tokio::test]
async fn unsuccessful_envelope_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/moderate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "模型未加载"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .moderate(&Submission::Text("some text".into()))
        .await
        .unwrap_err();
    assert_eq!(user_message(&err, &UiCopy::english()), "模型未加载");
}

#[tokio::test]
async fn health_reports_degraded_service() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "degraded",
            "models": {
                "clip": {"ready": true, "processor": true},
                "whisper": {"ready": false, "model": null}
            },
            "dependencies": {"ffmpeg": true, "tesseract": false},
            "mode": "simulation"
        })))
        .mount(&server)
        .await;

    let health = client_for(&server).health_check().await;
    assert!(health.is_reachable());
    assert!(!health.is_healthy());
    assert_eq!(health.mode.as_deref(), Some("simulation"));
    assert_eq!(health.missing_models(), vec!["whisper"]);
}

#[tokio::test]
async fn health_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let health = client_for(&server).health_check().await;
    assert_eq!(health.status, HealthStatus::ERROR);
    assert_eq!(health.error.as_deref(), Some("HTTP 500"));
}

#[tokio::test]
async fn health_unparsable_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let health = client_for(&server).health_check().await;
    assert_eq!(health.status, HealthStatus::ERROR);
    assert!(health.is_reachable());
    assert!(health.error.is_some());
}

#[tokio::test]
async fn health_body_without_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let health = client_for(&server).health_check().await;
    assert_eq!(health.status, HealthStatus::ERROR);
    assert!(!health.is_healthy());
}

#[tokio::test]
async fn health_sends_custom_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .and(header("x-tenant", "demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .base_url(server.uri())
        .header("x-tenant", "demo")
        .build();
    let health = HttpModerationClient::new(config).unwrap().health_check().await;
    assert!(health.is_healthy());
}

#[tokio::test]
async fn health_never_fails_when_unreachable() {
    // Reserve a free port, then release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = ClientConfig::builder()
        .base_url(format!("http://127.0.0.1:{port}"))
        .health_timeout(Duration::from_secs(2))
        .build();
    let health = HttpModerationClient::new(config).unwrap().health_check().await;
    assert!(!health.is_reachable());
    assert_eq!(health.status, HealthStatus::UNREACHABLE);
    assert!(health.error.is_some());
}
