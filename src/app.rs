//! Submit flow
//!
//! [`App`] owns the view state and drives one request at a time:
//! validate the active tab, show the loading indicator, call the service,
//! then render the verdict or the error into the output panel. Loading and
//! the processing flag are restored on every exit path.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::client::ModerationApi;
use crate::config::{AppConfig, UiCopy};
use crate::error::{ModerationError, user_message};
use crate::types::{ContentType, HealthStatus, ModerationResult, SelectedFile, Submission};
use crate::ui::render::{classify_risk, render_result_html};
use crate::ui::{LoadingIndicator, Preview, UiState};

pub struct App<A> {
    api: A,
    config: AppConfig,
    copy: UiCopy,
    ui: Mutex<UiState>,
    loading: Mutex<Option<LoadingIndicator>>,
    is_processing: AtomicBool,
}

impl<A: ModerationApi> App<A> {
    pub fn new(api: A, config: AppConfig) -> Self {
        let copy = config.copy();
        let ui = UiState::new(config.max_inline_preview_bytes);
        Self {
            api,
            config,
            copy,
            ui: Mutex::new(ui),
            loading: Mutex::new(None),
            is_processing: AtomicBool::new(false),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn copy(&self) -> &UiCopy {
        &self.copy
    }

    /// Snapshot of the view state.
    pub fn ui(&self) -> UiState {
        self.lock_ui().clone()
    }

    /// Mutate the view state directly.
    pub fn with_ui<R>(&self, f: impl FnOnce(&mut UiState) -> R) -> R {
        f(&mut self.lock_ui())
    }

    pub fn switch_tab(&self, tab: ContentType) {
        self.lock_ui().switch_tab(tab);
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.lock_ui().set_text(text);
    }

    pub fn select_file(&self, file: SelectedFile) -> Result<Preview, ModerationError> {
        self.lock_ui().select_file(file).cloned()
    }

    pub fn drop_files(
        &self,
        files: impl IntoIterator<Item = SelectedFile>,
    ) -> Result<Preview, ModerationError> {
        self.lock_ui().drop_files(files).cloned()
    }

    pub fn is_processing(&self) -> bool {
        self.is_processing.load(Ordering::Acquire)
    }

    /// Caption channel of the running loading indicator, if any.
    pub fn loading_captions(&self) -> Option<watch::Receiver<String>> {
        lock(&self.loading).as_ref().map(LoadingIndicator::subscribe)
    }

    /// Submit the active tab's content.
    ///
    /// Validation failures and service errors are also written to the output
    /// panel; [`ModerationError::Busy`] leaves the view untouched.
    pub async fn submit(&self) -> Result<ModerationResult, ModerationError> {
        let _in_flight = InFlight::acquire(self)?;

        let submission = match self.prepare_submission() {
            Ok(submission) => submission,
            Err(e) => {
                debug!(error = %e, "Submission blocked by validation");
                self.lock_ui().show_error(user_message(&e, &self.copy));
                return Err(e);
            }
        };

        self.start_loading();
        let content_type = submission.content_type();
        let started = Instant::now();
        info!(content_type = %content_type, "Submitting content for moderation");

        let outcome = self.api.moderate(&submission).await;
        self.stop_loading();

        match &outcome {
            Ok(result) => {
                let risk = classify_risk(result, &self.config.thresholds);
                let html = render_result_html(result, &self.copy, &self.config.thresholds);
                info!(
                    content_type = %content_type,
                    risk = %risk,
                    category = %result.category,
                    confidence = result.confidence,
                    duration_ms = started.elapsed().as_millis() as u64,
                    "Moderation finished"
                );
                self.lock_ui().show_result(result.clone(), risk, html);
            }
            Err(e) => {
                warn!(
                    content_type = %content_type,
                    error = %e,
                    category = ?e.category(),
                    "Moderation failed"
                );
                self.lock_ui().show_error(user_message(e, &self.copy));
            }
        }
        outcome
    }

    pub async fn check_health(&self) -> HealthStatus {
        self.api.health_check().await
    }

    fn prepare_submission(&self) -> Result<Submission, ModerationError> {
        let ui = self.lock_ui();
        let tab = ui.active_tab();
        if tab == ContentType::Text {
            let text = ui.text().trim();
            if text.is_empty() {
                return Err(ModerationError::EmptyInput(tab));
            }
            if text.chars().count() < self.config.min_text_chars {
                return Err(ModerationError::TextTooShort {
                    min: self.config.min_text_chars,
                });
            }
            return Ok(Submission::Text(text.to_string()));
        }

        let file = ui
            .active_file()
            .ok_or(ModerationError::EmptyInput(tab))?;
        if tab == ContentType::Video && file.size > self.config.max_video_bytes {
            return Err(ModerationError::FileTooLarge {
                size: file.size,
                limit: self.config.max_video_bytes,
            });
        }
        Ok(Submission::File {
            kind: tab,
            file: file.clone(),
        })
    }

    fn start_loading(&self) {
        self.lock_ui().set_loading(true);
        let indicator =
            LoadingIndicator::start(self.copy.loading_captions.clone(), &self.config.loading);
        *lock(&self.loading) = Some(indicator);
    }

    fn stop_loading(&self) {
        if let Some(indicator) = lock(&self.loading).take() {
            indicator.stop();
        }
        self.lock_ui().set_loading(false);
    }

    fn lock_ui(&self) -> MutexGuard<'_, UiState> {
        lock(&self.ui)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds `is_processing` for the duration of a submit.
///
/// Dropping it, including when the submit future is cancelled, stops the
/// loading indicator and re-enables the submit button.
struct InFlight<'a, A: ModerationApi> {
    app: &'a App<A>,
}

impl<'a, A: ModerationApi> InFlight<'a, A> {
    fn acquire(app: &'a App<A>) -> Result<Self, ModerationError> {
        app.is_processing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                debug!("Submit ignored, a request is already in flight");
                ModerationError::Busy
            })?;
        Ok(Self { app })
    }
}

impl<A: ModerationApi> Drop for InFlight<'_, A> {
    fn drop(&mut self) {
        self.app.stop_loading();
        self.app.is_processing.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Panel;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    #[derive(Default)]
    struct FakeApi {
        calls: AtomicUsize,
        fail: Option<ModerationError>,
        delay: Duration,
    }

    #[async_trait]
    impl ModerationApi for FakeApi {
        async fn moderate(&self, _: &Submission) -> Result<ModerationResult, ModerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if let Some(e) = &self.fail {
                return Err(e.clone());
            }
            Ok(ModerationResult {
                violation: true,
                category: "暴力".into(),
                confidence: 0.65,
                ..Default::default()
            })
        }

        async fn health_check(&self) -> HealthStatus {
            HealthStatus::unreachable("offline")
        }
    }

    fn app(api: FakeApi) -> App<FakeApi> {
        App::new(api, AppConfig::default())
    }

    #[tokio::test]
    async fn blank_text_is_blocked() {
        let app = app(FakeApi::default());
        app.set_text("   ");
        let err = app.submit().await.unwrap_err();
        assert!(matches!(err, ModerationError::EmptyInput(ContentType::Text)));
        assert_eq!(app.api().calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            app.ui().panel(),
            &Panel::Error {
                message: app.copy().prompt_text.clone()
            }
        );
        assert!(!app.is_processing());
    }

    #[tokio::test]
    async fn short_text_is_blocked() {
        let app = app(FakeApi::default());
        app.set_text(" a ");
        let err = app.submit().await.unwrap_err();
        assert!(matches!(err, ModerationError::TextTooShort { min: 2 }));
        assert_eq!(app.api().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn file_tab_without_file_is_blocked() {
        let app = app(FakeApi::default());
        app.switch_tab(ContentType::Audio);
        let err = app.submit().await.unwrap_err();
        assert!(matches!(err, ModerationError::EmptyInput(ContentType::Audio)));
        assert_eq!(
            app.ui().panel(),
            &Panel::Error {
                message: app.copy().prompt_file.clone()
            }
        );
    }

    #[tokio::test]
    async fn oversized_video_never_reaches_the_api() {
        let app = App::new(
            FakeApi::default(),
            AppConfig {
                max_video_bytes: 16,
                ..Default::default()
            },
        );
        app.switch_tab(ContentType::Video);
        app.select_file(SelectedFile::from_bytes("big.mp4", vec![0; 17]).with_mime("video/mp4"))
            .unwrap();
        let err = app.submit().await.unwrap_err();
        assert!(matches!(err, ModerationError::FileTooLarge { size: 17, limit: 16 }));
        assert_eq!(app.api().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn video_at_the_limit_is_sent() {
        let app = App::new(
            FakeApi::default(),
            AppConfig {
                max_video_bytes: 16,
                ..Default::default()
            },
        );
        app.switch_tab(ContentType::Video);
        app.select_file(SelectedFile::from_bytes("ok.mp4", vec![0; 16]).with_mime("video/mp4"))
            .unwrap();
        assert!(app.submit().await.is_ok());
        assert_eq!(app.api().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn result_is_rendered_and_loading_restored() {
        let app = app(FakeApi::default());
        app.set_text("some comment");
        let result = app.submit().await.unwrap();
        assert_eq!(result.category, "暴力");

        let ui = app.ui();
        assert!(!ui.is_loading());
        assert!(ui.submit_enabled());
        match ui.panel() {
            Panel::Result { risk, html, .. } => {
                assert_eq!(*risk, crate::types::RiskLevel::Warning);
                assert!(html.contains("risk-warning"));
            }
            other => panic!("unexpected panel: {other:?}"),
        }
        assert!(app.loading_captions().is_none());
    }

    #[tokio::test]
    async fn api_error_lands_in_error_panel() {
        let app = app(FakeApi {
            fail: Some(ModerationError::Timeout(Duration::from_secs(120))),
            ..Default::default()
        });
        app.set_text("some comment");
        assert!(app.submit().await.is_err());
        let ui = app.ui();
        assert!(!ui.is_loading());
        assert_eq!(
            ui.panel(),
            &Panel::Error {
                message: app.copy().timeout.clone()
            }
        );
        assert!(!app.is_processing());
    }

    #[tokio::test(start_paused = true)]
    async fn second_submit_while_in_flight_is_busy() {
        let app = app(FakeApi {
            delay: Duration::from_secs(3),
            ..Default::default()
        });
        app.set_text("some comment");

        let (first, second) = tokio::join!(app.submit(), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            assert!(app.ui().is_loading());
            assert!(app.loading_captions().is_some());
            app.submit().await
        });
        assert!(first.is_ok());
        assert!(matches!(second, Err(ModerationError::Busy)));
        assert_eq!(app.api().calls.load(Ordering::SeqCst), 1);
        assert!(!app.is_processing());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_submit_restores_state() {
        let app = app(FakeApi {
            delay: Duration::from_secs(30),
            ..Default::default()
        });
        app.set_text("some comment");
        let _ = tokio::time::timeout(Duration::from_secs(1), app.submit()).await;
        assert!(!app.is_processing());
        assert!(!app.ui().is_loading());
    }

    #[tokio::test]
    async fn health_is_forwarded() {
        let app = app(FakeApi::default());
        assert!(!app.check_health().await.is_reachable());
    }
}
