//! Loading indicator with a rotating caption
//!
//! A background task cycles through the captions on a `watch` channel. It
//! stops when asked, when dropped, or by itself after the auto-stop delay; the
//! last caption stays visible until the indicator is hidden.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tracing::debug;

use crate::config::LoadingConfig;
use crate::utils::CancelHandle;

#[derive(Debug)]
pub struct LoadingIndicator {
    caption: watch::Receiver<String>,
    cancel: CancelHandle,
    task: JoinHandle<()>,
}

impl LoadingIndicator {
    /// Spawn the caption task. Must be called inside a tokio runtime.
    pub fn start(captions: Vec<String>, config: &LoadingConfig) -> Self {
        let (tx, rx) = watch::channel(captions.first().cloned().unwrap_or_default());
        let cancel = CancelHandle::new();
        let task = tokio::spawn(rotate_captions(
            tx,
            captions,
            config.caption_interval,
            config.auto_stop,
            cancel.clone(),
        ));
        Self {
            caption: rx,
            cancel,
            task,
        }
    }

    /// Caption currently displayed.
    pub fn caption(&self) -> String {
        self.caption.borrow().clone()
    }

    /// Receiver notified on every caption change.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.caption.clone()
    }

    /// Whether captions are still rotating.
    pub fn is_rotating(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for LoadingIndicator {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn rotate_captions(
    tx: watch::Sender<String>,
    captions: Vec<String>,
    every: Duration,
    auto_stop: Duration,
    cancel: CancelHandle,
) {
    if captions.len() < 2 || every.is_zero() {
        return;
    }

    let deadline = tokio::time::sleep(auto_stop);
    tokio::pin!(deadline);
    let mut ticker = interval_at(Instant::now() + every, every);
    let mut index = 0;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = &mut deadline => {
                debug!("Loading caption rotation auto-stopped");
                break;
            }
            _ = ticker.tick() => {
                index = (index + 1) % captions.len();
                if tx.send(captions[index].clone()).is_err() {
                    break;
                }
            }
        }
    }
}
