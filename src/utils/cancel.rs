//! Cancellation utilities
//!
//! Provides cancellation handles for background UI tasks.

use tokio_util::sync::CancellationToken;

/// A handle that can be used to request cancellation.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Request cancellation. Tasks observing this handle stop at their next
    /// suspension point.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A future that resolves when cancellation is requested.
    pub fn cancelled(&self) -> tokio_util::sync::WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio_test::{assert_pending, assert_ready, task};

    #[test]
    fn clones_share_state() {
        let a = CancelHandle::new();
        let b = a.clone();
        let mut waiting = task::spawn(b.cancelled());
        assert_pending!(waiting.poll());
        assert!(!b.is_cancelled());

        a.cancel();
        assert!(waiting.is_woken());
        assert_ready!(waiting.poll());
        assert!(b.is_cancelled());
    }
}
