//! Cooperative cancellation.
//!
//! A `CancellationToken` is shared between the code waiting on a document
//! and whoever may abandon that wait (an editor request that was superseded,
//! a shutdown). Long operations check it at every suspension point.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Clonable handle to a shared cancellation flag.
///
/// All clones observe the same flag. Once cancelled, a token stays
/// cancelled.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation and wake every pending `cancelled()` waiter.
    pub fn cancel(&self) {
        if !self.inner.cancelled.swap(true, Ordering::SeqCst) {
            self.inner.notify.notify_waiters();
        }
    }

    /// Check if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Complete once the token is cancelled.
    pub async fn cancelled(&self) {
        loop {
            // Register before checking the flag so a `cancel()` between the
            // check and the await still wakes us.
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}
