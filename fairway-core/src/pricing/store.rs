//! Shared rate state with change notification.
//!
//! `RateStore` wraps the active [`RateBook`] behind `Arc<RwLock<_>>` and
//! provides a watch-based notification mechanism, so pricing always reads
//! the current schedule and long-lived consumers can `await` rate changes
//! instead of polling.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{RwLock, RwLockReadGuard, watch};

use super::rates::RateBook;

/// A shared, versioned rate schedule with change notification.
///
/// Maintains an incrementing version counter; subscribers receive a
/// [`RateWatcher`] that can `await` the next schedule swap.
pub struct RateStore {
    inner: Arc<RateStoreInner>,
}

struct RateStoreInner {
    book: RwLock<RateBook>,
    version: AtomicU64,
    version_tx: watch::Sender<u64>,
}

/// Receives notifications when a [`RateStore`] is updated.
///
/// Call [`changed()`](RateWatcher::changed) to wait for the next update.
pub struct RateWatcher {
    version_rx: watch::Receiver<u64>,
}

impl RateStore {
    /// Create a store with the given initial schedule.
    pub fn new(initial: RateBook) -> Self {
        let (version_tx, _) = watch::channel(0u64);
        Self {
            inner: Arc::new(RateStoreInner {
                book: RwLock::new(initial),
                version: AtomicU64::new(0),
                version_tx,
            }),
        }
    }

    /// Replace the schedule and notify all watchers.
    pub async fn update(&self, book: RateBook) {
        let mut guard = self.inner.book.write().await;
        *guard = book;
        let new_version = self.inner.version.fetch_add(1, Ordering::Relaxed) + 1;
        // Release the write lock before notifying so woken subscribers can
        // read immediately.
        drop(guard);
        let _ = self.inner.version_tx.send(new_version);
    }

    /// Read the current schedule.
    pub async fn read(&self) -> RwLockReadGuard<'_, RateBook> {
        self.inner.book.read().await
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> RateWatcher {
        RateWatcher {
            version_rx: self.inner.version_tx.subscribe(),
        }
    }
}

impl Default for RateStore {
    fn default() -> Self {
        Self::new(RateBook::default())
    }
}

impl Clone for RateStore {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl RateWatcher {
    /// Wait until the rate schedule is updated.
    ///
    /// Returns `Ok(())` when a new version is available, or `Err` if the
    /// [`RateStore`] has been dropped.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.version_rx.changed().await
    }
}
