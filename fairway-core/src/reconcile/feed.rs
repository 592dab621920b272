//! The canonical booking list, guarded against stale fetches.
//!
//! The history screen refetches whenever it regains focus, and those
//! fetches race: a slow initial load must not land on top of a fresher
//! focus-triggered one. Every fetch takes a [`FetchTicket`]; applying
//! results under an outdated ticket changes nothing.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use fairway_sdk::client::{ClientError, StorefrontClient};
use fairway_sdk::objects::booking::BookingRecord;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use super::envelope::extract_bookings;
use super::order::sort_by_recency;

/// Backend capability: list the caller's bookings.
#[async_trait]
pub trait BookingsApi: Send + Sync {
    async fn my_bookings(&self) -> Result<Value, ClientError>;
}

#[async_trait]
impl BookingsApi for StorefrontClient {
    async fn my_bookings(&self) -> Result<Value, ClientError> {
        StorefrontClient::my_bookings(self).await
    }
}

/// Proof of which fetch generation produced a result set.
#[derive(Debug)]
pub struct FetchTicket {
    generation: u64,
}

/// Shared, always-sorted booking collection.
pub struct BookingFeed {
    inner: Arc<FeedInner>,
}

struct FeedInner {
    records: RwLock<Vec<BookingRecord>>,
    generation: AtomicU64,
}

impl BookingFeed {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(FeedInner {
                records: RwLock::new(Vec::new()),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Start a fetch; newer tickets invalidate every earlier one.
    pub fn begin_fetch(&self) -> FetchTicket {
        FetchTicket {
            generation: self.inner.generation.fetch_add(1, Ordering::AcqRel) + 1,
        }
    }

    /// Invalidate all outstanding tickets without starting a fetch.
    pub fn invalidate(&self) {
        self.inner.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Store a fetch result, normalized to recency order no matter which
    /// envelope shape produced it. Returns `false` (and changes nothing)
    /// when the ticket is stale.
    pub async fn apply(&self, ticket: &FetchTicket, records: Vec<BookingRecord>) -> bool {
        let current = self.inner.generation.load(Ordering::Acquire);
        if current != ticket.generation {
            debug!(
                ticket = ticket.generation,
                current, "discarding stale booking fetch"
            );
            return false;
        }
        *self.inner.records.write().await = sort_by_recency(&records);
        true
    }

    /// Current records, newest first.
    pub async fn current(&self) -> Vec<BookingRecord> {
        self.inner.records.read().await.clone()
    }

    /// One fetch-and-apply round against the backend.
    pub async fn refresh(&self, api: &dyn BookingsApi) -> Result<bool, ClientError> {
        let ticket = self.begin_fetch();
        let body = api.my_bookings().await?;
        Ok(self.apply(&ticket, extract_bookings(&body)).await)
    }
}

impl Default for BookingFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for BookingFeed {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
