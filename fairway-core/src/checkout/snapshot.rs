//! Transient checkout state that survives the payment redirect.
//!
//! Handing off to the hosted payment page is a full navigation: whatever
//! the confirmation screen needs afterwards has to be parked somewhere
//! that outlives the page. [`SnapshotStore`] owns that slot. The snapshot
//! is written before the redirect is requested; a write that only happened
//! on success would race the navigation and lose.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use compact_str::CompactString;
use fairway_sdk::objects::booking::CaddyRef;
use fairway_sdk::objects::checkout::CheckoutPayload;
use fairway_sdk::objects::lenient;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::pricing::PriceBreakdown;

/// Key the denormalized checkout snapshot is stored under.
pub const SNAPSHOT_KEY: &str = "bookingPreview";
/// Key the in-progress draft is stored under.
pub const DRAFT_KEY: &str = "bookingDraft";
/// Key the wizard's current step index is stored under.
pub const STEP_KEY: &str = "bookingCurrentStep";

/// Everything the post-payment confirmation screen needs, denormalized:
/// the payload as sent, the itemized price, and any caddy profiles known
/// at handoff time for id-to-name display.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutSnapshot {
    pub course_type: CompactString,
    /// Normalized `YYYY-MM-DD`, as sent in the payload.
    pub date: CompactString,
    pub time_slot: CompactString,
    #[serde(deserialize_with = "lenient::u32_or_zero")]
    pub players: u32,
    pub group_name: String,
    pub caddy: SmallVec<[CompactString; 4]>,
    #[serde(deserialize_with = "lenient::u32_or_zero")]
    pub golf_cart_qty: u32,
    #[serde(deserialize_with = "lenient::u32_or_zero")]
    pub golf_bag_qty: u32,
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient::money_or_zero"
    )]
    pub total_price: Decimal,
    pub price: PriceBreakdown,
    #[serde(deserialize_with = "lenient::caddy_refs")]
    pub caddy_details: Vec<CaddyRef>,
}

impl CheckoutSnapshot {
    /// Build the snapshot written at handoff.
    pub fn new(
        payload: &CheckoutPayload,
        price: &PriceBreakdown,
        caddy_details: Vec<CaddyRef>,
    ) -> Self {
        Self {
            course_type: payload.course_type.clone(),
            date: payload.date.clone(),
            time_slot: payload.time_slot.clone(),
            players: payload.players,
            group_name: payload.group_name.clone(),
            caddy: payload.caddy.clone(),
            golf_cart_qty: payload.golf_cart_qty,
            golf_bag_qty: payload.golf_bag_qty,
            total_price: price.total,
            price: price.clone(),
            caddy_details,
        }
    }

    /// Caddy id-to-display-name map for the confirmation screen.
    pub fn caddy_names(&self) -> HashMap<CompactString, String> {
        self.caddy_details
            .iter()
            .map(|caddy| {
                (
                    CompactString::from(caddy.id()),
                    caddy.display_name().to_string(),
                )
            })
            .collect()
    }

    /// Total for display: the itemized total when present, the flat copy
    /// otherwise.
    pub fn display_total(&self) -> Decimal {
        if self.price.total > Decimal::ZERO {
            self.price.total
        } else {
            self.total_price
        }
    }
}

/// Keyed string storage with page-session lifetime.
///
/// The seam between the core and whatever hosts it: a browser shell maps
/// this onto `sessionStorage`, native shells keep it in memory.
/// Implementations are infallible; a store that cannot hold a value simply
/// loses it, and every read path tolerates that.
pub trait TransientStore: Send + Sync {
    fn put(&self, key: &str, value: String);
    fn get(&self, key: &str) -> Option<String>;
    fn remove(&self, key: &str);
}

/// In-memory [`TransientStore`] for tests and native embeddings.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl TransientStore for MemoryStore {
    fn put(&self, key: &str, value: String) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value);
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

/// Typed facade over the transient slots the checkout flow uses.
#[derive(Clone)]
pub struct SnapshotStore {
    inner: Arc<dyn TransientStore>,
}

impl SnapshotStore {
    pub fn new(inner: Arc<dyn TransientStore>) -> Self {
        Self { inner }
    }

    /// Store backed by process memory.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::default()))
    }

    /// Park the snapshot. Serialization problems are logged and swallowed;
    /// the confirmation screen then degrades to backend data.
    pub fn write(&self, snapshot: &CheckoutSnapshot) {
        match serde_json::to_string(snapshot) {
            Ok(json) => self.inner.put(SNAPSHOT_KEY, json),
            Err(error) => debug!(%error, "could not serialize checkout snapshot"),
        }
    }

    /// The parked snapshot, if one is present and parseable. A corrupt
    /// slot reads as absent.
    pub fn read(&self) -> Option<CheckoutSnapshot> {
        let raw = self.inner.get(SNAPSHOT_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(error) => {
                debug!(%error, "discarding unparseable checkout snapshot");
                None
            }
        }
    }

    /// Drop the snapshot together with the draft slots. Once payment has
    /// settled, the draft is spent; leaving it behind would resurrect the
    /// wizard mid-flow.
    pub fn clear(&self) {
        self.inner.remove(SNAPSHOT_KEY);
        self.inner.remove(DRAFT_KEY);
        self.inner.remove(STEP_KEY);
    }
}
