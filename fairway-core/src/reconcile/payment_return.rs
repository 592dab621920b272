//! Return-from-payment settlement.
//!
//! After the hosted payment page redirects back, the confirmation screen
//! reassembles its state from two places: the session id on the return
//! URL and the snapshot parked at handoff. Reading the snapshot also
//! retires it together with the draft slots, because the draft it came
//! from has been spent.

use std::collections::HashMap;

use async_trait::async_trait;
use compact_str::CompactString;
use fairway_sdk::client::{ClientError, StorefrontClient};
use fairway_sdk::objects::booking::BookingRecord;
use fairway_sdk::objects::checkout::session_id_from_return_url;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use super::envelope::extract_bookings;
use crate::checkout::{CheckoutSnapshot, SnapshotStore};

/// Backend capability: look up what a checkout session settled into.
#[async_trait]
pub trait SessionApi: Send + Sync {
    async fn booking_by_session(&self, session_id: &str) -> Result<Value, ClientError>;
}

#[async_trait]
impl SessionApi for StorefrontClient {
    async fn booking_by_session(&self, session_id: &str) -> Result<Value, ClientError> {
        StorefrontClient::booking_by_session(self, session_id).await
    }
}

/// State available to the confirmation screen after the redirect lands.
#[derive(Debug, Clone, Default)]
pub struct PaymentReturn {
    /// Checkout session id from the return URL, when the provider sent one.
    pub session_id: Option<CompactString>,
    /// Snapshot parked at handoff, when it survived the round trip.
    pub snapshot: Option<CheckoutSnapshot>,
    /// Caddy id-to-name map lifted from the snapshot.
    pub caddy_names: HashMap<CompactString, String>,
}

/// Collect the return state and retire the transient slots.
///
/// Never fails: a missing or corrupt snapshot and an absent session id
/// both degrade to `None`, and the screen falls back to backend data.
pub fn settle_payment_return(
    snapshots: &SnapshotStore,
    return_url: Option<&Url>,
) -> PaymentReturn {
    let session_id = return_url.and_then(session_id_from_return_url);
    let snapshot = snapshots.read();
    snapshots.clear();

    let caddy_names = snapshot
        .as_ref()
        .map(CheckoutSnapshot::caddy_names)
        .unwrap_or_default();

    info!(
        has_snapshot = snapshot.is_some(),
        has_session = session_id.is_some(),
        "settled payment return"
    );

    PaymentReturn {
        session_id,
        snapshot,
        caddy_names,
    }
}

/// Fetch the settled booking for a checkout session.
///
/// Runs on demand (a "sync now" action or a screen load), never
/// automatically in the background, so a slow settlement on the backend
/// side cannot block the confirmation screen. The response envelope is
/// normalized like any other list body.
pub async fn reconcile_session(
    api: &dyn SessionApi,
    session_id: &str,
) -> Result<Vec<BookingRecord>, ClientError> {
    let body = api.booking_by_session(session_id).await?;
    let records = extract_bookings(&body);
    debug!(count = records.len(), "reconciled checkout session");
    Ok(records)
}
