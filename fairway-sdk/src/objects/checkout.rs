//! Checkout session payloads.

use compact_str::CompactString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use url::Url;

use super::lenient;

/// Request payload for creating a hosted payment session.
///
/// Field types are canonical: counts are numbers, money is a number, and
/// `date` is a normalized `YYYY-MM-DD` string. The backend echoes this
/// object into the booking record once payment settles, so nothing here
/// may depend on client-local state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    /// Course token (`"9"` / `"18"`), or `"-"` when the draft never chose.
    pub course_type: CompactString,
    /// Normalized `YYYY-MM-DD`.
    pub date: CompactString,
    pub time_slot: CompactString,
    pub players: u32,
    #[serde(default)]
    pub group_name: String,
    pub caddy: SmallVec<[CompactString; 4]>,
    pub golf_cart_qty: u32,
    pub golf_bag_qty: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

/// Response from `POST /stripe/create-checkout`.
///
/// Older backend builds return the redirect target as `url` instead of
/// `paymentUrl`; both are accepted, and blank or malformed URL values read
/// as absent. A `message` may accompany a refusal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutSessionResponse {
    #[serde(deserialize_with = "lenient::url_opt")]
    pub payment_url: Option<Url>,
    #[serde(deserialize_with = "lenient::url_opt")]
    pub url: Option<Url>,
    pub message: Option<String>,
}

impl CheckoutSessionResponse {
    /// The hosted payment page to redirect to, preferring `paymentUrl`.
    pub fn redirect_url(&self) -> Option<&Url> {
        self.payment_url.as_ref().or(self.url.as_ref())
    }
}

/// Extract the checkout session id from a payment-provider return URL.
///
/// The provider appends it as `session_id`; one gateway configuration uses
/// `sessionId` instead. `session_id` wins when both are present, and empty
/// values count as absent.
pub fn session_id_from_return_url(url: &Url) -> Option<CompactString> {
    let mut fallback = None;
    for (key, value) in url.query_pairs() {
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            "session_id" => return Some(CompactString::from(value.as_ref())),
            "sessionId" if fallback.is_none() => {
                fallback = Some(CompactString::from(value.as_ref()));
            }
            _ => {}
        }
    }
    fallback
}
