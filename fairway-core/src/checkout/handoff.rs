//! Checkout handoff to the hosted payment page.
//!
//! [`CheckoutHandoff::prepare`] runs the whole pre-payment contract:
//! validate the draft, price it, park the snapshot, open the payment
//! session, and hand back the redirect target. The caller performs the
//! actual navigation; on `Err` nothing may navigate, and the snapshot is
//! only written once the draft has fully validated.

use std::sync::Arc;

use async_trait::async_trait;
use compact_str::CompactString;
use fairway_sdk::client::{ClientError, StorefrontClient};
use fairway_sdk::objects::booking::CaddyRef;
use fairway_sdk::objects::checkout::{CheckoutPayload, CheckoutSessionResponse};
use rust_decimal::Decimal;
use tracing::{info, warn};
use url::Url;

use super::snapshot::{CheckoutSnapshot, SnapshotStore};
use crate::booking::BookingDraft;
use crate::pricing::{PriceBreakdown, RateStore, price_breakdown};

/// Everything that can stop a checkout before the customer leaves.
#[derive(Debug, thiserror::Error)]
pub enum HandoffError {
    /// The draft is missing a required field (a zero player count included).
    #[error("booking is missing {field}")]
    IncompleteBooking { field: &'static str },

    /// Caddy selection must cover every player exactly.
    #[error("{selected} caddies selected for {expected} players")]
    CaddyMismatch { expected: u32, selected: usize },

    /// A zero or negative total never reaches the payment provider.
    #[error("computed total {total} is not payable")]
    InvalidTotal { total: Decimal },

    /// The session was created but exposed no redirect URL.
    #[error("payment session returned no payment link")]
    NoPaymentLink { message: Option<String> },

    /// The session call itself failed.
    #[error(transparent)]
    Api(#[from] ClientError),
}

impl HandoffError {
    /// One line for the customer. A backend-authored message wins over the
    /// generic wording whenever the backend sent one.
    pub fn user_message(&self) -> String {
        match self {
            HandoffError::IncompleteBooking { .. } => {
                "Please pick a date, time and player count before paying.".to_string()
            }
            HandoffError::CaddyMismatch { expected, .. } => {
                let noun = if *expected == 1 { "caddy" } else { "caddies" };
                format!("Please select exactly {expected} {noun} (one per player).")
            }
            HandoffError::InvalidTotal { .. } => {
                "The booking total could not be calculated. Please start over.".to_string()
            }
            HandoffError::NoPaymentLink { message } => message
                .clone()
                .unwrap_or_else(generic_payment_failure),
            HandoffError::Api(client) => client
                .backend_message()
                .unwrap_or_else(generic_payment_failure),
        }
    }
}

fn generic_payment_failure() -> String {
    "The payment page could not be opened. Please try again.".to_string()
}

/// Backend capability the handoff needs: open a hosted payment session.
///
/// [`StorefrontClient`] implements it; tests drop in fakes.
#[async_trait]
pub trait CheckoutApi: Send + Sync {
    async fn create_checkout(
        &self,
        payload: &CheckoutPayload,
    ) -> Result<CheckoutSessionResponse, ClientError>;
}

#[async_trait]
impl CheckoutApi for StorefrontClient {
    async fn create_checkout(
        &self,
        payload: &CheckoutPayload,
    ) -> Result<CheckoutSessionResponse, ClientError> {
        StorefrontClient::create_checkout(self, payload).await
    }
}

/// A successful handoff. `redirect` is the hosted payment page; visiting
/// it is the last thing the flow does.
#[derive(Debug, Clone)]
pub struct HandoffTicket {
    pub redirect: Url,
    pub payload: CheckoutPayload,
    pub breakdown: PriceBreakdown,
}

/// Orchestrates the handoff contract.
///
/// Stateless between calls: every [`prepare`](Self::prepare) revalidates
/// and reprices from the draft it is given. Debouncing double-submits is
/// the caller's job.
pub struct CheckoutHandoff {
    rates: RateStore,
    snapshots: SnapshotStore,
    api: Arc<dyn CheckoutApi>,
}

impl CheckoutHandoff {
    pub fn new(rates: RateStore, snapshots: SnapshotStore, api: Arc<dyn CheckoutApi>) -> Self {
        Self {
            rates,
            snapshots,
            api,
        }
    }

    /// Validate, price, snapshot, and open the payment session.
    pub async fn prepare(&self, draft: &BookingDraft) -> Result<HandoffTicket, HandoffError> {
        self.run(draft, Vec::new()).await
    }

    /// Like [`prepare`](Self::prepare), but parks known caddy profiles in
    /// the snapshot so the confirmation screen can show names without
    /// another fetch.
    pub async fn prepare_with_caddies(
        &self,
        draft: &BookingDraft,
        caddy_details: Vec<CaddyRef>,
    ) -> Result<HandoffTicket, HandoffError> {
        self.run(draft, caddy_details).await
    }

    async fn run(
        &self,
        draft: &BookingDraft,
        caddy_details: Vec<CaddyRef>,
    ) -> Result<HandoffTicket, HandoffError> {
        let date = draft
            .date
            .ok_or(HandoffError::IncompleteBooking { field: "date" })?;
        let time_slot = draft
            .time_slot
            .clone()
            .ok_or(HandoffError::IncompleteBooking { field: "time slot" })?;
        let players = draft.players.unwrap_or(0);
        if players == 0 {
            return Err(HandoffError::IncompleteBooking { field: "players" });
        }

        if draft.caddy_ids.len() != players as usize {
            return Err(HandoffError::CaddyMismatch {
                expected: players,
                selected: draft.caddy_ids.len(),
            });
        }

        let breakdown = {
            let rates = self.rates.read().await;
            price_breakdown(&rates, draft)
        };
        if !breakdown.is_payable() {
            return Err(HandoffError::InvalidTotal {
                total: breakdown.total,
            });
        }

        let payload = CheckoutPayload {
            course_type: draft
                .course_type
                .map(|course| CompactString::from(course.as_token()))
                .unwrap_or_else(|| CompactString::from("-")),
            date: date.to_ymd(),
            time_slot,
            players,
            group_name: draft.group_name.clone().unwrap_or_default(),
            caddy: draft.caddy_ids.clone(),
            golf_cart_qty: draft.golf_cart_qty,
            golf_bag_qty: draft.golf_bag_qty,
            total_price: breakdown.total,
        };

        // Parked before the session call: once the redirect happens this
        // code is gone, and a snapshot written "on success" would race the
        // navigation.
        self.snapshots
            .write(&CheckoutSnapshot::new(&payload, &breakdown, caddy_details));

        let response = self.api.create_checkout(&payload).await?;
        let Some(redirect) = response.redirect_url().cloned() else {
            warn!(message = ?response.message, "payment session without redirect url");
            return Err(HandoffError::NoPaymentLink {
                message: response.message,
            });
        };

        info!(
            date = %payload.date,
            time_slot = %payload.time_slot,
            players,
            total = %breakdown.total,
            "checkout handoff ready"
        );

        Ok(HandoffTicket {
            redirect,
            payload,
            breakdown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{GreenFees, RateBook, RateCard};
    use fairway_sdk::objects::date::BookingDate;
    use reqwest::StatusCode;
    use smallvec::smallvec;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Behavior {
        PaymentUrl(&'static str),
        LegacyUrl(&'static str),
        Refuse(Option<&'static str>),
        ApiError(u16, &'static str),
    }

    struct FakeApi {
        behavior: Behavior,
        calls: AtomicUsize,
        sent: Mutex<Option<CheckoutPayload>>,
        snapshots_at_call: SnapshotStore,
    }

    impl FakeApi {
        fn new(behavior: Behavior, snapshots: &SnapshotStore) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                calls: AtomicUsize::new(0),
                sent: Mutex::new(None),
                snapshots_at_call: snapshots.clone(),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CheckoutApi for FakeApi {
        async fn create_checkout(
            &self,
            payload: &CheckoutPayload,
        ) -> Result<CheckoutSessionResponse, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            // The snapshot must already be parked when the backend is hit.
            assert!(self.snapshots_at_call.read().is_some());
            *self.sent.lock().unwrap() = Some(payload.clone());

            match &self.behavior {
                Behavior::PaymentUrl(url) => Ok(CheckoutSessionResponse {
                    payment_url: Some(url.parse().unwrap()),
                    url: None,
                    message: None,
                }),
                Behavior::LegacyUrl(url) => Ok(CheckoutSessionResponse {
                    payment_url: None,
                    url: Some(url.parse().unwrap()),
                    message: None,
                }),
                Behavior::Refuse(message) => Ok(CheckoutSessionResponse {
                    payment_url: None,
                    url: None,
                    message: message.map(str::to_string),
                }),
                Behavior::ApiError(status, body) => Err(ClientError::Api {
                    status: StatusCode::from_u16(*status).unwrap(),
                    body: body.to_string(),
                }),
            }
        }
    }

    fn ready_draft() -> BookingDraft {
        BookingDraft {
            course_type: Some(fairway_sdk::objects::course::CourseType::Eighteen),
            date: Some(BookingDate::parse("2024-05-01").unwrap()),
            time_slot: Some("08:00".into()),
            players: Some(2),
            group_name: Some("Suntharee group".to_string()),
            caddy_ids: smallvec!["c1".into(), "c2".into()],
            golf_cart_qty: 1,
            golf_bag_qty: 0,
        }
    }

    fn setup(behavior: Behavior) -> (CheckoutHandoff, Arc<FakeApi>, SnapshotStore) {
        let snapshots = SnapshotStore::in_memory();
        let api = FakeApi::new(behavior, &snapshots);
        let handoff = CheckoutHandoff::new(
            RateStore::default(),
            snapshots.clone(),
            Arc::clone(&api) as Arc<dyn CheckoutApi>,
        );
        (handoff, api, snapshots)
    }

    #[tokio::test]
    async fn test_successful_handoff() {
        let (handoff, api, snapshots) =
            setup(Behavior::PaymentUrl("https://pay.example/s/cs_1"));

        let ticket = handoff.prepare(&ready_draft()).await.unwrap();

        assert_eq!(ticket.redirect.as_str(), "https://pay.example/s/cs_1");
        assert_eq!(ticket.payload.date, "2024-05-01");
        assert_eq!(ticket.payload.total_price, ticket.breakdown.total);
        assert_eq!(api.calls(), 1);

        let sent = api.sent.lock().unwrap().clone().unwrap();
        assert_eq!(sent.course_type, "18");
        assert_eq!(sent.players, 2);

        let snapshot = snapshots.read().unwrap();
        assert_eq!(snapshot.total_price, ticket.breakdown.total);
        assert_eq!(snapshot.price, ticket.breakdown);
    }

    #[tokio::test]
    async fn test_legacy_url_field_still_redirects() {
        let (handoff, _api, _snapshots) =
            setup(Behavior::LegacyUrl("https://pay.example/s/cs_2"));
        let ticket = handoff.prepare(&ready_draft()).await.unwrap();
        assert_eq!(ticket.redirect.as_str(), "https://pay.example/s/cs_2");
    }

    #[tokio::test]
    async fn test_caddy_mismatch_blocks_before_any_side_effect() {
        let (handoff, api, snapshots) = setup(Behavior::PaymentUrl("https://pay.example/x"));

        let draft = BookingDraft {
            caddy_ids: smallvec!["c1".into()],
            ..ready_draft()
        };
        let err = handoff.prepare(&draft).await.unwrap_err();

        match &err {
            HandoffError::CaddyMismatch { expected, selected } => {
                assert_eq!(*expected, 2);
                assert_eq!(*selected, 1);
            }
            other => panic!("expected CaddyMismatch, got {other:?}"),
        }
        // The expected count reaches the customer-facing message.
        assert!(err.user_message().contains('2'));
        assert_eq!(api.calls(), 0);
        assert!(snapshots.read().is_none());
    }

    #[tokio::test]
    async fn test_incomplete_draft_is_rejected() {
        let (handoff, api, _snapshots) = setup(Behavior::PaymentUrl("https://pay.example/x"));

        for draft in [
            BookingDraft {
                date: None,
                ..ready_draft()
            },
            BookingDraft {
                time_slot: None,
                ..ready_draft()
            },
            BookingDraft {
                players: Some(0),
                caddy_ids: smallvec![],
                ..ready_draft()
            },
        ] {
            let err = handoff.prepare(&draft).await.unwrap_err();
            assert!(matches!(err, HandoffError::IncompleteBooking { .. }));
        }
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn test_zero_total_is_rejected_before_the_backend() {
        let snapshots = SnapshotStore::in_memory();
        let api = FakeApi::new(Behavior::PaymentUrl("https://pay.example/x"), &snapshots);
        let handoff = CheckoutHandoff::new(
            RateStore::new(zero_rate_book()),
            snapshots.clone(),
            Arc::clone(&api) as Arc<dyn CheckoutApi>,
        );

        let err = handoff.prepare(&ready_draft()).await.unwrap_err();
        assert!(matches!(err, HandoffError::InvalidTotal { .. }));
        assert_eq!(api.calls(), 0);
        assert!(snapshots.read().is_none());
    }

    fn zero_rate_book() -> RateBook {
        let zero = RateCard {
            green_fees: GreenFees {
                nine: Decimal::ZERO,
                eighteen: Decimal::ZERO,
            },
            caddy_fee: Decimal::ZERO,
            cart_fee: Decimal::ZERO,
            bag_fee: Decimal::ZERO,
        };
        RateBook {
            weekday: zero.clone(),
            weekend: zero,
            holiday: None,
            holidays: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_missing_payment_link_keeps_snapshot_and_fails() {
        let (handoff, _api, snapshots) = setup(Behavior::Refuse(Some("no slots left")));

        let err = handoff.prepare(&ready_draft()).await.unwrap_err();
        match &err {
            HandoffError::NoPaymentLink { message } => {
                assert_eq!(message.as_deref(), Some("no slots left"));
            }
            other => panic!("expected NoPaymentLink, got {other:?}"),
        }
        assert_eq!(err.user_message(), "no slots left");
        // The parked snapshot stays; the return screen may still want it.
        assert!(snapshots.read().is_some());
    }

    #[tokio::test]
    async fn test_backend_message_wins_in_user_message() {
        let (handoff, _api, _snapshots) = setup(Behavior::ApiError(
            409,
            r#"{"message":"slot already booked"}"#,
        ));

        let err = handoff.prepare(&ready_draft()).await.unwrap_err();
        assert!(matches!(err, HandoffError::Api(_)));
        assert_eq!(err.user_message(), "slot already booked");
    }

    #[tokio::test]
    async fn test_snapshot_carries_caddy_details() {
        let (handoff, _api, snapshots) =
            setup(Behavior::PaymentUrl("https://pay.example/s/cs_3"));

        let details = vec![CaddyRef::Embedded(
            fairway_sdk::objects::booking::CaddyDetail {
                id: "c1".into(),
                name: Some("Malee".to_string()),
            },
        )];
        handoff
            .prepare_with_caddies(&ready_draft(), details)
            .await
            .unwrap();

        let names = snapshots.read().unwrap().caddy_names();
        assert_eq!(names.get("c1").map(String::as_str), Some("Malee"));
    }
}
