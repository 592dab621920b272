//! Post-payment reconciliation and booking-list normalization.
//!
//! Everything that turns backend responses back into screen-ready state:
//!
//! - `envelope`: flatten drifting response shapes into record lists
//! - `order`: newest-first ordering across partial timestamps
//! - `feed`: the shared booking list, guarded against stale fetches
//! - `payment_return`: reassemble state after the payment redirect
//! - `display`: labels for caddies, dates, and money

mod display;
mod envelope;
mod feed;
mod order;
mod payment_return;

pub use display::{caddy_label, format_booking_date, format_money};
pub use envelope::extract_bookings;
pub use feed::{BookingFeed, BookingsApi, FetchTicket};
pub use order::{sort_by_recency, time_slot_minutes};
pub use payment_return::{PaymentReturn, SessionApi, reconcile_session, settle_payment_return};
