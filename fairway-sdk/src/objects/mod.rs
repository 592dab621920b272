//! Wire types exchanged with the storefront backend.

pub mod booking;
pub mod checkout;
pub mod course;
pub mod date;
pub mod lenient;

pub use booking::{BookingRecord, BookingStatus, CaddyDetail, CaddyRef, embedded_created_at};
pub use checkout::{CheckoutPayload, CheckoutSessionResponse, session_id_from_return_url};
pub use course::CourseType;
pub use date::{BookingDate, normalize_date};
