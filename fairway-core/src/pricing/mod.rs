//! Price derivation and the live rate schedule.

mod calculator;
mod rates;
mod store;

pub use calculator::{PriceBreakdown, price_breakdown};
pub use rates::{GreenFees, RateBook, RateCard};
pub use store::{RateStore, RateWatcher};
