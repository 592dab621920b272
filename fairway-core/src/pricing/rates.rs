//! Rate configuration.
//!
//! These structs map to the `fairway-rates.toml` file format: one fee card
//! per day band, plus the facility's holiday calendar.

use fairway_sdk::objects::course::CourseType;
use fairway_sdk::objects::date::BookingDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, Weekday};

/// Green fees by course length, in baht per player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GreenFees {
    pub nine: Decimal,
    pub eighteen: Decimal,
}

impl GreenFees {
    pub fn for_course(&self, course: CourseType) -> Decimal {
        match course {
            CourseType::Nine => self.nine,
            CourseType::Eighteen => self.eighteen,
        }
    }
}

impl Default for GreenFees {
    fn default() -> Self {
        Self {
            nine: Decimal::from(1200),
            eighteen: Decimal::from(2200),
        }
    }
}

/// Per-unit fees in effect for one day band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateCard {
    pub green_fees: GreenFees,
    /// Per selected caddy.
    pub caddy_fee: Decimal,
    /// Per golf cart.
    pub cart_fee: Decimal,
    /// Per rented bag set.
    pub bag_fee: Decimal,
}

impl Default for RateCard {
    fn default() -> Self {
        Self {
            green_fees: GreenFees::default(),
            caddy_fee: Decimal::from(400),
            cart_fee: Decimal::from(700),
            bag_fee: Decimal::from(150),
        }
    }
}

/// The complete fee schedule: weekday and weekend cards, an optional
/// holiday card, and the holiday calendar it applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateBook {
    pub weekday: RateCard,
    pub weekend: RateCard,
    pub holiday: Option<RateCard>,
    /// Days the holiday card applies to, as `YYYY-MM-DD`.
    pub holidays: Vec<BookingDate>,
}

impl RateBook {
    /// Parse a schedule from the TOML rate file.
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// The card in effect on `date`. Holidays win over the weekend band;
    /// without a dedicated holiday card, holidays price like weekends.
    pub fn for_date(&self, date: Date) -> &RateCard {
        if self.is_holiday(date) {
            return self.holiday.as_ref().unwrap_or(&self.weekend);
        }
        if is_weekend(date) {
            return &self.weekend;
        }
        &self.weekday
    }

    fn is_holiday(&self, date: Date) -> bool {
        self.holidays.iter().any(|holiday| holiday.date() == date)
    }
}

impl Default for RateBook {
    fn default() -> Self {
        let weekend = RateCard {
            green_fees: GreenFees {
                nine: Decimal::from(1500),
                eighteen: Decimal::from(2800),
            },
            ..RateCard::default()
        };
        Self {
            weekday: RateCard::default(),
            weekend,
            holiday: None,
            holidays: Vec::new(),
        }
    }
}

fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}
