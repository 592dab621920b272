//! Booking records as returned by the storefront backend.

use std::fmt;

use compact_str::CompactString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::course::CourseType;
use super::date::BookingDate;
use super::lenient;

/// Booking lifecycle status as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    /// Any status value this build does not know about.
    #[default]
    #[serde(other)]
    Unknown,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A caddy attached to a booking: either a bare id or an embedded profile,
/// depending on whether the backend populated the reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CaddyRef {
    Embedded(CaddyDetail),
    Id(CompactString),
}

impl CaddyRef {
    pub fn id(&self) -> &str {
        match self {
            CaddyRef::Embedded(detail) => &detail.id,
            CaddyRef::Id(id) => id,
        }
    }

    /// Best display name available on the reference itself.
    pub fn display_name(&self) -> &str {
        match self {
            CaddyRef::Embedded(detail) => detail.display_name(),
            CaddyRef::Id(id) => id,
        }
    }
}

/// Embedded caddy profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CaddyDetail {
    #[serde(alias = "_id")]
    pub id: CompactString,
    #[serde(alias = "fullName")]
    pub name: Option<String>,
}

impl CaddyDetail {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.id)
    }
}

/// A booking as rendered in the customer's history list.
///
/// Every field is optional or defaulted on the wire: reconciliation has to
/// render whatever the backend managed to store, so a partial record is
/// still a record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingRecord {
    #[serde(alias = "_id")]
    pub id: CompactString,
    #[serde(deserialize_with = "lenient::booking_date_opt")]
    pub date: Option<BookingDate>,
    #[serde(deserialize_with = "lenient::string_opt")]
    pub time_slot: Option<CompactString>,
    #[serde(deserialize_with = "lenient::course_type_opt")]
    pub course_type: Option<CourseType>,
    #[serde(deserialize_with = "lenient::u32_or_zero")]
    pub players: u32,
    #[serde(deserialize_with = "lenient::caddy_refs")]
    pub caddy: Vec<CaddyRef>,
    #[serde(deserialize_with = "lenient::u32_or_zero")]
    pub golf_cart_qty: u32,
    #[serde(deserialize_with = "lenient::u32_or_zero")]
    pub golf_bag_qty: u32,
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient::money_or_zero"
    )]
    pub total_price: Decimal,
    #[serde(deserialize_with = "lenient::bool_or_false")]
    pub is_paid: bool,
    #[serde(deserialize_with = "lenient::status_or_unknown")]
    pub status: BookingStatus,
    #[serde(deserialize_with = "lenient::datetime_opt")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(deserialize_with = "lenient::datetime_opt")]
    pub updated_at: Option<OffsetDateTime>,
}

/// Decode the creation time embedded in a backend record id.
///
/// Record ids lead with 8 hex characters holding the unix second the record
/// was created. Returns `None` when the id is shorter than that or the
/// prefix is not hex, which callers treat as "no embedded timestamp".
pub fn embedded_created_at(id: &str) -> Option<OffsetDateTime> {
    let prefix = id.get(..8)?;
    let seconds = u32::from_str_radix(prefix, 16).ok()?;
    OffsetDateTime::from_unix_timestamp(i64::from(seconds)).ok()
}
