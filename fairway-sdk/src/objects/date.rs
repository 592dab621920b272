//! Calendar dates on the booking wire.

use std::fmt;

use compact_str::CompactString;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::{Date, Month, OffsetDateTime};

/// A tee-time calendar date.
///
/// The backend keys bookings by the `YYYY-MM-DD` string of the day the
/// customer picked, with no time-of-day or zone attached. When a datetime
/// string arrives instead, the calendar fields are taken as written in the
/// string; converting through UTC could shift the day for customers east
/// or west of the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookingDate(Date);

impl BookingDate {
    pub fn new(date: Date) -> Self {
        Self(date)
    }

    pub fn date(self) -> Date {
        self.0
    }

    /// Canonical `YYYY-MM-DD` form.
    pub fn to_ymd(self) -> CompactString {
        let (y, m, d) = (self.0.year(), u8::from(self.0.month()), self.0.day());
        compact_str::format_compact!("{y:04}-{m:02}-{d:02}")
    }

    /// Parse the date forms the storefront sees: a canonical `YYYY-MM-DD`
    /// string, an RFC 3339 datetime, or a datetime with a leading
    /// `YYYY-MM-DD` prefix and no offset. Returns `None` for anything else.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Some(date) = parse_ymd(raw) {
            return Some(Self(date));
        }
        if let Ok(dt) = OffsetDateTime::parse(raw, &Rfc3339) {
            return Some(Self(dt.date()));
        }
        if raw.len() > 10 {
            // get(), not a slice: byte 10 may land inside a multi-byte
            // character, and backend text must never panic the parser.
            return raw.get(..10).and_then(parse_ymd).map(Self);
        }
        None
    }
}

impl fmt::Display for BookingDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ymd())
    }
}

impl Serialize for BookingDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_ymd())
    }
}

impl<'de> Deserialize<'de> for BookingDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DateVisitor;

        impl Visitor<'_> for DateVisitor {
            type Value = BookingDate;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a YYYY-MM-DD or datetime string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<BookingDate, E> {
                BookingDate::parse(v)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_str(DateVisitor)
    }
}

/// Normalize assorted date inputs to the canonical `YYYY-MM-DD` form.
///
/// Already-canonical strings pass through unchanged, so the function is
/// idempotent. Datetime strings keep the calendar fields they were written
/// with. Returns `None` when nothing date-shaped can be extracted.
pub fn normalize_date(raw: &str) -> Option<CompactString> {
    let raw = raw.trim();
    if is_ymd_shaped(raw) {
        return Some(CompactString::from(raw));
    }
    BookingDate::parse(raw).map(BookingDate::to_ymd)
}

fn is_ymd_shaped(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit())
}

fn parse_ymd(s: &str) -> Option<Date> {
    if !is_ymd_shaped(s) {
        return None;
    }
    let year: i32 = s[..4].parse().ok()?;
    let month = Month::try_from(s[5..7].parse::<u8>().ok()?).ok()?;
    let day: u8 = s[8..10].parse().ok()?;
    Date::from_calendar_date(year, month, day).ok()
}
