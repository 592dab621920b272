//! Tolerant field deserializers for loosely-typed backend JSON.
//!
//! The storefront backend has drifted between numbers and numeric strings,
//! `null` and missing fields, and bare ids versus embedded objects. These
//! helpers absorb that drift at the serde boundary: a malformed value
//! degrades to the field's neutral form instead of failing the whole
//! record.

use compact_str::CompactString;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use smallvec::SmallVec;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;
use url::Url;

use super::booking::{BookingStatus, CaddyRef};
use super::course::CourseType;
use super::date::BookingDate;

/// Unsigned count; numeric strings parse, anything else reads as zero.
pub fn u32_or_zero<'de, D: Deserializer<'de>>(de: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(de)?;
    Ok(coerce_u32(&value).unwrap_or(0))
}

/// Like [`u32_or_zero`] but keeps absence observable.
pub fn u32_opt<'de, D: Deserializer<'de>>(de: D) -> Result<Option<u32>, D::Error> {
    let value = Value::deserialize(de)?;
    Ok(coerce_u32(&value))
}

/// Monetary amount; malformed or negative input degrades to zero.
pub fn money_or_zero<'de, D: Deserializer<'de>>(de: D) -> Result<Decimal, D::Error> {
    let value = Value::deserialize(de)?;
    Ok(coerce_money(&value).unwrap_or(Decimal::ZERO))
}

/// Paid flag; accepts real booleans plus the stringly forms in old records.
pub fn bool_or_false<'de, D: Deserializer<'de>>(de: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(de)?;
    Ok(match &value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        _ => false,
    })
}

/// Optional free-text field; empty strings and non-strings read as absent.
pub fn string_opt<'de, D: Deserializer<'de>>(de: D) -> Result<Option<CompactString>, D::Error> {
    let value = Value::deserialize(de)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => Some(CompactString::from(s)),
        _ => None,
    })
}

/// Redirect URL; blank or malformed values read as absent.
pub fn url_opt<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Url>, D::Error> {
    let value = Value::deserialize(de)?;
    Ok(match &value {
        Value::String(s) if !s.is_empty() => Url::parse(s).ok(),
        _ => None,
    })
}

/// Course type; unknown hole counts read as absent.
pub fn course_type_opt<'de, D: Deserializer<'de>>(
    de: D,
) -> Result<Option<CourseType>, D::Error> {
    let value = Value::deserialize(de)?;
    Ok(match &value {
        Value::String(s) => CourseType::from_token(s),
        Value::Number(n) => n.as_u64().and_then(CourseType::from_holes),
        _ => None,
    })
}

/// Lifecycle status; malformed values read as [`BookingStatus::Unknown`].
pub fn status_or_unknown<'de, D: Deserializer<'de>>(
    de: D,
) -> Result<BookingStatus, D::Error> {
    let value = Value::deserialize(de)?;
    Ok(BookingStatus::deserialize(&value).unwrap_or_default())
}

/// Booking date; unparseable input reads as absent.
pub fn booking_date_opt<'de, D: Deserializer<'de>>(
    de: D,
) -> Result<Option<BookingDate>, D::Error> {
    let value = Value::deserialize(de)?;
    Ok(value.as_str().and_then(BookingDate::parse))
}

/// Audit timestamp; RFC 3339 strings, plain dates, or unix milliseconds.
pub fn datetime_opt<'de, D: Deserializer<'de>>(
    de: D,
) -> Result<Option<OffsetDateTime>, D::Error> {
    let value = Value::deserialize(de)?;
    Ok(coerce_datetime(&value))
}

/// Caddy id list; a missing, null, or non-list field reads as empty, and
/// non-string elements are dropped.
pub fn id_list<'de, D: Deserializer<'de>>(
    de: D,
) -> Result<SmallVec<[CompactString; 4]>, D::Error> {
    let value = Value::deserialize(de)?;
    let Some(items) = value.as_array() else {
        return Ok(SmallVec::new());
    };
    Ok(items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(CompactString::from(s.as_str())),
            other => {
                debug!(?other, "dropping non-string caddy id");
                None
            }
        })
        .collect())
}

/// Caddy references; each element is either a bare id string or an embedded
/// object. Unrecognized elements are dropped rather than failing the record.
pub fn caddy_refs<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<CaddyRef>, D::Error> {
    let value = Value::deserialize(de)?;
    let Some(items) = value.as_array() else {
        return Ok(Vec::new());
    };
    Ok(items
        .iter()
        .filter_map(|item| match CaddyRef::deserialize(item) {
            Ok(caddy) => Some(caddy),
            Err(error) => {
                debug!(%error, "dropping unrecognized caddy entry");
                None
            }
        })
        .collect())
}

fn coerce_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u32::try_from(u).ok()
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f as u32)
            }
        }
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u32>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f as u32)
            })
        }
        _ => None,
    }
}

fn coerce_money(value: &Value) -> Option<Decimal> {
    let amount = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else {
                n.as_f64().and_then(|f| Decimal::try_from(f).ok())
            }
        }
        Value::String(s) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    }?;
    if amount.is_sign_negative() {
        None
    } else {
        Some(amount)
    }
}

fn coerce_datetime(value: &Value) -> Option<OffsetDateTime> {
    match value {
        Value::String(s) => OffsetDateTime::parse(s, &Rfc3339)
            .ok()
            .or_else(|| BookingDate::parse(s).map(|d| d.date().midnight().assume_utc())),
        Value::Number(n) => {
            let millis = n.as_i64()?;
            OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).ok()
        }
        _ => None,
    }
}
