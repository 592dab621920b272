//! Response-envelope normalization.
//!
//! The list endpoints have returned half a dozen envelope shapes across
//! backend builds. [`extract_bookings`] recognizes them in a fixed
//! priority order and always produces a flat record list; an unrecognized
//! body is an empty list, never an error.

use fairway_sdk::objects::booking::BookingRecord;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

enum Matched<'a> {
    Many(&'a [Value]),
    One(&'a Value),
}

type Matcher = for<'a> fn(&'a Value) -> Option<Matched<'a>>;

/// Recognized envelope shapes, tried in order; first match wins.
static SHAPES: &[(&str, Matcher)] = &[
    ("array", shape_array),
    ("bookings", shape_bookings),
    ("data", shape_data),
    ("data.bookings", shape_data_bookings),
    ("booking", shape_booking),
    ("data.booking", shape_data_booking),
    ("list", shape_list),
    ("items", shape_items),
];

/// Normalize any list-endpoint body into booking records.
///
/// Entries that fail shape conversion are skipped with a debug log; the
/// rest of the list still loads.
pub fn extract_bookings(response: &Value) -> Vec<BookingRecord> {
    for (name, matcher) in SHAPES {
        if let Some(matched) = matcher(response) {
            debug!(shape = %name, "matched booking envelope");
            return match matched {
                Matched::Many(values) => parse_records(values),
                Matched::One(value) => parse_records(std::slice::from_ref(value)),
            };
        }
    }
    debug!("unrecognized booking envelope");
    Vec::new()
}

fn parse_records(values: &[Value]) -> Vec<BookingRecord> {
    values
        .iter()
        .filter_map(|value| match BookingRecord::deserialize(value) {
            Ok(record) => Some(record),
            Err(error) => {
                debug!(%error, "skipping malformed booking entry");
                None
            }
        })
        .collect()
}

fn shape_array(v: &Value) -> Option<Matched<'_>> {
    v.as_array().map(|a| Matched::Many(a))
}

fn shape_bookings(v: &Value) -> Option<Matched<'_>> {
    v.get("bookings")?.as_array().map(|a| Matched::Many(a))
}

fn shape_data(v: &Value) -> Option<Matched<'_>> {
    v.get("data")?.as_array().map(|a| Matched::Many(a))
}

fn shape_data_bookings(v: &Value) -> Option<Matched<'_>> {
    v.get("data")?
        .get("bookings")?
        .as_array()
        .map(|a| Matched::Many(a))
}

fn shape_booking(v: &Value) -> Option<Matched<'_>> {
    single(v.get("booking")?)
}

fn shape_data_booking(v: &Value) -> Option<Matched<'_>> {
    single(v.get("data")?.get("booking")?)
}

fn shape_list(v: &Value) -> Option<Matched<'_>> {
    v.get("list")?.as_array().map(|a| Matched::Many(a))
}

fn shape_items(v: &Value) -> Option<Matched<'_>> {
    v.get("items")?.as_array().map(|a| Matched::Many(a))
}

/// A single-record slot; an array or null here means the shape is
/// something else.
fn single(v: &Value) -> Option<Matched<'_>> {
    if v.is_array() || v.is_null() {
        None
    } else {
        Some(Matched::One(v))
    }
}
