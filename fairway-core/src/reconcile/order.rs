//! Recency ordering for booking lists.
//!
//! Newest first, decided by a cascade of signals: explicit audit
//! timestamps, then the booked day, then the tee-off slot within that
//! day, and finally the creation second embedded in the record id. The
//! sort is stable, so records identical on every signal keep their
//! backend order.

use fairway_sdk::objects::booking::{BookingRecord, embedded_created_at};

/// Tee-off slot as minutes after midnight.
///
/// Anything but strict `HH:MM` is `-1`, which ranks below every real
/// slot. The pattern is positional, not a clock check; slot labels are
/// operator data.
pub fn time_slot_minutes(slot: &str) -> i32 {
    let b = slot.as_bytes();
    if b.len() != 5 || b[2] != b':' {
        return -1;
    }
    if ![b[0], b[1], b[3], b[4]].iter().all(u8::is_ascii_digit) {
        return -1;
    }
    let hours = i32::from(b[0] - b'0') * 10 + i32::from(b[1] - b'0');
    let minutes = i32::from(b[3] - b'0') * 10 + i32::from(b[4] - b'0');
    hours * 60 + minutes
}

type RecencyKey = (i64, i64, i64, i32, i64);

/// Missing signals rank as the epoch (or `-1` for slots), so records
/// carrying any real signal sort ahead of records without it.
fn recency_key(record: &BookingRecord) -> RecencyKey {
    let created = record.created_at.map_or(0, |t| t.unix_timestamp());
    let updated = record.updated_at.map_or(0, |t| t.unix_timestamp());
    let day = record
        .date
        .map_or(0, |d| d.date().midnight().assume_utc().unix_timestamp());
    let slot = record.time_slot.as_deref().map_or(-1, time_slot_minutes);
    let id_second = embedded_created_at(&record.id).map_or(0, |t| t.unix_timestamp());
    (created, updated, day, slot, id_second)
}

/// Sort newest-first without mutating the input.
pub fn sort_by_recency(records: &[BookingRecord]) -> Vec<BookingRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| recency_key(b).cmp(&recency_key(a)));
    sorted
}
