//! Booking draft state.

use compact_str::CompactString;
use fairway_sdk::objects::course::CourseType;
use fairway_sdk::objects::date::BookingDate;
use fairway_sdk::objects::lenient;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// What the customer has filled in so far.
///
/// Everything is optional while the draft is being assembled; the checkout
/// handoff decides whether the accumulated state is complete enough to pay
/// for. Drafts round-trip through the transient store between wizard
/// steps, so deserialization is as tolerant as the booking record itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingDraft {
    #[serde(deserialize_with = "lenient::course_type_opt")]
    pub course_type: Option<CourseType>,
    #[serde(deserialize_with = "lenient::booking_date_opt")]
    pub date: Option<BookingDate>,
    #[serde(deserialize_with = "lenient::string_opt")]
    pub time_slot: Option<CompactString>,
    #[serde(deserialize_with = "lenient::u32_opt")]
    pub players: Option<u32>,
    pub group_name: Option<String>,
    #[serde(alias = "caddy", deserialize_with = "lenient::id_list")]
    pub caddy_ids: SmallVec<[CompactString; 4]>,
    #[serde(deserialize_with = "lenient::u32_or_zero")]
    pub golf_cart_qty: u32,
    #[serde(deserialize_with = "lenient::u32_or_zero")]
    pub golf_bag_qty: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tolerates_stringly_wizard_state() {
        let draft: BookingDraft = serde_json::from_value(json!({
            "courseType": "18",
            "date": "2024-05-01T10:00:00+07:00",
            "timeSlot": "08:00",
            "players": "2",
            "caddyIds": ["c1", null, "c2"],
            "golfCartQty": "1"
        }))
        .unwrap();

        assert_eq!(draft.course_type, Some(CourseType::Eighteen));
        assert_eq!(draft.date.unwrap().to_ymd(), "2024-05-01");
        assert_eq!(draft.players, Some(2));
        assert_eq!(draft.caddy_ids.as_slice(), ["c1", "c2"]);
        assert_eq!(draft.golf_cart_qty, 1);
        assert_eq!(draft.golf_bag_qty, 0);
    }

    #[test]
    fn test_empty_object_is_an_empty_draft() {
        let draft: BookingDraft = serde_json::from_value(json!({})).unwrap();
        assert_eq!(draft, BookingDraft::default());
        assert_eq!(draft.players, None);
    }
}
