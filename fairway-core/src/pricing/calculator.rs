//! Price breakdown calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rates::RateBook;
use crate::booking::BookingDraft;

/// Itemized price derived from a draft.
///
/// Line items are always derived, never stored, so the displayed price
/// cannot drift from the payload price. `total` is the sum of the four
/// line items by construction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriceBreakdown {
    #[serde(with = "rust_decimal::serde::float")]
    pub green_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub caddy_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cart_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub bag_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl PriceBreakdown {
    pub(crate) fn from_lines(
        green_fee: Decimal,
        caddy_fee: Decimal,
        cart_fee: Decimal,
        bag_fee: Decimal,
    ) -> Self {
        Self {
            green_fee,
            caddy_fee,
            cart_fee,
            bag_fee,
            total: green_fee + caddy_fee + cart_fee + bag_fee,
        }
    }

    /// Whether checkout may proceed on this total.
    pub fn is_payable(&self) -> bool {
        self.total > Decimal::ZERO
    }
}

/// Price a draft against the rate book.
///
/// Pure: the same draft and rates always produce the same breakdown.
/// Missing draft fields zero out their line item instead of failing, so a
/// half-filled draft still prices cleanly while it is being assembled.
pub fn price_breakdown(rates: &RateBook, draft: &BookingDraft) -> PriceBreakdown {
    let card = match draft.date {
        Some(date) => rates.for_date(date.date()),
        None => &rates.weekday,
    };

    let players = Decimal::from(draft.players.unwrap_or(0));
    let green_fee = match draft.course_type {
        Some(course) => card.green_fees.for_course(course) * players,
        None => Decimal::ZERO,
    };
    let caddy_fee = card.caddy_fee * Decimal::from(draft.caddy_ids.len() as u64);
    let cart_fee = card.cart_fee * Decimal::from(draft.golf_cart_qty);
    let bag_fee = card.bag_fee * Decimal::from(draft.golf_bag_qty);

    PriceBreakdown::from_lines(
        line(green_fee),
        line(caddy_fee),
        line(cart_fee),
        line(bag_fee),
    )
}

/// Rate files are operator-supplied; a negative fee must not turn into a
/// negative line item.
fn line(amount: Decimal) -> Decimal {
    amount.max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairway_sdk::objects::course::CourseType;
    use fairway_sdk::objects::date::BookingDate;
    use smallvec::smallvec;

    fn wednesday_draft() -> BookingDraft {
        BookingDraft {
            course_type: Some(CourseType::Eighteen),
            date: Some(BookingDate::parse("2024-05-01").unwrap()),
            time_slot: Some("08:00".into()),
            players: Some(2),
            group_name: None,
            caddy_ids: smallvec!["c1".into(), "c2".into()],
            golf_cart_qty: 1,
            golf_bag_qty: 0,
        }
    }

    #[test]
    fn test_weekday_breakdown() {
        let book = RateBook::default();
        let price = price_breakdown(&book, &wednesday_draft());

        // 2 players on 18 holes, 2 caddies, 1 cart, no bags.
        assert_eq!(price.green_fee, Decimal::from(4400));
        assert_eq!(price.caddy_fee, Decimal::from(800));
        assert_eq!(price.cart_fee, Decimal::from(700));
        assert_eq!(price.bag_fee, Decimal::ZERO);
        assert_eq!(price.total, Decimal::from(5900));
        assert!(price.is_payable());
    }

    #[test]
    fn test_total_is_sum_of_lines() {
        let book = RateBook::default();
        let price = price_breakdown(&book, &wednesday_draft());
        assert_eq!(
            price.total,
            price.green_fee + price.caddy_fee + price.cart_fee + price.bag_fee
        );
    }

    #[test]
    fn test_same_inputs_same_breakdown() {
        let book = RateBook::default();
        let draft = wednesday_draft();
        assert_eq!(price_breakdown(&book, &draft), price_breakdown(&book, &draft));
    }

    #[test]
    fn test_missing_fields_zero_their_line_items() {
        let book = RateBook::default();
        let empty = BookingDraft::default();
        let price = price_breakdown(&book, &empty);
        assert_eq!(price.total, Decimal::ZERO);
        assert!(!price.is_payable());

        // No course picked: green fee is zero, the rest still prices.
        let draft = BookingDraft {
            course_type: None,
            ..wednesday_draft()
        };
        let price = price_breakdown(&book, &draft);
        assert_eq!(price.green_fee, Decimal::ZERO);
        assert_eq!(price.total, Decimal::from(1500));
    }

    #[test]
    fn test_weekend_band_prices_higher() {
        let book = RateBook::default();
        let saturday = BookingDraft {
            date: Some(BookingDate::parse("2024-05-04").unwrap()),
            ..wednesday_draft()
        };
        let weekday_price = price_breakdown(&book, &wednesday_draft());
        let weekend_price = price_breakdown(&book, &saturday);
        assert!(weekend_price.total > weekday_price.total);
    }

    #[test]
    fn test_negative_rate_never_produces_negative_line() {
        let mut book = RateBook::default();
        book.weekday.caddy_fee = Decimal::from(-100);
        let price = price_breakdown(&book, &wednesday_draft());
        assert_eq!(price.caddy_fee, Decimal::ZERO);
        assert!(price.total >= Decimal::ZERO);
    }
}
