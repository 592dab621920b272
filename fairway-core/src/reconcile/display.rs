//! Human-readable labels for booking data.

use std::collections::HashMap;

use compact_str::CompactString;
use fairway_sdk::objects::booking::CaddyRef;
use fairway_sdk::objects::date::BookingDate;
use itertools::Itertools;
use rust_decimal::Decimal;

/// Label for the caddy column: a count plus resolved names.
///
/// `names` supplements references that arrived as bare ids, typically the
/// snapshot's id-to-name map. Never fails; an unresolvable id shows as
/// the id itself, and no caddies shows as a zero count.
pub fn caddy_label(
    caddies: &[CaddyRef],
    names: Option<&HashMap<CompactString, String>>,
) -> String {
    if caddies.is_empty() {
        return "0 caddies".to_string();
    }
    let resolved = caddies
        .iter()
        .map(|caddy| resolve_name(caddy, names))
        .join(", ");
    let noun = if caddies.len() == 1 { "caddy" } else { "caddies" };
    format!("{} {noun} ({resolved})", caddies.len())
}

fn resolve_name<'a>(
    caddy: &'a CaddyRef,
    names: Option<&'a HashMap<CompactString, String>>,
) -> &'a str {
    if let CaddyRef::Id(id) = caddy {
        if let Some(name) = names.and_then(|map| map.get(id.as_str())) {
            return name;
        }
    }
    caddy.display_name()
}

/// `DD/MM/YYYY`, or a dash when the record has no usable date.
pub fn format_booking_date(date: Option<BookingDate>) -> String {
    match date {
        Some(booked) => {
            let day = booked.date();
            format!(
                "{:02}/{:02}/{:04}",
                day.day(),
                u8::from(day.month()),
                day.year()
            )
        }
        None => "-".to_string(),
    }
}

/// Baht amount with thousands separators, e.g. `฿2,400`.
pub fn format_money(amount: Decimal) -> String {
    let rendered = amount.normalize().to_string();
    let (number, fraction) = match rendered.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (rendered.as_str(), None),
    };
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(frac) => format!("฿{sign}{grouped}.{frac}"),
        None => format!("฿{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairway_sdk::objects::booking::CaddyDetail;

    #[test]
    fn test_caddy_label_resolves_names_through_the_map() {
        let caddies = vec![
            CaddyRef::Embedded(CaddyDetail {
                id: "c1".into(),
                name: Some("Malee".to_string()),
            }),
            CaddyRef::Id("c2".into()),
            CaddyRef::Id("c3".into()),
        ];
        let names: HashMap<CompactString, String> =
            [(CompactString::from("c2"), "Nok".to_string())].into();

        let label = caddy_label(&caddies, Some(&names));
        assert_eq!(label, "3 caddies (Malee, Nok, c3)");
    }

    #[test]
    fn test_caddy_label_edge_shapes() {
        // No selection still reads as a count, not an error or a blank.
        assert_eq!(caddy_label(&[], None), "0 caddies");

        let one = vec![CaddyRef::Id("c9".into())];
        assert_eq!(caddy_label(&one, None), "1 caddy (c9)");
    }

    #[test]
    fn test_format_booking_date() {
        let date = BookingDate::parse("2024-05-01");
        assert_eq!(format_booking_date(date), "01/05/2024");
        assert_eq!(format_booking_date(None), "-");
    }

    #[test]
    fn test_format_money_groups_thousands() {
        assert_eq!(format_money(Decimal::from(0)), "฿0");
        assert_eq!(format_money(Decimal::from(950)), "฿950");
        assert_eq!(format_money(Decimal::from(2400)), "฿2,400");
        assert_eq!(format_money(Decimal::from(1_234_567)), "฿1,234,567");
        assert_eq!(format_money(Decimal::new(45005, 1)), "฿4,500.5");
    }
}
