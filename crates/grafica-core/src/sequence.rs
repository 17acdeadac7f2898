//! # Order Identity & Sequencing
//!
//! Human-legible order numbers and creation timestamps.
//!
//! ## Order Number Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  P001, P002, ..., P999, P1000, ...                                  │
//! │                                                                     │
//! │  - 'P' prefix + zero-padded sequence (minimum 3 digits)             │
//! │  - assigned once at creation, never renumbered                      │
//! │  - derived from the existing collection, not a stored counter:      │
//! │    max(numeric suffixes) + 1                                        │
//! │  - malformed existing numbers are skipped, never an error           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deriving the next number from the collection keeps the sequence correct
//! even after orders are deleted or the persisted data was hand-edited.

use chrono::{DateTime, NaiveDate, Utc};

use crate::types::PrintOrder;

/// Prefix of every order number.
pub const ORDER_NUMBER_PREFIX: char = 'P';

/// Minimum digit width of the numeric suffix (`P001`).
pub const ORDER_NUMBER_WIDTH: usize = 3;

/// Parses the numeric suffix of a well-formed order number.
///
/// Strictly `P` followed by one or more ASCII digits; anything else is
/// `None`. Tolerant parsing here is what keeps a hand-edited collection
/// from poisoning the sequence.
pub fn parse_order_number(raw: &str) -> Option<u64> {
    let digits = raw.strip_prefix(ORDER_NUMBER_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Produces the next order number for the collection.
///
/// ## Contract
/// - Scans all existing orders, extracts suffixes matching `P<digits>`
/// - Malformed or missing numbers count as 0 (skipped, never an error)
/// - Result is max + 1, zero-padded to at least 3 digits
///
/// ## Edge Case
/// Empty collection → `P001`.
pub fn next_order_number(orders: &[PrintOrder]) -> String {
    let last = orders
        .iter()
        .filter_map(|order| parse_order_number(&order.order_number))
        .max()
        .unwrap_or(0);

    format!(
        "{}{:0width$}",
        ORDER_NUMBER_PREFIX,
        last + 1,
        width = ORDER_NUMBER_WIDTH
    )
}

/// Timestamps stamped onto an order at creation.
#[derive(Debug, Clone)]
pub struct CreationStamp {
    /// Calendar date of creation.
    pub created_at: NaiveDate,
    /// Wall-clock time of creation, "HH:MM".
    pub created_time: String,
    /// Full timestamp; also the initial `updated_at`.
    pub updated_at: DateTime<Utc>,
}

/// Derives the creation stamp from an explicit instant.
///
/// `now` is injected by the caller so this stays a pure function.
pub fn creation_stamp(now: DateTime<Utc>) -> CreationStamp {
    CreationStamp {
        created_at: now.date_naive(),
        created_time: now.format("%H:%M").to_string(),
        updated_at: now,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrderStatus, PaymentMethod, PaymentStatus};
    use chrono::TimeZone;

    fn order_with_number(number: &str) -> PrintOrder {
        PrintOrder {
            id: format!("id-{number}"),
            order_number: number.to_string(),
            customer_id: "c1".to_string(),
            product_id: "p1".to_string(),
            quantity: 1.0,
            price_cents: 4000,
            total_cents: 4000,
            seller_id: "s1".to_string(),
            status: OrderStatus::Analise,
            payment_method: PaymentMethod::Pix,
            payment_key_id: None,
            payment_status: PaymentStatus::Pendente,
            tube_model_id: None,
            tube_quantity: 0,
            delivery_date: NaiveDate::from_ymd_opt(2023, 10, 10).unwrap(),
            created_at: NaiveDate::from_ymd_opt(2023, 10, 1).unwrap(),
            created_time: "10:00".to_string(),
            updated_at: Utc.with_ymd_and_hms(2023, 10, 1, 10, 0, 0).unwrap(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_first_number_is_p001() {
        assert_eq!(next_order_number(&[]), "P001");
    }

    #[test]
    fn test_next_number_takes_max_not_last() {
        let orders = vec![
            order_with_number("P007"),
            order_with_number("P002"),
            order_with_number("P005"),
        ];
        assert_eq!(next_order_number(&orders), "P008");
    }

    #[test]
    fn test_malformed_numbers_are_skipped() {
        let orders = vec![
            order_with_number(""),
            order_with_number("PEDIDO-1"),
            order_with_number("P12x"),
            order_with_number("Q099"),
            order_with_number("P003"),
        ];
        assert_eq!(next_order_number(&orders), "P004");
    }

    #[test]
    fn test_all_malformed_restarts_sequence() {
        let orders = vec![order_with_number("???"), order_with_number("P")];
        assert_eq!(next_order_number(&orders), "P001");
    }

    #[test]
    fn test_sequence_grows_past_three_digits() {
        let orders = vec![order_with_number("P999")];
        assert_eq!(next_order_number(&orders), "P1000");
    }

    #[test]
    fn test_consecutive_numbers_are_strictly_increasing() {
        let mut orders = Vec::new();
        let mut previous = 0;
        for _ in 0..25 {
            let number = next_order_number(&orders);
            let value = parse_order_number(&number).unwrap();
            assert_eq!(value, previous + 1);
            previous = value;
            orders.push(order_with_number(&number));
        }
        assert_eq!(orders.last().unwrap().order_number, "P025");
    }

    #[test]
    fn test_parse_order_number() {
        assert_eq!(parse_order_number("P001"), Some(1));
        assert_eq!(parse_order_number("P1000"), Some(1000));
        assert_eq!(parse_order_number("P"), None);
        assert_eq!(parse_order_number("X001"), None);
        assert_eq!(parse_order_number("P 01"), None);
    }

    #[test]
    fn test_creation_stamp() {
        let now = Utc.with_ymd_and_hms(2023, 10, 5, 9, 7, 31).unwrap();
        let stamp = creation_stamp(now);
        assert_eq!(stamp.created_at, NaiveDate::from_ymd_opt(2023, 10, 5).unwrap());
        assert_eq!(stamp.created_time, "09:07");
        assert_eq!(stamp.updated_at, now);
    }
}
