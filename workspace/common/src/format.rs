//! Display formatting for card values, table cells and chart labels.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use rusty_money::{Money, iso};

/// Formats an amount as US dollars, e.g. `$1,234,567.50`.
pub fn format_currency(amount: Decimal) -> String {
    let mut cents = amount.round_dp(2);
    cents.rescale(2);
    Money::from_decimal(cents, iso::USD).to_string()
}

/// Same as [`format_currency`] for values that arrive as JSON floats.
/// Non-finite values are rendered as zero.
pub fn format_currency_f64(amount: f64) -> String {
    let decimal = Decimal::from_f64(amount).unwrap_or_else(|| {
        tracing::warn!(amount, "Cannot represent amount as decimal, rendering as zero");
        Decimal::ZERO
    });
    format_currency(decimal)
}

/// Formats a percentage with one decimal place, e.g. `45.0%`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Formats a count, dropping the fraction when it is zero.
pub fn format_count(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// Fiscal quarter label, e.g. `Q3`.
pub fn quarter_label(quarter: u8) -> String {
    format!("Q{}", quarter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(Decimal::new(123456750, 2)), "$1,234,567.50");
        assert_eq!(format_currency(Decimal::new(2000, 0)), "$2,000.00");
    }

    #[test]
    fn test_format_currency_always_shows_cents() {
        assert_eq!(format_currency(Decimal::new(125, 1)), "$12.50");
        assert_eq!(format_currency(Decimal::new(1000, 0)), "$1,000.00");
        assert_eq!(format_currency(Decimal::new(99999, 3)), "$100.00");
        assert_eq!(format_currency_f64(1000.0), "$1,000.00");
    }

    #[test]
    fn test_format_currency_f64() {
        assert_eq!(format_currency_f64(50000.0), "$50,000.00");
        assert_eq!(format_currency_f64(f64::NAN), "$0.00");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(45.04), "45.0%");
        assert_eq!(format_percentage(100.0), "100.0%");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(200.0), "200");
        assert_eq!(format_count(4.5), "4.5");
    }

    #[test]
    fn test_quarter_label() {
        assert_eq!(quarter_label(1), "Q1");
    }
}
