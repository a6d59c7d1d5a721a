//! Number formatting for display. Non-finite values render as "-".

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Whole currency units with `,` thousands separators.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let Some(amount) = Decimal::from_f64(value) else {
        return "-".to_string();
    };

    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };

    format!("{sign}{}", group_thousands(&digits))
}

/// Fixed-point percent figure (the value is already in percent).
pub fn format_percent(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    format!("{value:.digits$}")
}

/// Ratio shown as a percent figure, e.g. 0.0123 -> "1.23".
pub fn format_ratio_as_percent(value: f64, digits: usize) -> String {
    format_percent(value * 100.0, digits)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(757_575.757_575), "757,576");
        assert_eq!(format_currency(1_000_000.0), "1,000,000");
        assert_eq!(format_currency(999.5), "1,000");
        assert_eq!(format_currency(12.0), "12");
        assert_eq!(format_currency(0.0), "0");
        assert_eq!(format_currency(-0.2), "0");
        assert_eq!(format_currency(-1234.4), "-1,234");
        assert_eq!(format_currency(f64::INFINITY), "-");
        assert_eq!(format_currency(f64::NAN), "-");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(1.32, 2), "1.32");
        assert_eq!(format_percent(0.456, 1), "0.5");
        assert_eq!(format_percent(f64::NAN, 2), "-");
        assert_eq!(format_ratio_as_percent(0.0123, 2), "1.23");
        assert_eq!(format_ratio_as_percent(f64::INFINITY, 2), "-");
    }
}
