//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use rust_decimal::Decimal;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats a decimal amount with two fraction digits and thousands
/// separators.
///
/// Usage in templates: `{{ order.total_price|money }}`
#[askama::filter_fn]
pub fn money(value: &Decimal, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_money(value))
}

fn format_money(value: &Decimal) -> String {
    let rounded = value.round_dp(2);
    let formatted = format!("{rounded:.2}");
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let negative = whole.starts_with('-');
    let digits = whole.trim_start_matches('-');

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_groups_thousands() {
        assert_eq!(format_money(&Decimal::new(123_456_789, 2)), "1,234,567.89");
    }

    #[test]
    fn test_money_pads_fraction() {
        assert_eq!(format_money(&Decimal::new(45, 0)), "45.00");
        assert_eq!(format_money(&Decimal::new(4505, 1)), "450.50");
    }

    #[test]
    fn test_money_negative() {
        assert_eq!(format_money(&Decimal::new(-150, 2)), "-1.50");
    }
}
