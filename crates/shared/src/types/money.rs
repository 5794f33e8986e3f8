//! Amount parsing and display for form input.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Text typed into the form is converted straight to `rust_decimal::Decimal`.
//!
//! Grouping separators are purely a display concern. Nothing here touches
//! tax or reporting; the numeric core only ever sees `Decimal`.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Thousands separator used for display and stripped on input.
pub const GROUP_SEPARATOR: char = ',';

/// Error returned when form text is not a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{input}' is not a valid amount")]
pub struct AmountParseError {
    /// The rejected input, as typed.
    pub input: String,
}

/// Parses an amount as typed into the form.
///
/// Blank input means the field was left empty and yields `None`.
/// Grouping separators are ignored, so `1,190.50` and `1190.50` are equal.
///
/// # Errors
///
/// Returns an error if the remaining text is not a decimal number.
pub fn parse_amount(text: &str) -> Result<Option<Decimal>, AmountParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let cleaned: String = trimmed.chars().filter(|c| *c != GROUP_SEPARATOR).collect();
    Decimal::from_str(&cleaned)
        .map(Some)
        .map_err(|_| AmountParseError {
            input: text.to_string(),
        })
}

/// Formats an amount with thousands grouping and two decimals.
#[must_use]
pub fn format_grouped(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("119", dec!(119))]
    #[case("119.00", dec!(119.00))]
    #[case("1,190", dec!(1190))]
    #[case("1,234,567.89", dec!(1234567.89))]
    #[case("  50.5 ", dec!(50.5))]
    #[case("0", dec!(0))]
    fn test_parse_amount(#[case] input: &str, #[case] expected: Decimal) {
        assert_eq!(parse_amount(input).unwrap(), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_parse_blank_is_absent(#[case] input: &str) {
        assert_eq!(parse_amount(input).unwrap(), None);
    }

    #[rstest]
    #[case("abc")]
    #[case("12.3.4")]
    #[case("1 000")]
    fn test_parse_amount_rejects_garbage(#[case] input: &str) {
        let err = parse_amount(input).unwrap_err();
        assert_eq!(err.input, input);
    }

    #[rstest]
    #[case(dec!(0), "0.00")]
    #[case(dec!(5), "5.00")]
    #[case(dec!(999.9), "999.90")]
    #[case(dec!(1000), "1,000.00")]
    #[case(dec!(1234567.5), "1,234,567.50")]
    #[case(dec!(100000), "100,000.00")]
    #[case(dec!(-1234.5), "-1,234.50")]
    #[case(dec!(0.005), "0.01")]
    fn test_format_grouped(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(format_grouped(amount), expected);
    }

    #[test]
    fn test_format_then_parse_keeps_value() {
        let amount = dec!(98765432.10);
        assert_eq!(parse_amount(&format_grouped(amount)).unwrap(), Some(amount));
    }
}
