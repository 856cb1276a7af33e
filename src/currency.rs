//! Locale-formatted amount parsing
//!
//! Amounts are typed the Indonesian way: digits grouped by `.` with no
//! decimal fraction, e.g. `1.000.000.000`. The parser runs on every
//! keystroke, so it must accept partial input such as `1.000.` or an empty
//! field.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Thousands separator used in display strings
pub const SEPARATOR: char = '.';

/// Default currency prefix for rendered amounts
pub const DEFAULT_PREFIX: &str = "Rp";

/// An amount together with the text it was parsed from
///
/// The digits are kept exactly as typed, without separators or leading
/// zeros, so any length of input is representable. Arithmetic goes through
/// [`ParsedAmount::value`], which is `None` once the amount no longer fits
/// in `u128`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAmount {
    /// Normalized decimal digits; `"0"` for zero
    pub digits: String,
    /// The display string as entered
    pub display: String,
}

impl ParsedAmount {
    /// Exact value, if it fits in `u128`
    pub fn value(&self) -> Option<u128> {
        self.digits.parse().ok()
    }

    /// The amount re-rendered with grouping separators
    pub fn grouped(&self) -> String {
        group_digits(&self.digits)
    }

    /// The amount with a currency prefix, e.g. `Rp 50.000.000`
    pub fn rupiah(&self, prefix: &str) -> String {
        with_prefix(prefix, self.grouped())
    }
}

/// Rejection reasons for amount input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid character '{ch}' at position {position}; only digits and '.' are allowed")]
    InvalidCharacter { ch: char, position: usize },
}

/// Parse a display string into an exact amount
///
/// All `.` separators are stripped before the digits are read, so the
/// placement of separators is not checked. Leading zeros are ignored and the
/// empty string is zero. There is no upper bound.
pub fn parse(display: &str) -> Result<ParsedAmount, ParseError> {
    let mut digits = String::with_capacity(display.len());

    for (position, ch) in display.chars().enumerate() {
        if ch == SEPARATOR {
            continue;
        }
        if !ch.is_ascii_digit() {
            return Err(ParseError::InvalidCharacter { ch, position });
        }
        if digits.is_empty() && ch == '0' {
            continue;
        }
        digits.push(ch);
    }

    if digits.is_empty() {
        digits.push('0');
    }

    Ok(ParsedAmount {
        digits,
        display: display.to_string(),
    })
}

/// Render an amount with `.` between groups of three digits
pub fn format_grouped(amount: u128) -> String {
    group_digits(&amount.to_string())
}

/// Render an amount with a currency prefix, e.g. `Rp 50.000.000`
pub fn format_rupiah(prefix: &str, amount: u128) -> String {
    with_prefix(prefix, format_grouped(amount))
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(SEPARATOR);
        }
        out.push(ch);
    }

    out
}

fn with_prefix(prefix: &str, grouped: String) -> String {
    if prefix.is_empty() {
        grouped
    } else {
        format!("{} {}", prefix, grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grouped_amount() {
        let parsed = parse("1.000.000.000").unwrap();
        assert_eq!(parsed.value(), Some(1_000_000_000));
        assert_eq!(parsed.display, "1.000.000.000");
    }

    #[test]
    fn test_parse_plain_digits() {
        assert_eq!(parse("50000000").unwrap().value(), Some(50_000_000));
    }

    #[test]
    fn test_parse_empty_is_zero() {
        assert_eq!(parse("").unwrap().value(), Some(0));
        assert_eq!(parse("0").unwrap().digits, "0");
        assert_eq!(parse("0.000").unwrap().digits, "0");
    }

    #[test]
    fn test_parse_leading_zeros() {
        assert_eq!(parse("007").unwrap().value(), Some(7));
        assert_eq!(parse("000.100").unwrap().digits, "100");
    }

    #[test]
    fn test_parse_partial_input_while_typing() {
        // Each prefix of "10.000.000" is what the field holds mid-typing
        let typed = "10.000.000";
        for end in 1..=typed.len() {
            assert!(parse(&typed[..end]).is_ok(), "prefix {:?}", &typed[..end]);
        }
        assert_eq!(parse("10.").unwrap().value(), Some(10));
    }

    #[test]
    fn test_parse_rejects_non_digits() {
        for input in ["1,000", "12a", "-5", "1 000", "Rp1.000", "1.5e3", "٣"] {
            assert!(
                matches!(parse(input), Err(ParseError::InvalidCharacter { .. })),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_error_reports_position() {
        assert_eq!(
            parse("1.00x").unwrap_err(),
            ParseError::InvalidCharacter { ch: 'x', position: 4 }
        );
    }

    #[test]
    fn test_parse_has_no_upper_bound() {
        // 10^39 is wider than u128 but still a valid amount
        let display = format!("1{}", ".000".repeat(13));
        let parsed = parse(&display).unwrap();
        assert_eq!(parsed.digits.len(), 40);
        assert_eq!(parsed.grouped(), display);
        assert_eq!(parsed.value(), None);

        assert_eq!(parse(&u128::MAX.to_string()).unwrap().value(), Some(u128::MAX));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = parse("1.250.000").unwrap();
        let again = parse(&first.grouped()).unwrap();
        assert_eq!(first.digits, again.digits);
        assert_eq!(parse(&first.digits).unwrap().digits, first.digits);
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(999), "999");
        assert_eq!(format_grouped(1000), "1.000");
        assert_eq!(format_grouped(50_000_000), "50.000.000");
        assert_eq!(format_grouped(1_000_000_000), "1.000.000.000");
        assert_eq!(format_grouped(123_456_789_012), "123.456.789.012");
    }

    #[test]
    fn test_grouped_display_round_trips() {
        for display in ["0", "7", "10.000.000", "50.000.000", "1.000.000.000", "12.345"] {
            assert_eq!(parse(display).unwrap().grouped(), display);
            assert_eq!(format_grouped(parse(display).unwrap().value().unwrap()), display);
        }
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah("Rp", 330_000_000), "Rp 330.000.000");
        assert_eq!(format_rupiah("", 1000), "1.000");
        assert_eq!(parse("2500000").unwrap().rupiah("IDR"), "IDR 2.500.000");
    }
}
