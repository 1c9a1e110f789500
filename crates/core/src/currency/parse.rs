//! Parsing of amounts typed into form fields.
//!
//! Staff type amounts in whichever convention they are used to, so the same
//! field may receive `1.234,56` (Vietnamese/European) or `1,234.56` (US).
//! Parsing happens in two explicit steps:
//!
//! 1. [`classify`] decides the separator convention.
//! 2. The text is normalized to a plain decimal and read as a number.
//!
//! The default entry points are fail-soft: anything unreadable becomes zero
//! so that typing is never blocked. The `try_*` variants keep the failure.
//!
//! Known limitation: `"1.234"` has no comma, so it classifies as US style
//! and reads as 1.234, not 1234.

use std::borrow::Cow;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

use super::error::NumberParseError;

/// Digits and dots, then a comma followed by one or two digits.
static EUROPEAN_STYLE: Lazy<Regex> = Lazy::new(|| {
    // SAFETY: This regex pattern is compile-time constant and known to be valid
    Regex::new(r"^[0-9.]+,[0-9]{1,2}$").unwrap()
});

static PLAIN_INTEGER: Lazy<Regex> = Lazy::new(|| {
    // SAFETY: This regex pattern is compile-time constant and known to be valid
    Regex::new(r"^[+-]?[0-9]+$").unwrap()
});

/// Separator convention detected in a piece of numeric text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberStyle {
    /// `.` groups thousands, `,` is the decimal point (`1.234,56`).
    European,
    /// `,` groups thousands, `.` is the decimal point (`1,234.56`).
    Us,
    /// Only digits, with an optional sign. No separators to interpret.
    PlainInteger,
}

impl NumberStyle {
    /// Rewrites `text` so that `.` is the only decimal separator and no
    /// grouping separators remain.
    #[must_use]
    pub fn normalize(self, text: &str) -> Cow<'_, str> {
        match self {
            Self::European => Cow::Owned(
                text.chars()
                    .filter(|c| *c != '.')
                    .map(|c| if c == ',' { '.' } else { c })
                    .collect(),
            ),
            Self::Us if text.contains(',') => Cow::Owned(text.replace(',', "")),
            Self::Us | Self::PlainInteger => Cow::Borrowed(text),
        }
    }
}

/// Classifies the separator convention of whitespace-free numeric text.
#[must_use]
pub fn classify(text: &str) -> NumberStyle {
    if EUROPEAN_STYLE.is_match(text) {
        NumberStyle::European
    } else if PLAIN_INTEGER.is_match(text) {
        NumberStyle::PlainInteger
    } else {
        NumberStyle::Us
    }
}

/// A value coming out of a form field: either text as typed, or a number
/// the form already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawNumber<'a> {
    /// Text as typed by the user.
    Text(&'a str),
    /// An already numeric value.
    Number(Decimal),
}

impl<'a> From<&'a str> for RawNumber<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for RawNumber<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text.as_str())
    }
}

impl From<Decimal> for RawNumber<'_> {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for RawNumber<'_> {
    fn from(value: i64) -> Self {
        Self::Number(Decimal::from(value))
    }
}

impl From<u32> for RawNumber<'_> {
    fn from(value: u32) -> Self {
        Self::Number(Decimal::from(value))
    }
}

impl From<i32> for RawNumber<'_> {
    fn from(value: i32) -> Self {
        Self::Number(Decimal::from(value))
    }
}

/// Parses a possibly locale-ambiguous amount.
///
/// Numbers pass through unchanged. Text has all whitespace removed, is
/// classified with [`classify`], normalized, then read.
pub fn try_parse_ambiguous_number<'a>(
    input: impl Into<RawNumber<'a>>,
) -> Result<Decimal, NumberParseError> {
    let text = match input.into() {
        RawNumber::Number(value) => return Ok(value),
        RawNumber::Text(text) => text,
    };

    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(NumberParseError::Empty);
    }

    let style = classify(&compact);
    leading_decimal(&style.normalize(&compact))
        .ok_or_else(|| NumberParseError::Invalid(text.to_string()))
}

/// Fail-soft form of [`try_parse_ambiguous_number`]: failures become zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use saledesk_core::currency::parse_ambiguous_number;
///
/// assert_eq!(parse_ambiguous_number("1.234,56"), dec!(1234.56));
/// assert_eq!(parse_ambiguous_number("1,234.56"), dec!(1234.56));
/// assert_eq!(parse_ambiguous_number("abc"), dec!(0));
/// ```
pub fn parse_ambiguous_number<'a>(input: impl Into<RawNumber<'a>>) -> Decimal {
    try_parse_ambiguous_number(input).unwrap_or_else(|err| {
        debug!(error = %err, "ambiguous amount collapsed to zero");
        Decimal::ZERO
    })
}

/// Parses a plain numeric field where a comma always means decimal point.
///
/// No thousands detection is attempted, so `"1,5"` is 1.5.
pub fn try_parse_numeric_input<'a>(
    value: impl Into<RawNumber<'a>>,
) -> Result<Decimal, NumberParseError> {
    let text = match value.into() {
        RawNumber::Number(value) => return Ok(value),
        RawNumber::Text(text) => text,
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(NumberParseError::Empty);
    }

    leading_decimal(&trimmed.replace(',', "."))
        .ok_or_else(|| NumberParseError::Invalid(text.to_string()))
}

/// Fail-soft form of [`try_parse_numeric_input`]: failures become zero.
pub fn parse_numeric_input<'a>(value: impl Into<RawNumber<'a>>) -> Decimal {
    try_parse_numeric_input(value).unwrap_or_else(|err| {
        debug!(error = %err, "numeric input collapsed to zero");
        Decimal::ZERO
    })
}

/// Reads the longest numeric prefix of `text`: an optional sign, digits,
/// an optional fractional part and an optional exponent. Trailing garbage
/// is ignored, so `"1.2.3"` reads as 1.2, `"12kg"` as 12 and `"1e3"` as
/// 1000. Returns `None` when the text does not start with a number or the
/// value does not fit a `Decimal`.
fn leading_decimal(text: &str) -> Option<Decimal> {
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let (int_part, after_int) = rest.split_at(int_len);

    let (frac_part, after_frac) = match after_int.strip_prefix('.') {
        Some(frac) => frac.split_at(frac.bytes().take_while(u8::is_ascii_digit).count()),
        None => ("", after_int),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut canonical = String::with_capacity(int_part.len() + frac_part.len() + 3);
    if negative {
        canonical.push('-');
    }
    canonical.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        canonical.push('.');
        canonical.push_str(frac_part);
    }

    match exponent(after_frac) {
        Some(exp) => {
            canonical.push('e');
            canonical.push_str(exp);
            Decimal::from_scientific(&canonical).ok()
        }
        None => Decimal::from_str(&canonical).ok(),
    }
}

/// Digits of a leading `e`/`E` exponent, sign included. A bare `e` is not
/// an exponent.
fn exponent(text: &str) -> Option<&str> {
    let body = text.strip_prefix(['e', 'E'])?;
    let sign_len = usize::from(body.starts_with(['+', '-']));
    let digit_len = body[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    (digit_len > 0).then(|| &body[..sign_len + digit_len])
}
