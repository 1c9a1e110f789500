//! Display formatting for VND and USD amounts.

use rust_decimal::Decimal;
use saledesk_shared::{Currency, Money};

use super::conversion::ROUNDING;
use super::parse::parse_ambiguous_number;

/// Most fraction digits the Vietnamese number format shows.
const VND_MAX_FRACTION_DIGITS: u32 = 3;

/// Formats an amount the way the Vietnamese locale does: `.` groups
/// thousands, `,` is the decimal separator, up to three fraction digits
/// with trailing zeros dropped. Whole values show no decimal part.
///
/// ```
/// use rust_decimal_macros::dec;
/// use saledesk_core::currency::format_vnd;
///
/// assert_eq!(format_vnd(dec!(2817500)), "2.817.500");
/// assert_eq!(format_vnd(dec!(1234.5)), "1.234,5");
/// ```
#[must_use]
pub fn format_vnd(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(VND_MAX_FRACTION_DIGITS, ROUNDING)
        .normalize();

    let digits = rounded.abs().to_string();
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part, '.'));
    if let Some(frac_part) = frac_part {
        out.push(',');
        out.push_str(frac_part);
    }
    out
}

/// Formats an amount with exactly two decimals and no grouping.
///
/// ```
/// use rust_decimal_macros::dec;
/// use saledesk_core::currency::format_usd;
///
/// assert_eq!(format_usd(dec!(95)), "95.00");
/// assert_eq!(format_usd(dec!(1234.5)), "1234.50");
/// ```
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, ROUNDING);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.rescale(2);
    // Values near `Decimal::MAX` cannot hold two fraction digits.
    match rounded.scale() {
        0 => format!("{rounded}.00"),
        1 => format!("{rounded}0"),
        _ => rounded.to_string(),
    }
}

/// Formats a [`Money`] value with its currency symbol.
///
/// USD renders as `$95.00`, VND as `2.327.500 ₫`.
#[must_use]
pub fn format_money(money: &Money) -> String {
    match money.currency {
        Currency::Usd => {
            let formatted = format_usd(money.amount);
            match formatted.strip_prefix('-') {
                Some(unsigned) => format!("-{}{unsigned}", Currency::Usd.symbol()),
                None => format!("{}{formatted}", Currency::Usd.symbol()),
            }
        }
        Currency::Vnd => format!("{} {}", format_vnd(money.amount), Currency::Vnd.symbol()),
    }
}

/// Reformats a VND field while the user is typing.
///
/// Everything except digits, `.` and `,` is dropped, the rest is parsed with
/// [`parse_ambiguous_number`] and re-rendered with [`format_vnd`]. Zero or
/// unreadable input clears the field.
#[must_use]
pub fn format_input_while_typing(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();

    let value = parse_ambiguous_number(kept.as_str());
    if value > Decimal::ZERO {
        format_vnd(value)
    } else {
        String::new()
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
