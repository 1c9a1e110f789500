//! Property-based tests for currency operations.
//!
//! - Conversion round trips within one cent
//! - Unambiguous text parses to its plain decimal value
//! - Live-typing output reparses to the typed value

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::conversion::{convert_usd_to_vnd, convert_vnd_to_usd};
use super::exchange::validate_exchange_rate;
use super::format::{format_input_while_typing, format_vnd};
use super::parse::parse_ambiguous_number;

/// Strategy to generate USD amounts (0.00 to 1,000,000.00).
fn usd_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate rates inside the sanity band, with up to 2 decimals.
fn banded_rate() -> impl Strategy<Value = Decimal> {
    (2_000_000i64..=3_000_000i64).prop_map(|v| Decimal::new(v, 2))
}

/// Inserts `,` every three digits from the right.
fn us_grouped(int_part: u64) -> String {
    let digits = int_part.to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// USD -> VND -> USD comes back within one cent.
    #[test]
    fn prop_round_trip_within_one_cent(usd in usd_amount(), rate in banded_rate()) {
        let vnd = convert_usd_to_vnd(usd, rate);
        let back = convert_vnd_to_usd(vnd, rate);
        prop_assert!(
            (back - usd).abs() <= Decimal::new(1, 2),
            "{} -> {} -> {}", usd, vnd, back
        );
    }

    /// USD -> VND always yields a whole number of dong.
    #[test]
    fn prop_vnd_is_whole(usd in usd_amount(), rate in banded_rate()) {
        let vnd = convert_usd_to_vnd(usd, rate);
        prop_assert!(vnd.fract().is_zero());
    }

    /// Plain decimal text with a dot point parses to its value.
    #[test]
    fn prop_plain_decimal_text(int_part in 0u64..1_000_000_000, cents in 0u32..100) {
        let text = format!("{int_part}.{cents:02}");
        let expected = Decimal::from(int_part) + Decimal::new(i64::from(cents), 2);
        prop_assert_eq!(parse_ambiguous_number(text.as_str()), expected);
    }

    /// Plain integer text parses to its value.
    #[test]
    fn prop_plain_integer_text(value in any::<i64>()) {
        let text = value.to_string();
        prop_assert_eq!(parse_ambiguous_number(text.as_str()), Decimal::from(value));
    }

    /// US grouping and European grouping of the same amount agree.
    #[test]
    fn prop_us_and_european_agree(int_part in 0u64..1_000_000_000, cents in 0u32..100) {
        let us = format!("{}.{cents:02}", us_grouped(int_part));
        let european = format!("{},{cents:02}", us_grouped(int_part).replace(',', "."));
        prop_assert_eq!(
            parse_ambiguous_number(us.as_str()),
            parse_ambiguous_number(european.as_str())
        );
    }

    /// Live-typing output reparses to the typed value when it keeps a
    /// fractional part.
    #[test]
    fn prop_typing_output_reparses(int_part in 0u64..1_000_000_000, cents in 1u32..100) {
        let typed = format!("{int_part}.{cents:02}");
        let shown = format_input_while_typing(&typed);
        prop_assert_eq!(
            parse_ambiguous_number(shown.as_str()),
            parse_ambiguous_number(typed.as_str())
        );
    }

    /// Whole VND amounts never show a decimal separator.
    #[test]
    fn prop_whole_vnd_has_no_decimal_separator(value in 0u64..1_000_000_000_000) {
        prop_assert!(!format_vnd(Decimal::from(value)).contains(','));
    }

    /// Rates inside the band validate, rates outside do not.
    #[test]
    fn prop_validate_exchange_rate_matches_band(v in 0i64..5_000_000) {
        let rate = Decimal::new(v, 2);
        let expected = rate >= Decimal::from(20_000) && rate <= Decimal::from(30_000);
        prop_assert_eq!(validate_exchange_rate(rate), expected);
    }
}
