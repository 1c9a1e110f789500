//! Currency conversion logic.
//!
//! CRITICAL: Rounding strategy for USD/VND:
//! - Always round to the target currency's decimal places (VND 0, USD 2)
//! - Use banker's rounding (round half to even) everywhere, display included
//! - Sums of converted amounts add already-rounded parts

use rust_decimal::{Decimal, RoundingStrategy};
use saledesk_shared::Money;
use tracing::debug;

use super::error::CurrencyError;
use super::exchange::ExchangeRate;

/// Rounding applied by every conversion and display helper in the crate.
pub const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointNearestEven;

/// Converts an amount using the given exchange rate.
///
/// Uses banker's rounding (round half to even) to minimize cumulative errors.
/// Returns `None` if the product does not fit a `Decimal`.
#[must_use]
pub fn convert_amount(amount: Decimal, rate: Decimal, decimal_places: u32) -> Option<Decimal> {
    amount
        .checked_mul(rate)
        .map(|converted| converted.round_dp_with_strategy(decimal_places, ROUNDING))
}

/// Converts USD to a whole VND amount: `round(usd * rate)`.
///
/// Fail-soft: an overflowing product yields zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use saledesk_core::currency::convert_usd_to_vnd;
///
/// assert_eq!(convert_usd_to_vnd(dec!(10), dec!(24500)), dec!(245000));
/// ```
#[must_use]
pub fn convert_usd_to_vnd(usd: Decimal, rate: Decimal) -> Decimal {
    convert_amount(usd, rate, 0).unwrap_or_else(|| {
        debug!(%usd, %rate, "USD to VND conversion overflowed");
        Decimal::ZERO
    })
}

/// Converts VND to USD: `vnd / rate`, rounded to cents.
///
/// Fail-soft: a zero rate or an overflowing quotient yields zero.
#[must_use]
pub fn convert_vnd_to_usd(vnd: Decimal, rate: Decimal) -> Decimal {
    vnd.checked_div(rate)
        .map(|usd| usd.round_dp_with_strategy(2, ROUNDING))
        .unwrap_or_else(|| {
            debug!(%vnd, %rate, "VND to USD conversion has no result");
            Decimal::ZERO
        })
}

/// Converts `money` along `rate`, rounding to the target currency.
///
/// # Errors
///
/// Returns `CurrencyMismatch` if `money` is not in the rate's source
/// currency.
pub fn convert(money: Money, rate: &ExchangeRate) -> Result<Money, CurrencyError> {
    if money.currency != rate.from_currency() {
        return Err(CurrencyError::CurrencyMismatch {
            expected: rate.from_currency(),
            got: money.currency,
        });
    }

    let target = rate.to_currency();
    let amount = convert_amount(money.amount, rate.rate(), target.decimal_places())
        .unwrap_or(Decimal::ZERO);
    Ok(Money::new(amount, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use saledesk_shared::Currency;

    #[test]
    fn test_convert_usd_to_vnd() {
        assert_eq!(convert_usd_to_vnd(dec!(10), dec!(24500)), dec!(245000));
        assert_eq!(convert_usd_to_vnd(dec!(0.99), dec!(24500)), dec!(24255));
    }

    #[test]
    fn test_convert_usd_to_vnd_is_whole() {
        // 12.34 * 24567.5 = 303,162.95 -> 303,163
        let result = convert_usd_to_vnd(dec!(12.34), dec!(24567.5));
        assert_eq!(result, dec!(303163));
        assert_eq!(result.scale(), 0);
    }

    #[test]
    fn test_bankers_rounding() {
        // Test banker's rounding (round half to even)
        // 2.5 rounds to 2, 3.5 rounds to 4
        assert_eq!(convert_usd_to_vnd(dec!(1), dec!(2.5)), dec!(2));
        assert_eq!(convert_usd_to_vnd(dec!(1), dec!(3.5)), dec!(4));
        assert_eq!(convert_usd_to_vnd(dec!(-1), dec!(2.5)), dec!(-2));
    }

    #[test]
    fn test_convert_vnd_to_usd() {
        assert_eq!(convert_vnd_to_usd(dec!(245000), dec!(24500)), dec!(10.00));
        // 100,000 / 24,500 = 4.0816... -> 4.08
        assert_eq!(convert_vnd_to_usd(dec!(100000), dec!(24500)), dec!(4.08));
    }

    #[test]
    fn test_convert_vnd_to_usd_zero_rate() {
        assert_eq!(convert_vnd_to_usd(dec!(245000), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_convert_usd_to_vnd_overflow() {
        assert_eq!(convert_usd_to_vnd(Decimal::MAX, dec!(24500)), Decimal::ZERO);
    }

    #[test]
    fn test_convert_money() {
        let rate = ExchangeRate::usd_to_vnd(dec!(24500)).unwrap();

        let vnd = convert(Money::usd(dec!(10)), &rate).unwrap();
        assert_eq!(vnd, Money::vnd(dec!(245000)));

        let usd = convert(vnd, &rate.inverse()).unwrap();
        assert_eq!(usd.currency, Currency::Usd);
        assert_eq!(usd.amount, dec!(10.00));
    }

    #[test]
    fn test_convert_money_currency_mismatch() {
        let rate = ExchangeRate::usd_to_vnd(dec!(24500)).unwrap();
        let result = convert(Money::vnd(dec!(1000)), &rate);
        assert_eq!(
            result,
            Err(CurrencyError::CurrencyMismatch {
                expected: Currency::Usd,
                got: Currency::Vnd,
            })
        );
    }
}
