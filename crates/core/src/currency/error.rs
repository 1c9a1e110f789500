//! Currency error types.

use rust_decimal::Decimal;
use saledesk_shared::{AppError, Currency};
use thiserror::Error;

/// Why typed text could not be read as a number.
///
/// Only the `try_*` parsers expose this; the default parsers map it to zero.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberParseError {
    /// Nothing was typed.
    #[error("Input is empty")]
    Empty,

    /// The text does not start with a number.
    #[error("Not a number: {0:?}")]
    Invalid(String),
}

/// Currency-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// Exchange rate outside the sanity band.
    #[error("Exchange rate {rate} is outside {min}..={max}")]
    RateOutOfRange {
        /// Offending rate.
        rate: Decimal,
        /// Lower bound.
        min: Decimal,
        /// Upper bound.
        max: Decimal,
    },

    /// Exchange rate is zero or negative.
    #[error("Exchange rate must be positive, got {0}")]
    NonPositiveRate(Decimal),

    /// The amount is not in the rate's source currency.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch {
        /// Rate's source currency.
        expected: Currency,
        /// Amount's currency.
        got: Currency,
    },
}

impl From<CurrencyError> for AppError {
    fn from(err: CurrencyError) -> Self {
        match err {
            CurrencyError::RateOutOfRange { rate, min, max } => {
                AppError::ExchangeRateOutOfRange { rate, min, max }
            }
            CurrencyError::CurrencyMismatch { expected, got } => {
                AppError::CurrencyMismatch { expected, got }
            }
            e @ CurrencyError::NonPositiveRate(_) => AppError::Validation(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_error_display() {
        assert_eq!(NumberParseError::Empty.to_string(), "Input is empty");
        assert_eq!(
            NumberParseError::Invalid("abc".into()).to_string(),
            "Not a number: \"abc\""
        );
    }

    #[test]
    fn test_currency_error_into_app_error() {
        let err: AppError = CurrencyError::RateOutOfRange {
            rate: dec!(35000),
            min: dec!(20000),
            max: dec!(30000),
        }
        .into();
        assert_eq!(err.error_code(), "EXCHANGE_RATE_OUT_OF_RANGE");

        let err: AppError = CurrencyError::NonPositiveRate(dec!(0)).into();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");

        let err: AppError = CurrencyError::CurrencyMismatch {
            expected: Currency::Usd,
            got: Currency::Vnd,
        }
        .into();
        assert_eq!(err.error_code(), "CURRENCY_MISMATCH");
    }
}
