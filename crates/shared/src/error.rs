//! Application-wide error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::Currency;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Parsing of typed form input never produces one of these: that path is
/// fail-soft and collapses to zero. These errors cover configuration and
/// the stricter domain checks callers opt into.
#[derive(Debug, Error)]
pub enum AppError {
    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Amounts in different currencies were combined.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch {
        /// Expected currency.
        expected: Currency,
        /// Actual currency.
        got: Currency,
    },

    /// Exchange rate outside the accepted band.
    #[error("Exchange rate {rate} is outside the accepted range {min}..={max}")]
    ExchangeRateOutOfRange {
        /// Offending rate.
        rate: Decimal,
        /// Lower bound.
        min: Decimal,
        /// Upper bound.
        max: Decimal,
    },

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Returns the error code used when surfacing the error to the frontend.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::ExchangeRateOutOfRange { .. } => "EXCHANGE_RATE_OUT_OF_RANGE",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
