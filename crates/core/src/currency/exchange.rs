//! Exchange rate types and the sanity band.

use rust_decimal::Decimal;
use saledesk_shared::{Currency, PricingConfig};
use serde::{Deserialize, Serialize};

use super::error::CurrencyError;

/// Exchange rate between two currencies. The rate is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExchangeRate {
    from_currency: Currency,
    to_currency: Currency,
    rate: Decimal,
}

impl ExchangeRate {
    /// Creates a new exchange rate (1 `from_currency` = `rate` `to_currency`).
    ///
    /// # Errors
    ///
    /// Returns `NonPositiveRate` if `rate` is zero or negative.
    pub fn new(
        from_currency: Currency,
        to_currency: Currency,
        rate: Decimal,
    ) -> Result<Self, CurrencyError> {
        if rate <= Decimal::ZERO {
            return Err(CurrencyError::NonPositiveRate(rate));
        }
        Ok(Self {
            from_currency,
            to_currency,
            rate,
        })
    }

    /// VND per 1 USD.
    pub fn usd_to_vnd(rate: Decimal) -> Result<Self, CurrencyError> {
        Self::new(Currency::Usd, Currency::Vnd, rate)
    }

    /// Source currency.
    #[must_use]
    pub const fn from_currency(&self) -> Currency {
        self.from_currency
    }

    /// Target currency.
    #[must_use]
    pub const fn to_currency(&self) -> Currency {
        self.to_currency
    }

    /// Units of the target currency per unit of the source currency.
    #[must_use]
    pub const fn rate(&self) -> Decimal {
        self.rate
    }

    /// Returns the inverse rate.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            from_currency: self.to_currency,
            to_currency: self.from_currency,
            rate: Decimal::ONE / self.rate,
        }
    }

    /// VND per USD, whichever direction this rate is expressed in.
    fn vnd_per_usd(&self) -> Option<Decimal> {
        match (self.from_currency, self.to_currency) {
            (Currency::Usd, Currency::Vnd) => Some(self.rate),
            (Currency::Vnd, Currency::Usd) => Some(Decimal::ONE / self.rate),
            _ => None,
        }
    }

    /// Returns true if this is a USD/VND rate inside `band`.
    ///
    /// Rates between other pairs are never in band.
    #[must_use]
    pub fn is_within(&self, band: &RateBand) -> bool {
        self.vnd_per_usd().is_some_and(|rate| band.contains(rate))
    }
}

/// Inclusive range of plausible VND-per-USD rates.
///
/// Falling outside the band is a warning for the user, not a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBand {
    /// Lowest plausible rate.
    pub min: Decimal,
    /// Highest plausible rate.
    pub max: Decimal,
}

impl Default for RateBand {
    fn default() -> Self {
        Self {
            min: Decimal::from(20_000),
            max: Decimal::from(30_000),
        }
    }
}

impl From<&PricingConfig> for RateBand {
    fn from(config: &PricingConfig) -> Self {
        Self {
            min: config.min_exchange_rate,
            max: config.max_exchange_rate,
        }
    }
}

impl RateBand {
    /// Returns true iff `min <= rate <= max`.
    #[must_use]
    pub fn contains(&self, rate: Decimal) -> bool {
        self.min <= rate && rate <= self.max
    }

    /// Strict form of [`RateBand::contains`].
    ///
    /// # Errors
    ///
    /// Returns `RateOutOfRange` if the rate falls outside the band.
    pub fn check(&self, rate: Decimal) -> Result<(), CurrencyError> {
        if self.contains(rate) {
            Ok(())
        } else {
            Err(CurrencyError::RateOutOfRange {
                rate,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Returns true iff `20000 <= rate <= 30000`.
#[must_use]
pub fn validate_exchange_rate(rate: Decimal) -> bool {
    RateBand::default().contains(rate)
}
