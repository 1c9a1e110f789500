//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a monetary amount with currency.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount in major units (dollars, dong).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: Currency,
}

/// Currencies handled at the sales desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar, the pricing currency.
    Usd,
    /// Vietnamese Dong, the settlement currency.
    Vnd,
}

impl Currency {
    /// Number of decimal places shown and stored for this currency.
    ///
    /// VND has a nominal minor unit (hao) that is not used in practice.
    #[must_use]
    pub const fn decimal_places(self) -> u32 {
        match self {
            Self::Usd => 2,
            Self::Vnd => 0,
        }
    }

    /// Returns the currency symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Vnd => "₫",
        }
    }
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a USD amount.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, Currency::Usd)
    }

    /// Creates a VND amount.
    #[must_use]
    pub const fn vnd(amount: Decimal) -> Self {
        Self::new(amount, Currency::Vnd)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usd => write!(f, "USD"),
            Self::Vnd => write!(f, "VND"),
        }
    }
}
