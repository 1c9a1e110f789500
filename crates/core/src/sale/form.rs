//! Sale form state.
//!
//! Mirrors what the sale entry form holds: line items plus the adjustment
//! and rate fields. Field callbacks hand over raw text; the form stores the
//! parsed value and never rejects a keystroke.

use rust_decimal::Decimal;
use saledesk_shared::PricingConfig;
use serde::Serialize;
use tracing::warn;

use super::totals::{SaleTotals, calculate_sale_totals};
use crate::currency::{
    RateBand, format_usd, format_vnd, parse_ambiguous_number, parse_numeric_input,
};

/// One line item of a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    /// What was sold.
    pub description: String,
    /// Quantity sold.
    pub quantity: Decimal,
    /// Unit price in USD.
    pub unit_price: Decimal,
}

impl SaleLine {
    /// Creates a line item from already parsed values.
    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    /// Creates a line item from the raw quantity and price fields.
    pub fn from_raw(description: impl Into<String>, quantity: &str, unit_price: &str) -> Self {
        Self::new(
            description,
            parse_numeric_input(quantity),
            parse_numeric_input(unit_price),
        )
    }

    /// `quantity * unit_price`, USD.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.quantity.saturating_mul(self.unit_price)
    }
}

/// Scalar fields of the sale form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaleField {
    /// Discount, USD.
    Discount,
    /// Tax, USD.
    Tax,
    /// Shipping fee, USD.
    ShippingFee,
    /// VND per USD for the goods.
    ExchangeRate,
    /// VND per USD for the shipping fee.
    ShippingExchangeRate,
}

impl SaleField {
    /// Rate fields take VND-style input (`24.500,5` or `24,500.5`); the
    /// others are plain numeric fields where a comma is a decimal point.
    #[must_use]
    pub const fn is_rate(self) -> bool {
        matches!(self, Self::ExchangeRate | Self::ShippingExchangeRate)
    }
}

/// Which rate a warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RateField {
    /// The rate for the goods.
    Sale,
    /// The rate for the shipping fee.
    Shipping,
}

/// An exchange rate the user should double check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateWarning {
    /// Offending field.
    pub field: RateField,
    /// Rate as parsed.
    pub rate: Decimal,
    /// Band the rate fell outside of.
    pub band: RateBand,
}

/// Display strings for the totals panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleSummary {
    /// Total, `0.00` format.
    pub total: String,
    /// Total in VND, Vietnamese grouping.
    pub total_vnd: String,
    /// Shipping fee in VND.
    pub shipping_fee_vnd: String,
    /// Grand total, `0.00` format.
    pub grand_total: String,
    /// Grand total in VND.
    pub grand_total_vnd: String,
}

impl From<&SaleTotals> for SaleSummary {
    fn from(totals: &SaleTotals) -> Self {
        Self {
            total: format_usd(totals.total),
            total_vnd: format_vnd(totals.total_vnd),
            shipping_fee_vnd: format_vnd(totals.shipping_fee_vnd),
            grand_total: format_usd(totals.grand_total),
            grand_total_vnd: format_vnd(totals.grand_total_vnd),
        }
    }
}

/// State of one sale entry form.
#[derive(Debug, Clone)]
pub struct SaleForm {
    lines: Vec<SaleLine>,
    discount: Decimal,
    tax: Decimal,
    shipping_fee: Decimal,
    exchange_rate: Decimal,
    shipping_exchange_rate: Decimal,
    band: RateBand,
}

impl Default for SaleForm {
    fn default() -> Self {
        Self::from_config(&PricingConfig::default())
    }
}

impl SaleForm {
    /// Creates an empty form seeded with the configured rates.
    #[must_use]
    pub fn from_config(config: &PricingConfig) -> Self {
        Self {
            lines: Vec::new(),
            discount: Decimal::ZERO,
            tax: Decimal::ZERO,
            shipping_fee: Decimal::ZERO,
            exchange_rate: config.default_exchange_rate,
            shipping_exchange_rate: config.shipping_exchange_rate,
            band: RateBand::from(config),
        }
    }

    /// Appends a line item.
    pub fn add_line(&mut self, line: SaleLine) {
        self.lines.push(line);
    }

    /// Removes the line at `index`, if present.
    pub fn remove_line(&mut self, index: usize) -> Option<SaleLine> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    /// Line items in entry order.
    #[must_use]
    pub fn lines(&self) -> &[SaleLine] {
        &self.lines
    }

    /// Stores the raw text typed into `field`.
    ///
    /// Rate fields go through the locale-ambiguous parser, the others
    /// through the plain numeric parser. Unreadable text stores zero.
    pub fn apply(&mut self, field: SaleField, raw: &str) {
        let value = if field.is_rate() {
            parse_ambiguous_number(raw)
        } else {
            parse_numeric_input(raw)
        };
        self.set(field, value);
    }

    /// Stores an already parsed value for `field`.
    pub fn set(&mut self, field: SaleField, value: Decimal) {
        let slot = match field {
            SaleField::Discount => &mut self.discount,
            SaleField::Tax => &mut self.tax,
            SaleField::ShippingFee => &mut self.shipping_fee,
            SaleField::ExchangeRate => &mut self.exchange_rate,
            SaleField::ShippingExchangeRate => &mut self.shipping_exchange_rate,
        };
        *slot = value;
    }

    /// Current value of `field`.
    #[must_use]
    pub fn get(&self, field: SaleField) -> Decimal {
        match field {
            SaleField::Discount => self.discount,
            SaleField::Tax => self.tax,
            SaleField::ShippingFee => self.shipping_fee,
            SaleField::ExchangeRate => self.exchange_rate,
            SaleField::ShippingExchangeRate => self.shipping_exchange_rate,
        }
    }

    /// Sum of line amounts, USD.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |acc, line| acc.saturating_add(line.amount()))
    }

    /// Totals for the current state.
    #[must_use]
    pub fn totals(&self) -> SaleTotals {
        calculate_sale_totals(
            self.subtotal(),
            self.discount,
            self.tax,
            self.exchange_rate,
            self.shipping_fee,
            self.shipping_exchange_rate,
        )
    }

    /// Display strings for the current totals.
    #[must_use]
    pub fn summary(&self) -> SaleSummary {
        SaleSummary::from(&self.totals())
    }

    /// Rates outside the configured band.
    ///
    /// The form keeps out-of-band rates; it is up to the caller to warn.
    #[must_use]
    pub fn rate_warnings(&self) -> Vec<RateWarning> {
        [
            (RateField::Sale, self.exchange_rate),
            (RateField::Shipping, self.shipping_exchange_rate),
        ]
        .into_iter()
        .filter(|(_, rate)| !self.band.contains(*rate))
        .map(|(field, rate)| {
            warn!(
                ?field,
                %rate,
                min = %self.band.min,
                max = %self.band.max,
                "exchange rate outside band"
            );
            RateWarning {
                field,
                rate,
                band: self.band,
            }
        })
        .collect()
    }
}
