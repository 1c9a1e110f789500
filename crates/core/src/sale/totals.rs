//! Sale total arithmetic.
//!
//! CRITICAL: `grand_total_vnd` is the sum of the separately rounded VND
//! parts, not a fresh conversion of `grand_total`. With different sale and
//! shipping rates the two can differ by one dong; invoices already printed
//! carry the summed figure.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::currency::convert_usd_to_vnd;

/// Totals shown at the bottom of a sale form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleTotals {
    /// `subtotal - discount + tax`, USD, unrounded.
    pub total: Decimal,
    /// `total` converted at the sale rate.
    pub total_vnd: Decimal,
    /// Shipping fee converted at the shipping rate.
    pub shipping_fee_vnd: Decimal,
    /// `total + shipping_fee`, USD.
    pub grand_total: Decimal,
    /// `total_vnd + shipping_fee_vnd`.
    pub grand_total_vnd: Decimal,
}

/// Computes sale totals.
///
/// Discount and tax are taken as given; a negative discount acts as a
/// surcharge. Sums saturate at the `Decimal` range instead of panicking.
///
/// ```
/// use rust_decimal_macros::dec;
/// use saledesk_core::sale::calculate_sale_totals;
///
/// let totals = calculate_sale_totals(
///     dec!(100), dec!(10), dec!(5), dec!(24500), dec!(20), dec!(24500),
/// );
/// assert_eq!(totals.total, dec!(95));
/// assert_eq!(totals.grand_total_vnd, dec!(2817500));
/// ```
#[must_use]
pub fn calculate_sale_totals(
    subtotal: Decimal,
    discount: Decimal,
    tax: Decimal,
    exchange_rate: Decimal,
    shipping_fee: Decimal,
    shipping_exchange_rate: Decimal,
) -> SaleTotals {
    let total = subtotal.saturating_sub(discount).saturating_add(tax);
    let total_vnd = convert_usd_to_vnd(total, exchange_rate);
    let shipping_fee_vnd = convert_usd_to_vnd(shipping_fee, shipping_exchange_rate);

    SaleTotals {
        total,
        total_vnd,
        shipping_fee_vnd,
        grand_total: total.saturating_add(shipping_fee),
        grand_total_vnd: total_vnd.saturating_add(shipping_fee_vnd),
    }
}
