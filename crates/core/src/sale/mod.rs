//! Sale totals and sale form state.

pub mod form;
pub mod totals;


pub use form::{RateField, RateWarning, SaleField, SaleForm, SaleLine, SaleSummary};
pub use totals::{SaleTotals, calculate_sale_totals};
