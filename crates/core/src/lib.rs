//! Core business logic for Saledesk.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Sale forms hand it raw field text and get back amounts and display strings.
//!
//! # Modules
//!
//! - `currency` - Parsing typed amounts, VND/USD formatting, conversion and exchange rates
//! - `sale` - Sale totals and sale form state
//! - `debounce` - Rate-limiting recalculation triggered by keystrokes

pub mod currency;
pub mod debounce;
pub mod sale;
