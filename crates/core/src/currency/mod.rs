//! Currency normalization: typed input, display formatting, conversion.

pub mod conversion;
pub mod error;
pub mod exchange;
pub mod format;
pub mod parse;

#[cfg(test)]
mod props;

pub use conversion::{ROUNDING, convert, convert_usd_to_vnd, convert_vnd_to_usd};
pub use error::{CurrencyError, NumberParseError};
pub use exchange::{ExchangeRate, RateBand, validate_exchange_rate};
pub use format::{format_input_while_typing, format_money, format_usd, format_vnd};
pub use parse::{
    NumberStyle, RawNumber, classify, parse_ambiguous_number, parse_numeric_input,
    try_parse_ambiguous_number, try_parse_numeric_input,
};
