//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Exchange rate defaults and sanity band.
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Form input behaviour.
    #[serde(default)]
    pub input: InputConfig,
}

/// Pricing configuration.
///
/// All rates are VND per 1 USD.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// Rate prefilled into new sale forms.
    #[serde(default = "default_exchange_rate")]
    pub default_exchange_rate: Decimal,
    /// Rate prefilled for the shipping fee, which carriers quote separately.
    #[serde(default = "default_exchange_rate")]
    pub shipping_exchange_rate: Decimal,
    /// Lowest rate considered plausible.
    #[serde(default = "default_min_exchange_rate")]
    pub min_exchange_rate: Decimal,
    /// Highest rate considered plausible.
    #[serde(default = "default_max_exchange_rate")]
    pub max_exchange_rate: Decimal,
}

fn default_exchange_rate() -> Decimal {
    Decimal::from(24_500)
}

fn default_min_exchange_rate() -> Decimal {
    Decimal::from(20_000)
}

fn default_max_exchange_rate() -> Decimal {
    Decimal::from(30_000)
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            default_exchange_rate: default_exchange_rate(),
            shipping_exchange_rate: default_exchange_rate(),
            min_exchange_rate: default_min_exchange_rate(),
            max_exchange_rate: default_max_exchange_rate(),
        }
    }
}

impl PricingConfig {
    /// Checks that the sanity band is well formed.
    ///
    /// Default rates outside the band are allowed here; the sale form
    /// reports them as warnings.
    pub fn validate(&self) -> AppResult<()> {
        if self.min_exchange_rate <= Decimal::ZERO {
            return Err(AppError::Validation(
                "min_exchange_rate must be positive".into(),
            ));
        }
        if self.min_exchange_rate > self.max_exchange_rate {
            return Err(AppError::Validation(format!(
                "min_exchange_rate ({}) exceeds max_exchange_rate ({})",
                self.min_exchange_rate, self.max_exchange_rate
            )));
        }
        Ok(())
    }
}

/// Form input configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Delay before recalculating totals after a keystroke.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    300
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from `.env`, config files and the environment.
    ///
    /// Sources, later ones overriding earlier ones:
    /// `config/default`, `config/{RUN_MODE}`, then `SALEDESK__*` variables
    /// (e.g. `SALEDESK__PRICING__DEFAULT_EXCHANGE_RATE=25000`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or the rate band
    /// is malformed.
    pub fn load() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("SALEDESK")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.pricing.validate()?;
        Ok(app_config)
    }
}
