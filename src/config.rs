use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::env;

use crate::currency::is_known_currency;
use crate::types::ZakatError;

/// Engine-level tunables shared by every calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZakatConfig {
    /// Currency used when a request does not name one.
    pub default_currency: String,

    /// Override for the silver Nisab weight in grams. `None` uses the
    /// classical 612.35 g.
    pub nisab_silver_grams: Option<Decimal>,
}

impl Default for ZakatConfig {
    fn default() -> Self {
        ZakatConfig {
            default_currency: "RUB".to_string(),
            nisab_silver_grams: None,
        }
    }
}

impl std::str::FromStr for ZakatConfig {
    type Err = ZakatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: ZakatConfig = serde_json::from_str(s)
            .map_err(|e| ZakatError::Configuration(format!("failed to parse config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

impl ZakatConfig {
    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = currency.into();
        self
    }

    pub fn with_nisab_silver_grams(mut self, grams: Decimal) -> Self {
        self.nisab_silver_grams = Some(grams);
        self
    }

    /// Silver weight defining the Nisab threshold.
    pub fn get_nisab_silver_grams(&self) -> Decimal {
        self.nisab_silver_grams.unwrap_or(dec!(612.35))
    }

    pub fn validate(&self) -> Result<(), ZakatError> {
        if !is_known_currency(&self.default_currency) {
            return Err(ZakatError::Configuration(format!(
                "default currency {:?} is not a known code",
                self.default_currency
            )));
        }
        if let Some(grams) = self.nisab_silver_grams {
            if grams <= Decimal::ZERO {
                return Err(ZakatError::Configuration(
                    "nisab silver weight must be positive".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Connection settings for the live price feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub api_key: String,
    pub timeout_seconds: u64,
    pub base_url: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            api_key: String::new(),
            timeout_seconds: 10,
            base_url: "https://api.metalpriceapi.com/v1".to_string(),
        }
    }
}

impl NetworkConfig {
    /// Reads the feed credentials from the environment.
    ///
    /// `ZAKAT_PRICE_API_KEY` is required; `ZAKAT_PRICE_API_URL` and
    /// `ZAKAT_PRICE_TIMEOUT_SECONDS` override the defaults.
    pub fn from_env() -> Result<Self, ZakatError> {
        let api_key = env::var("ZAKAT_PRICE_API_KEY")
            .map_err(|_| ZakatError::Configuration("ZAKAT_PRICE_API_KEY env var not set".to_string()))?;

        let mut config = NetworkConfig {
            api_key,
            ..Default::default()
        };

        if let Ok(url) = env::var("ZAKAT_PRICE_API_URL") {
            config.base_url = url;
        }
        if let Ok(timeout) = env::var("ZAKAT_PRICE_TIMEOUT_SECONDS") {
            config.timeout_seconds = timeout.parse::<u64>().map_err(|e| {
                ZakatError::Configuration(format!("invalid ZAKAT_PRICE_TIMEOUT_SECONDS: {e}"))
            })?;
        }

        Ok(config)
    }
}
