//! Composition root tying the calculators to one injected price feed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ZakatConfig;
use crate::livestock::{self, LivestockRequest, LivestockZakat};
use crate::pricing::{PriceFeed, RateSession};
use crate::property::{self, PropertyRequest, PropertyZakat};
use crate::types::ZakatError;
use crate::ushr::{self, UshrRequest, UshrZakat};

/// Current Nisab threshold expressed in a currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NisabValue {
    pub nisab_value: Decimal,
    pub currency: String,
}

/// Entry point for all Zakat calculations.
///
/// Holds the price feed and configuration; every calculation is stateless
/// beyond them, so one engine serves any number of concurrent requests.
/// Each request gets its own [`RateSession`], which memoizes repeated
/// lookups but never carries prices across requests.
pub struct ZakatEngine<F> {
    feed: F,
    config: ZakatConfig,
}

impl<F: PriceFeed> ZakatEngine<F> {
    pub fn new(feed: F) -> Self {
        Self {
            feed,
            config: ZakatConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ZakatConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ZakatConfig {
        &self.config
    }

    /// Zakat on property, normalized into the request currency.
    pub async fn property(&self, request: &PropertyRequest) -> Result<PropertyZakat, ZakatError> {
        let mut session = RateSession::new(&self.feed);
        property::calculate(&mut session, &self.config, request).await
    }

    /// Zakat on livestock. Purely local, no price lookups.
    pub fn livestock(&self, request: &LivestockRequest) -> Result<LivestockZakat, ZakatError> {
        livestock::calculate(request)
    }

    /// Ushr on agricultural produce. Purely local, infallible.
    pub fn ushr(&self, request: &UshrRequest) -> UshrZakat {
        ushr::calculate(request)
    }

    /// Current Nisab threshold: the live silver price per gram times the
    /// configured silver weight, in `currency` (or the configured default).
    pub async fn nisab_value(&self, currency: Option<&str>) -> Result<NisabValue, ZakatError> {
        let currency = currency.unwrap_or(&self.config.default_currency);
        let mut session = RateSession::new(&self.feed);
        let threshold = property::nisab_threshold(&mut session, &self.config, currency).await?;
        Ok(NisabValue {
            nisab_value: threshold,
            currency: currency.to_string(),
        })
    }
}
