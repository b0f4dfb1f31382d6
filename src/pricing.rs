//! Price-feed abstraction for Zakat calculations.
//!
//! The engine consumes exactly two capabilities from the outside world: a
//! spot metal price and a currency exchange rate. Both live behind the
//! [`PriceFeed`] trait so the calculators can be driven by a live API, a
//! database, or static test data.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::currency::OUNCE_TO_GRAM;
use crate::types::ZakatError;

/// Precious metals the engine prices, keyed by their commodity spot code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
pub enum Metal {
    #[strum(serialize = "XAG")]
    Silver,
    #[strum(serialize = "XAU")]
    Gold,
}

impl Metal {
    /// The spot code quoted by the upstream feed.
    pub fn code(self) -> &'static str {
        self.into()
    }
}

/// Live price lookups consumed by the calculators.
///
/// Implementors fetch from whatever source fits: the bundled
/// `MetalPriceApiFeed` (feature `live-pricing`), a database, or
/// [`StaticPriceFeed`] fixtures in tests.
#[async_trait::async_trait]
pub trait PriceFeed: Send + Sync {
    /// Spot price of one troy ounce of `metal`, quoted in `currency`.
    async fn metal_price(&self, metal: Metal, currency: &str) -> Result<Decimal, ZakatError>;

    /// Rate of `quote` expressed per unit of `base`, such that an amount in
    /// `quote` divided by the rate yields the amount in `base`.
    async fn exchange_rate(&self, base: &str, quote: &str) -> Result<Decimal, ZakatError>;
}

/// In-memory feed for tests, development, and offline use.
///
/// Pairs that were never registered answer with
/// [`ZakatError::UnsupportedPair`], the same failure a live feed reports
/// for symbols it does not quote.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceFeed {
    metals: HashMap<(Metal, String), Decimal>,
    rates: HashMap<(String, String), Decimal>,
}

impl StaticPriceFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the per-ounce price of `metal` in `currency`.
    pub fn with_metal(mut self, metal: Metal, currency: &str, per_ounce: Decimal) -> Self {
        self.metals.insert((metal, currency.to_string()), per_ounce);
        self
    }

    /// Registers the `base`/`quote` exchange rate.
    pub fn with_rate(mut self, base: &str, quote: &str, rate: Decimal) -> Self {
        self.rates.insert((base.to_string(), quote.to_string()), rate);
        self
    }
}

#[async_trait::async_trait]
impl PriceFeed for StaticPriceFeed {
    async fn metal_price(&self, metal: Metal, currency: &str) -> Result<Decimal, ZakatError> {
        self.metals
            .get(&(metal, currency.to_string()))
            .copied()
            .ok_or_else(|| ZakatError::unsupported_pair(metal.code(), currency))
    }

    async fn exchange_rate(&self, base: &str, quote: &str) -> Result<Decimal, ZakatError> {
        self.rates
            .get(&(base.to_string(), quote.to_string()))
            .copied()
            .ok_or_else(|| ZakatError::unsupported_pair(base, quote))
    }
}

/// Per-request view over a [`PriceFeed`] that memoizes every lookup.
///
/// A single property request can reference the same currency pair once per
/// line item; the session guarantees each distinct pair and each metal
/// price hits the upstream feed at most once. A session must not outlive
/// the request it serves: prices are only as fresh as the first fetch.
pub struct RateSession<'a, F: PriceFeed> {
    feed: &'a F,
    fx: HashMap<(String, String), Decimal>,
    metals: HashMap<(Metal, String), Decimal>,
}

impl<'a, F: PriceFeed> RateSession<'a, F> {
    pub fn new(feed: &'a F) -> Self {
        Self {
            feed,
            fx: HashMap::new(),
            metals: HashMap::new(),
        }
    }

    /// Converts `amount` from `from` into `to`.
    ///
    /// Same-currency conversion returns the amount untouched without any
    /// feed round-trip. Otherwise the feed is asked for the rate of `from`
    /// expressed in units of `to`, and the amount is divided by it.
    pub async fn convert(
        &mut self,
        to: &str,
        from: &str,
        amount: Decimal,
    ) -> Result<Decimal, ZakatError> {
        if to == from {
            return Ok(amount);
        }

        let key = (to.to_string(), from.to_string());
        let rate = match self.fx.get(&key) {
            Some(rate) => *rate,
            None => {
                let rate = self.feed.exchange_rate(to, from).await?;
                tracing::debug!(to, from, %rate, "fetched exchange rate");
                self.fx.insert(key, rate);
                rate
            }
        };

        if rate <= Decimal::ZERO {
            return Err(ZakatError::unsupported_pair(to, from));
        }
        amount
            .checked_div(rate)
            .ok_or_else(|| ZakatError::unsupported_pair(to, from))
    }

    /// Price of one gram of `metal` in `currency`, derived from the ounce
    /// spot price.
    pub async fn metal_price_per_gram(
        &mut self,
        metal: Metal,
        currency: &str,
    ) -> Result<Decimal, ZakatError> {
        let key = (metal, currency.to_string());
        if let Some(per_gram) = self.metals.get(&key) {
            return Ok(*per_gram);
        }

        let per_ounce = self.feed.metal_price(metal, currency).await?;
        let per_gram = per_ounce
            .checked_div(OUNCE_TO_GRAM)
            .ok_or_else(|| ZakatError::unsupported_pair(metal.code(), currency))?;
        tracing::debug!(code = metal.code(), currency, %per_gram, "fetched metal price");
        self.metals.insert(key, per_gram);
        Ok(per_gram)
    }
}

#[cfg(feature = "live-pricing")]
mod live {
    use super::{Metal, PriceFeed};
    use crate::config::NetworkConfig;
    use crate::types::ZakatError;
    use rust_decimal::Decimal;
    use std::collections::HashMap;

    #[derive(serde::Deserialize)]
    struct LatestRates {
        #[serde(default)]
        success: Option<bool>,
        #[serde(default)]
        rates: HashMap<String, Decimal>,
    }

    /// Feed backed by the metalpriceapi.com `latest` endpoint.
    ///
    /// One endpoint serves both capabilities: metal spot prices use the
    /// commodity code as the base symbol, currency rates use the target
    /// currency. Requests carry the client-level timeout from
    /// [`NetworkConfig`]; there is no retry, a failed fetch fails the
    /// calculation that needed it.
    pub struct MetalPriceApiFeed {
        client: reqwest::Client,
        api_key: String,
        base_url: String,
    }

    impl MetalPriceApiFeed {
        pub fn new(config: &NetworkConfig) -> Self {
            let client = reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(config.timeout_seconds))
                .build()
                .unwrap_or_default();

            Self {
                client,
                api_key: config.api_key.clone(),
                base_url: config.base_url.trim_end_matches('/').to_string(),
            }
        }

        async fn latest(&self, base: &str, symbol: &str) -> Result<Decimal, ZakatError> {
            let url = format!(
                "{}/latest?api_key={}&base={}&currencies={}",
                self.base_url, self.api_key, base, symbol
            );

            let response = self.client.get(&url).send().await.map_err(|e| {
                tracing::warn!(base, symbol, error = %e, "price feed request failed");
                ZakatError::FeedUnavailable(e.to_string())
            })?;

            let body: LatestRates = response
                .json()
                .await
                .map_err(|e| ZakatError::FeedUnavailable(format!("malformed feed response: {e}")))?;

            if body.success == Some(false) {
                tracing::warn!(base, symbol, "price feed rejected the symbol pair");
                return Err(ZakatError::unsupported_pair(base, symbol));
            }

            body.rates
                .get(symbol)
                .copied()
                .ok_or_else(|| ZakatError::unsupported_pair(base, symbol))
        }
    }

    #[async_trait::async_trait]
    impl PriceFeed for MetalPriceApiFeed {
        async fn metal_price(&self, metal: Metal, currency: &str) -> Result<Decimal, ZakatError> {
            self.latest(metal.code(), currency).await
        }

        async fn exchange_rate(&self, base: &str, quote: &str) -> Result<Decimal, ZakatError> {
            self.latest(base, quote).await
        }
    }
}

#[cfg(feature = "live-pricing")]
pub use live::MetalPriceApiFeed;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Feed that fails every lookup; proves code paths that must not touch
    /// the network.
    struct UnreachableFeed;

    #[async_trait::async_trait]
    impl PriceFeed for UnreachableFeed {
        async fn metal_price(&self, metal: Metal, currency: &str) -> Result<Decimal, ZakatError> {
            Err(ZakatError::unsupported_pair(metal.code(), currency))
        }

        async fn exchange_rate(&self, base: &str, quote: &str) -> Result<Decimal, ZakatError> {
            Err(ZakatError::unsupported_pair(base, quote))
        }
    }

    struct CountingFeed {
        inner: StaticPriceFeed,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl PriceFeed for CountingFeed {
        async fn metal_price(&self, metal: Metal, currency: &str) -> Result<Decimal, ZakatError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.metal_price(metal, currency).await
        }

        async fn exchange_rate(&self, base: &str, quote: &str) -> Result<Decimal, ZakatError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.exchange_rate(base, quote).await
        }
    }

    #[tokio::test]
    async fn identity_conversion_never_calls_the_feed() {
        let mut session = RateSession::new(&UnreachableFeed);
        let result = session.convert("USD", "USD", dec!(123.45)).await.unwrap();
        assert_eq!(result, dec!(123.45));
    }

    #[tokio::test]
    async fn conversion_divides_by_the_quoted_rate() {
        // Rate of EUR per USD is 0.8, so 100 EUR = 125 USD.
        let feed = StaticPriceFeed::new().with_rate("USD", "EUR", dec!(0.8));
        let mut session = RateSession::new(&feed);
        let result = session.convert("USD", "EUR", dec!(100)).await.unwrap();
        assert_eq!(result, dec!(125));
    }

    #[tokio::test]
    async fn unknown_pair_is_a_distinct_error() {
        let feed = StaticPriceFeed::new();
        let mut session = RateSession::new(&feed);
        let err = session.convert("USD", "EUR", dec!(100)).await.unwrap_err();
        assert_eq!(err, ZakatError::unsupported_pair("USD", "EUR"));
    }

    #[tokio::test]
    async fn zero_rate_cannot_be_divided_by() {
        let feed = StaticPriceFeed::new().with_rate("USD", "EUR", Decimal::ZERO);
        let mut session = RateSession::new(&feed);
        let err = session.convert("USD", "EUR", dec!(100)).await.unwrap_err();
        assert_eq!(err, ZakatError::unsupported_pair("USD", "EUR"));
    }

    #[tokio::test]
    async fn repeated_lookups_hit_the_feed_once() {
        let feed = CountingFeed {
            inner: StaticPriceFeed::new()
                .with_rate("USD", "EUR", dec!(0.8))
                .with_metal(Metal::Silver, "USD", dec!(62.2069536)),
            calls: AtomicUsize::new(0),
        };
        let mut session = RateSession::new(&feed);

        for _ in 0..5 {
            session.convert("USD", "EUR", dec!(10)).await.unwrap();
            session.metal_price_per_gram(Metal::Silver, "USD").await.unwrap();
        }

        assert_eq!(feed.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn per_gram_price_divides_the_ounce_quote() {
        // 62.2069536 per ounce is exactly 2 per gram.
        let feed = StaticPriceFeed::new().with_metal(Metal::Silver, "USD", dec!(62.2069536));
        let mut session = RateSession::new(&feed);
        let per_gram = session.metal_price_per_gram(Metal::Silver, "USD").await.unwrap();
        assert_eq!(per_gram, dec!(2));
    }

    #[test]
    fn metal_codes() {
        assert_eq!(Metal::Silver.code(), "XAG");
        assert_eq!(Metal::Gold.code(), "XAU");
        assert_eq!(Metal::Gold.to_string(), "XAU");
    }
}
