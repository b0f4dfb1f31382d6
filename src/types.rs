use thiserror::Error;

/// Failure taxonomy for the calculation engine.
///
/// Unknown currency codes on individual line items are not an error: they
/// are normalized to the request's base currency before any
/// lookup happens (see [`crate::currency::resolve_currency_code`]). The
/// variants below are the failures that actually reach a caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZakatError {
    /// Malformed request fields (e.g. negative monetary values). Raised
    /// before any external call is made.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A property request whose categories sum to zero Zakat. Signals a
    /// useless request rather than a numeric edge case.
    #[error("no assets were added")]
    EmptyAssets,

    /// The price feed does not quote this pair, or returned a rate that
    /// cannot be divided by.
    #[error("currency pair {base}/{quote} not supported by the price feed")]
    UnsupportedPair { base: String, quote: String },

    /// Transport or decode failure talking to the external price feed.
    /// Not retried here; the caller decides whether to try again.
    #[error("price feed unavailable: {0}")]
    FeedUnavailable(String),

    /// Engine configuration that cannot be used (bad override values,
    /// missing environment variables).
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ZakatError {
    pub fn unsupported_pair(base: impl Into<String>, quote: impl Into<String>) -> Self {
        ZakatError::UnsupportedPair {
            base: base.into(),
            quote: quote.into(),
        }
    }
}
