//! Upstream provider adapters.
//!
//! Each adapter owns two provider-specific concerns: building the request
//! URL for a (pair, timeframe) and translating the raw response body into
//! normalized candles or a classified [`FetchError`]. Everything else in the
//! pipeline (cache, client, handlers) is provider-agnostic.

mod alpha_vantage;
mod twelve_data;

pub use alpha_vantage::AlphaVantage;
pub use twelve_data::TwelveData;

use crate::error::FetchError;
use crate::models::{Candle, CurrencyPair, Timeframe};

/// Market-data provider contract.
///
/// Implementations are object-safe so the client can hold a
/// `Box<dyn Provider>` chosen at startup.
pub trait Provider: Send + Sync {
    /// Short identifier used in cache keys and logs, e.g. `"alpha_vantage"`.
    fn name(&self) -> &'static str;

    /// Fully-resolved upstream request URL. May embed the API key, so it is
    /// never logged.
    fn resolve_url(&self, pair: &CurrencyPair, timeframe: Timeframe) -> String;

    /// Translate a raw response body into candles, in whatever order the
    /// provider returned them, or a classified error.
    fn parse(&self, body: &str) -> Result<Vec<Candle>, FetchError>;
}
