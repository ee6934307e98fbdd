//! Cache-fronted upstream client.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cache::CandleCache;
use crate::error::FetchError;
use crate::models::{Candle, CurrencyPair, Timeframe};
use crate::providers::Provider;

const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches candle series through a write-through TTL cache.
///
/// One instance lives for the process lifetime, holding the configured
/// provider adapter and the shared cache.
pub struct FxClient {
    http: reqwest::Client,
    provider: Box<dyn Provider>,
    cache: CandleCache,
}

impl FxClient {
    pub fn new(provider: Box<dyn Provider>, cache: CandleCache) -> Self {
        let http = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()
            .expect("failed to create HTTP client");

        Self {
            http,
            provider,
            cache,
        }
    }

    pub fn cache(&self) -> &CandleCache {
        &self.cache
    }

    fn cache_key(&self, pair: &CurrencyPair, timeframe: Timeframe) -> String {
        format!("{}:{}:{}", self.provider.name(), pair.code(), timeframe)
    }

    /// Returns the candle series for `(pair, timeframe)`, oldest first.
    ///
    /// A cache hit returns immediately with no network call and no
    /// freshness side effect. On a miss the provider is called once (no
    /// retries), the response is classified and normalized, and the result
    /// is stored before returning. Two concurrent misses for the same key
    /// may both reach upstream; the second write overwrites with equivalent
    /// data.
    pub async fn fetch_candles(
        &self,
        pair: &CurrencyPair,
        timeframe: Timeframe,
    ) -> Result<Vec<Candle>, FetchError> {
        let key = self.cache_key(pair, timeframe);
        if let Some(candles) = self.cache.get(&key) {
            debug!("cache hit for {}", key);
            return Ok(candles);
        }

        info!(
            "fetching {} {} candles from {}",
            pair.code(),
            timeframe,
            self.provider.name()
        );

        let url = self.provider.resolve_url(pair, timeframe);
        let response = self.http.get(&url).send().await.map_err(|e| {
            warn!("upstream request failed: {}", e);
            FetchError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("upstream returned status {}", status);
            return Err(FetchError::Transport(format!(
                "upstream returned status {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let mut candles = self.provider.parse(&body).map_err(|e| {
            warn!("upstream response rejected: {}", e);
            e
        })?;

        // Providers return newest-first; clients always receive oldest-first.
        candles.sort_by(|a, b| a.time.cmp(&b.time));

        self.cache.set(&key, candles.clone());
        Ok(candles)
    }
}
