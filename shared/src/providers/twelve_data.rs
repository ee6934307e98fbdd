//! Twelve Data FX adapter.
//!
//! One `/time_series` endpoint serves every interval; the symbol is the
//! slash-separated pair (`EUR/USD`). Errors arrive in-band as
//! `{"status": "error", "code": …, "message": …}`, with code 429 marking the
//! credit limit. Successful responses carry the bars newest-first in a
//! `values` array of string-typed fields.

use serde::Deserialize;

use super::Provider;
use crate::error::FetchError;
use crate::models::{Candle, CurrencyPair, Timeframe};

const DEFAULT_BASE_URL: &str = "https://api.twelvedata.com";
const OUTPUT_SIZE: u32 = 100;

#[derive(Debug, Clone)]
pub struct TwelveData {
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    status: Option<String>,
    code: Option<i64>,
    message: Option<String>,
    values: Option<Vec<TimeSeriesValue>>,
}

#[derive(Debug, Deserialize)]
struct TimeSeriesValue {
    datetime: String,
    open: String,
    high: String,
    low: String,
    close: String,
}

impl TwelveData {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the adapter at a different endpoint, e.g. a test stub.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn interval(timeframe: Timeframe) -> &'static str {
        match timeframe {
            Timeframe::Daily => "1day",
            Timeframe::H1 => "1h",
            Timeframe::M15 => "15min",
        }
    }
}

impl Provider for TwelveData {
    fn name(&self) -> &'static str {
        "twelve_data"
    }

    fn resolve_url(&self, pair: &CurrencyPair, timeframe: Timeframe) -> String {
        format!(
            "{}/time_series?symbol={}/{}&interval={}&outputsize={}&apikey={}",
            self.base_url,
            pair.base(),
            pair.quote(),
            Self::interval(timeframe),
            OUTPUT_SIZE,
            self.api_key
        )
    }

    fn parse(&self, body: &str) -> Result<Vec<Candle>, FetchError> {
        let response: TimeSeriesResponse = serde_json::from_str(body)?;

        if response.status.as_deref() == Some("error") {
            let message = response
                .message
                .unwrap_or_else(|| "unknown error".to_string());
            return if response.code == Some(429) {
                Err(FetchError::RateLimit(message))
            } else {
                Err(FetchError::Provider(message))
            };
        }

        let values = response.values.ok_or_else(|| {
            FetchError::NoData("response contains no time-series data".to_string())
        })?;

        let mut candles = Vec::with_capacity(values.len());
        for value in values {
            candles.push(Candle {
                time: value.datetime,
                open: parse_price(&value.open, "open")?,
                high: parse_price(&value.high, "high")?,
                low: parse_price(&value.low, "low")?,
                close: parse_price(&value.close, "close")?,
            });
        }
        Ok(candles)
    }
}

fn parse_price(raw: &str, field: &str) -> Result<f64, FetchError> {
    raw.parse::<f64>()
        .map_err(|e| FetchError::Parse(format!("field {field:?}: {e}")))
}
