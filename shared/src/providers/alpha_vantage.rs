//! Alpha Vantage FX adapter.
//!
//! Daily bars come from the `FX_DAILY` function, intraday bars from
//! `FX_INTRADAY` with an `interval` parameter. Responses key each record by
//! timestamp under a `"Time Series FX (…)"` container, with prices as
//! decimal strings in `"1. open"`-style fields. A top-level `"Note"` (or
//! `"Information"`) field signals the free-tier rate limit; `"Error Message"`
//! signals any other provider-side failure.

use serde_json::Value;

use super::Provider;
use crate::error::FetchError;
use crate::models::{Candle, CurrencyPair, Timeframe};

const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

#[derive(Debug, Clone)]
pub struct AlphaVantage {
    api_key: String,
    base_url: String,
}

impl AlphaVantage {
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
}

impl Provider for AlphaVantage {
    fn name(&self) -> &'static str {
        "alpha_vantage"
    }

    fn resolve_url(&self, pair: &CurrencyPair, timeframe: Timeframe) -> String {
        match timeframe {
            Timeframe::Daily => format!(
                "{}?function=FX_DAILY&from_symbol={}&to_symbol={}&apikey={}",
                self.base_url,
                pair.base(),
                pair.quote(),
                self.api_key
            ),
            Timeframe::H1 => format!(
                "{}?function=FX_INTRADAY&from_symbol={}&to_symbol={}&interval=60min&apikey={}",
                self.base_url,
                pair.base(),
                pair.quote(),
                self.api_key
            ),
            Timeframe::M15 => format!(
                "{}?function=FX_INTRADAY&from_symbol={}&to_symbol={}&interval=15min&apikey={}",
                self.base_url,
                pair.base(),
                pair.quote(),
                self.api_key
            ),
        }
    }

    fn parse(&self, body: &str) -> Result<Vec<Candle>, FetchError> {
        let payload: Value = serde_json::from_str(body)?;

        if let Some(note) = payload.get("Note").or_else(|| payload.get("Information")) {
            let message = note
                .as_str()
                .unwrap_or("API call frequency exceeded")
                .to_string();
            return Err(FetchError::RateLimit(message));
        }

        if let Some(message) = payload.get("Error Message") {
            let message = message.as_str().unwrap_or("unknown error").to_string();
            return Err(FetchError::Provider(message));
        }

        // The container name varies with the interval ("Time Series FX
        // (Daily)", "… (60min)", "… (15min)"), so match on the prefix.
        let series = payload
            .as_object()
            .and_then(|obj| obj.iter().find(|(key, _)| key.starts_with("Time Series FX")))
            .map(|(_, value)| value)
            .ok_or_else(|| {
                FetchError::NoData("response contains no time-series data".to_string())
            })?;

        let records = series
            .as_object()
            .ok_or_else(|| FetchError::Parse("time series is not an object".to_string()))?;

        let mut candles = Vec::with_capacity(records.len());
        for (stamp, fields) in records {
            candles.push(Candle {
                time: stamp.clone(),
                open: price_field(fields, "1. open")?,
                high: price_field(fields, "2. high")?,
                low: price_field(fields, "3. low")?,
                close: price_field(fields, "4. close")?,
            });
        }
        Ok(candles)
    }
}

fn price_field(record: &Value, key: &str) -> Result<f64, FetchError> {
    record
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| FetchError::Parse(format!("missing field {key:?}")))?
        .parse::<f64>()
        .map_err(|e| FetchError::Parse(format!("field {key:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> AlphaVantage {
        AlphaVantage::new("test-key")
    }

    fn pair() -> CurrencyPair {
        "EURUSD".parse().unwrap()
    }

    #[test]
    fn daily_url_uses_fx_daily_function() {
        let url = adapter().resolve_url(&pair(), Timeframe::Daily);
        assert!(url.contains("function=FX_DAILY"));
        assert!(url.contains("from_symbol=EUR"));
        assert!(url.contains("to_symbol=USD"));
        assert!(url.contains("apikey=test-key"));
        assert!(!url.contains("interval"));
    }

    #[test]
    fn intraday_urls_map_interval_aliases() {
        let h1 = adapter().resolve_url(&pair(), Timeframe::H1);
        assert!(h1.contains("function=FX_INTRADAY"));
        assert!(h1.contains("interval=60min"));

        let m15 = adapter().resolve_url(&pair(), Timeframe::M15);
        assert!(m15.contains("interval=15min"));
    }

    #[test]
    fn parses_daily_series() {
        let body = r#"{
            "Meta Data": { "1. Information": "Forex Daily Prices" },
            "Time Series FX (Daily)": {
                "2024-01-03": { "1. open": "1.0950", "2. high": "1.0981", "3. low": "1.0932", "4. close": "1.0967" },
                "2024-01-02": { "1. open": "1.1040", "2. high": "1.1046", "3. low": "1.0940", "4. close": "1.0944" }
            }
        }"#;

        let candles = adapter().parse(body).unwrap();
        assert_eq!(candles.len(), 2);
        let jan_2 = candles.iter().find(|c| c.time == "2024-01-02").unwrap();
        assert_eq!(jan_2.open, 1.1040);
        assert_eq!(jan_2.high, 1.1046);
        assert_eq!(jan_2.low, 1.0940);
        assert_eq!(jan_2.close, 1.0944);
    }

    #[test]
    fn parses_intraday_series() {
        let body = r#"{
            "Time Series FX (60min)": {
                "2024-01-02 16:00:00": { "1. open": "1.0950", "2. high": "1.0955", "3. low": "1.0949", "4. close": "1.0952" }
            }
        }"#;

        let candles = adapter().parse(body).unwrap();
        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].time, "2024-01-02 16:00:00");
    }

    #[test]
    fn note_field_classifies_as_rate_limit() {
        let body = r#"{ "Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 25 requests per day." }"#;
        match adapter().parse(body) {
            Err(FetchError::RateLimit(msg)) => assert!(msg.contains("25 requests")),
            other => panic!("expected RateLimit, got {other:?}"),
        }
    }

    #[test]
    fn information_field_classifies_as_rate_limit() {
        let body = r#"{ "Information": "API rate limit reached" }"#;
        assert!(matches!(
            adapter().parse(body),
            Err(FetchError::RateLimit(_))
        ));
    }

    #[test]
    fn error_message_classifies_as_provider_error() {
        let body = r#"{ "Error Message": "Invalid API call." }"#;
        match adapter().parse(body) {
            Err(FetchError::Provider(msg)) => assert_eq!(msg, "Invalid API call."),
            other => panic!("expected Provider, got {other:?}"),
        }
    }

    #[test]
    fn missing_container_classifies_as_no_data() {
        let body = r#"{ "Meta Data": { "1. Information": "Forex Daily Prices" } }"#;
        assert!(matches!(adapter().parse(body), Err(FetchError::NoData(_))));
    }

    #[test]
    fn unparsable_price_classifies_as_parse_error() {
        let body = r#"{
            "Time Series FX (Daily)": {
                "2024-01-02": { "1. open": "not-a-number", "2. high": "1.1", "3. low": "1.0", "4. close": "1.05" }
            }
        }"#;
        assert!(matches!(adapter().parse(body), Err(FetchError::Parse(_))));
    }

    #[test]
    fn malformed_json_classifies_as_parse_error() {
        assert!(matches!(
            adapter().parse("not json at all"),
            Err(FetchError::Parse(_))
        ));
    }
}
