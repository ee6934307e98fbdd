//! Core data types shared between the upstream client and the API surface.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One OHLC price bar for a fixed time interval.
///
/// `time` keeps the provider-native ISO stamp (`2024-01-02` for daily bars,
/// `2024-01-02 15:00:00` for intraday). ISO stamps order lexicographically,
/// so a series sorted by `time` is sorted chronologically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// The bar interval requested by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timeframe {
    Daily,
    H1,
    M15,
}

impl Timeframe {
    /// Stable token used in cache keys and logs. Provider adapters map this
    /// to their own interval aliases.
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Daily => "daily",
            Timeframe::H1 => "1h",
            Timeframe::M15 => "15m",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("invalid currency pair {0:?}: expected a 6-letter code such as EURUSD")]
pub struct InvalidPair(pub String);

/// A 6-letter currency pair code split into base/quote currency codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyPair {
    base: String,
    quote: String,
}

impl CurrencyPair {
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// The canonical 6-letter code, e.g. `EURUSD`.
    pub fn code(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = InvalidPair;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 6 || !s.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(InvalidPair(s.to_string()));
        }
        let upper = s.to_ascii_uppercase();
        Ok(CurrencyPair {
            base: upper[..3].to_string(),
            quote: upper[3..].to_string(),
        })
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_splits_into_base_and_quote() {
        let pair: CurrencyPair = "EURUSD".parse().unwrap();
        assert_eq!(pair.base(), "EUR");
        assert_eq!(pair.quote(), "USD");
        assert_eq!(pair.code(), "EURUSD");
    }

    #[test]
    fn pair_is_uppercased() {
        let pair: CurrencyPair = "gbpjpy".parse().unwrap();
        assert_eq!(pair.code(), "GBPJPY");
    }

    #[test]
    fn pair_rejects_wrong_length() {
        assert!("EUR".parse::<CurrencyPair>().is_err());
        assert!("EURUSDX".parse::<CurrencyPair>().is_err());
        assert!("".parse::<CurrencyPair>().is_err());
    }

    #[test]
    fn pair_rejects_non_letters() {
        assert!("EUR/US".parse::<CurrencyPair>().is_err());
        assert!("EUR123".parse::<CurrencyPair>().is_err());
    }

    #[test]
    fn timeframe_tokens_are_distinct() {
        assert_eq!(Timeframe::Daily.as_str(), "daily");
        assert_eq!(Timeframe::H1.as_str(), "1h");
        assert_eq!(Timeframe::M15.as_str(), "15m");
    }

    #[test]
    fn candle_serializes_with_five_fields() {
        let candle = Candle {
            time: "2024-01-02".to_string(),
            open: 1.095,
            high: 1.098,
            low: 1.093,
            close: 1.0965,
        };
        let json = serde_json::to_value(&candle).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 5);
        assert_eq!(obj["time"], "2024-01-02");
    }
}
