pub mod cache;
pub mod client;
pub mod config;
pub mod demo;
pub mod error;
pub mod models;
pub mod providers;

pub use cache::CandleCache;
pub use client::FxClient;
pub use config::Config;
pub use error::FetchError;
pub use models::{Candle, CurrencyPair, Timeframe};
