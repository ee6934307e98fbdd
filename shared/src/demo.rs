//! Synthetic candle series for offline operation.
//!
//! A random walk with deterministic shape and randomized values: the series
//! always spans consecutive calendar days ending today, oldest first.
//! Intraday modes reuse the same day-granularity stamps and only vary the
//! volatility passed in by the caller.

use chrono::{Duration, Utc};
use rand::Rng;

use crate::models::Candle;

/// Generate `count` candles with an unseeded RNG.
pub fn generate(count: usize, base_price: f64, volatility: f64) -> Vec<Candle> {
    generate_with(&mut rand::thread_rng(), count, base_price, volatility)
}

/// Generate `count` candles from the given RNG, so tests can seed a
/// `StdRng` and assert exact output.
pub fn generate_with<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    base_price: f64,
    volatility: f64,
) -> Vec<Candle> {
    let today = Utc::now().date_naive();
    let mut price = base_price;
    let mut candles = Vec::with_capacity(count);

    for i in 0..count {
        let day = today - Duration::days((count - 1 - i) as i64);

        price += (rng.gen::<f64>() - 0.5) * volatility;
        let open = price;
        let close = open + (rng.gen::<f64>() - 0.5) * volatility * 0.5;
        let high = open.max(close) + rng.gen::<f64>() * volatility * 0.3;
        let low = open.min(close) - rng.gen::<f64>() * volatility * 0.3;

        candles.push(Candle {
            time: day.format("%Y-%m-%d").to_string(),
            open,
            high,
            low,
            close,
        });

        price = close;
    }

    candles
}
