//! Synthetic prices used when no live quote is available

use rand::{Rng, RngCore};

/// Reference prices for common tickers
pub const FALLBACK_PRICES: [(&str, f64); 10] = [
    ("AAPL", 237.88),
    ("SPY", 590.25),
    ("TSLA", 248.50),
    ("MSFT", 425.32),
    ("NVDA", 138.45),
    ("META", 563.12),
    ("GOOGL", 175.28),
    ("AMZN", 197.85),
    ("QQQ", 515.75),
    ("AMD", 120.33),
];

/// Range of synthetic prices for tickers without a reference price
pub const SYNTHETIC_RANGE: std::ops::Range<f64> = 100.0..300.0;

/// Reference price for a ticker, if it has one
pub fn reference_price(ticker: &str) -> Option<f64> {
    FALLBACK_PRICES
        .iter()
        .find(|(symbol, _)| symbol.eq_ignore_ascii_case(ticker))
        .map(|&(_, price)| price)
}

/// Uniform price in [100, 300)
pub fn synthetic_price(rng: &mut dyn RngCore) -> f64 {
    rng.gen_range(SYNTHETIC_RANGE)
}

/// Reference price, else a synthetic one
pub fn fallback_price(ticker: &str, rng: &mut dyn RngCore) -> f64 {
    reference_price(ticker).unwrap_or_else(|| synthetic_price(rng))
}
