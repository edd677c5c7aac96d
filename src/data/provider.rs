//! Spot price providers
//!
//! A provider always yields a usable price: failures are logged and
//! replaced by a fallback rather than returned.

use rand::RngCore;

use super::fallback::{fallback_price, synthetic_price};
use super::polygon::PolygonClient;
use crate::core::ScanResult;
use crate::scanner::ProviderConfig;

/// Source of the underlying's spot price
pub trait PriceProvider {
    /// Positive spot price for `ticker`; `rng` backs any synthetic fallback
    fn spot_price(&self, ticker: &str, rng: &mut dyn RngCore) -> f64;
}

/// Polygon.io when a key is configured, fallback prices otherwise
pub struct LivePriceProvider {
    client: Option<PolygonClient>,
}

impl LivePriceProvider {
    pub fn from_config(config: &ProviderConfig) -> ScanResult<Self> {
        let client = match config.api_key() {
            Some(key) => Some(PolygonClient::with_base_url(key, config.base_url.as_str())?),
            None => None,
        };
        Ok(Self { client })
    }

    /// Provider that never touches the network
    pub fn offline() -> Self {
        Self { client: None }
    }

    pub fn is_live(&self) -> bool {
        self.client.is_some()
    }
}

impl PriceProvider for LivePriceProvider {
    fn spot_price(&self, ticker: &str, rng: &mut dyn RngCore) -> f64 {
        let Some(client) = &self.client else {
            tracing::warn!("No Polygon API key configured, using fallback price for {}", ticker);
            return fallback_price(ticker, rng);
        };

        match client.get_previous_close(ticker) {
            Ok(quote) => {
                tracing::info!("Fetched {} close {:.2}", ticker, quote.price);
                quote.price
            }
            Err(e) => {
                tracing::warn!("Error fetching live price for {}: {}", ticker, e);
                synthetic_price(rng)
            }
        }
    }
}

/// Fixed prices, for tests and offline runs
#[derive(Debug, Clone, Default)]
pub struct StaticPriceProvider {
    prices: Vec<(String, f64)>,
}

impl StaticPriceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, ticker: impl Into<String>, price: f64) -> Self {
        self.prices.push((ticker.into().to_uppercase(), price));
        self
    }
}

impl PriceProvider for StaticPriceProvider {
    fn spot_price(&self, ticker: &str, rng: &mut dyn RngCore) -> f64 {
        self.prices
            .iter()
            .find(|(symbol, _)| symbol.eq_ignore_ascii_case(ticker))
            .map(|&(_, price)| price)
            .unwrap_or_else(|| fallback_price(ticker, rng))
    }
}
