//! Polygon.io data fetcher
//!
//! Fetches the previous session close for a ticker from the aggregates API.
//! Requires an API key; the free tier is rate limited and end-of-day only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{ScanError, ScanResult};

pub const DEFAULT_BASE_URL: &str = "https://api.polygon.io";

/// Polygon.io API client
pub struct PolygonClient {
    client: reqwest::blocking::Client,
    base_url: reqwest::Url,
    api_key: String,
}

impl PolygonClient {
    pub fn new(api_key: impl Into<String>) -> ScanResult<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> ScanResult<Self> {
        let base_url = reqwest::Url::parse(base_url)
            .map_err(|e| ScanError::invalid_input(format!("Invalid Polygon base URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ScanError::invalid_input("Polygon base URL cannot carry a path"));
        }

        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("strategy-scanner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ScanError::Network(e.without_url().to_string()))?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Aggregates endpoint for `ticker`, without credentials
    ///
    /// The ticker is appended as a single percent-encoded path segment.
    fn previous_close_url(&self, ticker: &str) -> ScanResult<reqwest::Url> {
        if !is_ticker_symbol(ticker) {
            return Err(ScanError::invalid_input(format!("Malformed ticker {:?}", ticker)));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ScanError::invalid_input("Polygon base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(["v2", "aggs", "ticker", ticker, "prev"]);
        Ok(url)
    }

    /// Previous session close for a ticker
    pub fn get_previous_close(&self, ticker: &str) -> ScanResult<SpotQuote> {
        let url = self.previous_close_url(ticker)?;

        // The key travels as a query parameter, so errors are stripped of their URL
        let response: PolygonAggsResponse = self
            .client
            .get(url)
            .query(&[("adjusted", "true"), ("apikey", self.api_key.as_str())])
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| ScanError::Network(e.without_url().to_string()))?
            .json()
            .map_err(|e| {
                ScanError::Data(format!("Failed to parse aggregates: {}", e.without_url()))
            })?;

        let bar = response
            .results
            .and_then(|bars| bars.into_iter().next())
            .ok_or_else(|| ScanError::data(format!("No price data available for {}", ticker)))?;

        if !(bar.close.is_finite() && bar.close > 0.0) {
            return Err(ScanError::data(format!("Non-positive close {} for {}", bar.close, ticker)));
        }

        Ok(SpotQuote {
            symbol: ticker.to_string(),
            price: bar.close,
            timestamp: Utc::now(),
        })
    }
}

/// Exchange symbols such as `AAPL`, `BRK.B` or `X:BTCUSD`
fn is_ticker_symbol(ticker: &str) -> bool {
    ticker.chars().any(|c| c.is_ascii_alphanumeric())
        && ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':'))
}

/// Spot price quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotQuote {
    pub symbol: String,
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}

// Polygon API response structures

#[derive(Debug, Deserialize)]
struct PolygonAggsResponse {
    results: Option<Vec<PolygonBar>>,
}

#[derive(Debug, Deserialize)]
struct PolygonBar {
    #[serde(rename = "c")]
    close: f64,
}
