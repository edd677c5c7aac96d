//! Strategy scanning pipeline
//!
//! Turns a scan request into a ranked list of strategies:
//! 1. **Validate**: submission method and ticker
//! 2. **Price**: spot from the price provider (never fails)
//! 3. **Assemble**: all five templates against the generated universe
//! 4. **Filter**: confidence floor per risk profile
//! 5. **Rank**: confidence descending, stable
//! 6. **Truncate**: at most `max_strategies`

mod config;
mod filter;
mod pipeline;

pub use config::*;
pub use filter::*;
pub use pipeline::*;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{ScanError, ScanResult, Strategy, StrategyType};

/// Largest `max_strategies` the request validation accepts
pub const MAX_STRATEGIES_LIMIT: usize = 20;

/// Appetite for risk, which sets the confidence floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskProfile {
    Conservative,
    Moderate,
    ModerateAggressive,
    Aggressive,
}

impl RiskProfile {
    pub fn label(&self) -> &'static str {
        match self {
            RiskProfile::Conservative => "conservative",
            RiskProfile::Moderate => "moderate",
            RiskProfile::ModerateAggressive => "moderate_aggressive",
            RiskProfile::Aggressive => "aggressive",
        }
    }

    /// Lowest confidence kept, `None` for no floor
    pub fn min_confidence(&self) -> Option<f64> {
        match self {
            RiskProfile::Conservative => Some(65.0),
            RiskProfile::Moderate => Some(60.0),
            RiskProfile::ModerateAggressive => Some(55.0),
            RiskProfile::Aggressive => None,
        }
    }

    /// Whether a strategy fits this profile
    pub fn admits(&self, strategy: &Strategy) -> bool {
        if *self == RiskProfile::Conservative
            && strategy.strategy_type == StrategyType::Volatility
        {
            return false;
        }
        self.min_confidence()
            .map_or(true, |floor| strategy.confidence >= floor)
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RiskProfile {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "conservative" => Ok(RiskProfile::Conservative),
            "moderate" => Ok(RiskProfile::Moderate),
            "moderate_aggressive" => Ok(RiskProfile::ModerateAggressive),
            "aggressive" => Ok(RiskProfile::Aggressive),
            other => Err(ScanError::invalid_input(format!("Unknown risk profile: {}", other))),
        }
    }
}

/// Caller-supplied scan parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    #[serde(default)]
    pub ticker: String,
    #[serde(default = "default_risk_profile")]
    pub risk_profile: RiskProfile,
    #[serde(default = "default_min_dte")]
    pub min_dte: i64,
    #[serde(default = "default_max_dte")]
    pub max_dte: i64,
    #[serde(default = "default_max_strategies")]
    pub max_strategies: usize,
}

impl ScanRequest {
    /// Request with the standard defaults
    pub fn new(ticker: impl Into<String>) -> Self {
        Self::with_defaults(ticker, &RequestDefaults::default())
    }

    pub fn with_defaults(ticker: impl Into<String>, defaults: &RequestDefaults) -> Self {
        Self {
            ticker: ticker.into(),
            risk_profile: defaults.risk_profile,
            min_dte: defaults.min_dte,
            max_dte: defaults.max_dte,
            max_strategies: defaults.max_strategies,
        }
    }

    pub fn risk_profile(mut self, profile: RiskProfile) -> Self {
        self.risk_profile = profile;
        self
    }

    pub fn dte_window(mut self, min_dte: i64, max_dte: i64) -> Self {
        self.min_dte = min_dte;
        self.max_dte = max_dte;
        self
    }

    pub fn max_strategies(mut self, max: usize) -> Self {
        self.max_strategies = max;
        self
    }

    /// Boundary checks applied before a request reaches the scanner
    ///
    /// The scanner itself only re-checks the ticker.
    pub fn validate(&self) -> ScanResult<()> {
        if self.ticker.trim().is_empty() {
            return Err(ScanError::invalid_input("Ticker is required"));
        }
        if self.max_strategies == 0 || self.max_strategies > MAX_STRATEGIES_LIMIT {
            return Err(ScanError::invalid_input(format!(
                "maxStrategies must be between 1 and {}",
                MAX_STRATEGIES_LIMIT
            )));
        }
        if self.min_dte < 0 {
            return Err(ScanError::invalid_input("minDte must not be negative"));
        }
        if self.min_dte > self.max_dte {
            return Err(ScanError::invalid_input("minDte must not exceed maxDte"));
        }
        Ok(())
    }
}

/// Result envelope returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub success: bool,
    pub strategies: Vec<Strategy>,
    pub current_price: f64,
    pub ticker: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ScanResponse {
    pub fn success(
        ticker: impl Into<String>,
        current_price: f64,
        strategies: Vec<Strategy>,
    ) -> Self {
        Self {
            success: true,
            strategies,
            current_price,
            ticker: ticker.into(),
            error: None,
            timestamp: Utc::now(),
        }
    }

    /// Empty envelope carrying only a caller-safe error message
    pub fn failure(err: &ScanError) -> Self {
        Self {
            success: false,
            strategies: Vec::new(),
            current_price: 0.0,
            ticker: String::new(),
            error: Some(err.public_message()),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_risk_profile() {
        assert_eq!("conservative".parse::<RiskProfile>().unwrap(), RiskProfile::Conservative);
        assert_eq!(
            "Moderate-Aggressive".parse::<RiskProfile>().unwrap(),
            RiskProfile::ModerateAggressive
        );
        assert_eq!(" AGGRESSIVE ".parse::<RiskProfile>().unwrap(), RiskProfile::Aggressive);

        let err = "yolo".parse::<RiskProfile>().unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_request_defaults_from_json() {
        let req: ScanRequest = serde_json::from_str(r#"{"ticker": "aapl"}"#).unwrap();
        assert_eq!(req.ticker, "aapl");
        assert_eq!(req.risk_profile, RiskProfile::ModerateAggressive);
        assert_eq!((req.min_dte, req.max_dte, req.max_strategies), (30, 45, 5));

        let req: ScanRequest = serde_json::from_str(
            r#"{"ticker": "SPY", "riskProfile": "aggressive", "minDte": 7, "maxDte": 21, "maxStrategies": 3}"#,
        )
        .unwrap();
        assert_eq!(
            req,
            ScanRequest::new("SPY")
                .risk_profile(RiskProfile::Aggressive)
                .dte_window(7, 21)
                .max_strategies(3)
        );

        // Missing ticker still parses; validation rejects it
        let req: ScanRequest = serde_json::from_str("{}").unwrap();
        assert!(req.ticker.is_empty());
        let reckless = r#"{"ticker":"X","riskProfile":"reckless"}"#;
        assert!(serde_json::from_str::<ScanRequest>(reckless).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(ScanRequest::new("SPY").validate().is_ok());
        assert!(ScanRequest::new("  ").validate().is_err());
        assert!(ScanRequest::new("SPY").max_strategies(0).validate().is_err());
        assert!(ScanRequest::new("SPY").max_strategies(21).validate().is_err());
        assert!(ScanRequest::new("SPY").max_strategies(20).validate().is_ok());
        assert!(ScanRequest::new("SPY").dte_window(45, 30).validate().is_err());
        assert!(ScanRequest::new("SPY").dte_window(-1, 30).validate().is_err());
    }

    #[test]
    fn test_failure_envelope() {
        let resp = ScanResponse::failure(&ScanError::internal("boom"));
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["currentPrice"], 0.0);
        assert_eq!(json["ticker"], "");
        assert_eq!(json["error"], "Internal server error");
        assert!(json["strategies"].as_array().unwrap().is_empty());
    }
}
