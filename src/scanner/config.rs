//! Configuration for the strategy scanner

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::RiskProfile;
use crate::core::{ScanError, ScanResult};
use crate::data::DEFAULT_BASE_URL;
use crate::models::black_scholes::{BlackScholes, DEFAULT_RISK_FREE_RATE, DEFAULT_VOLATILITY};

/// Environment variable holding the Polygon.io API key
pub const API_KEY_ENV: &str = "POLYGON_API_KEY";

/// Scanner configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScannerConfig {
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub defaults: RequestDefaults,
}

impl ScannerConfig {
    /// Defaults plus the API key from the environment
    pub fn from_env() -> Self {
        Self {
            provider: ProviderConfig::from_env(),
            ..Default::default()
        }
    }

    /// Load from a JSON file; missing sections take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> ScanResult<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        serde_json::from_str(&json).map_err(|e| ScanError::Serialization(e.to_string()))
    }
}

/// Leg pricing assumptions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Annualized volatility used for every leg
    /// Default: 0.25
    #[serde(default = "default_volatility")]
    pub volatility: f64,

    /// Annual risk-free rate
    /// Default: 0.05
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,
}

fn default_volatility() -> f64 {
    DEFAULT_VOLATILITY
}

fn default_risk_free_rate() -> f64 {
    DEFAULT_RISK_FREE_RATE
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            volatility: DEFAULT_VOLATILITY,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
        }
    }
}

impl PricingConfig {
    pub fn pricer(&self) -> BlackScholes {
        BlackScholes::new(self.volatility, self.risk_free_rate)
    }
}

/// Market data provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Polygon.io API key; blank counts as absent
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
        }
    }
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok(),
            ..Default::default()
        }
    }

    /// Configured key, if non-blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// Values used when a request leaves a field out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestDefaults {
    /// Default: moderate_aggressive
    #[serde(default = "default_risk_profile")]
    pub risk_profile: RiskProfile,
    /// Default: 30
    #[serde(default = "default_min_dte")]
    pub min_dte: i64,
    /// Default: 45
    #[serde(default = "default_max_dte")]
    pub max_dte: i64,
    /// Default: 5
    #[serde(default = "default_max_strategies")]
    pub max_strategies: usize,
}

pub(crate) fn default_risk_profile() -> RiskProfile {
    RiskProfile::ModerateAggressive
}

pub(crate) fn default_min_dte() -> i64 {
    30
}

pub(crate) fn default_max_dte() -> i64 {
    45
}

pub(crate) fn default_max_strategies() -> usize {
    5
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            risk_profile: default_risk_profile(),
            min_dte: default_min_dte(),
            max_dte: default_max_dte(),
            max_strategies: default_max_strategies(),
        }
    }
}
