//! Assembled multi-leg strategies

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Greeks, Leg};

/// Directional bias of a strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyType {
    Bullish,
    Bearish,
    Neutral,
    Volatility,
}

impl StrategyType {
    pub fn label(&self) -> &'static str {
        match self {
            StrategyType::Bullish => "bullish",
            StrategyType::Bearish => "bearish",
            StrategyType::Neutral => "neutral",
            StrategyType::Volatility => "volatility",
        }
    }
}

/// How much options experience a strategy assumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Beginner,
    Intermediate,
    Advanced,
}

/// Display tier for a confidence score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    pub fn from_score(confidence: f64) -> Self {
        if confidence >= 70.0 {
            ConfidenceTier::High
        } else if confidence >= 50.0 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }
}

/// Maximum profit of a strategy, which may be unbounded
///
/// Serialized as a plain number, or the string `"unlimited"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfitCap {
    Capped(f64),
    Unlimited,
}

impl ProfitCap {
    pub fn amount(&self) -> Option<f64> {
        match self {
            ProfitCap::Capped(v) => Some(*v),
            ProfitCap::Unlimited => None,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, ProfitCap::Unlimited)
    }
}

impl Serialize for ProfitCap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProfitCap::Capped(v) => serializer.serialize_f64(*v),
            ProfitCap::Unlimited => serializer.serialize_str("unlimited"),
        }
    }
}

impl<'de> Deserialize<'de> for ProfitCap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Amount(f64),
            Label(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Amount(v) => Ok(ProfitCap::Capped(v)),
            Repr::Label(s) if s.eq_ignore_ascii_case("unlimited") => Ok(ProfitCap::Unlimited),
            Repr::Label(s) => Err(D::Error::custom(format!("invalid max profit: {}", s))),
        }
    }
}

/// A fully assembled strategy
///
/// Monetary fields are per contract (100 shares), rounded to whole dollars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub strategy_type: StrategyType,
    pub complexity: Complexity,
    /// Heuristic ranking score in [0, 100]
    pub confidence: f64,
    pub max_profit: ProfitCap,
    /// Worst-case loss, always <= 0
    pub max_loss: f64,
    pub capital_required: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability_of_profit: Option<f64>,
    pub description: String,
    pub legs: Vec<Leg>,
    pub greeks: Greeks,
    pub break_even_points: Vec<f64>,
}

impl Strategy {
    pub fn confidence_tier(&self) -> ConfidenceTier {
        ConfidenceTier::from_score(self.confidence)
    }

    /// Max profit over max loss, `None` when either side is unbounded or zero
    pub fn risk_reward_ratio(&self) -> Option<f64> {
        let profit = self.max_profit.amount()?;
        if self.max_loss == 0.0 {
            return None;
        }
        Some(profit / self.max_loss.abs())
    }
}

/// Compact currency display: "$1.2k" from 1000 upward, whole dollars below
pub fn format_currency(amount: f64) -> String {
    if amount.abs() >= 1000.0 {
        format!("${:.1}k", amount / 1000.0)
    } else {
        format!("${:.0}", amount.abs())
    }
}
