//! Option and leg definitions
//!
//! A leg is one option position inside a multi-leg strategy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Greeks;

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Intrinsic value at given spot
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }

    /// Suffix used in strike notation, e.g. "225P"
    pub fn suffix(&self) -> char {
        match self {
            OptionType::Call => 'C',
            OptionType::Put => 'P',
        }
    }
}

/// Whether a leg is bought or sold to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LegAction {
    Buy,
    Sell,
}

impl LegAction {
    /// +1 for long, -1 for short
    pub fn sign(&self) -> f64 {
        match self {
            LegAction::Buy => 1.0,
            LegAction::Sell => -1.0,
        }
    }
}

/// One priced option position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    #[serde(rename = "type")]
    pub option_type: OptionType,
    pub action: LegAction,
    pub strike: f64,
    pub expiry: NaiveDate,
    /// Number of contracts, always 1 for generated strategies
    pub quantity: u32,
    /// Per-share premium, floored at 0.01
    pub premium: f64,
    /// Greeks of a single long contract
    #[serde(flatten)]
    pub greeks: Greeks,
}

impl Leg {
    pub fn new(
        option_type: OptionType,
        action: LegAction,
        strike: f64,
        expiry: NaiveDate,
        premium: f64,
        greeks: Greeks,
    ) -> Self {
        Self {
            option_type,
            action,
            strike,
            expiry,
            quantity: 1,
            premium,
            greeks,
        }
    }

    /// Greeks as seen by the position holder (negated for short legs)
    pub fn position_greeks(&self) -> Greeks {
        self.greeks
            .scale(self.action.sign() * self.quantity as f64)
    }

    /// Short label like "225P"
    pub fn label(&self) -> String {
        format!("{}{}", format_strike(self.strike), self.option_type.suffix())
    }
}

/// Format a strike without a trailing ".0" when it is whole
pub fn format_strike(strike: f64) -> String {
    if strike.fract() == 0.0 {
        format!("{:.0}", strike)
    } else {
        format!("{}", strike)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 11, 20).unwrap()
    }

    #[test]
    fn test_option_type() {
        assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
        assert_eq!(OptionType::Put.intrinsic(90.0, 100.0), 10.0);
        assert_eq!(OptionType::Call.intrinsic(90.0, 100.0), 0.0);
        assert_eq!(OptionType::Put.intrinsic(110.0, 100.0), 0.0);
    }

    #[test]
    fn test_position_greeks_flip_for_short() {
        let greeks = Greeks::new(-0.3, 0.02, -0.04, 0.1);
        let leg = Leg::new(OptionType::Put, LegAction::Sell, 95.0, expiry(), 1.25, greeks);

        let held = leg.position_greeks();
        assert!((held.delta - 0.3).abs() < 1e-12);
        assert!((held.gamma + 0.02).abs() < 1e-12);
        assert!((held.theta - 0.04).abs() < 1e-12);
        assert_eq!(leg.quantity, 1);
    }

    #[test]
    fn test_label() {
        let leg = Leg::new(
            OptionType::Call,
            LegAction::Buy,
            240.0,
            expiry(),
            2.0,
            Greeks::default(),
        );
        assert_eq!(leg.label(), "240C");
        assert_eq!(format_strike(237.5), "237.5");
    }

    #[test]
    fn test_leg_json_shape() {
        let leg = Leg::new(
            OptionType::Put,
            LegAction::Sell,
            95.0,
            expiry(),
            1.25,
            Greeks::new(-0.3, 0.02, -0.04, 0.1),
        );
        let json = serde_json::to_value(&leg).unwrap();

        assert_eq!(json["type"], "put");
        assert_eq!(json["action"], "SELL");
        assert_eq!(json["expiry"], "2026-11-20");
        assert_eq!(json["delta"], -0.3);
    }
}
