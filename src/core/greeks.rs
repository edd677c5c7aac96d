//! Option Greeks
//!
//! First and second order sensitivities for a leg or a whole strategy.

use serde::{Deserialize, Serialize};

/// Option Greeks (sensitivities)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Delta: dV/dS (sensitivity to spot)
    pub delta: f64,
    /// Gamma: d²V/dS² (sensitivity of delta to spot)
    pub gamma: f64,
    /// Theta: dV/dt (time decay, per calendar day)
    pub theta: f64,
    /// Vega: dV/dσ (per 1 vol point)
    pub vega: f64,
}

impl Greeks {
    pub fn new(delta: f64, gamma: f64, theta: f64, vega: f64) -> Self {
        Self {
            delta,
            gamma,
            theta,
            vega,
        }
    }

    /// Scale Greeks by a factor (e.g., -1 for a short position)
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            delta: self.delta * factor,
            gamma: self.gamma * factor,
            theta: self.theta * factor,
            vega: self.vega * factor,
        }
    }

    /// Add two Greeks (for strategy aggregation)
    pub fn add(&self, other: &Greeks) -> Self {
        Self {
            delta: self.delta + other.delta,
            gamma: self.gamma + other.gamma,
            theta: self.theta + other.theta,
            vega: self.vega + other.vega,
        }
    }

    /// Sum a sequence of Greeks
    pub fn sum<'a>(items: impl IntoIterator<Item = &'a Greeks>) -> Self {
        items
            .into_iter()
            .fold(Greeks::default(), |acc, g| acc.add(g))
    }
}
