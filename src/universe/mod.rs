//! Candidate strike and expiration universe
//!
//! Everything a strategy template may choose from for one scan: the strike
//! ladder around spot and the expirations inside the requested DTE window.

mod expirations;
mod strikes;

pub use expirations::*;
pub use strikes::*;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Strikes and expirations generated for one spot price and DTE window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionUniverse {
    pub spot: f64,
    pub strikes: StrikeLadder,
    pub expirations: ExpirationCalendar,
}

impl OptionUniverse {
    pub fn generate(spot: f64, today: NaiveDate, min_dte: i64, max_dte: i64) -> Self {
        Self {
            spot,
            strikes: StrikeLadder::around(spot),
            expirations: ExpirationCalendar::generate(today, min_dte, max_dte),
        }
    }

    /// Primary expiry and its DTE, if the window matched any candidate
    pub fn primary(&self) -> Option<(NaiveDate, i64)> {
        Some((self.expirations.primary()?, self.expirations.primary_dte()?))
    }
}
