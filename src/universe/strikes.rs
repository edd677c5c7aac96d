//! Strike ladder generation

use serde::{Deserialize, Serialize};

use crate::core::{ScanError, ScanResult};

/// Strikes on each side of the center strike
pub const LADDER_HALF_WIDTH: i64 = 4;

/// Spot level from which the wider strike interval applies
pub const WIDE_INTERVAL_THRESHOLD: f64 = 200.0;

/// Ascending, distinct, positive strikes centered on the rounded spot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrikeLadder {
    strikes: Vec<f64>,
    interval: f64,
}

impl StrikeLadder {
    /// Build the ladder for a spot price
    ///
    /// Interval is 5 below a spot of 200 and 10 from there up; strikes that
    /// would be zero or negative are dropped.
    pub fn around(spot: f64) -> Self {
        let center = spot.round();
        let interval = if spot < WIDE_INTERVAL_THRESHOLD { 5.0 } else { 10.0 };

        let strikes = (-LADDER_HALF_WIDTH..=LADDER_HALF_WIDTH)
            .map(|i| center + i as f64 * interval)
            .filter(|&k| k > 0.0)
            .collect();

        Self { strikes, interval }
    }

    pub fn strikes(&self) -> &[f64] {
        &self.strikes
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn len(&self) -> usize {
        self.strikes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strikes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.strikes.get(index).copied()
    }

    /// First strike (lowest first) satisfying `predicate`, else the strike at
    /// `fallback`
    ///
    /// Fails when nothing matches and the ladder is too short to hold the
    /// fallback index.
    pub fn select(&self, predicate: impl Fn(f64) -> bool, fallback: usize) -> ScanResult<f64> {
        if let Some(&strike) = self.strikes.iter().find(|&&k| predicate(k)) {
            return Ok(strike);
        }

        self.get(fallback).ok_or_else(|| {
            ScanError::internal(format!(
                "no matching strike and fallback index {} outside ladder of {}",
                fallback,
                self.len()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_interval_ladder() {
        let ladder = StrikeLadder::around(237.88);

        assert_eq!(ladder.len(), 9);
        assert_eq!(ladder.interval(), 10.0);
        assert_eq!(ladder.get(0), Some(198.0));
        assert_eq!(ladder.get(4), Some(238.0));
        assert_eq!(ladder.get(8), Some(278.0));

        for pair in ladder.strikes().windows(2) {
            assert_eq!(pair[1] - pair[0], 10.0);
        }
    }

    #[test]
    fn test_narrow_interval_ladder() {
        let ladder = StrikeLadder::around(100.0);
        assert_eq!(
            ladder.strikes(),
            &[80.0, 85.0, 90.0, 95.0, 100.0, 105.0, 110.0, 115.0, 120.0]
        );

        // 199.6 rounds to 200 but still uses the narrow interval
        let ladder = StrikeLadder::around(199.6);
        assert_eq!(ladder.interval(), 5.0);
        assert_eq!(ladder.get(4), Some(200.0));
    }

    #[test]
    fn test_low_spot_drops_non_positive() {
        let ladder = StrikeLadder::around(12.3);
        assert_eq!(ladder.strikes(), &[2.0, 7.0, 12.0, 17.0, 22.0, 27.0, 32.0]);
        assert!(ladder.strikes().iter().all(|&k| k > 0.0));
    }

    #[test]
    fn test_select_predicate_and_fallback() {
        let ladder = StrikeLadder::around(100.0);

        // Lowest strike under 95
        assert_eq!(ladder.select(|k| k < 95.0, 2).unwrap(), 80.0);
        // Nothing under 75, fall back to index 1
        assert_eq!(ladder.select(|k| k < 75.0, 1).unwrap(), 85.0);
    }

    #[test]
    fn test_select_fallback_out_of_range() {
        let ladder = StrikeLadder::around(3.0);
        assert_eq!(ladder.len(), 5);

        let err = ladder.select(|k| k > 1000.0, 6).unwrap_err();
        assert_eq!(err.status_code(), 500);
    }
}
