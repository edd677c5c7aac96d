//! Risk filtering and ranking stages

use super::RiskProfile;
use crate::core::Strategy;

/// Keep the strategies the profile admits, preserving order
pub fn filter_by_risk(strategies: Vec<Strategy>, profile: RiskProfile) -> Vec<Strategy> {
    strategies
        .into_iter()
        .filter(|s| profile.admits(s))
        .collect()
}

/// Sort by confidence, highest first; equal scores keep their input order
pub fn rank_by_confidence(strategies: &mut [Strategy]) {
    strategies.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
}

/// Filter, rank and truncate in one pass
pub fn select_strategies(
    strategies: Vec<Strategy>,
    profile: RiskProfile,
    max_strategies: usize,
) -> Vec<Strategy> {
    let mut kept = filter_by_risk(strategies, profile);
    rank_by_confidence(&mut kept);
    kept.truncate(max_strategies);
    kept
}
