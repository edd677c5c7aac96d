//! Strategy templates
//!
//! The closed set of five multi-leg constructions the scanner evaluates,
//! with their fixed metadata and base scores.

mod scoring;
mod templates;

pub use scoring::*;
pub use templates::*;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::{Complexity, ProfitCap, ScanResult, Strategy, StrategyType};
use crate::models::black_scholes::BlackScholes;
use crate::universe::OptionUniverse;

/// Shares per option contract
pub const CONTRACT_MULTIPLIER: f64 = 100.0;

/// One of the five supported constructions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyTemplate {
    BullPutSpread,
    IronCondor,
    CashSecuredPut,
    LongStraddle,
    CoveredCall,
}

impl StrategyTemplate {
    /// All templates in evaluation order
    pub const ALL: [StrategyTemplate; 5] = [
        StrategyTemplate::BullPutSpread,
        StrategyTemplate::IronCondor,
        StrategyTemplate::CashSecuredPut,
        StrategyTemplate::LongStraddle,
        StrategyTemplate::CoveredCall,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            StrategyTemplate::BullPutSpread => "1",
            StrategyTemplate::IronCondor => "2",
            StrategyTemplate::CashSecuredPut => "3",
            StrategyTemplate::LongStraddle => "4",
            StrategyTemplate::CoveredCall => "5",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StrategyTemplate::BullPutSpread => "Bull Put Spread",
            StrategyTemplate::IronCondor => "Iron Condor",
            StrategyTemplate::CashSecuredPut => "Cash Secured Put",
            StrategyTemplate::LongStraddle => "Long Straddle",
            StrategyTemplate::CoveredCall => "Covered Call",
        }
    }

    pub fn strategy_type(&self) -> StrategyType {
        match self {
            StrategyTemplate::BullPutSpread | StrategyTemplate::CashSecuredPut => {
                StrategyType::Bullish
            }
            StrategyTemplate::IronCondor | StrategyTemplate::CoveredCall => StrategyType::Neutral,
            StrategyTemplate::LongStraddle => StrategyType::Volatility,
        }
    }

    pub fn complexity(&self) -> Complexity {
        match self {
            StrategyTemplate::CashSecuredPut | StrategyTemplate::CoveredCall => {
                Complexity::Beginner
            }
            StrategyTemplate::BullPutSpread | StrategyTemplate::LongStraddle => {
                Complexity::Intermediate
            }
            StrategyTemplate::IronCondor => Complexity::Advanced,
        }
    }

    /// Confidence before jitter
    pub fn base_confidence(&self) -> f64 {
        match self {
            StrategyTemplate::BullPutSpread => 72.5,
            StrategyTemplate::IronCondor => 65.2,
            StrategyTemplate::CashSecuredPut => 69.8,
            StrategyTemplate::LongStraddle => 58.5,
            StrategyTemplate::CoveredCall => 66.7,
        }
    }

    /// Probability of profit before jitter
    pub fn base_probability_of_profit(&self) -> f64 {
        match self {
            StrategyTemplate::BullPutSpread => 0.68,
            StrategyTemplate::IronCondor => 0.58,
            StrategyTemplate::CashSecuredPut => 0.65,
            StrategyTemplate::LongStraddle => 0.45,
            StrategyTemplate::CoveredCall => 0.72,
        }
    }

    /// Per-share payoff for this template
    pub fn draft(&self, ctx: &TemplateContext) -> ScanResult<Draft> {
        match self {
            StrategyTemplate::BullPutSpread => bull_put_spread(ctx),
            StrategyTemplate::IronCondor => iron_condor(ctx),
            StrategyTemplate::CashSecuredPut => cash_secured_put(ctx),
            StrategyTemplate::LongStraddle => long_straddle(ctx),
            StrategyTemplate::CoveredCall => covered_call(ctx),
        }
    }

    /// Build the scored strategy in contract units
    ///
    /// Draws one confidence and then one probability-of-profit value.
    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        ctx: &TemplateContext,
        scores: &mut ScoreSource<'_, R>,
    ) -> ScanResult<Strategy> {
        let draft = self.draft(ctx)?;

        let confidence = scores.confidence(self.base_confidence());
        let probability_of_profit = scores.probability_of_profit(self.base_probability_of_profit());

        Ok(Strategy {
            id: self.id().to_string(),
            name: self.name().to_string(),
            strategy_type: self.strategy_type(),
            complexity: self.complexity(),
            confidence,
            max_profit: match draft.max_profit {
                Some(per_share) => ProfitCap::Capped(to_contract(per_share)),
                None => ProfitCap::Unlimited,
            },
            max_loss: 0.0 - to_contract(draft.max_loss.max(0.0)),
            capital_required: to_contract(draft.capital.max(0.0)),
            probability_of_profit: Some(probability_of_profit),
            description: draft.description,
            legs: draft.legs,
            greeks: draft.greeks,
            break_even_points: draft.break_evens,
        })
    }
}

/// Per-share amount to whole dollars per contract
pub fn to_contract(per_share: f64) -> f64 {
    (per_share * CONTRACT_MULTIPLIER).round()
}

/// Evaluate every template against the universe, in template order
///
/// Returns no strategies when the DTE window produced no expiry.
pub fn generate_strategies<R: Rng + ?Sized>(
    universe: &OptionUniverse,
    ticker: &str,
    pricer: &BlackScholes,
    rng: &mut R,
) -> ScanResult<Vec<Strategy>> {
    let Some((expiry, dte)) = universe.primary() else {
        tracing::debug!("No expiration inside DTE window for {}", ticker);
        return Ok(Vec::new());
    };

    let ctx = TemplateContext {
        ticker,
        spot: universe.spot,
        strikes: &universe.strikes,
        expiry,
        dte,
        pricer,
    };
    let mut scores = ScoreSource::new(rng);

    StrategyTemplate::ALL
        .iter()
        .map(|template| {
            let strategy = template.evaluate(&ctx, &mut scores)?;
            tracing::debug!(
                "{} {}: confidence {:.1}, capital {}",
                ticker,
                strategy.name,
                strategy.confidence,
                strategy.capital_required
            );
            Ok(strategy)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn test_generates_all_five_in_order() {
        let universe = OptionUniverse::generate(237.88, today(), 30, 45);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let strategies =
            generate_strategies(&universe, "AAPL", &BlackScholes::default(), &mut rng).unwrap();

        let names: Vec<&str> = strategies.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Bull Put Spread",
                "Iron Condor",
                "Cash Secured Put",
                "Long Straddle",
                "Covered Call"
            ]
        );

        let expiry = NaiveDate::from_ymd_opt(2026, 11, 20).unwrap();
        for (s, template) in strategies.iter().zip(StrategyTemplate::ALL.iter()) {
            assert_eq!(s.id, template.id());
            assert!(!s.legs.is_empty());
            assert!(s.legs.iter().all(|l| l.expiry == expiry && l.premium >= 0.01));
            assert!(s.max_loss <= 0.0);
            assert!(s.capital_required >= 0.0);

            let base = template.base_confidence();
            assert!(s.confidence >= base && s.confidence < base + 5.0);
            let pop = s.probability_of_profit.unwrap();
            let pop_base = template.base_probability_of_profit();
            assert!(pop >= pop_base && pop < pop_base + 0.1);
        }
    }

    #[test]
    fn test_contract_units() {
        let universe = OptionUniverse::generate(237.88, today(), 30, 45);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let strategies =
            generate_strategies(&universe, "AAPL", &BlackScholes::default(), &mut rng).unwrap();

        let csp = &strategies[2];
        let premium = csp.legs[0].premium;
        assert_eq!(csp.capital_required, 19800.0);
        assert_eq!(csp.max_profit, ProfitCap::Capped((premium * 100.0).round()));
        assert_eq!(csp.max_loss, -((198.0 - premium) * 100.0).round());

        let straddle = &strategies[3];
        assert_eq!(straddle.max_profit, ProfitCap::Unlimited);
        assert_eq!(straddle.strategy_type, StrategyType::Volatility);

        let covered = &strategies[4];
        let call = &covered.legs[0];
        assert_eq!(call.strike, 248.0);
        assert_eq!(covered.capital_required, 23788.0);
        assert_eq!(
            covered.max_profit,
            ProfitCap::Capped(((248.0 - 237.88 + call.premium) * 100.0).round())
        );
        assert_eq!(covered.max_loss, -((237.88 - call.premium) * 100.0).round());
        assert!((covered.break_even_points[0] - (237.88 - call.premium)).abs() < 1e-9);
    }

    #[test]
    fn test_inverted_spread_loss_is_clamped() {
        // At spot 100 the bull put legs are 80 short / 85 long, so the
        // per-share loss works out negative and is reported as zero
        let universe = OptionUniverse::generate(100.0, today(), 30, 45);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let strategies =
            generate_strategies(&universe, "XYZ", &BlackScholes::default(), &mut rng).unwrap();

        let spread = &strategies[0];
        assert_eq!(spread.max_loss, 0.0);
        assert!(spread.max_loss.is_sign_positive());
        assert_eq!(spread.capital_required, 0.0);
    }

    #[test]
    fn test_empty_window_yields_nothing() {
        let universe = OptionUniverse::generate(100.0, today(), 300, 400);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let strategies =
            generate_strategies(&universe, "XYZ", &BlackScholes::default(), &mut rng).unwrap();
        assert!(strategies.is_empty());
    }

    #[test]
    fn test_template_metadata() {
        assert_eq!(StrategyTemplate::IronCondor.complexity(), Complexity::Advanced);
        assert_eq!(StrategyTemplate::CoveredCall.strategy_type(), StrategyType::Neutral);
        assert_eq!(StrategyTemplate::CashSecuredPut.strategy_type(), StrategyType::Bullish);
        assert_eq!(
            serde_json::to_string(&StrategyTemplate::LongStraddle).unwrap(),
            "\"long_straddle\""
        );
    }
}
