//! Construction rules for each strategy template
//!
//! Every rule picks strikes as "first ladder strike matching a predicate,
//! else a fixed ladder index", prices the legs at the primary expiry and
//! works out the payoff per share. Conversion to contract units and scoring
//! happen in [`super::StrategyTemplate::evaluate`].

use chrono::NaiveDate;

use crate::core::{format_strike, Greeks, Leg, LegAction, OptionType, ScanResult};
use crate::models::black_scholes::{BlackScholes, OptionQuote};
use crate::universe::StrikeLadder;

/// Inputs shared by every template for one scan
#[derive(Debug, Clone, Copy)]
pub struct TemplateContext<'a> {
    pub ticker: &'a str,
    pub spot: f64,
    pub strikes: &'a StrikeLadder,
    pub expiry: NaiveDate,
    pub dte: i64,
    pub pricer: &'a BlackScholes,
}

impl<'a> TemplateContext<'a> {
    fn leg(&self, option_type: OptionType, action: LegAction, strike: f64) -> (Leg, OptionQuote) {
        let quote = self.pricer.quote(self.spot, strike, self.dte, option_type);
        let leg = Leg::new(option_type, action, strike, self.expiry, quote.price, quote.greeks);
        (leg, quote)
    }
}

/// Payoff of a template before contract scaling, all amounts per share
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub legs: Vec<Leg>,
    pub greeks: Greeks,
    /// `None` when profit is unbounded
    pub max_profit: Option<f64>,
    /// Magnitude of the worst-case loss
    pub max_loss: f64,
    pub capital: f64,
    pub break_evens: Vec<f64>,
    pub description: String,
}

fn position_greeks(legs: &[Leg]) -> Greeks {
    let held: Vec<Greeks> = legs.iter().map(Leg::position_greeks).collect();
    Greeks::sum(&held)
}

/// Short put below 95% of spot, long put more than 5 under it
pub fn bull_put_spread(ctx: &TemplateContext) -> ScanResult<Draft> {
    let short_strike = ctx.strikes.select(|k| k < ctx.spot * 0.95, 2)?;
    let long_strike = ctx.strikes.select(|k| k < short_strike - 5.0, 1)?;

    let (short_put, short_q) = ctx.leg(OptionType::Put, LegAction::Sell, short_strike);
    let (long_put, long_q) = ctx.leg(OptionType::Put, LegAction::Buy, long_strike);

    let credit = short_q.price - long_q.price;
    let max_loss = (short_strike - long_strike) - credit;

    let legs = vec![short_put, long_put];
    Ok(Draft {
        greeks: position_greeks(&legs),
        legs,
        max_profit: Some(credit),
        max_loss,
        capital: max_loss,
        break_evens: vec![short_strike - credit],
        description: format!(
            "Sell {}P, Buy {}P. Profit if {} stays above ${} by {}",
            format_strike(short_strike),
            format_strike(long_strike),
            ctx.ticker,
            format_strike(short_strike),
            ctx.expiry
        ),
    })
}

/// Call credit spread above 105% of spot plus put credit spread below 95%
pub fn iron_condor(ctx: &TemplateContext) -> ScanResult<Draft> {
    let call_short = ctx.strikes.select(|k| k > ctx.spot * 1.05, 6)?;
    let call_long = ctx.strikes.select(|k| k > call_short + 5.0, 7)?;
    let put_short = ctx.strikes.select(|k| k < ctx.spot * 0.95, 2)?;
    let put_long = ctx.strikes.select(|k| k < put_short - 5.0, 1)?;

    let (sc, sc_q) = ctx.leg(OptionType::Call, LegAction::Sell, call_short);
    let (lc, lc_q) = ctx.leg(OptionType::Call, LegAction::Buy, call_long);
    let (sp, sp_q) = ctx.leg(OptionType::Put, LegAction::Sell, put_short);
    let (lp, lp_q) = ctx.leg(OptionType::Put, LegAction::Buy, put_long);

    let credit = (sc_q.price - lc_q.price) + (sp_q.price - lp_q.price);
    let widest = (call_long - call_short).max(put_short - put_long);
    let max_loss = widest - credit;

    let legs = vec![sc, lc, sp, lp];
    Ok(Draft {
        greeks: position_greeks(&legs),
        legs,
        max_profit: Some(credit),
        max_loss,
        capital: max_loss,
        break_evens: vec![put_short - credit, call_short + credit],
        description: format!(
            "Trade {} sideways between ${} and ${} by {}",
            ctx.ticker,
            format_strike(put_short),
            format_strike(call_short),
            ctx.expiry
        ),
    })
}

/// Short put below 97% of spot, fully collateralized
pub fn cash_secured_put(ctx: &TemplateContext) -> ScanResult<Draft> {
    let strike = ctx.strikes.select(|k| k < ctx.spot * 0.97, 3)?;
    let (put, q) = ctx.leg(OptionType::Put, LegAction::Sell, strike);

    let legs = vec![put];
    Ok(Draft {
        greeks: position_greeks(&legs),
        legs,
        max_profit: Some(q.price),
        max_loss: strike - q.price,
        capital: strike,
        break_evens: vec![strike - q.price],
        description: format!(
            "Sell {}P. Collect premium or buy {} at ${} discount by {}",
            format_strike(strike),
            ctx.ticker,
            format_strike(strike),
            ctx.expiry
        ),
    })
}

/// Long call and put at the strike within 5 of spot
pub fn long_straddle(ctx: &TemplateContext) -> ScanResult<Draft> {
    let strike = ctx.strikes.select(|k| (k - ctx.spot).abs() < 5.0, 4)?;

    let (call, call_q) = ctx.leg(OptionType::Call, LegAction::Buy, strike);
    let (put, put_q) = ctx.leg(OptionType::Put, LegAction::Buy, strike);
    let cost = call_q.price + put_q.price;

    let legs = vec![call, put];
    Ok(Draft {
        greeks: position_greeks(&legs),
        legs,
        max_profit: None,
        max_loss: cost,
        capital: cost,
        break_evens: vec![strike - cost, strike + cost],
        description: format!(
            "Buy {}C and {}P. Profit if {} moves beyond ${:.2} or ${:.2}",
            format_strike(strike),
            format_strike(strike),
            ctx.ticker,
            strike + cost,
            strike - cost
        ),
    })
}

/// Short call above 103% of spot against 100 shares bought at spot
pub fn covered_call(ctx: &TemplateContext) -> ScanResult<Draft> {
    let strike = ctx.strikes.select(|k| k > ctx.spot * 1.03, 6)?;
    let (call, q) = ctx.leg(OptionType::Call, LegAction::Sell, strike);

    let legs = vec![call];
    // The share position contributes a delta of one
    let shares = Greeks::new(1.0, 0.0, 0.0, 0.0);

    Ok(Draft {
        greeks: position_greeks(&legs).add(&shares),
        legs,
        max_profit: Some(strike - ctx.spot + q.price),
        max_loss: ctx.spot - q.price,
        capital: ctx.spot,
        break_evens: vec![ctx.spot - q.price],
        description: format!(
            "Own 100 shares of {}, sell {}C. Cap gains at ${}, collect premium",
            ctx.ticker,
            format_strike(strike),
            format_strike(strike)
        ),
    })
}
