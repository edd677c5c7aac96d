//! Black-Scholes Model
//!
//! Provides:
//! - European option pricing (no dividends)
//! - Greeks computation
//!
//! The normal CDF uses the Abramowitz-Stegun rational approximation of erf
//! (max absolute error ~1.5e-7), so quoted prices are reproducible without
//! a statistics dependency.

use std::f64::consts::{PI, SQRT_2};

use serde::{Deserialize, Serialize};

use crate::core::{Greeks, OptionType};

/// Volatility assumed when no chain is available for calibration
pub const DEFAULT_VOLATILITY: f64 = 0.25;
/// Annual risk-free rate
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.05;
/// Smallest premium ever quoted for a leg
pub const MIN_PREMIUM: f64 = 0.01;
/// Day count used to annualize DTE and de-annualize theta
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Error function, Abramowitz-Stegun 7.1.26
pub fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x >= 0.0 { 1.0 } else { -1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();

    sign * y
}

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / SQRT_2))
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Black-Scholes d1 parameter
pub fn d1(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * time.sqrt())
}

/// Black-Scholes d2 parameter
pub fn d2(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    d1(spot, strike, rate, vol, time) - vol * time.sqrt()
}

/// Price and Greeks of a single option
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Premium per share, floored at [`MIN_PREMIUM`] unless at expiry
    pub price: f64,
    pub greeks: Greeks,
}

/// Black-Scholes price and Greeks for an option `days` calendar days from expiry
///
/// At or past expiry the intrinsic value is returned unfloored, with a
/// step delta and zero gamma, theta and vega.
pub fn quote(
    spot: f64,
    strike: f64,
    days: f64,
    vol: f64,
    rate: f64,
    option_type: OptionType,
) -> OptionQuote {
    let time = days / DAYS_PER_YEAR;

    if time <= 0.0 {
        let delta = match option_type {
            OptionType::Call => if spot > strike { 1.0 } else { 0.0 },
            OptionType::Put => if spot < strike { -1.0 } else { 0.0 },
        };
        return OptionQuote {
            price: option_type.intrinsic(spot, strike),
            greeks: Greeks::new(delta, 0.0, 0.0, 0.0),
        };
    }

    let sqrt_t = time.sqrt();
    let d1 = d1(spot, strike, rate, vol, time);
    let d2 = d1 - vol * sqrt_t;
    let df = (-rate * time).exp();
    let pdf_d1 = norm_pdf(d1);

    let (price, delta, carry) = match option_type {
        OptionType::Call => (
            spot * norm_cdf(d1) - strike * df * norm_cdf(d2),
            norm_cdf(d1),
            norm_cdf(d2),
        ),
        OptionType::Put => (
            strike * df * norm_cdf(-d2) - spot * norm_cdf(-d1),
            norm_cdf(d1) - 1.0,
            norm_cdf(-d2),
        ),
    };

    // Gamma and vega are the same for calls and puts
    let gamma = pdf_d1 / (spot * vol * sqrt_t);
    let vega = spot * pdf_d1 * sqrt_t / 100.0;

    // The rate term keeps the same sign for puts
    let theta = -(spot * pdf_d1 * vol) / (2.0 * sqrt_t) - rate * strike * df * carry;

    OptionQuote {
        price: price.max(MIN_PREMIUM),
        greeks: Greeks::new(delta, gamma, theta / DAYS_PER_YEAR, vega),
    }
}

/// Black-Scholes pricer with a fixed volatility and rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlackScholes {
    pub volatility: f64,
    pub rate: f64,
}

impl Default for BlackScholes {
    fn default() -> Self {
        Self {
            volatility: DEFAULT_VOLATILITY,
            rate: DEFAULT_RISK_FREE_RATE,
        }
    }
}

impl BlackScholes {
    pub fn new(volatility: f64, rate: f64) -> Self {
        Self { volatility, rate }
    }

    /// Price one option `dte` days out
    pub fn quote(&self, spot: f64, strike: f64, dte: i64, option_type: OptionType) -> OptionQuote {
        quote(spot, strike, dte as f64, self.volatility, self.rate, option_type)
    }

    pub fn call(&self, spot: f64, strike: f64, dte: i64) -> OptionQuote {
        self.quote(spot, strike, dte, OptionType::Call)
    }

    pub fn put(&self, spot: f64, strike: f64, dte: i64) -> OptionQuote {
        self.quote(spot, strike, dte, OptionType::Put)
    }
}
