//! # Strategy Scanner - Multi-Leg Options Strategy Recommendations
//!
//! Recommends multi-leg options strategies for a ticker from its spot price
//! and a target expiration window.
//!
//! ## Overview
//!
//! The scanner combines:
//! - **Black-Scholes**: Closed-form leg pricing and Greeks at a fixed volatility
//! - **Universe generation**: Strike ladder around spot, Friday expirations in a DTE window
//! - **Strategy templates**: Bull Put Spread, Iron Condor, Cash Secured Put,
//!   Long Straddle, Covered Call
//! - **Selection**: Risk-profile confidence filter, stable ranking, truncation
//!
//! ## Usage
//!
//! ```rust,no_run
//! use strategy_scanner::prelude::*;
//!
//! // Polygon.io when POLYGON_API_KEY is set, reference prices otherwise
//! let scanner = StrategyScanner::from_config(ScannerConfig::from_env()).unwrap();
//!
//! let request = ScanRequest::new("AAPL").risk_profile(RiskProfile::Moderate);
//! let response = scanner.scan_now("POST", &request).unwrap();
//!
//! for strategy in &response.strategies {
//!     println!("{} ({:.1})", strategy.name, strategy.confidence);
//! }
//! ```
//!
//! ## What This Crate Does NOT Do
//!
//! - Calibrate implied volatility from a live chain
//! - Persist strategies or scan history
//! - Produce statistically calibrated confidence or PoP (both are heuristics)

pub mod core;
pub mod data;
pub mod models;
pub mod scanner;
pub mod strategies;
pub mod universe;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        format_currency, Complexity, ConfidenceTier, Greeks, Leg, LegAction, OptionType,
        ProfitCap, ScanError, ScanResult, Strategy, StrategyType,
    };

    // Data fetching
    pub use crate::data::{
        fallback_price, LivePriceProvider, PolygonClient, PriceProvider, SpotQuote,
        StaticPriceProvider,
    };

    // Pricing
    pub use crate::models::{norm_cdf, norm_pdf, quote as bs_quote, BlackScholes, OptionQuote};

    // Universe
    pub use crate::universe::{ExpirationCalendar, OptionUniverse, StrikeLadder};

    // Templates
    pub use crate::strategies::{generate_strategies, ScoreSource, StrategyTemplate};

    // Scanning
    pub use crate::scanner::{
        select_strategies, PricingConfig, ProviderConfig, RiskProfile, ScanRequest,
        ScanResponse, ScannerConfig, StrategyScanner, SUBMIT_METHOD,
    };
}

// Re-export main types at crate root
pub use crate::core::{ScanError, ScanResult};
pub use crate::scanner::{ScanRequest, ScanResponse, StrategyScanner};
