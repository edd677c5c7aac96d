//! StrategyScanner - main facade for the scanning pipeline

use chrono::{NaiveDate, Utc};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{select_strategies, ScanRequest, ScanResponse, ScannerConfig};
use crate::core::{ScanError, ScanResult};
use crate::data::{LivePriceProvider, PriceProvider};
use crate::strategies::generate_strategies;
use crate::universe::OptionUniverse;

/// The only method a scan may be submitted with
pub const SUBMIT_METHOD: &str = "POST";

/// Runs the full validate, price, assemble, filter, rank, truncate pipeline
pub struct StrategyScanner<P: PriceProvider> {
    provider: P,
    config: ScannerConfig,
    seed: Option<u64>,
}

impl StrategyScanner<LivePriceProvider> {
    /// Scanner backed by Polygon.io (or fallback prices without a key)
    pub fn from_config(config: ScannerConfig) -> ScanResult<Self> {
        let provider = LivePriceProvider::from_config(&config.provider)?;
        Ok(Self::with_config(provider, config))
    }
}

impl<P: PriceProvider> StrategyScanner<P> {
    /// Create a scanner with default configuration
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, ScannerConfig::default())
    }

    /// Create with custom configuration
    pub fn with_config(provider: P, config: ScannerConfig) -> Self {
        Self {
            provider,
            config,
            seed: None,
        }
    }

    /// Seed every scan's RNG, making scores and synthetic prices repeatable
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    /// Run a scan as of `today`
    ///
    /// # Arguments
    /// * `method` - Submission method; anything but `POST` is rejected
    /// * `request` - Ticker and filtering parameters
    /// * `today` - Reference date for expirations and DTE
    pub fn scan(
        &self,
        method: &str,
        request: &ScanRequest,
        today: NaiveDate,
    ) -> ScanResult<ScanResponse> {
        let mut rng = self.rng();
        self.scan_with_rng(method, request, today, &mut rng)
    }

    /// Run a scan as of the current UTC date
    pub fn scan_now(&self, method: &str, request: &ScanRequest) -> ScanResult<ScanResponse> {
        self.scan(method, request, Utc::now().date_naive())
    }

    /// Run a scan drawing all randomness from `rng`
    pub fn scan_with_rng<R: RngCore>(
        &self,
        method: &str,
        request: &ScanRequest,
        today: NaiveDate,
        rng: &mut R,
    ) -> ScanResult<ScanResponse> {
        // Stage 1: Validate
        if method != SUBMIT_METHOD {
            return Err(ScanError::method_not_allowed(method));
        }
        let ticker = request.ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(ScanError::invalid_input("Ticker is required"));
        }

        // Stage 2: Price
        let spot = self.provider.spot_price(&ticker, &mut *rng);
        if !(spot.is_finite() && spot > 0.0) {
            return Err(ScanError::internal(format!("unusable spot price {} for {}", spot, ticker)));
        }
        tracing::info!(
            "Scanning {} at {:.2} ({}, DTE {}-{})",
            ticker,
            spot,
            request.risk_profile,
            request.min_dte,
            request.max_dte
        );

        // Stage 3: Assemble
        let universe = OptionUniverse::generate(spot, today, request.min_dte, request.max_dte);
        let pricer = self.config.pricing.pricer();
        let candidates = generate_strategies(&universe, &ticker, &pricer, rng)?;
        let assembled = candidates.len();

        // Stages 4-6: Filter, rank, truncate
        let strategies =
            select_strategies(candidates, request.risk_profile, request.max_strategies);
        tracing::info!(
            "{}: {} of {} strategies kept for {} profile",
            ticker,
            strategies.len(),
            assembled,
            request.risk_profile
        );

        Ok(ScanResponse::success(ticker, spot, strategies))
    }

    /// Run a scan and map any failure onto a status code and error envelope
    pub fn handle(
        &self,
        method: &str,
        request: &ScanRequest,
        today: NaiveDate,
    ) -> (u16, ScanResponse) {
        match self.scan(method, request, today) {
            Ok(response) => (200, response),
            Err(e) => {
                let status = e.status_code();
                if status >= 500 {
                    tracing::error!("Error in scan: {}", e);
                } else {
                    tracing::debug!("Rejected scan request: {}", e);
                }
                (status, ScanResponse::failure(&e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ProfitCap, StrategyType};
    use crate::data::StaticPriceProvider;
    use crate::scanner::RiskProfile;
    use std::cell::Cell;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    /// Counts how often pricing was requested
    struct CountingProvider {
        calls: Cell<usize>,
        price: f64,
    }

    impl CountingProvider {
        fn new(price: f64) -> Self {
            Self { calls: Cell::new(0), price }
        }
    }

    impl PriceProvider for CountingProvider {
        fn spot_price(&self, _ticker: &str, _rng: &mut dyn RngCore) -> f64 {
            self.calls.set(self.calls.get() + 1);
            self.price
        }
    }

    #[test]
    fn test_spy_aggressive_end_to_end() {
        let scanner = StrategyScanner::new(StaticPriceProvider::new()).with_seed(42);
        let request = ScanRequest::new("spy")
            .risk_profile(RiskProfile::Aggressive)
            .max_strategies(5);

        let response = scanner.scan("POST", &request, today()).unwrap();

        assert!(response.success);
        assert_eq!(response.ticker, "SPY");
        assert_eq!(response.current_price, 590.25);
        assert_eq!(response.strategies.len(), 5);
        assert!(response.error.is_none());

        for pair in response.strategies.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
        for s in &response.strategies {
            assert!(!s.legs.is_empty());
            assert!(s.capital_required >= 0.0);
            assert!(s.max_loss <= 0.0);
            assert!((0.0..=100.0).contains(&s.confidence));
        }
    }

    #[test]
    fn test_seeded_scans_repeat() {
        let scanner = StrategyScanner::new(StaticPriceProvider::new()).with_seed(7);
        let request = ScanRequest::new("UNLISTED").risk_profile(RiskProfile::Aggressive);

        let a = scanner.scan("POST", &request, today()).unwrap();
        let b = scanner.scan("POST", &request, today()).unwrap();

        assert_eq!(a.current_price, b.current_price);
        assert_eq!(a.strategies, b.strategies);

        let other = StrategyScanner::new(StaticPriceProvider::new()).with_seed(8);
        let c = other.scan("POST", &request, today()).unwrap();
        assert_ne!(a.strategies[0].confidence, c.strategies[0].confidence);
    }

    #[test]
    fn test_conservative_drops_straddle() {
        let provider = StaticPriceProvider::new().with_price("AAPL", 237.88);
        let scanner = StrategyScanner::new(provider).with_seed(1);
        let request = ScanRequest::new("AAPL").risk_profile(RiskProfile::Conservative);

        let response = scanner.scan("POST", &request, today()).unwrap();
        assert!(response
            .strategies
            .iter()
            .all(|s| s.strategy_type != StrategyType::Volatility && s.confidence >= 65.0));
        // Every base score except the straddle's clears 65
        assert_eq!(response.strategies.len(), 4);
    }

    #[test]
    fn test_truncates_to_max_strategies() {
        let scanner = StrategyScanner::new(StaticPriceProvider::new()).with_seed(3);
        let request = ScanRequest::new("QQQ")
            .risk_profile(RiskProfile::Aggressive)
            .max_strategies(2);

        let response = scanner.scan("POST", &request, today()).unwrap();
        assert_eq!(response.strategies.len(), 2);
        // Only these two can outscore a bull put spread's 72.5 floor
        let top = response.strategies[0].name.as_str();
        assert!(top == "Bull Put Spread" || top == "Cash Secured Put");
    }

    #[test]
    fn test_unlimited_straddle_profit() {
        let scanner = StrategyScanner::new(StaticPriceProvider::new()).with_seed(3);
        let request = ScanRequest::new("MSFT").risk_profile(RiskProfile::Aggressive);

        let response = scanner.scan("POST", &request, today()).unwrap();
        let straddle = response
            .strategies
            .iter()
            .find(|s| s.name == "Long Straddle")
            .unwrap();
        assert_eq!(straddle.max_profit, ProfitCap::Unlimited);
    }

    #[test]
    fn test_rejects_before_pricing() {
        let scanner = StrategyScanner::new(CountingProvider::new(100.0));

        let err = scanner.scan("GET", &ScanRequest::new("SPY"), today()).unwrap_err();
        assert_eq!(err.status_code(), 405);

        let err = scanner.scan("POST", &ScanRequest::new("   "), today()).unwrap_err();
        assert_eq!(err.status_code(), 400);

        assert_eq!(scanner.provider().calls.get(), 0);

        scanner.scan("POST", &ScanRequest::new("SPY"), today()).unwrap();
        assert_eq!(scanner.provider().calls.get(), 1);
    }

    #[test]
    fn test_empty_window_is_empty_success() {
        let scanner = StrategyScanner::new(CountingProvider::new(100.0)).with_seed(1);
        let request = ScanRequest::new("XYZ").dte_window(200, 210);

        let response = scanner.scan("POST", &request, today()).unwrap();
        assert!(response.success);
        assert!(response.strategies.is_empty());
        assert_eq!(response.current_price, 100.0);
    }

    #[test]
    fn test_unusable_spot_is_internal_error() {
        let scanner = StrategyScanner::new(CountingProvider::new(f64::NAN));
        let (status, response) = scanner.handle("POST", &ScanRequest::new("XYZ"), today());

        assert_eq!(status, 500);
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Internal server error"));
        assert!(response.strategies.is_empty());
    }

    #[test]
    fn test_handle_status_codes() {
        let scanner = StrategyScanner::new(StaticPriceProvider::new()).with_seed(1);

        let (status, response) = scanner.handle("PUT", &ScanRequest::new("SPY"), today());
        assert_eq!(status, 405);
        assert_eq!(response.error.as_deref(), Some("Method not allowed"));

        let (status, response) = scanner.handle("POST", &ScanRequest::new(""), today());
        assert_eq!(status, 400);
        assert_eq!(response.error.as_deref(), Some("Ticker is required"));

        let (status, response) = scanner.handle("POST", &ScanRequest::new("SPY"), today());
        assert_eq!(status, 200);
        assert!(response.success);
    }

    #[test]
    fn test_pricing_config_flows_to_legs() {
        let mut config = ScannerConfig::default();
        config.pricing.volatility = 0.5;

        let calm = StrategyScanner::new(StaticPriceProvider::new()).with_seed(1);
        let wild = StrategyScanner::with_config(StaticPriceProvider::new(), config).with_seed(1);
        let request = ScanRequest::new("AAPL").risk_profile(RiskProfile::Aggressive);

        let calm = calm.scan("POST", &request, today()).unwrap();
        let wild = wild.scan("POST", &request, today()).unwrap();

        let straddle_cost = |r: &ScanResponse| {
            r.strategies
                .iter()
                .find(|s| s.name == "Long Straddle")
                .map(|s| s.capital_required)
                .unwrap()
        };
        assert!(straddle_cost(&wild) > straddle_cost(&calm));
    }
}
