//! Example: Offline strategy scan with a fixed spot price
//!
//! Run with: cargo run --example scan_offline

use chrono::NaiveDate;
use strategy_scanner::prelude::*;

fn main() -> ScanResult<()> {
    // Fixed inputs so every run prints the same strategies
    let provider = StaticPriceProvider::new().with_price("AAPL", 237.88);
    let scanner = StrategyScanner::new(provider).with_seed(42);
    let today = NaiveDate::from_ymd_opt(2026, 10, 17)
        .ok_or_else(|| ScanError::invalid_input("bad date"))?;

    let request = ScanRequest::new("AAPL")
        .risk_profile(RiskProfile::Moderate)
        .dte_window(30, 45)
        .max_strategies(5);

    let response = scanner.scan("POST", &request, today)?;

    println!("=== {} @ ${:.2} ===\n", response.ticker, response.current_price);

    for strategy in &response.strategies {
        let profit = match strategy.max_profit {
            ProfitCap::Capped(v) => format_currency(v),
            ProfitCap::Unlimited => "unlimited".to_string(),
        };
        let legs: Vec<String> = strategy
            .legs
            .iter()
            .map(|leg| format!("{:?} {} @ {:.2}", leg.action, leg.label(), leg.premium))
            .collect();

        println!(
            "{} [{:?}] confidence {:.1}",
            strategy.name,
            strategy.confidence_tier(),
            strategy.confidence
        );
        println!("  Legs:       {}", legs.join(", "));
        println!("  Max profit: {}", profit);
        println!("  Max loss:   {}", format_currency(strategy.max_loss));
        println!("  Capital:    {}", format_currency(strategy.capital_required));
        println!("  Delta:      {:.3}\n", strategy.greeks.delta);
    }

    // Unsupported methods are rejected before any pricing
    let (status, rejected) = scanner.handle("GET", &request, today);
    println!("GET -> {} {:?}", status, rejected.error);

    Ok(())
}
