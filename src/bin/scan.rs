//! Strategy Scanner CLI
//!
//! Scans one ticker and prints the ranked strategies.
//!
//! ```bash
//! # JSON response, reference prices unless POLYGON_API_KEY is set
//! strategy-scan --ticker AAPL --risk-profile moderate
//!
//! # Reproducible scores, human-readable table
//! strategy-scan --ticker SPY --risk-profile aggressive --seed 42 --table
//! ```

use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use strategy_scanner::prelude::*;

#[derive(Parser)]
#[command(name = "strategy-scan")]
#[command(about = "Recommend multi-leg options strategies for a ticker")]
#[command(version)]
struct Cli {
    /// Underlying ticker, e.g. AAPL
    #[arg(short, long)]
    ticker: String,

    /// conservative, moderate, moderate_aggressive or aggressive
    #[arg(short, long)]
    risk_profile: Option<RiskProfile>,

    /// Minimum days to expiration
    #[arg(long)]
    min_dte: Option<i64>,

    /// Maximum days to expiration
    #[arg(long)]
    max_dte: Option<i64>,

    /// Number of strategies to return (1-20)
    #[arg(short, long)]
    max_strategies: Option<usize>,

    /// Seed for repeatable scores
    #[arg(long)]
    seed: Option<u64>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Reference date (YYYY-MM-DD), defaults to today in UTC
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Print a table instead of JSON
    #[arg(long)]
    table: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> ScanResult<()> {
    let mut config = match &cli.config {
        Some(path) => ScannerConfig::from_json_file(path)?,
        None => ScannerConfig::default(),
    };
    if config.provider.api_key().is_none() {
        config.provider.api_key = ProviderConfig::from_env().api_key;
    }

    let defaults = &config.defaults;
    let request = ScanRequest {
        ticker: cli.ticker.clone(),
        risk_profile: cli.risk_profile.unwrap_or(defaults.risk_profile),
        min_dte: cli.min_dte.unwrap_or(defaults.min_dte),
        max_dte: cli.max_dte.unwrap_or(defaults.max_dte),
        max_strategies: cli.max_strategies.unwrap_or(defaults.max_strategies),
    };
    request.validate()?;

    let mut scanner = StrategyScanner::from_config(config)?;
    if let Some(seed) = cli.seed {
        scanner = scanner.with_seed(seed);
    }

    let today = cli.today.unwrap_or_else(|| chrono::Utc::now().date_naive());
    let response = scanner.scan(SUBMIT_METHOD, &request, today)?;

    if cli.table {
        print_table(&response);
    } else {
        let json = serde_json::to_string_pretty(&response)
            .map_err(|e| ScanError::Serialization(e.to_string()))?;
        println!("{}", json);
    }

    Ok(())
}

fn print_table(response: &ScanResponse) {
    println!("{} @ ${:.2}", response.ticker, response.current_price);
    println!("{}", "=".repeat(72));

    if response.strategies.is_empty() {
        println!("No strategies matched.");
        return;
    }

    println!(
        "{:<3} {:<18} {:<11} {:>6} {:<6} {:>10} {:>10} {:>10} {:>5} {:>5}",
        "#", "Strategy", "Type", "Score", "Tier", "MaxProfit", "MaxLoss", "Capital", "PoP", "R/R"
    );

    for (rank, s) in response.strategies.iter().enumerate() {
        let profit = match s.max_profit {
            ProfitCap::Capped(v) => format_currency(v),
            ProfitCap::Unlimited => "unlimited".to_string(),
        };
        let pop = s
            .probability_of_profit
            .map(|p| format!("{:.0}%", p * 100.0))
            .unwrap_or_default();
        let risk_reward = s
            .risk_reward_ratio()
            .map(|rr| format!("{:.2}", rr))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<3} {:<18} {:<11} {:>6.1} {:<6} {:>10} {:>10} {:>10} {:>5} {:>5}",
            rank + 1,
            s.name,
            s.strategy_type.label(),
            s.confidence,
            format!("{:?}", s.confidence_tier()),
            profit,
            format_currency(s.max_loss),
            format_currency(s.capital_required),
            pop,
            risk_reward
        );
        println!("    {}", s.description);
    }
}
