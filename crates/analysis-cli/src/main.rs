mod config;

use std::sync::Arc;

use analysis_core::{Horizon, MarketDataProvider, StockAnalysis};
use analysis_orchestrator::AnalysisOrchestrator;
use anyhow::{Context, Result};
use chrono::Utc;
use config::{CliConfig, OutputFormat};
use market_data::{MockConfig, MockMarketData};

fn init_tracing(json: bool) {
    // Logs go to stderr so JSON output on stdout stays parseable.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = CliConfig::from_env()?.apply_args(&args)?;
    init_tracing(config.json_logging);

    let provider = MockMarketData::new(MockConfig {
        seed: config.seed,
        history_days: config.history_days,
        window_days: config.window_days,
        end_date: Utc::now().date_naive(),
    })
    .context("Failed to build mock market data")?;

    if config.list_only {
        for symbol in provider.symbols() {
            if let Some(entry) = provider.entry(&symbol) {
                println!("{:<16} {}", entry.symbol, entry.name);
            }
        }
        return Ok(());
    }

    let orchestrator = AnalysisOrchestrator::new(Arc::new(provider));
    let analyses = if config.symbols.is_empty() {
        orchestrator.analyze_universe()
    } else {
        orchestrator.analyze_many(&config.symbols)
    };

    if analyses.is_empty() {
        anyhow::bail!("No symbols could be analyzed");
    }

    match config.output {
        OutputFormat::Table => print_table(&analyses),
        OutputFormat::Json => println!("{}", serde_json::to_string(&analyses)?),
        OutputFormat::Pretty => println!("{}", serde_json::to_string_pretty(&analyses)?),
    }

    Ok(())
}

fn horizon_cell(analysis: &StockAnalysis, horizon: Horizon) -> String {
    analysis
        .scenario(horizon)
        .map(|s| format!("{} ({})", s.bias.to_label(), s.confidence))
        .unwrap_or_else(|| "-".to_string())
}

fn print_table(analyses: &[StockAnalysis]) {
    println!(
        "{:<16} {:<15} {:<15} {:<15} {:>9} {:<10} {:<11}",
        "SYMBOL", "SHORT", "MEDIUM", "LONG", "BREAKOUT", "STATUS", "VALUATION"
    );
    for analysis in analyses {
        println!(
            "{:<16} {:<15} {:<15} {:<15} {:>8}% {:<10} {:<11}",
            analysis.symbol,
            horizon_cell(analysis, Horizon::Short),
            horizon_cell(analysis, Horizon::Medium),
            horizon_cell(analysis, Horizon::Long),
            analysis.technical.breakout_prob,
            analysis.technical.breakout_status.to_label(),
            analysis.valuation.flag.to_label()
        );
    }
}
