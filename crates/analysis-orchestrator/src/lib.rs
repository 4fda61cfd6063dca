use std::sync::Arc;

use analysis_core::{AnalysisError, MarketDataProvider, StockAnalysis, StockData};
use chrono::{DateTime, Utc};
use fundamental_analysis::{valuation_snapshot, FundamentalScorer};
use rayon::prelude::*;
use technical_analysis::TechnicalScorer;

pub mod playbook;
pub use playbook::build_playbooks;

/// Analyze one stock, stamped with the current time.
///
/// Never fails: indicators that lack history fall back to their neutral
/// defaults and the analysis is still produced.
pub fn generate_analysis(stock: &StockData) -> StockAnalysis {
    generate_analysis_at(stock, Utc::now())
}

/// [`generate_analysis`] with an explicit generation timestamp.
pub fn generate_analysis_at(stock: &StockData, generated_at: DateTime<Utc>) -> StockAnalysis {
    let technical = TechnicalScorer::new().score(stock);
    let fundamental = FundamentalScorer::new().score(&stock.fundamentals);
    let valuation = valuation_snapshot(&stock.fundamentals, &fundamental);
    let scenarios = build_playbooks(&technical, &fundamental);

    tracing::info!(
        "Analysis for {} ({} bars): short {} ({}), medium {} ({}), long {} ({}), valuation {}",
        stock.symbol,
        stock.bars.len(),
        scenarios[0].bias.to_label(),
        scenarios[0].confidence,
        scenarios[1].bias.to_label(),
        scenarios[1].confidence,
        scenarios[2].bias.to_label(),
        scenarios[2].confidence,
        valuation.flag.to_label()
    );

    StockAnalysis {
        symbol: stock.symbol.clone(),
        generated_at,
        technical,
        fundamental,
        valuation,
        scenarios,
    }
}

/// Entry point tying a market-data provider to the analysis pipeline.
pub struct AnalysisOrchestrator {
    provider: Arc<dyn MarketDataProvider>,
}

impl AnalysisOrchestrator {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    /// Fetch `symbol` from the provider and analyze it.
    pub fn analyze(&self, symbol: &str) -> Result<StockAnalysis, AnalysisError> {
        tracing::debug!("Fetching market data for {}", symbol);
        let stock = self.provider.stock(symbol)?;
        Ok(generate_analysis(&stock))
    }

    /// Analyze several symbols in parallel, skipping the ones the provider
    /// cannot serve. Output keeps the order of `symbols`.
    pub fn analyze_many(&self, symbols: &[String]) -> Vec<StockAnalysis> {
        symbols
            .par_iter()
            .filter_map(|symbol| match self.analyze(symbol) {
                Ok(analysis) => Some(analysis),
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", symbol, e);
                    None
                }
            })
            .collect()
    }

    /// Analyze every symbol the provider serves.
    pub fn analyze_universe(&self) -> Vec<StockAnalysis> {
        let symbols = self.provider.symbols();
        tracing::info!("Analyzing universe of {} symbols", symbols.len());
        self.analyze_many(&symbols)
    }
}
