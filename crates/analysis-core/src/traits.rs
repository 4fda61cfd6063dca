use std::sync::Arc;

use crate::{AnalysisError, StockData};

/// Source of bar series and fundamentals for the analysis pipeline.
///
/// Implementations must hand out owned snapshots; the engine never mutates
/// provider state, so a single provider may serve concurrent analyses.
pub trait MarketDataProvider: Send + Sync {
    /// Symbols this provider can serve, in display order.
    fn symbols(&self) -> Vec<String>;

    fn stock(&self, symbol: &str) -> Result<StockData, AnalysisError>;
}

impl<P: MarketDataProvider + ?Sized> MarketDataProvider for Arc<P> {
    fn symbols(&self) -> Vec<String> {
        (**self).symbols()
    }

    fn stock(&self, symbol: &str) -> Result<StockData, AnalysisError> {
        (**self).stock(symbol)
    }
}

impl<P: MarketDataProvider + ?Sized> MarketDataProvider for Box<P> {
    fn symbols(&self) -> Vec<String> {
        (**self).symbols()
    }

    fn stock(&self, symbol: &str) -> Result<StockData, AnalysisError> {
        (**self).stock(symbol)
    }
}
