use analysis_core::{AnalysisError, MarketDataProvider, StockData};

/// Provider over a fixed set of snapshots, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    stocks: Vec<StockData>,
}

impl InMemoryProvider {
    pub fn new(stocks: Vec<StockData>) -> Self {
        let mut provider = Self::default();
        for stock in stocks {
            provider.insert(stock);
        }
        provider
    }

    /// Add `stock`, replacing any snapshot with the same symbol.
    pub fn insert(&mut self, stock: StockData) {
        match self.stocks.iter_mut().find(|s| s.symbol == stock.symbol) {
            Some(existing) => *existing = stock,
            None => self.stocks.push(stock),
        }
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }
}

impl MarketDataProvider for InMemoryProvider {
    fn symbols(&self) -> Vec<String> {
        self.stocks.iter().map(|s| s.symbol.clone()).collect()
    }

    fn stock(&self, symbol: &str) -> Result<StockData, AnalysisError> {
        let stock = self
            .stocks
            .iter()
            .find(|s| s.symbol == symbol)
            .ok_or_else(|| AnalysisError::UnknownSymbol(symbol.to_string()))?;

        if stock.bars.is_empty() {
            return Err(AnalysisError::InsufficientData(format!(
                "No bars available for {}",
                symbol
            )));
        }
        Ok(stock.clone())
    }
}
