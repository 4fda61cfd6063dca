use analysis_core::{AnalysisError, Bar, MarketDataProvider, StockData};
use chrono::{Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use technical_analysis::sma;

use crate::universe::{nse_large_caps, SeriesShape, UniverseEntry};

/// Daily close moves by up to +/-1.5% of the base level.
const DAILY_MOVE_PCT: f64 = 0.03;
/// Wicks extend up to 1.5% of the base level beyond the body.
const WICK_PCT: f64 = 0.015;
const BASE_VOLUME: f64 = 1_000_000.0;
/// Bars over which scripted crossovers are drawn.
const CROSS_BARS: usize = 10;
const CROSS_STEP: f64 = 0.005;

#[derive(Debug, Clone, PartialEq)]
pub struct MockConfig {
    pub seed: u64,
    /// Bars generated per symbol, so the overlay averages have warm-up history.
    pub history_days: usize,
    /// Trailing bars handed to callers.
    pub window_days: usize,
    /// Date of the last generated bar.
    pub end_date: NaiveDate,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            history_days: 80,
            window_days: 30,
            end_date: Utc::now().date_naive(),
        }
    }
}

impl MockConfig {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.window_days == 0 {
            return Err(AnalysisError::InvalidData("window_days must be positive".to_string()));
        }
        if self.window_days > self.history_days {
            return Err(AnalysisError::InvalidData(format!(
                "window_days ({}) exceeds history_days ({})",
                self.window_days, self.history_days
            )));
        }
        Ok(())
    }
}

/// Reproducible synthetic market data: the same config always yields the
/// same bars for a symbol, independent of request order.
#[derive(Debug, Clone)]
pub struct MockMarketData {
    config: MockConfig,
    universe: Vec<UniverseEntry>,
}

impl MockMarketData {
    pub fn new(config: MockConfig) -> Result<Self, AnalysisError> {
        Self::with_universe(config, nse_large_caps())
    }

    pub fn with_universe(config: MockConfig, universe: Vec<UniverseEntry>) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self { config, universe })
    }

    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    pub fn entry(&self, symbol: &str) -> Option<&UniverseEntry> {
        self.universe.iter().find(|e| e.symbol == symbol)
    }

    /// Generate the trailing window of bars for `entry`.
    pub fn generate_bars(&self, entry: &UniverseEntry) -> Vec<Bar> {
        let mut rng = StdRng::seed_from_u64(symbol_seed(self.config.seed, entry.symbol));
        let history = self.config.history_days;
        let base = entry.base;

        let mut price = base;
        let mut bars = Vec::with_capacity(history);
        for i in 0..history {
            let date = self.config.end_date - Duration::days((history - 1 - i) as i64);
            let open = price;
            let close = open + rng.gen_range(-0.5..0.5) * base * DAILY_MOVE_PCT;
            let high = open.max(close) + rng.gen::<f64>() * base * WICK_PCT;
            let low = open.min(close) - rng.gen::<f64>() * base * WICK_PCT;
            let volume = BASE_VOLUME * rng.gen_range(0.5..1.5);
            price = close;
            bars.push(Bar::new(date, open, high, low, close).with_volume(volume));
        }

        attach_averages(&mut bars);

        let mut window = bars.split_off(history - self.config.window_days);
        apply_shape(&mut window, entry.shape);
        window
    }

    fn snapshot(&self, entry: &UniverseEntry) -> StockData {
        StockData {
            symbol: entry.symbol.to_string(),
            name: entry.name.to_string(),
            price: entry.price,
            bars: self.generate_bars(entry),
            fundamentals: entry.fundamentals.clone(),
        }
    }
}

impl MarketDataProvider for MockMarketData {
    fn symbols(&self) -> Vec<String> {
        self.universe.iter().map(|e| e.symbol.to_string()).collect()
    }

    fn stock(&self, symbol: &str) -> Result<StockData, AnalysisError> {
        let entry = self
            .entry(symbol)
            .ok_or_else(|| AnalysisError::UnknownSymbol(symbol.to_string()))?;
        tracing::debug!(
            "Generating {} mock bars for {} (seed {})",
            self.config.window_days,
            symbol,
            self.config.seed
        );
        Ok(self.snapshot(entry))
    }
}

/// FNV-1a over the symbol, mixed with the global seed.
fn symbol_seed(seed: u64, symbol: &str) -> u64 {
    symbol
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325_u64 ^ seed, |hash, b| {
            (hash ^ b as u64).wrapping_mul(0x0100_0000_01b3)
        })
}

/// Fill the 20/50-day overlays with trailing simple averages of the close.
fn attach_averages(bars: &mut [Bar]) {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let avg20 = sma(&closes, 20);
    let avg50 = sma(&closes, 50);

    for (i, bar) in bars.iter_mut().enumerate() {
        if i >= 19 {
            bar.ema20 = Some(avg20[i - 19]);
        }
        if i >= 49 {
            bar.ema50 = Some(avg50[i - 49]);
        }
    }
}

fn apply_shape(bars: &mut [Bar], shape: SeriesShape) {
    let len = bars.len();
    match shape {
        SeriesShape::Plain => {}
        SeriesShape::Breakout { bars_from_end, multiplier } => {
            if let Some(index) = len.checked_sub(bars_from_end) {
                let bar = &mut bars[index];
                bar.is_breakout = true;
                bar.breakout_volume_multiplier = Some(multiplier);
                bar.volume = bar.volume.map(|v| v * multiplier);
            }
        }
        SeriesShape::BullishCross | SeriesShape::BearishCross => {
            let direction = if shape == SeriesShape::BullishCross { 1.0 } else { -1.0 };
            let start = len.saturating_sub(CROSS_BARS);
            for (offset, bar) in bars[start..].iter_mut().enumerate() {
                if let (Some(_), Some(slow)) = (bar.ema20, bar.ema50) {
                    // Step grows from 1 on the first bar of the cross to 10 on the last.
                    let step = (offset + 1 + start + CROSS_BARS - len) as f64;
                    bar.ema20 = Some(slow * (1.0 + direction * step * CROSS_STEP));
                }
            }
        }
    }
}
