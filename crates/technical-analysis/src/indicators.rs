use analysis_core::Bar;
use serde::{Deserialize, Serialize};

use crate::series::{align_pair, ema, mean, population_std_dev, sma};

pub const RSI_PERIOD: usize = 14;
pub const ATR_PERIOD: usize = 14;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_STD_DEV: f64 = 2.0;
pub const SQUEEZE_THRESHOLD: f64 = 0.2;
/// Bandwidth points needed before a squeeze can be reported.
pub const SQUEEZE_MIN_POINTS: usize = 20;
/// Bandwidth points averaged when judging contraction.
pub const SQUEEZE_LOOKBACK: usize = 40;

/// Neutral RSI reported when there are too few closes.
pub const NEUTRAL_RSI: f64 = 50.0;

/// Relative Strength Index over the trailing 14 differences.
///
/// Gains and losses are simple-averaged over the window (no Wilder smoothing).
/// Fewer than 15 closes yields the neutral 50; a window without losses yields 100.
pub fn rsi14(closes: &[f64]) -> f64 {
    if closes.len() < RSI_PERIOD + 1 {
        return NEUTRAL_RSI;
    }

    let window = &closes[closes.len() - (RSI_PERIOD + 1)..];
    let mut gain = 0.0;
    let mut loss = 0.0;
    for pair in window.windows(2) {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            gain += change;
        } else {
            loss -= change;
        }
    }

    let avg_gain = gain / RSI_PERIOD as f64;
    let avg_loss = loss / RSI_PERIOD as f64;
    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
}

/// MACD (Moving Average Convergence Divergence)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdResult {
    pub macd: f64,
    pub signal: f64,
    pub hist: f64,
    /// Full MACD line for callers that need history.
    pub macd_series: Vec<f64>,
}

pub fn macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdResult {
    if slow == 0 || closes.len() < slow {
        return MacdResult::default();
    }

    let ema_fast = ema(closes, fast);
    let ema_slow = ema(closes, slow);
    let (fast_line, slow_line) = align_pair(&ema_fast, &ema_slow);

    let macd_series: Vec<f64> = fast_line.iter().zip(slow_line).map(|(f, s)| f - s).collect();
    let signal_series = ema(&macd_series, signal);

    let (Some(&latest_macd), Some(&latest_signal)) = (macd_series.last(), signal_series.last()) else {
        return MacdResult::default();
    };

    MacdResult {
        macd: latest_macd,
        signal: latest_signal,
        hist: latest_macd - latest_signal,
        macd_series,
    }
}

/// MACD with the standard 12/26/9 parameters.
pub fn macd_default(closes: &[f64]) -> MacdResult {
    macd(closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL)
}

/// True range of `bar` given the previous close.
pub fn true_range(bar: &Bar, prev_close: f64) -> f64 {
    let high_low = bar.high - bar.low;
    let high_close = (bar.high - prev_close).abs();
    let low_close = (bar.low - prev_close).abs();
    high_low.max(high_close).max(low_close)
}

/// Average True Range: simple mean of the trailing 14 true ranges, 0 below 15 bars.
pub fn atr14(bars: &[Bar]) -> f64 {
    if bars.len() < ATR_PERIOD + 1 {
        return 0.0;
    }

    let window = &bars[bars.len() - (ATR_PERIOD + 1)..];
    let sum: f64 = window
        .windows(2)
        .map(|pair| true_range(&pair[1], pair[0].close))
        .sum();
    sum / ATR_PERIOD as f64
}

/// Bollinger Bands
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
    /// (upper - lower) / middle, in percent.
    pub bandwidth: Vec<f64>,
}

pub fn bollinger(closes: &[f64], period: usize, std_dev: f64) -> BollingerBands {
    if period == 0 || closes.len() < period {
        return BollingerBands::default();
    }

    let middle = sma(closes, period);
    let mut upper = Vec::with_capacity(middle.len());
    let mut lower = Vec::with_capacity(middle.len());
    let mut bandwidth = Vec::with_capacity(middle.len());

    for (i, &mean) in middle.iter().enumerate() {
        let window = &closes[i..i + period];
        let sigma = population_std_dev(window, mean);
        let u = mean + std_dev * sigma;
        let l = mean - std_dev * sigma;
        upper.push(u);
        lower.push(l);
        bandwidth.push(if mean != 0.0 { (u - l) / mean * 100.0 } else { 0.0 });
    }

    BollingerBands {
        upper,
        middle,
        lower,
        bandwidth,
    }
}

/// Bollinger Bands with the standard 20-period, 2σ parameters.
pub fn bollinger_default(closes: &[f64]) -> BollingerBands {
    bollinger(closes, BOLLINGER_PERIOD, BOLLINGER_STD_DEV)
}

/// True when the latest bandwidth sits more than `threshold` below the mean of
/// the trailing (up to 40) bandwidth values.
pub fn is_squeeze_present(bandwidth: &[f64], threshold: f64) -> bool {
    let Some(&latest) = bandwidth.last() else {
        return false;
    };
    if bandwidth.len() < SQUEEZE_MIN_POINTS {
        return false;
    }

    let tail = &bandwidth[bandwidth.len().saturating_sub(SQUEEZE_LOOKBACK)..];
    let avg = mean(tail);
    if avg == 0.0 {
        return false;
    }
    (avg - latest) / avg > threshold
}

/// Every indicator the technical scorer consumes, computed once per series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub rsi: f64,
    pub macd: MacdResult,
    pub atr: f64,
    pub bollinger: BollingerBands,
    pub squeeze: bool,
    pub ema20: Option<f64>,
    pub ema50: Option<f64>,
}

impl IndicatorSnapshot {
    /// Compute all indicators from `bars`. Short series degrade to each
    /// indicator's documented default instead of failing.
    pub fn compute(bars: &[Bar]) -> Self {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

        if closes.len() < MACD_SLOW {
            tracing::debug!(
                "Only {} bars available; indicators needing more history fall back to defaults",
                closes.len()
            );
        }

        let bollinger = bollinger_default(&closes);
        let squeeze = is_squeeze_present(&bollinger.bandwidth, SQUEEZE_THRESHOLD);

        // Overlay averages from the data source win over locally computed ones.
        let (ema20, ema50) = match bars.last() {
            Some(Bar { ema20: Some(fast), ema50: Some(slow), .. }) => (Some(*fast), Some(*slow)),
            _ => (
                ema(&closes, 20).last().copied(),
                ema(&closes, 50).last().copied(),
            ),
        };

        Self {
            rsi: rsi14(&closes),
            macd: macd_default(&closes),
            atr: atr14(bars),
            bollinger,
            squeeze,
            ema20,
            ema50,
        }
    }

    pub fn ema_alignment(&self) -> bool {
        match (self.ema20, self.ema50) {
            (Some(fast), Some(slow)) => fast > slow,
            _ => false,
        }
    }
}
