use analysis_core::{
    Bar, BreakoutStatus, ObvSlope, RuleOutcome, RuleTable, ScoreRule, StockData, TechnicalScores,
};

use crate::indicators::IndicatorSnapshot;

/// Bars considered for resistance and average volume.
const RECENT_WINDOW: usize = 20;

/// Inputs the technical rule tables are evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct SignalContext {
    pub rsi: f64,
    pub macd_hist: f64,
    pub squeeze: bool,
    pub obv_slope: ObvSlope,
    pub ema_alignment: bool,
    pub adx: f64,
    pub supertrend_bullish: bool,
    pub rs_positive: bool,
    pub latest_breakout: bool,
}

impl SignalContext {
    pub fn new(bars: &[Bar], indicators: &IndicatorSnapshot) -> Self {
        let hist = indicators.macd.hist;
        let ema_alignment = indicators.ema_alignment();

        // Volume and trend-strength are proxied from the MACD histogram.
        let obv_slope = if hist > 0.0 {
            ObvSlope::Up
        } else if hist < 0.0 {
            ObvSlope::Down
        } else {
            ObvSlope::Flat
        };
        let adx = if hist.abs() > 2.0 { 30.0 } else { 15.0 };

        Self {
            rsi: indicators.rsi,
            macd_hist: hist,
            squeeze: indicators.squeeze,
            obv_slope,
            ema_alignment,
            adx,
            supertrend_bullish: ema_alignment,
            rs_positive: ema_alignment,
            latest_breakout: bars.last().map(|b| b.is_breakout).unwrap_or(false),
        }
    }
}

pub fn short_momentum_rules() -> RuleTable<SignalContext> {
    RuleTable::new(
        0,
        vec![
            ScoreRule::new("RSI Strong", 25, |c: &SignalContext| c.rsi > 60.0),
            ScoreRule::new("RSI Neutral", 10, |c: &SignalContext| c.rsi > 40.0 && c.rsi <= 60.0),
            ScoreRule::new("MACD Histogram Positive", 20, |c: &SignalContext| c.macd_hist > 0.0),
            ScoreRule::new("Bollinger Squeeze", 10, |c: &SignalContext| c.squeeze),
            ScoreRule::new("OBV Slope Up", 10, |c: &SignalContext| c.obv_slope == ObvSlope::Up),
        ],
    )
}

pub fn medium_trend_rules() -> RuleTable<SignalContext> {
    RuleTable::new(
        0,
        vec![
            ScoreRule::new("EMA20 Above EMA50", 25, |c: &SignalContext| c.ema_alignment),
            ScoreRule::new("Strong Trend (ADX)", 25, |c: &SignalContext| c.adx >= 25.0),
            ScoreRule::new("Developing Trend (ADX)", 15, |c: &SignalContext| {
                c.adx >= 20.0 && c.adx < 25.0
            }),
            ScoreRule::new("Supertrend Bullish", 15, |c: &SignalContext| c.supertrend_bullish),
            ScoreRule::new("Relative Strength Positive", 15, |c: &SignalContext| c.rs_positive),
        ],
    )
}

pub fn breakout_rules() -> RuleTable<SignalContext> {
    RuleTable::new(
        50,
        vec![
            ScoreRule::new("Breakout Bar", 25, |c: &SignalContext| c.latest_breakout),
            ScoreRule::new("EMA Aligned", 10, |c: &SignalContext| c.ema_alignment),
            ScoreRule::new("RSI Strong", 10, |c: &SignalContext| c.rsi > 60.0),
            ScoreRule::new("MACD Histogram Positive", 5, |c: &SignalContext| c.macd_hist > 0.0),
        ],
    )
}

/// Score a bar series given its precomputed indicators.
///
/// `price` is the current quote; ATR is reported as a percentage of it.
pub fn compute_technical_scores(
    bars: &[Bar],
    indicators: &IndicatorSnapshot,
    price: f64,
) -> TechnicalScores {
    let ctx = SignalContext::new(bars, indicators);

    let short = short_momentum_rules().evaluate(&ctx).capped(100);
    let medium = medium_trend_rules().evaluate(&ctx).capped(100);
    let breakout = breakout_rules().evaluate(&ctx).clamped(10, 95);

    let recent = &bars[bars.len().saturating_sub(RECENT_WINDOW)..];
    let resistance = recent
        .iter()
        .map(|b| b.high)
        .reduce(f64::max)
        .unwrap_or(0.0);
    // Divides by the full window even when fewer bars exist.
    let avg20_vol = recent.iter().map(|b| b.volume.unwrap_or(0.0)).sum::<f64>() / RECENT_WINDOW as f64;

    let atr_pct = if price > 0.0 { indicators.atr / price * 100.0 } else { 0.0 };

    let breakout_status = if ctx.latest_breakout {
        BreakoutStatus::Breakout
    } else {
        BreakoutStatus::Base
    };

    tracing::debug!(
        "Technical scores: short={} ({:?}) medium={} ({:?}) breakout={} ({:?})",
        short.score,
        short.fired,
        medium.score,
        medium.fired,
        breakout.score,
        breakout.fired
    );

    TechnicalScores {
        short_momentum: short.score,
        medium_trend: medium.score,
        ema_alignment: ctx.ema_alignment,
        adx: ctx.adx,
        rsi: indicators.rsi,
        macd_above_zero: indicators.macd.macd > 0.0,
        bb_squeeze: indicators.squeeze,
        obv_slope: ctx.obv_slope,
        supertrend_bullish: ctx.supertrend_bullish,
        rs_positive: ctx.rs_positive,
        atr_pct,
        breakout_status,
        breakout_prob: breakout.score,
        resistance,
        avg20_vol,
        last_breakout_date: bars.iter().rev().find(|b| b.is_breakout).map(|b| b.date),
        signals: merge_signals([&short, &medium, &breakout]),
    }
}

fn merge_signals(outcomes: [&RuleOutcome; 3]) -> Vec<String> {
    let mut signals: Vec<String> = Vec::new();
    for name in outcomes.iter().flat_map(|o| o.fired.iter()) {
        if !signals.iter().any(|s| s == name) {
            signals.push(name.to_string());
        }
    }
    signals
}

/// Technical half of the pipeline: indicators followed by scoring.
pub struct TechnicalScorer;

impl TechnicalScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, stock: &StockData) -> TechnicalScores {
        let indicators = IndicatorSnapshot::compute(&stock.bars);
        compute_technical_scores(&stock.bars, &indicators, stock.price)
    }
}

impl Default for TechnicalScorer {
    fn default() -> Self {
        Self::new()
    }
}
