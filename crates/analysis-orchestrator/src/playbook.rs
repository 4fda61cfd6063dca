//! Horizon playbooks: short-term momentum, medium-term trend and long-term
//! fundamentals, each reduced to a bias, a confidence and a fixed narrative.

use analysis_core::{Bias, FundamentalScores, Horizon, HorizonScenario, TechnicalScores};

/// Stop distance for the short horizon, in multiples of ATR%.
const SHORT_STOP_ATR_MULTIPLE: f64 = 1.5;

fn confidence(raw: f64) -> i32 {
    (raw.round() as i32).clamp(0, 100)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn short_bias(technical: &TechnicalScores) -> Bias {
    if technical.short_momentum > 65 {
        Bias::Bullish
    } else if technical.short_momentum > 40 {
        Bias::Neutral
    } else {
        Bias::Cautious
    }
}

pub fn medium_bias(technical: &TechnicalScores, fundamental: &FundamentalScores) -> Bias {
    if technical.medium_trend > 70 && fundamental.quality > 65 {
        Bias::Bullish
    } else {
        Bias::Neutral
    }
}

pub fn long_bias(fundamental: &FundamentalScores) -> Bias {
    let reasonably_priced = matches!(fundamental.peg, Some(peg) if peg < 2.0);
    if fundamental.quality > 70 && reasonably_priced {
        Bias::Bullish
    } else {
        Bias::Neutral
    }
}

fn short_scenario(technical: &TechnicalScores) -> HorizonScenario {
    HorizonScenario {
        horizon: Horizon::Short,
        bias: short_bias(technical),
        conditions: strings(&["Close above resistance with volume", "ADX >= 25", "RSI > 50"]),
        entry_styles: strings(&["Breakout close", "Retest near breakout line"]),
        stop_examples: vec![
            format!("{:.1}% below entry", technical.atr_pct * SHORT_STOP_ATR_MULTIPLE),
            "Below recent swing low".to_string(),
        ],
        target_bands: strings(&["Next Fibonacci level", "Previous high"]),
        invalidation: "Close below breakout line with rising volume".to_string(),
        monitoring: strings(&["Price crossing key EMA", "RSI dropping below 45"]),
        confidence: confidence(technical.short_momentum as f64 * 0.8 + 15.0),
    }
}

fn medium_scenario(technical: &TechnicalScores, fundamental: &FundamentalScores) -> HorizonScenario {
    HorizonScenario {
        horizon: Horizon::Medium,
        bias: medium_bias(technical, fundamental),
        conditions: strings(&["EMA20 > EMA50", "MACD histogram positive", "Consistent volume"]),
        entry_styles: strings(&["Pullback to 20-day EMA", "Consolidation near support"]),
        stop_examples: strings(&["Close below 50-day EMA"]),
        target_bands: strings(&["52-week high", "Major resistance zone"]),
        invalidation: "Break of the 50-day EMA and medium-term trend".to_string(),
        monitoring: strings(&["EMA crossover events", "Quarterly earnings report"]),
        confidence: confidence(
            technical.medium_trend as f64 * 0.7 + fundamental.quality as f64 * 0.2,
        ),
    }
}

fn long_scenario(fundamental: &FundamentalScores) -> HorizonScenario {
    HorizonScenario {
        horizon: Horizon::Long,
        bias: long_bias(fundamental),
        conditions: strings(&[
            "ROE > 15%",
            "Debt/Equity < 1.5",
            "Consistent profit growth (>10%)",
        ]),
        entry_styles: strings(&["Systematic Investment (SIP)", "Accumulate on major market dips"]),
        stop_examples: strings(&["Fundamental thesis breaks (e.g., loss of market share)"]),
        target_bands: strings(&["Held for 3-5+ years based on business growth"]),
        invalidation: "Significant deterioration in company fundamentals".to_string(),
        monitoring: strings(&["Annual reports", "Competitor landscape changes"]),
        confidence: confidence(fundamental.quality as f64 * 0.6 + fundamental.growth as f64 * 0.4),
    }
}

/// Exactly three scenarios, ordered short, medium, long.
pub fn build_playbooks(
    technical: &TechnicalScores,
    fundamental: &FundamentalScores,
) -> Vec<HorizonScenario> {
    vec![
        short_scenario(technical),
        medium_scenario(technical, fundamental),
        long_scenario(fundamental),
    ]
}
