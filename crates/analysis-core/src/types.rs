use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Daily OHLCV bar as handed over by a data source.
///
/// `high >= max(open, close)` and `low <= min(open, close)` are expected but
/// never enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub is_breakout: bool,
    #[serde(default)]
    pub breakout_volume_multiplier: Option<f64>,
    /// 20-day average overlay supplied by the data source, if any.
    #[serde(default)]
    pub ema20: Option<f64>,
    /// 50-day average overlay supplied by the data source, if any.
    #[serde(default)]
    pub ema50: Option<f64>,
}

impl Bar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume: None,
            is_breakout: false,
            breakout_volume_multiplier: None,
            ema20: None,
            ema50: None,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Mark this bar as a breakout on `multiplier` times average volume.
    pub fn with_breakout(mut self, multiplier: f64) -> Self {
        self.is_breakout = true;
        self.breakout_volume_multiplier = Some(multiplier);
        self
    }

    pub fn with_averages(mut self, ema20: f64, ema50: f64) -> Self {
        self.ema20 = Some(ema20);
        self.ema50 = Some(ema50);
        self
    }
}

/// Static fundamentals snapshot. Ratios are in percent where applicable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FundamentalsRecord {
    pub pe_ratio: f64,
    pub roe: f64,
    pub debt_equity: f64,
    pub sales_growth_3y: f64,
    pub profit_growth_3y: f64,
    pub eps_growth_3y: f64,
    pub sector_pe: f64,
    pub historical_pe: f64,
    pub promoter_holding: f64,
}

/// Everything the pipeline needs to analyze one stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StockData {
    pub symbol: String,
    pub name: String,
    /// Latest quoted price, used to express ATR as a percentage.
    pub price: f64,
    pub bars: Vec<Bar>,
    pub fundamentals: FundamentalsRecord,
}

/// Direction of the on-balance-volume proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ObvSlope {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum BreakoutStatus {
    Base,
    Breakout,
    Retest,
    Trend,
}

impl BreakoutStatus {
    pub fn to_label(&self) -> &'static str {
        match self {
            BreakoutStatus::Base => "Base",
            BreakoutStatus::Breakout => "Breakout",
            BreakoutStatus::Retest => "Retest",
            BreakoutStatus::Trend => "Trend",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ValuationFlag {
    Undervalued,
    Fair,
    Expensive,
}

impl ValuationFlag {
    /// Classify a PEG ratio. An undefined PEG (no positive growth) is treated
    /// as expensive.
    pub fn from_peg(peg: Option<f64>) -> Self {
        match peg {
            Some(p) if p < 1.0 => ValuationFlag::Undervalued,
            Some(p) if p < 2.0 => ValuationFlag::Fair,
            _ => ValuationFlag::Expensive,
        }
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            ValuationFlag::Undervalued => "Undervalued",
            ValuationFlag::Fair => "Fair",
            ValuationFlag::Expensive => "Expensive",
        }
    }
}

/// Technical view derived from a bar series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TechnicalScores {
    /// 0-100
    pub short_momentum: i32,
    /// 0-100
    pub medium_trend: i32,
    pub ema_alignment: bool,
    /// Trend-strength proxy derived from the MACD histogram, not a true ADX.
    pub adx: f64,
    pub rsi: f64,
    pub macd_above_zero: bool,
    pub bb_squeeze: bool,
    pub obv_slope: ObvSlope,
    pub supertrend_bullish: bool,
    pub rs_positive: bool,
    pub atr_pct: f64,
    pub breakout_status: BreakoutStatus,
    /// 10-95
    pub breakout_prob: i32,
    pub resistance: f64,
    pub avg20_vol: f64,
    #[serde(default)]
    pub last_breakout_date: Option<NaiveDate>,
    /// Names of the scoring rules that fired.
    #[serde(default)]
    pub signals: Vec<String>,
}

/// Fundamental view derived from a [`FundamentalsRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FundamentalScores {
    pub quality: i32,
    /// Capped at 100 but negative when profits shrink.
    pub growth: i32,
    pub value: i32,
    pub stability: i32,
    pub roe: f64,
    pub roce: f64,
    pub sales_growth_3y: f64,
    pub profit_growth_3y: f64,
    pub eps_growth_3y: f64,
    pub pe: f64,
    pub pb: f64,
    /// `None` when profit growth is zero or negative.
    pub peg: Option<f64>,
    pub debt_equity: f64,
    pub promoter_holding: f64,
    pub valuation_flag: ValuationFlag,
    #[serde(default)]
    pub signals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ValuationSnapshot {
    pub pe_vs_sector_pct: f64,
    pub peg: Option<f64>,
    pub flag: ValuationFlag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Horizon {
    Short,
    Medium,
    Long,
}

impl Horizon {
    pub const ALL: [Horizon; 3] = [Horizon::Short, Horizon::Medium, Horizon::Long];

    pub fn to_label(&self) -> &'static str {
        match self {
            Horizon::Short => "short",
            Horizon::Medium => "medium",
            Horizon::Long => "long",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Bias {
    Bullish,
    Neutral,
    Cautious,
}

impl Bias {
    pub fn to_label(&self) -> &'static str {
        match self {
            Bias::Bullish => "bullish",
            Bias::Neutral => "neutral",
            Bias::Cautious => "cautious",
        }
    }
}

/// Narrative playbook for one investment horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HorizonScenario {
    pub horizon: Horizon,
    pub bias: Bias,
    pub conditions: Vec<String>,
    pub entry_styles: Vec<String>,
    pub stop_examples: Vec<String>,
    pub target_bands: Vec<String>,
    pub invalidation: String,
    pub monitoring: Vec<String>,
    /// 0-100
    pub confidence: i32,
}

/// Complete analysis of one stock, built fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StockAnalysis {
    pub symbol: String,
    pub generated_at: DateTime<Utc>,
    pub technical: TechnicalScores,
    pub fundamental: FundamentalScores,
    pub valuation: ValuationSnapshot,
    /// Exactly one scenario per horizon, ordered short, medium, long.
    pub scenarios: Vec<HorizonScenario>,
}

impl StockAnalysis {
    pub fn scenario(&self, horizon: Horizon) -> Option<&HorizonScenario> {
        self.scenarios.iter().find(|s| s.horizon == horizon)
    }
}
