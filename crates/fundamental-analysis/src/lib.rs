use analysis_core::{
    FundamentalScores, FundamentalsRecord, RuleTable, ScoreRule, ValuationFlag, ValuationSnapshot,
};

pub fn quality_rules() -> RuleTable<FundamentalsRecord> {
    RuleTable::new(
        50,
        vec![
            // ROE > 15% is generally considered good
            ScoreRule::new("Strong ROE", 30, |f: &FundamentalsRecord| f.roe > 15.0),
            ScoreRule::new("Manageable Debt", 20, |f: &FundamentalsRecord| f.debt_equity < 1.5),
        ],
    )
}

pub fn value_rules() -> RuleTable<FundamentalsRecord> {
    RuleTable::new(
        40,
        vec![
            ScoreRule::new("Below Sector P/E", 30, |f: &FundamentalsRecord| f.pe_ratio < f.sector_pe),
            ScoreRule::new("Below Historical P/E", 30, |f: &FundamentalsRecord| {
                f.pe_ratio < f.historical_pe
            }),
        ],
    )
}

pub fn stability_rules() -> RuleTable<FundamentalsRecord> {
    RuleTable::new(
        30,
        vec![
            ScoreRule::new("Moderate Leverage", 30, |f: &FundamentalsRecord| f.debt_equity < 2.5),
            ScoreRule::new("Low Leverage", 30, |f: &FundamentalsRecord| f.debt_equity < 1.0),
        ],
    )
}

/// P/E divided by 3-year profit growth. Undefined without positive growth.
pub fn calculate_peg(pe_ratio: f64, profit_growth_3y: f64) -> Option<f64> {
    if profit_growth_3y > 0.0 {
        Some(pe_ratio / profit_growth_3y)
    } else {
        None
    }
}

fn calculate_pb_estimate(pe_ratio: f64, roe: f64) -> f64 {
    if roe != 0.0 {
        pe_ratio / roe
    } else {
        0.0
    }
}

fn round_score(value: f64) -> i32 {
    value.round() as i32
}

pub fn compute_fundamental_scores(record: &FundamentalsRecord) -> FundamentalScores {
    let quality = quality_rules().evaluate(record);
    let value = value_rules().evaluate(record);
    let stability = stability_rules().evaluate(record);
    let growth = round_score((record.profit_growth_3y * 3.0).min(100.0));

    let peg = calculate_peg(record.pe_ratio, record.profit_growth_3y);
    if peg.is_none() {
        tracing::debug!(
            "PEG undefined for profit growth {:.2}; valuation flagged expensive",
            record.profit_growth_3y
        );
    }

    let signals = quality
        .fired
        .iter()
        .chain(&value.fired)
        .chain(&stability.fired)
        .map(|name| name.to_string())
        .collect();

    FundamentalScores {
        quality: quality.score,
        growth,
        value: value.score,
        stability: stability.score,
        roe: record.roe,
        roce: record.roe,
        sales_growth_3y: record.sales_growth_3y,
        profit_growth_3y: record.profit_growth_3y,
        eps_growth_3y: record.eps_growth_3y,
        pe: record.pe_ratio,
        pb: calculate_pb_estimate(record.pe_ratio, record.roe),
        peg,
        debt_equity: record.debt_equity,
        promoter_holding: record.promoter_holding,
        valuation_flag: ValuationFlag::from_peg(peg),
        signals,
    }
}

/// P/E premium to the sector in percent, alongside PEG and its flag.
pub fn valuation_snapshot(record: &FundamentalsRecord, scores: &FundamentalScores) -> ValuationSnapshot {
    let pe_vs_sector_pct = if record.sector_pe != 0.0 {
        (record.pe_ratio / record.sector_pe - 1.0) * 100.0
    } else {
        0.0
    };

    ValuationSnapshot {
        pe_vs_sector_pct,
        peg: scores.peg,
        flag: scores.valuation_flag,
    }
}

pub struct FundamentalScorer;

impl FundamentalScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, record: &FundamentalsRecord) -> FundamentalScores {
        compute_fundamental_scores(record)
    }
}

impl Default for FundamentalScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quality_compounder() -> FundamentalsRecord {
        FundamentalsRecord {
            pe_ratio: 15.0,
            roe: 20.0,
            debt_equity: 0.5,
            sales_growth_3y: 10.0,
            profit_growth_3y: 12.0,
            eps_growth_3y: 11.0,
            sector_pe: 20.0,
            historical_pe: 18.0,
            promoter_holding: 50.0,
        }
    }

    #[test]
    fn test_quality_compounder_scores() {
        let scores = compute_fundamental_scores(&quality_compounder());
        assert_eq!(scores.quality, 100);
        assert_eq!(scores.value, 100);
        assert_eq!(scores.stability, 90);
        assert_eq!(scores.growth, 36);
        assert_relative_eq!(scores.peg.unwrap(), 1.25);
        assert_eq!(scores.valuation_flag, ValuationFlag::Fair);
        assert_relative_eq!(scores.pb, 0.75);
        assert_relative_eq!(scores.roce, 20.0);
    }

    #[test]
    fn test_weak_leveraged_company() {
        let record = FundamentalsRecord {
            pe_ratio: 45.1,
            roe: 5.2,
            debt_equity: 3.5,
            profit_growth_3y: 10.0,
            sector_pe: 15.0,
            historical_pe: 10.0,
            ..Default::default()
        };
        let scores = compute_fundamental_scores(&record);
        assert_eq!(scores.quality, 50);
        assert_eq!(scores.value, 40);
        assert_eq!(scores.stability, 30);
        assert_eq!(scores.valuation_flag, ValuationFlag::Expensive);
        assert!(scores.signals.is_empty());
    }

    #[test]
    fn test_stability_bands() {
        let mut record = quality_compounder();
        record.debt_equity = 1.0;
        assert_eq!(compute_fundamental_scores(&record).stability, 60);
        record.debt_equity = 2.49;
        assert_eq!(compute_fundamental_scores(&record).stability, 60);
        record.debt_equity = 2.5;
        assert_eq!(compute_fundamental_scores(&record).stability, 30);
    }

    #[test]
    fn test_growth_capped_but_not_floored() {
        let mut record = quality_compounder();
        record.profit_growth_3y = 45.0;
        assert_eq!(compute_fundamental_scores(&record).growth, 100);
        record.profit_growth_3y = -10.0;
        assert_eq!(compute_fundamental_scores(&record).growth, -30);
    }

    #[test]
    fn test_peg_undefined_without_growth() {
        let mut record = quality_compounder();
        record.profit_growth_3y = 0.0;
        let scores = compute_fundamental_scores(&record);
        assert_eq!(scores.peg, None);
        assert_eq!(scores.valuation_flag, ValuationFlag::Expensive);

        record.profit_growth_3y = -5.0;
        assert_eq!(compute_fundamental_scores(&record).peg, None);
    }

    #[test]
    fn test_undervalued_flag() {
        let mut record = quality_compounder();
        record.profit_growth_3y = 30.0;
        assert_eq!(compute_fundamental_scores(&record).valuation_flag, ValuationFlag::Undervalued);
    }

    #[test]
    fn test_valuation_snapshot() {
        let record = quality_compounder();
        let scores = compute_fundamental_scores(&record);
        let snapshot = valuation_snapshot(&record, &scores);
        assert_relative_eq!(snapshot.pe_vs_sector_pct, -25.0, epsilon = 1e-9);
        assert_eq!(snapshot.peg, scores.peg);
        assert_eq!(snapshot.flag, ValuationFlag::Fair);
    }

    #[test]
    fn test_valuation_snapshot_zero_sector_pe() {
        let record = FundamentalsRecord { pe_ratio: 12.0, ..Default::default() };
        let scores = compute_fundamental_scores(&record);
        assert_eq!(valuation_snapshot(&record, &scores).pe_vs_sector_pct, 0.0);
        assert_eq!(scores.pb, 0.0);
    }

    #[test]
    fn test_signals_name_fired_rules() {
        let scores = compute_fundamental_scores(&quality_compounder());
        assert_eq!(
            scores.signals,
            vec![
                "Strong ROE",
                "Manageable Debt",
                "Below Sector P/E",
                "Below Historical P/E",
                "Moderate Leverage",
                "Low Leverage",
            ]
        );
    }
}
