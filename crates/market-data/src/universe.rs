use analysis_core::FundamentalsRecord;

/// Scripted feature forced onto a generated series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeriesShape {
    /// Random walk only.
    Plain,
    /// Breakout marker `bars_from_end` bars before the end, on `multiplier` x volume.
    Breakout { bars_from_end: usize, multiplier: f64 },
    /// 20-day average pulled progressively above the 50-day over the last ten bars.
    BullishCross,
    /// 20-day average pulled progressively below the 50-day over the last ten bars.
    BearishCross,
}

/// One listed stock in the synthetic universe.
#[derive(Debug, Clone, PartialEq)]
pub struct UniverseEntry {
    pub symbol: &'static str,
    pub name: &'static str,
    /// Last quoted price.
    pub price: f64,
    /// Starting level of the random walk.
    pub base: f64,
    pub shape: SeriesShape,
    pub fundamentals: FundamentalsRecord,
}

#[allow(clippy::too_many_arguments)]
fn fundamentals(
    pe_ratio: f64,
    roe: f64,
    debt_equity: f64,
    sales_growth_3y: f64,
    profit_growth_3y: f64,
    eps_growth_3y: f64,
    sector_pe: f64,
    historical_pe: f64,
    promoter_holding: f64,
) -> FundamentalsRecord {
    FundamentalsRecord {
        pe_ratio,
        roe,
        debt_equity,
        sales_growth_3y,
        profit_growth_3y,
        eps_growth_3y,
        sector_pe,
        historical_pe,
        promoter_holding,
    }
}

fn entry(
    symbol: &'static str,
    name: &'static str,
    price: f64,
    base: f64,
    fundamentals: FundamentalsRecord,
) -> UniverseEntry {
    UniverseEntry {
        symbol,
        name,
        price,
        base,
        shape: SeriesShape::Plain,
        fundamentals,
    }
}

/// NSE large caps with their latest fundamentals.
pub fn nse_large_caps() -> Vec<UniverseEntry> {
    vec![
        UniverseEntry {
            shape: SeriesShape::Breakout { bars_from_end: 3, multiplier: 3.5 },
            ..entry("RELIANCE.NS", "Reliance Industries", 2850.55, 2800.0,
                fundamentals(28.5, 8.9, 0.4, 15.2, 12.5, 11.8, 25.0, 26.0, 50.3))
        },
        entry("TCS.NS", "Tata Consultancy", 3825.90, 3850.0,
            fundamentals(30.2, 45.8, 0.1, 18.5, 15.1, 14.9, 28.0, 32.0, 72.3)),
        UniverseEntry {
            shape: SeriesShape::BearishCross,
            ..entry("HDFCBANK.NS", "HDFC Bank", 1650.20, 1640.0,
                fundamentals(21.0, 17.2, 1.8, 12.1, 18.5, 17.9, 19.5, 23.0, 0.0))
        },
        UniverseEntry {
            shape: SeriesShape::BullishCross,
            ..entry("INFY.NS", "Infosys", 1510.75, 1480.0,
                fundamentals(27.5, 31.2, 0.1, 20.3, 14.8, 14.5, 28.0, 29.0, 15.1))
        },
        entry("ICICIBANK.NS", "ICICI Bank", 1120.40, 1130.0,
            fundamentals(20.5, 18.5, 2.1, 14.2, 25.1, 24.8, 19.5, 22.0, 0.0)),
        entry("ITC.NS", "ITC Limited", 435.10, 430.0,
            fundamentals(25.5, 29.8, 0.0, 10.5, 12.1, 11.9, 27.0, 24.0, 0.0)),
        entry("LT.NS", "Larsen & Toubro", 3580.00, 3600.0,
            fundamentals(35.1, 15.2, 1.2, 14.8, 10.5, 10.2, 40.0, 33.0, 0.0)),
        entry("AXISBANK.NS", "Axis Bank", 1155.60, 1150.0,
            fundamentals(15.6, 14.8, 2.5, 11.5, 40.2, 39.8, 19.5, 18.0, 0.0)),
        entry("HUL.NS", "Hindustan Unilever", 2445.00, 2450.0,
            fundamentals(56.7, 20.1, 0.0, 12.0, 9.0, 8.8, 45.0, 60.0, 61.9)),
        entry("SBIN.NS", "State Bank of India", 835.50, 830.0,
            fundamentals(11.2, 15.1, 1.5, 8.0, 22.0, 21.5, 19.5, 10.0, 57.5)),
        entry("KOTAKBANK.NS", "Kotak Mahindra Bank", 1760.00, 1750.0,
            fundamentals(22.5, 14.1, 1.2, 10.2, 16.5, 16.0, 19.5, 25.0, 25.9)),
        entry("MARUTI.NS", "Maruti Suzuki India", 12550.00, 12500.0,
            fundamentals(30.5, 14.5, 0.1, 18.0, 25.0, 24.5, 35.0, 32.0, 56.4)),
        entry("TATAMOTORS.NS", "Tata Motors", 975.00, 980.0,
            fundamentals(16.2, 18.2, 1.1, 22.0, 30.0, 29.8, 35.0, 20.0, 46.4)),
        entry("SUNPHARMA.NS", "Sun Pharma", 1505.00, 1500.0,
            fundamentals(38.2, 15.8, 0.2, 12.5, 14.0, 13.8, 40.0, 35.0, 54.5)),
        entry("BHARTIARTL.NS", "Bharti Airtel", 1340.00, 1350.0,
            fundamentals(65.1, 10.5, 2.5, 19.0, 45.0, 44.5, 50.0, 60.0, 53.5)),
        entry("WIPRO.NS", "Wipro", 490.00, 480.0,
            fundamentals(22.8, 16.5, 0.3, 15.0, 8.0, 7.8, 28.0, 25.0, 72.9)),
        entry("HCLTECH.NS", "HCL Technologies", 1440.00, 1450.0,
            fundamentals(25.1, 27.8, 0.1, 14.0, 12.0, 11.8, 28.0, 26.0, 60.7)),
        entry("BAJFINANCE.NS", "Bajaj Finance", 7100.00, 7000.0,
            fundamentals(35.5, 23.5, 3.5, 25.0, 30.0, 29.5, 30.0, 40.0, 54.8)),
        entry("TATASTEEL.NS", "Tata Steel", 175.00, 170.0,
            fundamentals(45.1, 5.2, 0.8, 8.0, -10.0, -11.0, 15.0, 10.0, 33.6)),
        entry("ASIANPAINT.NS", "Asian Paints", 2900.00, 2900.0,
            fundamentals(55.2, 28.5, 0.1, 16.0, 18.0, 17.8, 50.0, 65.0, 52.6)),
        entry("ULTRACEMCO.NS", "UltraTech Cement", 10850.00, 10800.0,
            fundamentals(33.8, 14.8, 0.3, 15.0, 10.0, 9.8, 30.0, 35.0, 59.9)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_symbols_unique() {
        let universe = nse_large_caps();
        let symbols: HashSet<&str> = universe.iter().map(|e| e.symbol).collect();
        assert_eq!(symbols.len(), universe.len());
        assert_eq!(universe.len(), 21);
    }

    #[test]
    fn test_scripted_shapes() {
        let universe = nse_large_caps();
        let shape = |symbol: &str| universe.iter().find(|e| e.symbol == symbol).map(|e| e.shape);
        assert_eq!(
            shape("RELIANCE.NS"),
            Some(SeriesShape::Breakout { bars_from_end: 3, multiplier: 3.5 })
        );
        assert_eq!(shape("INFY.NS"), Some(SeriesShape::BullishCross));
        assert_eq!(shape("HDFCBANK.NS"), Some(SeriesShape::BearishCross));
        assert_eq!(shape("TCS.NS"), Some(SeriesShape::Plain));
    }
}
