#[cfg(test)]
mod tests {
    use super::super::indicators::*;
    use analysis_core::Bar;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate};

    // Helper function to create sample price data
    fn sample_prices() -> Vec<f64> {
        vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 45.61, 46.28, 46.28, 46.00, 46.03, 46.41, 46.22, 45.64,
            46.21, 46.25, 45.71, 46.45, 45.78, 45.35, 44.03, 44.18, 44.22, 44.57,
        ]
    }

    fn day(i: usize) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap() + Duration::days(i as i64)
    }

    // Helper function to create sample bars
    fn sample_bars() -> Vec<Bar> {
        let prices = vec![
            (100.0, 102.0, 99.0, 101.0),
            (101.0, 103.0, 100.0, 102.0),
            (102.0, 104.0, 101.0, 103.0),
            (103.0, 105.0, 102.0, 104.0),
            (104.0, 106.0, 103.0, 105.0),
            (105.0, 107.0, 104.0, 106.0),
            (106.0, 108.0, 105.0, 107.0),
            (107.0, 109.0, 106.0, 108.0),
            (108.0, 110.0, 107.0, 109.0),
            (109.0, 111.0, 108.0, 110.0),
            (110.0, 112.0, 109.0, 111.0),
            (111.0, 113.0, 110.0, 112.0),
            (112.0, 114.0, 111.0, 113.0),
            (113.0, 115.0, 112.0, 114.0),
            (114.0, 116.0, 113.0, 115.0),
        ];

        prices
            .into_iter()
            .enumerate()
            .map(|(i, (open, high, low, close))| {
                Bar::new(day(i), open, high, low, close).with_volume(1_000_000.0)
            })
            .collect()
    }

    #[test]
    fn test_rsi_insufficient_data_is_neutral() {
        assert_eq!(rsi14(&[1.0, 2.0, 3.0]), 50.0);
        assert_eq!(rsi14(&sample_prices()[..14]), 50.0);
    }

    #[test]
    fn test_rsi_monotonic_increase_is_maximal() {
        let uptrend: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        assert_eq!(rsi14(&uptrend), 100.0);
    }

    #[test]
    fn test_rsi_monotonic_decrease_is_zero() {
        let downtrend: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        assert_relative_eq!(rsi14(&downtrend), 0.0);
    }

    #[test]
    fn test_rsi_known_value() {
        // Seven +2 gains and seven -1 losses: RS = 1.0 / 0.5 = 2
        let mut closes = vec![100.0];
        for _ in 0..7 {
            let last = *closes.last().unwrap();
            closes.push(last + 2.0);
            closes.push(last + 1.0);
        }
        assert_eq!(closes.len(), 15);
        assert_relative_eq!(rsi14(&closes), 100.0 - 100.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rsi_only_uses_trailing_window() {
        let tail: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
        let mut with_history = vec![500.0, 20.0, 300.0];
        with_history.extend_from_slice(&tail);
        assert_eq!(rsi14(&with_history), rsi14(&tail));
    }

    #[test]
    fn test_rsi_bounded() {
        let rsi = rsi14(&sample_prices());
        assert!((0.0..=100.0).contains(&rsi));
    }

    #[test]
    fn test_macd_insufficient_data() {
        let result = macd_default(&sample_prices()[..25]);
        assert_eq!(result, MacdResult::default());
        assert!(result.macd_series.is_empty());
        assert_eq!(result.macd, 0.0);
        assert_eq!(result.signal, 0.0);
        assert_eq!(result.hist, 0.0);
    }

    #[test]
    fn test_macd_basic() {
        let prices = sample_prices();
        let result = macd(&prices, 12, 26, 9);

        assert_eq!(result.macd_series.len(), prices.len());
        assert_relative_eq!(result.macd, *result.macd_series.last().unwrap());
        // Histogram should be macd - signal
        assert_relative_eq!(result.hist, result.macd - result.signal, epsilon = 1e-12);
    }

    #[test]
    fn test_macd_positive_in_uptrend() {
        let uptrend: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let result = macd_default(&uptrend);
        assert!(result.macd > 0.0);
        assert!(result.macd_series.iter().skip(1).all(|v| *v > 0.0));
    }

    #[test]
    fn test_macd_constant_series_is_flat() {
        let result = macd_default(&[250.0; 30]);
        assert_relative_eq!(result.macd, 0.0, epsilon = 1e-9);
        assert_relative_eq!(result.signal, 0.0, epsilon = 1e-9);
        assert_relative_eq!(result.hist, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_atr_basic() {
        // Every bar has a 3-point range and gaps by 1 from the prior close
        assert_relative_eq!(atr14(&sample_bars()), 3.0);
    }

    #[test]
    fn test_atr_insufficient_data() {
        assert_eq!(atr14(&sample_bars()[..14]), 0.0);
        assert_eq!(atr14(&[]), 0.0);
    }

    #[test]
    fn test_true_range_uses_previous_close_on_gaps() {
        let bar = Bar::new(day(0), 108.5, 110.0, 108.0, 109.0);
        assert_relative_eq!(true_range(&bar, 100.0), 10.0);
        assert_relative_eq!(true_range(&bar, 120.0), 12.0);
        assert_relative_eq!(true_range(&bar, 109.0), 2.0);
    }

    #[test]
    fn test_atr_increases_with_volatility() {
        let normal_atr = atr14(&sample_bars());

        let mut volatile_bars = sample_bars();
        for bar in &mut volatile_bars {
            bar.high += 10.0;
            bar.low -= 10.0;
        }

        assert!(atr14(&volatile_bars) > normal_atr);
    }

    #[test]
    fn test_bollinger_insufficient_data() {
        let result = bollinger_default(&sample_prices()[..19]);
        assert!(result.upper.is_empty());
        assert!(result.middle.is_empty());
        assert!(result.lower.is_empty());
        assert!(result.bandwidth.is_empty());
    }

    #[test]
    fn test_bollinger_bands_basic() {
        let prices = sample_prices();
        let result = bollinger(&prices, 20, 2.0);

        assert_eq!(result.middle.len(), prices.len() - 19);
        assert_eq!(result.upper.len(), result.middle.len());
        assert_eq!(result.lower.len(), result.middle.len());
        assert_eq!(result.bandwidth.len(), result.middle.len());
    }

    #[test]
    fn test_bollinger_bands_ordering() {
        let result = bollinger(&sample_prices(), 10, 2.0);

        for i in 0..result.upper.len() {
            assert!(result.upper[i] > result.middle[i]);
            assert!(result.middle[i] > result.lower[i]);
            assert!(result.bandwidth[i] > 0.0);
        }
    }

    #[test]
    fn test_bollinger_constant_prices_collapse() {
        for price in [100.0, 0.1, 46.28, 1650.2, 2850.55] {
            let result = bollinger_default(&[price; 25]);

            assert_eq!(result.middle.len(), 6);
            for i in 0..result.middle.len() {
                assert_eq!(result.middle[i], price);
                assert_eq!(result.upper[i], result.middle[i]);
                assert_eq!(result.lower[i], result.middle[i]);
                assert_eq!(result.bandwidth[i], 0.0);
            }
        }
    }

    #[test]
    fn test_bollinger_bandwidth_formula() {
        let closes = [1.0, 2.0, 3.0, 4.0, 5.0];
        let result = bollinger(&closes, 5, 2.0);
        let sigma = 2.0_f64.sqrt();
        assert_relative_eq!(result.middle[0], 3.0);
        assert_relative_eq!(result.upper[0], 3.0 + 2.0 * sigma, epsilon = 1e-12);
        assert_relative_eq!(result.bandwidth[0], 4.0 * sigma / 3.0 * 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bollinger_zero_mean_guarded() {
        let result = bollinger(&[0.0; 5], 5, 2.0);
        assert_eq!(result.bandwidth, vec![0.0]);
    }

    #[test]
    fn test_squeeze_insufficient_data() {
        assert!(!is_squeeze_present(&[10.0; 19], 0.2));
        assert!(!is_squeeze_present(&[], 0.2));
    }

    #[test]
    fn test_squeeze_detected_on_contraction() {
        let mut bandwidth = vec![10.0; 39];
        bandwidth.push(5.0);
        assert!(is_squeeze_present(&bandwidth, 0.2));
    }

    #[test]
    fn test_squeeze_not_detected_on_mild_contraction() {
        let mut bandwidth = vec![10.0; 25];
        bandwidth.push(9.0);
        assert!(!is_squeeze_present(&bandwidth, 0.2));
    }

    #[test]
    fn test_squeeze_only_averages_trailing_forty() {
        // Old wide bands fall outside the lookback
        let mut bandwidth = vec![1000.0; 30];
        bandwidth.extend(vec![6.0; 39]);
        bandwidth.push(5.0);
        assert!(!is_squeeze_present(&bandwidth, 0.2));
    }

    #[test]
    fn test_squeeze_zero_average_guarded() {
        assert!(!is_squeeze_present(&[0.0; 30], 0.2));
    }

    #[test]
    fn test_snapshot_prefers_overlay_averages() {
        let mut bars = sample_bars();
        let last = bars.len() - 1;
        bars[last] = bars[last].clone().with_averages(90.0, 95.0);

        let snapshot = IndicatorSnapshot::compute(&bars);
        assert_eq!(snapshot.ema20, Some(90.0));
        assert_eq!(snapshot.ema50, Some(95.0));
        assert!(!snapshot.ema_alignment());
    }

    #[test]
    fn test_snapshot_computes_averages_without_overlay() {
        let snapshot = IndicatorSnapshot::compute(&sample_bars());
        assert!(snapshot.ema_alignment());
        assert_relative_eq!(snapshot.atr, 3.0);
        assert_relative_eq!(snapshot.rsi, 100.0);
        assert!(!snapshot.squeeze);
        assert!(snapshot.bollinger.middle.is_empty());
    }

    #[test]
    fn test_snapshot_of_empty_series() {
        let snapshot = IndicatorSnapshot::compute(&[]);
        assert_eq!(snapshot.rsi, 50.0);
        assert_eq!(snapshot.atr, 0.0);
        assert_eq!(snapshot.ema20, None);
        assert!(!snapshot.ema_alignment());
    }
}
