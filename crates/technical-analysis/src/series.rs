//! Rolling-window primitives shared by the indicator engine.

/// Simple Moving Average.
///
/// Output has `values.len() - period + 1` points, each the mean of the
/// trailing `period` values ending at that index. Uses a running sum, so every
/// input enters and leaves the window exactly once.
///
/// The sum runs over deviations from the first value, so a constant window
/// averages to exactly that value.
pub fn sma(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return vec![];
    }

    let anchor = values[0];
    let mut result = Vec::with_capacity(values.len() - period + 1);
    let mut sum: f64 = values[..period - 1].iter().map(|v| v - anchor).sum();
    for i in period - 1..values.len() {
        sum += values[i] - anchor;
        result.push(anchor + sum / period as f64);
        sum -= values[i + 1 - period] - anchor;
    }
    result
}

/// Exponential Moving Average, same length as the input.
///
/// Seeded with the first raw value rather than an SMA of the first `period`
/// values; early points are biased toward `values[0]` on short series.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return vec![];
    };

    let k = 2.0 / (period as f64 + 1.0);
    let mut result = Vec::with_capacity(values.len());
    let mut prev = first;
    result.push(prev);
    for &v in &values[1..] {
        prev = v * k + prev * (1.0 - k);
        result.push(prev);
    }
    result
}

/// Trailing `len` elements of `series`, or all of it when shorter.
///
/// Series produced from the same input with different warm-up lengths end on
/// the same bar, so aligning them means keeping their common tail.
pub fn align_trailing(series: &[f64], len: usize) -> &[f64] {
    &series[series.len().saturating_sub(len)..]
}

/// Truncate two series to their common trailing length.
pub fn align_pair<'a>(a: &'a [f64], b: &'a [f64]) -> (&'a [f64], &'a [f64]) {
    let len = a.len().min(b.len());
    (align_trailing(a, len), align_trailing(b, len))
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation of `values` around a known `mean`.
pub fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
