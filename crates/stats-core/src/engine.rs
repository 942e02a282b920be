//! Descriptive statistics for a validated sample.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::histogram::{build_histogram, HistogramBin};
use crate::outliers::OutlierFence;
use crate::percentiles::median_sorted;
use crate::sample::NumericSample;

/// Decimal places kept for every rounded field of [`StatisticsReport`].
pub const REPORT_DECIMALS: usize = 4;

/// Result of analysing one sample.
///
/// `min` and `max` are exact; the other real-valued summaries are rounded to
/// [`REPORT_DECIMALS`] places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Every value tied at the highest frequency, ascending
    pub mode: Vec<f64>,
    /// Sample standard deviation (n - 1)
    pub std_dev: f64,
    /// Sample variance (n - 1)
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    /// Values outside the IQR fence, in input order
    pub outliers: Vec<f64>,
    pub histogram: Vec<HistogramBin>,
    pub timestamp: DateTime<Utc>,
}

/// Compute the full statistics report for `sample`.
pub fn analyze(sample: &NumericSample) -> StatisticsReport {
    let values = sample.values();
    let sorted = sample.sorted();
    let count = sorted.len();

    let min = sorted[0];
    let max = sorted[count - 1];
    let mean = mean(values);
    let variance = sample_variance(values, mean);

    let fence = OutlierFence::from_sorted(&sorted);
    let outliers = fence.outliers(values);
    let histogram = build_histogram(&sorted, fence.iqr);

    debug!(
        count,
        outliers = outliers.len(),
        bins = histogram.len(),
        "computed statistics"
    );

    StatisticsReport {
        count,
        mean: round_to(mean, REPORT_DECIMALS),
        median: round_to(median_sorted(&sorted), REPORT_DECIMALS),
        mode: modes(values),
        std_dev: round_to(variance.sqrt(), REPORT_DECIMALS),
        variance: round_to(variance, REPORT_DECIMALS),
        min,
        max,
        range: round_to(max - min, REPORT_DECIMALS),
        q1: round_to(fence.q1, REPORT_DECIMALS),
        q3: round_to(fence.q3, REPORT_DECIMALS),
        iqr: round_to(fence.iqr, REPORT_DECIMALS),
        outliers,
        histogram,
        timestamp: Utc::now(),
    }
}

/// Arithmetic mean. Callers guarantee a non-empty slice.
///
/// Finite whenever the inputs are: if the plain sum overflows, the values are
/// averaged again after scaling them down by a power of two.
pub fn mean(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let sum: f64 = values.iter().sum();
    if sum.is_finite() {
        return sum / n;
    }

    let scale = power_of_two_scale(values.iter().map(|x| x.abs()));
    let scaled_mean = values.iter().map(|&x| x / scale).sum::<f64>() / n * scale;
    // keep within the data; a constant sample gets its own value back
    let (lo, hi) = bounds(values);
    scaled_mean.max(lo).min(hi)
}

/// Smallest and largest value.
pub(crate) fn bounds(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Variance with the n - 1 divisor; zero for fewer than two values.
///
/// The sum of squares is rescaled when it overflows, so the result is
/// infinite only when the variance itself exceeds `f64::MAX`.
pub fn sample_variance(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let dof = (values.len() - 1) as f64;
    let squared_diffs: f64 = values.iter().map(|&x| (x - mean).powi(2)).sum();
    if squared_diffs.is_finite() {
        return squared_diffs / dof;
    }

    let scale = power_of_two_scale(values.iter().map(|&x| (x - mean).abs()));
    let scaled: f64 = values.iter().map(|&x| ((x - mean) / scale).powi(2)).sum();
    scaled / dof * scale * scale
}

/// Largest power of two not above the biggest magnitude, or 1 when there is
/// none. Dividing by it is exact and brings every magnitude below 2.
fn power_of_two_scale(magnitudes: impl Iterator<Item = f64>) -> f64 {
    const EXPONENT_BITS: u64 = 0x7ff0_0000_0000_0000;

    let largest = magnitudes.fold(0.0, f64::max);
    // keep only the exponent; log2 rounds up to 1024 near f64::MAX
    let scale = f64::from_bits(largest.to_bits() & EXPONENT_BITS);
    if scale > 0.0 && scale.is_finite() {
        scale
    } else {
        1.0
    }
}

/// Sample standard deviation.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    sample_variance(values, mean(values)).sqrt()
}

/// All values sharing the highest frequency, in ascending order.
///
/// Values are grouped by exact equality, so `-0.0` and `0.0` count as one.
pub fn modes(values: &[f64]) -> Vec<f64> {
    let mut freq: BTreeMap<OrderedFloat<f64>, usize> = BTreeMap::new();
    for &value in values {
        *freq.entry(OrderedFloat(value)).or_insert(0) += 1;
    }

    let max_freq = freq.values().copied().max().unwrap_or(0);
    freq.into_iter()
        .filter(|&(_, n)| n == max_freq)
        .map(|(value, _)| value.into_inner())
        .collect()
}

/// Round to `decimals` places.
///
/// Rounding is decided on the exact binary value and ties go to the even
/// digit, so `0.125` becomes `0.12` and `2.675` (stored just below) becomes
/// `2.67`. Non-finite values pass through unchanged.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.decimals$}").parse().unwrap_or(value)
}
