//! Automatic histogram binning.
//!
//! Bin width follows the numpy "auto" rule:
//!
//! * Sturges: `h_s = (max - min) / (log2(n) + 1)`
//! * Freedman-Diaconis: `h_fd = 2 * IQR * n^(-1/3)`
//! * width = `min(h_fd, h_s)` when `h_fd > 0`, otherwise `h_s`
//!
//! The bin count is `ceil((max - min) / width)`, clamped to
//! `1..=`[`MAX_BINS`], and edges are spaced evenly from `min` to `max`. Every
//! bin is half-open `[lo, hi)` except the last, which also includes `max`.
//! Constant input yields a single bin `[v, v]` holding every value.

use serde::{Deserialize, Serialize};

/// Upper bound on the number of bins a single histogram may allocate.
pub const MAX_BINS: usize = 10_000;

/// One histogram bin as reported to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// `"lo - hi"`, both edges with two decimals
    #[serde(rename = "range")]
    pub range_label: String,
    pub frequency: usize,
}

impl HistogramBin {
    fn new(lo: f64, hi: f64, frequency: usize) -> Self {
        Self {
            range_label: format!("{:.2} - {:.2}", lo, hi),
            frequency,
        }
    }
}

/// Number of bins the "auto" rule picks for a sorted sample with the given IQR.
pub fn auto_bin_count(sorted: &[f64], iqr: f64) -> usize {
    let n = sorted.len();
    if n < 2 {
        return 1;
    }

    let span = sorted[n - 1] - sorted[0];
    if span <= 0.0 {
        return 1;
    }

    let n_f = n as f64;
    let sturges = span / (n_f.log2() + 1.0);
    let freedman_diaconis = 2.0 * iqr * n_f.powf(-1.0 / 3.0);

    let width = if freedman_diaconis > 0.0 {
        freedman_diaconis.min(sturges)
    } else {
        sturges
    };

    let bins = (span / width).ceil();
    if bins.is_finite() && bins >= 1.0 {
        (bins as usize).min(MAX_BINS)
    } else {
        1
    }
}

/// Build a histogram over a sorted, non-empty slice.
pub fn build_histogram(sorted: &[f64], iqr: f64) -> Vec<HistogramBin> {
    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return Vec::new();
    };

    if max <= min {
        return vec![HistogramBin::new(min, max, sorted.len())];
    }

    let bins = auto_bin_count(sorted, iqr);
    let edges = bin_edges(min, max, bins);
    let mut counts = vec![0usize; bins];
    for &value in sorted {
        counts[bin_index(value, &edges)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, frequency)| HistogramBin::new(edges[i], edges[i + 1], frequency))
        .collect()
}

/// `bins + 1` evenly spaced edges; the last edge is exactly `max`.
fn bin_edges(min: f64, max: f64, bins: usize) -> Vec<f64> {
    let step = (max - min) / bins as f64;
    let mut edges: Vec<f64> = (0..=bins).map(|i| min + step * i as f64).collect();
    edges[bins] = max;
    edges
}

/// Bin holding `value`, given edges from [`bin_edges`].
///
/// The index is estimated arithmetically and then nudged by one so that it
/// agrees with the stored edges despite rounding.
fn bin_index(value: f64, edges: &[f64]) -> usize {
    let bins = edges.len() - 1;
    let min = edges[0];
    let max = edges[bins];

    let estimate = ((value - min) / (max - min) * bins as f64).floor();
    let mut index = if estimate <= 0.0 {
        0
    } else {
        (estimate as usize).min(bins - 1)
    };

    if index > 0 && value < edges[index] {
        index -= 1;
    } else if index + 1 < bins && value >= edges[index + 1] {
        index += 1;
    }
    index
}
