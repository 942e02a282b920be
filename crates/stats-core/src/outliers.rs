//! Outlier detection using the Interquartile Range (IQR) method.
//!
//! [`OutlierFence`] is the only outlier rule in the crate. The statistics
//! report and the quality score both go through it, so the two always agree
//! on which values are outliers.

use crate::percentiles::percentile_sorted;
use crate::sample::NumericSample;

/// Tukey fence multiplier.
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Quartiles and the fence `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]` derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierFence {
    /// First quartile (25th percentile)
    pub q1: f64,
    /// Third quartile (75th percentile)
    pub q3: f64,
    /// Interquartile range (Q3 - Q1)
    pub iqr: f64,
    /// Lower fence (Q1 - 1.5*IQR)
    pub lower: f64,
    /// Upper fence (Q3 + 1.5*IQR)
    pub upper: f64,
}

impl OutlierFence {
    /// Compute the fence for a validated sample.
    ///
    /// # Examples
    ///
    /// ```
    /// use stats_core::{NumericSample, OutlierFence};
    ///
    /// let sample = NumericSample::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
    /// let fence = OutlierFence::from_sample(&sample);
    /// assert_eq!(fence.outliers(sample.values()), vec![100.0]);
    /// ```
    pub fn from_sample(sample: &NumericSample) -> Self {
        Self::from_sorted(&sample.sorted())
    }

    /// Compute the fence from an already sorted, non-empty slice.
    pub fn from_sorted(sorted: &[f64]) -> Self {
        let q1 = percentile_sorted(sorted, 25.0);
        let q3 = percentile_sorted(sorted, 75.0);
        let iqr = q3 - q1;

        Self {
            q1,
            q3,
            iqr,
            lower: q1 - IQR_MULTIPLIER * iqr,
            upper: q3 + IQR_MULTIPLIER * iqr,
        }
    }

    /// True if `value` lies strictly outside the fence.
    ///
    /// Values exactly on a bound are inside. With constant data the fence
    /// collapses to a single point and that value is not an outlier.
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }

    /// Outlying values in their original order, duplicates kept.
    pub fn outliers(&self, samples: &[f64]) -> Vec<f64> {
        samples
            .iter()
            .copied()
            .filter(|&value| self.is_outlier(value))
            .collect()
    }

    /// Number of outlying values.
    pub fn count_outliers(&self, samples: &[f64]) -> usize {
        samples.iter().filter(|&&value| self.is_outlier(value)).count()
    }
}
