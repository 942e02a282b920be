//! Heuristic dataset quality score.
//!
//! A sample starts at 100 points and loses points for being small, for high
//! relative dispersion and for containing outliers. The outlier rule is the
//! same [`OutlierFence`] the statistics report uses.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::{mean, round_to, sample_std_dev};
use crate::outliers::OutlierFence;
use crate::sample::NumericSample;

const MAX_SCORE: u8 = 100;

/// Categorical reading of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityLabel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl QualityLabel {
    /// Thresholds are inclusive: 80 is Excellent, 60 Good, 40 Fair.
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => QualityLabel::Excellent,
            60..=79 => QualityLabel::Good,
            40..=59 => QualityLabel::Fair,
            _ => QualityLabel::Poor,
        }
    }
}

impl fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityLabel::Excellent => write!(f, "Excellent"),
            QualityLabel::Good => write!(f, "Good"),
            QualityLabel::Fair => write!(f, "Fair"),
            QualityLabel::Poor => write!(f, "Poor"),
        }
    }
}

/// Result of scoring one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub score: u8,
    pub quality: QualityLabel,
    pub sample_size: usize,
    /// `std_dev / |mean| * 100`, two decimals; `None` when the mean is zero
    pub coefficient_of_variation: Option<f64>,
    pub outlier_percentage: f64,
    pub outliers_count: usize,
    pub timestamp: DateTime<Utc>,
}

/// Points lost for a small sample.
pub fn sample_size_penalty(n: usize) -> u8 {
    match n {
        0..=9 => 20,
        10..=29 => 10,
        _ => 0,
    }
}

/// Points lost for relative dispersion (coefficient of variation, in percent).
pub fn dispersion_penalty(cv: f64) -> u8 {
    if cv > 100.0 {
        30
    } else if cv > 50.0 {
        15
    } else {
        0
    }
}

/// Points lost for the share of outliers (in percent).
pub fn outlier_penalty(percentage: f64) -> u8 {
    if percentage > 10.0 {
        20
    } else if percentage > 0.0 {
        10
    } else {
        0
    }
}

/// Coefficient of variation in percent, undefined for a zero mean.
///
/// A mean that is tiny next to the standard deviation can push the ratio past
/// `f64::MAX`; it is clamped there so a non-zero mean always yields a number.
pub fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    let mean = mean(values);
    if mean == 0.0 {
        return None;
    }
    let cv = sample_std_dev(values) / mean.abs() * 100.0;
    Some(cv.min(f64::MAX))
}

/// Score `sample` between 0 and 100.
pub fn score(sample: &NumericSample) -> ScoreReport {
    let values = sample.values();
    let n = values.len();

    let cv = coefficient_of_variation(values);
    let fence = OutlierFence::from_sample(sample);
    let outliers_count = fence.count_outliers(values);
    let outlier_percentage = outliers_count as f64 / n as f64 * 100.0;

    let penalties = [
        sample_size_penalty(n),
        cv.map(dispersion_penalty).unwrap_or(0),
        outlier_penalty(outlier_percentage),
    ];
    let lost: u32 = penalties.iter().map(|&p| u32::from(p)).sum();
    let score = u32::from(MAX_SCORE).saturating_sub(lost) as u8;

    debug!(n, ?cv, outliers_count, score, ?penalties, "scored sample");

    ScoreReport {
        score,
        quality: QualityLabel::from_score(score),
        sample_size: n,
        coefficient_of_variation: cv.map(|v| round_to(v, 2)),
        outlier_percentage: round_to(outlier_percentage, 2),
        outliers_count,
        timestamp: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample(values: &[f64]) -> NumericSample {
        NumericSample::new(values.to_vec()).unwrap()
    }

    #[test]
    fn test_label_boundaries() {
        assert_eq!(QualityLabel::from_score(100), QualityLabel::Excellent);
        assert_eq!(QualityLabel::from_score(80), QualityLabel::Excellent);
        assert_eq!(QualityLabel::from_score(79), QualityLabel::Good);
        assert_eq!(QualityLabel::from_score(60), QualityLabel::Good);
        assert_eq!(QualityLabel::from_score(59), QualityLabel::Fair);
        assert_eq!(QualityLabel::from_score(40), QualityLabel::Fair);
        assert_eq!(QualityLabel::from_score(39), QualityLabel::Poor);
        assert_eq!(QualityLabel::from_score(0), QualityLabel::Poor);
    }

    #[test]
    fn test_sample_size_penalty_boundaries() {
        assert_eq!(sample_size_penalty(2), 20);
        assert_eq!(sample_size_penalty(9), 20);
        assert_eq!(sample_size_penalty(10), 10);
        assert_eq!(sample_size_penalty(29), 10);
        assert_eq!(sample_size_penalty(30), 0);
    }

    #[test]
    fn test_dispersion_penalty_boundaries() {
        assert_eq!(dispersion_penalty(0.0), 0);
        assert_eq!(dispersion_penalty(50.0), 0);
        assert_eq!(dispersion_penalty(50.01), 15);
        assert_eq!(dispersion_penalty(100.0), 15);
        assert_eq!(dispersion_penalty(100.01), 30);
    }

    #[test]
    fn test_outlier_penalty_boundaries() {
        assert_eq!(outlier_penalty(0.0), 0);
        assert_eq!(outlier_penalty(0.5), 10);
        assert_eq!(outlier_penalty(10.0), 10);
        assert_eq!(outlier_penalty(10.5), 20);
    }

    #[test]
    fn test_score_with_outlier() {
        let report = score(&sample(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0]));

        // size 10 -> 10, cv ~ 208 -> 30, 10% outliers -> 10
        assert_eq!(report.score, 50);
        assert_eq!(report.quality, QualityLabel::Fair);
        assert_eq!(report.sample_size, 10);
        assert_eq!(report.outliers_count, 1);
        assert_eq!(report.outlier_percentage, 10.0);
        assert_eq!(report.coefficient_of_variation, Some(207.95));
    }

    #[test]
    fn test_score_constant_sample() {
        let report = score(&sample(&[5.0, 5.0, 5.0, 5.0]));

        assert_eq!(report.coefficient_of_variation, Some(0.0));
        assert_eq!(report.outliers_count, 0);
        assert_eq!(report.outlier_percentage, 0.0);
        assert_eq!(report.score, 80);
        assert_eq!(report.quality, QualityLabel::Excellent);
    }

    #[test]
    fn test_zero_mean_skips_dispersion() {
        let values: Vec<f64> = (0..30).map(|i| if i % 2 == 0 { -1.0 } else { 1.0 }).collect();
        let report = score(&sample(&values));

        assert_eq!(report.coefficient_of_variation, None);
        assert_eq!(report.outliers_count, 0);
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_all_penalties_apply() {
        // n < 10, cv > 100, > 10% outliers: 100 - 20 - 30 - 20 = 30
        let report = score(&sample(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, -50.0, 90.0]));
        assert_eq!(report.score, 30);
        assert_eq!(report.quality, QualityLabel::Poor);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let s = sample(&[3.0, 7.5, 2.0, 9.0, 11.0, 4.0]);
        let mut a = score(&s);
        let b = score(&s);
        a.timestamp = b.timestamp;
        assert_eq!(a, b);
    }

    #[test]
    fn test_label_serializes_as_word() {
        let json = serde_json::to_value(QualityLabel::Good).unwrap();
        assert_eq!(json, serde_json::json!("Good"));
        assert_eq!(QualityLabel::Poor.to_string(), "Poor");
    }

    #[test]
    fn test_huge_equal_values_score_like_constant_sample() {
        let report = score(&sample(&[1e308, 1e308]));

        assert_eq!(report.coefficient_of_variation, Some(0.0));
        assert_eq!(report.score, 80);
        assert_eq!(report.quality, QualityLabel::Excellent);
    }

    #[test]
    fn test_cv_with_tiny_mean_is_clamped() {
        let cv = coefficient_of_variation(&[1e150, -1e150, 1e-200]).unwrap();
        assert_eq!(cv, f64::MAX);

        let report = score(&sample(&[1e150, -1e150, 1e-200]));
        assert_eq!(report.coefficient_of_variation, Some(f64::MAX));
        // n < 10 -> 20, cv -> 30
        assert_eq!(report.score, 50);
    }

    #[test]
    fn test_null_cv_serializes_as_null() {
        let report = score(&sample(&[-2.0, 2.0]));
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["coefficient_of_variation"].is_null());
    }
}
