//! Descriptive statistics and dataset quality scoring
//!
//! This crate is the computation core of the data analysis API. It takes a
//! validated list of numbers and produces:
//!
//! - **Statistics report**: mean, median, mode, sample variance and standard
//!   deviation, quartiles, IQR outliers and an automatically binned histogram
//! - **Quality score**: a 0-100 heuristic with a categorical label
//!
//! It also provides the single-slot [`AnalysisStore`] that keeps the most
//! recent report for the summary endpoint.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use stats_core::{analyze, score, AnalysisStore, NumericSample, QualityLabel};
//!
//! let payload = json!({"data": [1, 2, 3, 4, 5, 6, 7, 8, 9, 100]});
//! let sample = NumericSample::from_payload(&payload)?;
//!
//! let report = analyze(&sample);
//! assert_eq!(report.mean, 14.5);
//! assert_eq!(report.outliers, vec![100.0]);
//!
//! let quality = score(&sample);
//! assert_eq!(quality.outliers_count, report.outliers.len());
//! assert_eq!(quality.quality, QualityLabel::Fair);
//!
//! let store = AnalysisStore::new();
//! store.put(report);
//! assert!(store.get().is_some());
//! # Ok::<(), stats_core::ValidationError>(())
//! ```

pub mod engine;
pub mod error;
pub mod histogram;
pub mod outliers;
pub mod percentiles;
pub mod sample;
pub mod scoring;
pub mod store;

// Re-export main types for convenience
pub use engine::{analyze, StatisticsReport};
pub use error::ValidationError;
pub use histogram::HistogramBin;
pub use outliers::OutlierFence;
pub use sample::{Element, NumericSample, MIN_SAMPLE_SIZE};
pub use scoring::{score, QualityLabel, ScoreReport};
pub use store::AnalysisStore;
