//! Validated numeric input
//!
//! Every computation in this crate takes a [`NumericSample`]. The only ways to
//! build one are [`NumericSample::new`] and [`NumericSample::from_payload`],
//! so the engine and scorer can rely on the sample being at least
//! [`MIN_SAMPLE_SIZE`] finite values long, with a range and variance that fit
//! in an `f64`.

use serde_json::Value;

use crate::engine::{bounds, mean, sample_variance};
use crate::error::{Result, ValidationError};

/// Name of the payload field holding the sample.
pub const DATA_FIELD: &str = "data";

/// Smallest sample the statistics are defined for (sample variance needs n - 1 > 0).
pub const MIN_SAMPLE_SIZE: usize = 2;

/// A single payload element after classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Element {
    Number(f64),
    Other,
}

impl Element {
    /// Classify a JSON value. Booleans, strings, null, arrays and objects are
    /// all `Other`; only JSON numbers are admitted.
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_f64().map(Element::Number).unwrap_or(Element::Other),
            _ => Element::Other,
        }
    }
}

/// An ordered sequence of at least two finite numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSample {
    values: Vec<f64>,
}

impl NumericSample {
    /// Build a sample from raw values.
    ///
    /// # Errors
    ///
    /// * [`ValidationError::Empty`] if `values` is empty
    /// * [`ValidationError::NonFinite`] if any value is NaN or infinite
    /// * [`ValidationError::TooFew`] if fewer than [`MIN_SAMPLE_SIZE`] values remain
    /// * [`ValidationError::SpreadTooLarge`] if `max - min` or the variance
    ///   overflows
    ///
    /// # Examples
    ///
    /// ```
    /// use stats_core::{NumericSample, ValidationError};
    ///
    /// let sample = NumericSample::new(vec![1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(sample.len(), 3);
    ///
    /// assert_eq!(NumericSample::new(vec![]), Err(ValidationError::Empty));
    /// ```
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(ValidationError::Empty);
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ValidationError::NonFinite);
        }
        if values.len() < MIN_SAMPLE_SIZE {
            return Err(ValidationError::TooFew {
                count: values.len(),
                min: MIN_SAMPLE_SIZE,
            });
        }
        if !spread_is_representable(&values) {
            return Err(ValidationError::SpreadTooLarge);
        }
        Ok(Self { values })
    }

    /// Validate a request payload of the shape `{"data": [number, ...]}`.
    ///
    /// Checks run in a fixed order and stop at the first failure: field
    /// present, field is a list, list non-empty, every element a number,
    /// every number finite, at least [`MIN_SAMPLE_SIZE`] elements, range and
    /// variance representable.
    pub fn from_payload(payload: &Value) -> Result<Self> {
        let data = payload
            .get(DATA_FIELD)
            .ok_or(ValidationError::MissingData)?;

        let items = data.as_array().ok_or(ValidationError::NotAList)?;
        if items.is_empty() {
            return Err(ValidationError::Empty);
        }

        let values = items
            .iter()
            .map(|item| match Element::classify(item) {
                Element::Number(v) => Ok(v),
                Element::Other => Err(ValidationError::NonNumeric),
            })
            .collect::<Result<Vec<f64>>>()?;

        Self::new(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Values sorted ascending. Total order is safe because every value is finite.
    pub fn sorted(&self) -> Vec<f64> {
        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);
        sorted
    }
}

/// Range and sample variance both fit in a finite `f64`.
fn spread_is_representable(values: &[f64]) -> bool {
    let (min, max) = bounds(values);
    (max - min).is_finite() && sample_variance(values, mean(values)).is_finite()
}
