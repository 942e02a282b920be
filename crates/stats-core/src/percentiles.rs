//! Percentile calculations.
//!
//! All quartiles in this crate go through [`percentile_sorted`], which uses
//! linear interpolation between the closest ranks (`rank = p/100 * (n - 1)`).

/// Percentile of an already sorted, non-empty slice.
///
/// `p` is clamped to `0.0..=100.0`.
///
/// # Examples
///
/// ```
/// use stats_core::percentiles::percentile_sorted;
///
/// let sorted = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(percentile_sorted(&sorted, 50.0), 3.0);
/// assert_eq!(percentile_sorted(&sorted, 150.0), 5.0);
/// ```
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    assert!(!sorted.is_empty(), "percentile of an empty slice");

    if sorted.len() == 1 {
        return sorted[0];
    }

    let p = p.clamp(0.0, 100.0);
    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower_index = rank.floor() as usize;
    let upper_index = rank.ceil() as usize;

    if lower_index == upper_index {
        sorted[lower_index]
    } else {
        let lower_value = sorted[lower_index];
        let upper_value = sorted[upper_index];
        let fraction = rank - lower_index as f64;
        lower_value + fraction * (upper_value - lower_value)
    }
}

/// Median of an already sorted, non-empty slice.
pub fn median_sorted(sorted: &[f64]) -> f64 {
    percentile_sorted(sorted, 50.0)
}
