//! Descriptive statistics.
//!
//! Small numeric helpers plus the per-group [`DescriptiveStats`] summary
//! that the result assembler computes unconditionally, independent of
//! which test branch the analysis takes.

use serde::Serialize;

/// Arithmetic mean. Returns `NaN` for an empty slice.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Sample variance (n-1 denominator). Returns `NaN` if fewer than 2
/// observations.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(data);
    data.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / (n as f64 - 1.0)
}

/// Sample standard deviation (n-1 denominator).
pub fn std_dev(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Median of a sample. Returns `NaN` for an empty slice.
pub fn median(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Per-group descriptive summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    /// Group name, as supplied to the normalizer.
    pub group: String,
    /// Number of observations.
    pub n: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation.
    pub sd: f64,
    /// Median.
    pub median: f64,
    /// Minimum.
    pub min: f64,
    /// Maximum.
    pub max: f64,
}

impl DescriptiveStats {
    /// Summarizes a named sample.
    ///
    /// # Examples
    ///
    /// ```
    /// use autostat::DescriptiveStats;
    ///
    /// let s = DescriptiveStats::from_sample("a", &[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(s.n, 4);
    /// assert!((s.mean - 2.5).abs() < 1e-12);
    /// assert!((s.median - 2.5).abs() < 1e-12);
    /// assert_eq!(s.min, 1.0);
    /// assert_eq!(s.max, 4.0);
    /// ```
    pub fn from_sample(group: &str, data: &[f64]) -> Self {
        Self {
            group: group.to_string(),
            n: data.len(),
            mean: mean(data),
            sd: std_dev(data),
            median: median(data),
            min: data.iter().copied().fold(f64::INFINITY, f64::min),
            max: data.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_variance() {
        let data = [2.0, 4.0, 6.0, 8.0];
        assert!((mean(&data) - 5.0).abs() < 1e-12);
        // Σ(x-5)² = 9+1+1+9 = 20, /3
        assert!((variance(&data) - 20.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn median_odd_even() {
        assert!((median(&[3.0, 1.0, 2.0]) - 2.0).abs() < 1e-12);
        assert!((median(&[4.0, 1.0, 3.0, 2.0]) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn empty_slices_yield_nan() {
        assert!(mean(&[]).is_nan());
        assert!(median(&[]).is_nan());
        assert!(variance(&[1.0]).is_nan());
    }

    #[test]
    fn summary_fields() {
        let s = DescriptiveStats::from_sample("g", &[5.0, 1.0, 3.0]);
        assert_eq!(s.group, "g");
        assert_eq!(s.n, 3);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 5.0);
        assert!((s.mean - 3.0).abs() < 1e-12);
        assert!((s.sd - 2.0).abs() < 1e-12);
    }
}
