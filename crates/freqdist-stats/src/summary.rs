use crate::numeric::Numeric;

/// Descriptive statistics of a raw sample.
///
/// The sample is kept sorted so that any percentile can be looked up after
/// construction.
///
/// # Examples
///
/// ```
/// # use freqdist_stats::summary::SampleSummary;
/// let summary = SampleSummary::new([4, 1, 3, 2, 5]).unwrap();
/// assert_eq!(summary.min, 1.0);
/// assert_eq!(summary.max, 5.0);
/// assert_eq!(summary.mean, 3.0);
/// assert_eq!(summary.median(), 3.0);
/// assert_eq!(summary.sample_variance, 2.5);
/// ```
#[derive(Debug, Clone)]
pub struct SampleSummary {
    sorted: Vec<f64>,
    /// The minimum value in the sample.
    pub min: f64,
    /// The maximum value in the sample.
    pub max: f64,
    /// The arithmetic mean of the sample.
    pub mean: f64,
    /// Variance with the `n - 1` denominator; `0.0` for a single value.
    pub sample_variance: f64,
    /// Variance with the `n` denominator.
    pub population_variance: f64,
}

impl SampleSummary {
    /// Computes the summary of unsorted values.
    ///
    /// # Returns
    ///
    /// * `Some(SampleSummary)` - if the sample contains at least one value
    /// * `None` - if the sample is empty or contains NaN or an infinity
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator,
        I::Item: Numeric,
    {
        let mut sorted = values
            .into_iter()
            .map(|value| value.to_f64())
            .collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(sorted)
    }

    /// Computes the summary of values already sorted in ascending order.
    ///
    /// Returns `None` if the sample is empty or holds a non-finite value.
    ///
    /// # Panics
    ///
    /// Panics if the finite `sorted_values` are not sorted in ascending order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: Vec<f64>) -> Option<Self> {
        if sorted_values.iter().any(|value| !value.is_finite()) {
            return None;
        }
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let n = sorted_values.len() as f64;
        let mean = sorted_values.iter().sum::<f64>() / n;
        let squared_diff_sum = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>();
        let sample_variance = if sorted_values.len() > 1 {
            squared_diff_sum / (n - 1.0)
        } else {
            0.0
        };
        let population_variance = squared_diff_sum / n;

        Some(Self {
            sorted: sorted_values,
            min,
            max,
            mean,
            sample_variance,
            population_variance,
        })
    }

    /// Number of values in the sample.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// The sample values in ascending order.
    #[must_use]
    pub fn sorted_values(&self) -> &[f64] {
        &self.sorted
    }

    /// The 50th percentile.
    #[must_use]
    pub fn median(&self) -> f64 {
        self.percentile(0.5)
    }

    #[must_use]
    pub fn sample_std_dev(&self) -> f64 {
        self.sample_variance.sqrt()
    }

    #[must_use]
    pub fn population_std_dev(&self) -> f64 {
        self.population_variance.sqrt()
    }

    /// The value at fraction `p` of the sample, see [`compute_percentile`].
    #[must_use]
    pub fn percentile(&self, p: f64) -> f64 {
        compute_percentile(&self.sorted, p)
    }

    /// Interquartile range, `P75 - P25`.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.percentile(0.75) - self.percentile(0.25)
    }
}

/// Computes a percentile of sorted data.
///
/// `p` is a fraction in `[0, 1]` (values outside are clamped). With `n`
/// values the position is `p × n`:
///
/// - an integral position `i` yields the average of the values at indices
///   `i - 1` and `i` (the first value when `i = 0`, the last when `i = n`);
/// - otherwise the value at index `⌊p × n⌋`.
///
/// Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use freqdist_stats::summary::compute_percentile;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// assert_eq!(compute_percentile(&values, 0.5), 5.5);
/// assert_eq!(compute_percentile(&values, 0.73), 8.0);
/// assert_eq!(compute_percentile(&values, 0.2), 2.5);
/// ```
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], p: f64) -> f64 {
    let n = sorted_values.len();
    if n == 0 {
        return f64::NAN;
    }
    let position = p.clamp(0.0, 1.0) * n as f64;
    let idx = position.floor() as usize;
    if position.fract() > 0.0 {
        return sorted_values[idx.min(n - 1)];
    }
    match idx {
        0 => sorted_values[0],
        i if i >= n => sorted_values[n - 1],
        i => f64::midpoint(sorted_values[i - 1], sorted_values[i]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sample() {
        assert!(SampleSummary::new(Vec::<i32>::new()).is_none());
        assert!(compute_percentile(&[], 0.5).is_nan());
    }

    #[test]
    fn test_non_finite_sample() {
        assert!(SampleSummary::new([1.0, f64::NAN]).is_none());
        assert!(SampleSummary::new([f64::NEG_INFINITY, 0.0]).is_none());
        assert!(SampleSummary::from_sorted(vec![1.0, f64::INFINITY]).is_none());
        assert!(SampleSummary::from_sorted(vec![f64::NAN, 1.0]).is_none());
    }

    #[test]
    fn test_single_value() {
        let summary = SampleSummary::new([7]).unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary.mean, 7.0);
        assert_eq!(summary.sample_variance, 0.0);
        assert_eq!(summary.population_variance, 0.0);
        assert_eq!(summary.median(), 7.0);
        assert_eq!(summary.iqr(), 0.0);
    }

    #[test]
    fn test_variances() {
        let summary = SampleSummary::new([2, 4, 4, 4, 5, 5, 7, 9]).unwrap();
        assert_eq!(summary.mean, 5.0);
        assert_eq!(summary.population_variance, 4.0);
        assert_eq!(summary.population_std_dev(), 2.0);
        assert!((summary.sample_variance - 32.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_positions() {
        let values = [10.0, 20.0, 30.0, 40.0];
        // integral positions average the neighbours
        assert_eq!(compute_percentile(&values, 0.25), 15.0);
        assert_eq!(compute_percentile(&values, 0.5), 25.0);
        // fractional positions take the floor index
        assert_eq!(compute_percentile(&values, 0.3), 20.0);
        assert_eq!(compute_percentile(&values, 0.9), 40.0);
        // edges
        assert_eq!(compute_percentile(&values, 0.0), 10.0);
        assert_eq!(compute_percentile(&values, 1.0), 40.0);
        assert_eq!(compute_percentile(&values, 1.5), 40.0);
        assert_eq!(compute_percentile(&values, -0.1), 10.0);
    }

    #[test]
    fn test_iqr() {
        let summary = SampleSummary::new(1..=8).unwrap();
        // P75: position 6 -> (6 + 7) / 2, P25: position 2 -> (2 + 3) / 2
        assert_eq!(summary.iqr(), 4.0);
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let summary = SampleSummary::new([3.5, -1.0, 2.0]).unwrap();
        assert_eq!(summary.sorted_values(), [-1.0, 2.0, 3.5]);
        assert_eq!(summary.min, -1.0);
        assert_eq!(summary.max, 3.5);
    }

    #[test]
    #[should_panic(expected = "values must be sorted in ascending order")]
    fn test_from_sorted_rejects_unsorted() {
        let _ = SampleSummary::from_sorted(vec![2.0, 1.0]);
    }
}
