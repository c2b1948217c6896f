//! Descriptive statistics over demand series
//!
//! Thin wrappers around `statrs` that return `None` for empty input instead
//! of `NaN`, so callers can pick their own fallback.

use statrs::statistics::Statistics;

/// Arithmetic mean, `None` when `values` is empty
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().mean())
}

/// Population variance (divides by `n`), `None` when `values` is empty
pub fn population_variance(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().population_variance())
}

/// Sum of the values
pub fn total(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// The last `n` values, or all of them when fewer are available
pub fn tail(values: &[f64], n: usize) -> &[f64] {
    &values[values.len().saturating_sub(n)..]
}

/// Percentage change from `baseline` to `current`.
///
/// Returns `None` unless `baseline` is strictly positive.
pub fn percent_change(current: f64, baseline: f64) -> Option<f64> {
    if baseline > 0.0 {
        Some((current - baseline) / baseline * 100.0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_mean_and_variance() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&values).unwrap(), 5.0);
        assert_relative_eq!(population_variance(&values).unwrap(), 4.0);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(mean(&[]), None);
        assert_eq!(population_variance(&[]), None);
        assert_eq!(total(&[]), 0.0);
    }

    #[test]
    fn test_tail_shorter_than_window() {
        let values = [1.0, 2.0, 3.0];
        assert_eq!(tail(&values, 2), &[2.0, 3.0]);
        assert_eq!(tail(&values, 7), &values);
    }

    #[rstest]
    #[case(15.0, 10.0, Some(50.0))]
    #[case(4.0, 10.0, Some(-60.0))]
    #[case(10.0, 10.0, Some(0.0))]
    #[case(0.0, 8.0, Some(-100.0))]
    #[case(4.0, 0.0, None)]
    fn test_percent_change(#[case] current: f64, #[case] previous: f64, #[case] expected: Option<f64>) {
        match (percent_change(current, previous), expected) {
            (Some(actual), Some(expected)) => assert_relative_eq!(actual, expected),
            (actual, expected) => assert_eq!(actual, expected),
        }
    }
}
