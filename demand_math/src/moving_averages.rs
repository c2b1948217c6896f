//! Moving average calculation implementations
//!
//! Contains the two level estimators used by the forecasting models:
//! - Simple Moving Average over a trailing window
//! - Simple exponential smoothing
//!
//! Both are streaming: feed observations oldest first with `update`.

use crate::{MathError, Result};
use std::collections::VecDeque;

/// Simple Moving Average over the most recent `period` values.
///
/// Until `period` values have been seen the average covers whatever has been
/// seen so far, so short histories still produce a level.
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
    period: usize,
    values: VecDeque<f64>,
    sum: f64,
}

impl SimpleMovingAverage {
    /// Create a new Simple Moving Average with the specified period
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(MathError::InvalidInput(
                "Period must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            period,
            values: VecDeque::with_capacity(period),
            sum: 0.0,
        })
    }

    /// Update the SMA with a new value
    pub fn update(&mut self, value: f64) {
        self.values.push_back(value);
        self.sum += value;

        if self.values.len() > self.period {
            if let Some(old_value) = self.values.pop_front() {
                self.sum -= old_value;
            }
        }
    }

    /// Get the current SMA value
    pub fn value(&self) -> Result<f64> {
        if self.values.is_empty() {
            return Err(MathError::InsufficientData(
                "No values seen for SMA calculation".to_string(),
            ));
        }

        Ok(self.sum / self.values.len() as f64)
    }

    /// Get the current period
    pub fn period(&self) -> usize {
        self.period
    }

    /// Whether a full window of values has been seen
    pub fn is_full(&self) -> bool {
        self.values.len() == self.period
    }

    /// Reset the SMA, clearing all values
    pub fn reset(&mut self) {
        self.values.clear();
        self.sum = 0.0;
    }
}

/// Simple exponential smoothing: `s[0] = x[0]`, `s[i] = a*x[i] + (1-a)*s[i-1]`
#[derive(Debug, Clone)]
pub struct ExponentialSmoothing {
    alpha: f64,
    level: Option<f64>,
}

impl ExponentialSmoothing {
    /// Create a smoother with factor `alpha`, which must lie in (0, 1]
    pub fn new(alpha: f64) -> Result<Self> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(MathError::InvalidInput(format!(
                "Smoothing factor must be in (0, 1], got {}",
                alpha
            )));
        }

        Ok(Self { alpha, level: None })
    }

    /// Update the smoothed level with a new value
    pub fn update(&mut self, value: f64) {
        self.level = Some(match self.level {
            None => value,
            Some(level) => self.alpha * value + (1.0 - self.alpha) * level,
        });
    }

    /// Get the current smoothed level
    pub fn value(&self) -> Result<f64> {
        self.level.ok_or_else(|| {
            MathError::InsufficientData("No values seen for exponential smoothing".to_string())
        })
    }

    /// Get the smoothing factor
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Reset the smoother
    pub fn reset(&mut self) {
        self.level = None;
    }
}

/// Mean of the last `min(window, len)` values, `None` for an empty series
pub fn trailing_mean(values: &[f64], window: usize) -> Option<f64> {
    let mut sma = SimpleMovingAverage::new(window).ok()?;
    for &value in values {
        sma.update(value);
    }
    sma.value().ok()
}

/// Final exponentially smoothed level of the series, `None` for an empty series
pub fn smoothed_level(values: &[f64], alpha: f64) -> Option<f64> {
    let mut smoother = ExponentialSmoothing::new(alpha).ok()?;
    for &value in values {
        smoother.update(value);
    }
    smoother.value().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sma_window_slides() {
        let mut sma = SimpleMovingAverage::new(3).unwrap();
        for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
            sma.update(value);
        }
        assert!(sma.is_full());
        assert_relative_eq!(sma.value().unwrap(), 4.0);
    }

    #[test]
    fn test_sma_partial_window() {
        let mut sma = SimpleMovingAverage::new(7).unwrap();
        sma.update(4.0);
        sma.update(8.0);
        assert!(!sma.is_full());
        assert_relative_eq!(sma.value().unwrap(), 6.0);
    }

    #[test]
    fn test_sma_rejects_zero_period() {
        assert!(SimpleMovingAverage::new(0).is_err());
    }

    #[test]
    fn test_exponential_smoothing_recursion() {
        let mut smoother = ExponentialSmoothing::new(0.3).unwrap();
        assert!(smoother.value().is_err());

        smoother.update(10.0);
        smoother.update(20.0);
        // 0.3 * 20 + 0.7 * 10
        assert_relative_eq!(smoother.value().unwrap(), 13.0);
    }

    #[test]
    fn test_exponential_smoothing_bounds() {
        assert!(ExponentialSmoothing::new(0.0).is_err());
        assert!(ExponentialSmoothing::new(1.5).is_err());
        assert!(ExponentialSmoothing::new(f64::NAN).is_err());
        assert!(ExponentialSmoothing::new(1.0).is_ok());
    }

    #[test]
    fn test_helpers_on_empty_series() {
        assert_eq!(trailing_mean(&[], 7), None);
        assert_eq!(smoothed_level(&[], 0.3), None);
    }
}
