//! Trend fitting for demand series
//!
//! Ordinary least squares of value against position index (0, 1, 2, ...).

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Fitted straight line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Value of the line at position `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Least-squares line fitter over index-ordered values
#[derive(Debug, Clone, Default)]
pub struct LinearRegression;

impl LinearRegression {
    /// Fit a line through `values`, using each value's index as `x`
    pub fn fit(values: &[f64]) -> Result<LinearFit> {
        if values.len() < 2 {
            return Err(MathError::InsufficientData(format!(
                "Linear regression needs at least 2 values, have {}",
                values.len()
            )));
        }

        let n = values.len() as f64;
        let x_mean = (values.len() - 1) as f64 / 2.0;
        let y_mean = values.iter().sum::<f64>() / n;

        let mut numerator = 0.0;
        let mut denominator = 0.0;

        for (i, &y) in values.iter().enumerate() {
            let x = i as f64;
            numerator += (x - x_mean) * (y - y_mean);
            denominator += (x - x_mean) * (x - x_mean);
        }

        if denominator.abs() < 1e-10 {
            return Err(MathError::CalculationError(
                "Cannot calculate slope: x values are too similar".to_string(),
            ));
        }

        let slope = numerator / denominator;
        let intercept = y_mean - slope * x_mean;

        Ok(LinearFit { slope, intercept })
    }
}
