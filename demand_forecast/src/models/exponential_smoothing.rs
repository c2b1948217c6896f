//! Exponential smoothing model: flat forecast at the final smoothed level

use crate::error::{ForecastError, Result};
use crate::models::DemandModel;
use demand_math::moving_averages::smoothed_level;

/// Simple exponential smoothing over the full history
#[derive(Debug, Clone)]
pub struct ExponentialSmoothingModel {
    name: String,
    alpha: f64,
}

impl ExponentialSmoothingModel {
    /// Create a new exponential smoothing model
    pub fn new(alpha: f64) -> Result<Self> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(ForecastError::InvalidParameter(
                "Alpha must be between 0 and 1".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Exponential Smoothing (alpha={})", alpha),
            alpha,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Default for ExponentialSmoothingModel {
    fn default() -> Self {
        Self {
            name: "Exponential Smoothing (alpha=0.3)".to_string(),
            alpha: 0.3,
        }
    }
}

impl DemandModel for ExponentialSmoothingModel {
    fn forecast(&self, series: &[f64], horizon: usize) -> Vec<f64> {
        let level = smoothed_level(series, self.alpha).unwrap_or(0.0);
        vec![level; horizon]
    }

    fn name(&self) -> &str {
        &self.name
    }
}
