//! Moving average model: flat forecast at the trailing mean

use crate::error::{ForecastError, Result};
use crate::models::DemandModel;
use demand_math::moving_averages::trailing_mean;

/// Flat forecast at the mean of the last `window` observations
#[derive(Debug, Clone)]
pub struct MovingAverageModel {
    name: String,
    window: usize,
}

impl MovingAverageModel {
    /// Create a new moving average model
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(ForecastError::InvalidParameter(
                "Window size must be positive".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Simple Moving Average (window={})", window),
            window,
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for MovingAverageModel {
    fn default() -> Self {
        Self {
            name: "Simple Moving Average (window=7)".to_string(),
            window: 7,
        }
    }
}

impl DemandModel for MovingAverageModel {
    fn forecast(&self, series: &[f64], horizon: usize) -> Vec<f64> {
        // Shorter histories shrink the window to what is available
        let level = trailing_mean(series, self.window).unwrap_or(0.0);
        vec![level; horizon]
    }

    fn name(&self) -> &str {
        &self.name
    }
}
