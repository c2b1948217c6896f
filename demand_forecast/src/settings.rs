//! Tunable forecasting parameters

use crate::confidence::ConfidenceAssessor;
use crate::ensemble::EnsembleWeights;
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Limits and weights used by the forecast engine.
///
/// Every field has a default so partial configuration files deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSettings {
    /// Horizon used when a request does not name one
    pub default_forecast_days: usize,
    /// Minimum history length for a requested forecast
    pub min_historical_days: usize,
    pub max_forecast_days: usize,
    pub weights: EnsembleWeights,
    pub confidence: ConfidenceAssessor,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            default_forecast_days: 30,
            min_historical_days: 14,
            max_forecast_days: 365,
            weights: EnsembleWeights::default(),
            confidence: ConfidenceAssessor::default(),
        }
    }
}

impl ForecastSettings {
    pub fn validate(&self) -> Result<()> {
        if self.min_historical_days == 0 {
            return Err(ForecastError::InvalidParameter(
                "min_historical_days must be at least 1".to_string(),
            ));
        }
        if self.max_forecast_days == 0 {
            return Err(ForecastError::InvalidParameter(
                "max_forecast_days must be at least 1".to_string(),
            ));
        }
        if self.default_forecast_days == 0 || self.default_forecast_days > self.max_forecast_days {
            return Err(ForecastError::InvalidParameter(format!(
                "default_forecast_days must be between 1 and {}",
                self.max_forecast_days
            )));
        }
        if self.confidence.high_threshold > self.confidence.medium_threshold {
            return Err(ForecastError::InvalidParameter(
                "confidence high_threshold must not exceed medium_threshold".to_string(),
            ));
        }
        self.weights.validate()
    }
}
