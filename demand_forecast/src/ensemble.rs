//! Weighted ensemble of the statistical estimators

use crate::error::{ForecastError, Result};
use crate::models::{
    DemandModel, ExponentialSmoothingModel, LinearTrendModel, MovingAverageModel,
    WeeklySeasonalModel,
};
use crate::utils::round_quantity;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Weight of each estimator in the ensemble
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsembleWeights {
    pub moving_average: f64,
    pub exponential_smoothing: f64,
    pub linear_trend: f64,
    pub seasonal: f64,
}

impl Default for EnsembleWeights {
    fn default() -> Self {
        Self {
            moving_average: 0.2,
            exponential_smoothing: 0.3,
            linear_trend: 0.2,
            seasonal: 0.3,
        }
    }
}

impl EnsembleWeights {
    /// Weights must be non-negative and sum to one
    pub fn validate(&self) -> Result<()> {
        let weights = self.as_array();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ForecastError::InvalidParameter(
                "Ensemble weights must be finite and non-negative".to_string(),
            ));
        }

        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(ForecastError::InvalidParameter(format!(
                "Ensemble weights must sum to 1, got {}",
                sum
            )));
        }

        Ok(())
    }

    fn as_array(&self) -> [f64; 4] {
        [
            self.moving_average,
            self.exponential_smoothing,
            self.linear_trend,
            self.seasonal,
        ]
    }
}

/// Raw output of every estimator for one forecast
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleComponents {
    pub moving_average: Vec<f64>,
    pub exponential_smoothing: Vec<f64>,
    pub linear_trend: Vec<f64>,
    pub seasonal: Vec<f64>,
}

/// The four-model statistical ensemble
#[derive(Debug, Clone)]
pub struct StatisticalEnsemble {
    moving_average: MovingAverageModel,
    exponential_smoothing: ExponentialSmoothingModel,
    linear_trend: LinearTrendModel,
    seasonal: WeeklySeasonalModel,
    weights: EnsembleWeights,
}

impl Default for StatisticalEnsemble {
    fn default() -> Self {
        Self {
            moving_average: MovingAverageModel::default(),
            exponential_smoothing: ExponentialSmoothingModel::default(),
            linear_trend: LinearTrendModel::new(),
            seasonal: WeeklySeasonalModel::default(),
            weights: EnsembleWeights::default(),
        }
    }
}

impl StatisticalEnsemble {
    /// Default models with custom weights
    pub fn with_weights(weights: EnsembleWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self {
            weights,
            ..Self::default()
        })
    }

    pub fn weights(&self) -> &EnsembleWeights {
        &self.weights
    }

    /// Run every estimator over the series
    pub fn components(&self, series: &[f64], horizon: usize) -> EnsembleComponents {
        let components = EnsembleComponents {
            moving_average: self.moving_average.forecast(series, horizon),
            exponential_smoothing: self.exponential_smoothing.forecast(series, horizon),
            linear_trend: self.linear_trend.forecast(series, horizon),
            seasonal: self.seasonal.forecast(series, horizon),
        };

        debug!(
            observations = series.len(),
            horizon,
            moving_average = ?components.moving_average.first(),
            exponential_smoothing = ?components.exponential_smoothing.first(),
            linear_trend = ?components.linear_trend.first(),
            seasonal = ?components.seasonal.first(),
            "computed ensemble components"
        );

        components
    }

    /// Weighted sum of the components per day, rounded and clamped at zero
    pub fn combine(&self, components: &EnsembleComponents) -> Vec<u32> {
        let w = &self.weights;
        components
            .moving_average
            .iter()
            .zip(&components.exponential_smoothing)
            .zip(&components.linear_trend)
            .zip(&components.seasonal)
            .map(|(((sma, ema), trend), seasonal)| {
                round_quantity(
                    w.moving_average * sma
                        + w.exponential_smoothing * ema
                        + w.linear_trend * trend
                        + w.seasonal * seasonal,
                )
            })
            .collect()
    }

    /// Ensemble quantities for the next `horizon` days
    pub fn predict(&self, series: &[f64], horizon: usize) -> Vec<u32> {
        let components = self.components(series, horizon);
        self.combine(&components)
    }
}
