//! Weekly seasonal model

use crate::models::{DemandModel, ExponentialSmoothingModel};
use demand_math::moving_averages::trailing_mean;
use demand_math::seasonality::{WeeklyProfile, DAYS_PER_WEEK};

/// Scales the recent weekly level by a per-weekday factor.
///
/// Needs `min_history` observations (four weeks by default); shorter
/// histories get the exponential smoothing forecast unchanged.
#[derive(Debug, Clone)]
pub struct WeeklySeasonalModel {
    min_history: usize,
    fallback: ExponentialSmoothingModel,
}

impl WeeklySeasonalModel {
    pub fn new(min_history: usize, fallback: ExponentialSmoothingModel) -> Self {
        Self {
            min_history,
            fallback,
        }
    }

    pub fn min_history(&self) -> usize {
        self.min_history
    }
}

impl Default for WeeklySeasonalModel {
    fn default() -> Self {
        Self::new(4 * DAYS_PER_WEEK, ExponentialSmoothingModel::default())
    }
}

impl DemandModel for WeeklySeasonalModel {
    fn forecast(&self, series: &[f64], horizon: usize) -> Vec<f64> {
        if series.len() < self.min_history.max(DAYS_PER_WEEK) {
            return self.fallback.forecast(series, horizon);
        }

        let profile = WeeklyProfile::from_series(series);
        let base = trailing_mean(series, DAYS_PER_WEEK).unwrap_or(0.0);

        (0..horizon)
            .map(|i| (base * profile.factor(i)).max(0.0))
            .collect()
    }

    fn name(&self) -> &str {
        "Weekly Seasonal"
    }
}
