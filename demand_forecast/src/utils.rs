//! Utility functions for the demand_forecast crate

use crate::data::{Observation, SalesHistory};
use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Round a model output to a whole, non-negative quantity.
///
/// Halves round to the nearest even integer; negative and non-finite
/// values become zero.
pub fn round_quantity(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let rounded = value.round_ties_even();
    if rounded >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        rounded as u32
    }
}

/// The `horizon` consecutive days after `last_date`
pub fn future_dates(last_date: NaiveDate, horizon: usize) -> Vec<NaiveDate> {
    (1..=horizon)
        .map(|offset| last_date + Duration::days(offset as i64))
        .collect()
}

/// Shape of a synthetic demand series
#[derive(Debug, Clone)]
pub struct SyntheticDemand {
    /// Mean daily demand on day zero
    pub base_level: f64,
    /// Change in mean demand per day
    pub daily_drift: f64,
    /// Relative weekly swing, e.g. 0.2 for +/-20%
    pub weekly_amplitude: f64,
    /// Standard deviation of the daily noise, in units
    pub noise: f64,
    pub seed: u64,
}

impl Default for SyntheticDemand {
    fn default() -> Self {
        Self {
            base_level: 50.0,
            daily_drift: 0.0,
            weekly_amplitude: 0.0,
            noise: 0.0,
            seed: 42,
        }
    }
}

/// Generate a deterministic daily history for demos and tests
pub fn generate_demand_history(
    start: NaiveDate,
    days: usize,
    shape: &SyntheticDemand,
) -> Result<SalesHistory> {
    let noise = Normal::new(0.0, shape.noise.max(0.0))
        .map_err(|e| ForecastError::InvalidParameter(format!("Invalid noise level: {}", e)))?;
    let mut rng = StdRng::seed_from_u64(shape.seed);

    let observations = (0..days)
        .map(|day| {
            let weekday_phase = (day % 7) as f64 / 7.0 * std::f64::consts::TAU;
            let level = (shape.base_level + shape.daily_drift * day as f64)
                * (1.0 + shape.weekly_amplitude * weekday_phase.sin());
            let quantity = round_quantity(level + noise.sample(&mut rng));
            Observation::new(start + Duration::days(day as i64), quantity)
        })
        .collect();

    Ok(SalesHistory::new(observations))
}
