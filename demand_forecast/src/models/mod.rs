//! Statistical estimators for daily demand
//!
//! Every model maps a quantity series (oldest first) to exactly `horizon`
//! predictions. Models never fail on sparse data: each has a defined
//! fallback, down to all zeros for an empty series.

use std::fmt::Debug;

pub mod exponential_smoothing;
pub mod linear_trend;
pub mod moving_average;
pub mod seasonal;

pub use exponential_smoothing::ExponentialSmoothingModel;
pub use linear_trend::LinearTrendModel;
pub use moving_average::MovingAverageModel;
pub use seasonal::WeeklySeasonalModel;

/// A demand estimator
pub trait DemandModel: Debug + Send + Sync {
    /// Predict `horizon` future values from `series`
    fn forecast(&self, series: &[f64], horizon: usize) -> Vec<f64>;

    /// Name of the model
    fn name(&self) -> &str;
}
