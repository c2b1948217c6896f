//! # Demand Math
//!
//! Numeric building blocks for demand forecasting.
//! This crate provides the statistics, smoothing, trend fitting and weekly
//! seasonality calculations that the forecasting models are built from.
//! Everything here works on plain `f64` series ordered oldest to newest.

use thiserror::Error;

pub mod forecasting;
pub mod moving_averages;
pub mod seasonality;
pub mod statistics;

pub use forecasting::{LinearFit, LinearRegression};
pub use moving_averages::{ExponentialSmoothing, SimpleMovingAverage};
pub use seasonality::WeeklyProfile;

/// Errors that can occur in demand calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for demand math operations
pub type Result<T> = std::result::Result<T, MathError>;
