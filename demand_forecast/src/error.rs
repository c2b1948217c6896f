//! Error types for the demand_forecast crate

use demand_math::MathError;
use thiserror::Error;

/// Errors raised at the forecasting boundary.
///
/// Estimators never produce these; sparse histories are handled by their
/// fallbacks. Only caller contract violations and I/O surface as errors.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// History is shorter than the configured minimum for a requested forecast
    #[error("Insufficient data: at least {required} days of sales data required, got {available}")]
    InsufficientData { required: usize, available: usize },

    /// Two forecasts that must line up have different horizons
    #[error("Shape mismatch: expected {expected} forecast points, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from mathematical operations
    #[error("Math error: {0}")]
    MathError(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error reading CSV history files
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error decoding collaborator JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
