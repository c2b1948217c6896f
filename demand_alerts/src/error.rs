//! Error types for the demand_alerts crate

use thiserror::Error;

/// Why a rule could not be evaluated for a product.
///
/// The evaluator logs these and treats the rule as quiet; they never stop
/// other rules or products.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleError {
    /// Input handed to the rule is inconsistent
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A comparison window falls outside the supported calendar
    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    /// Threshold configuration is unusable
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, RuleError>;
