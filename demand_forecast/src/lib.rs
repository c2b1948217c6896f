//! # Demand Forecast
//!
//! Daily demand forecasting for product sales histories.
//!
//! ## Features
//!
//! - Sales history handling (in memory or loaded from CSV)
//! - Statistical estimators (moving average, exponential smoothing, linear trend,
//!   weekly seasonality) combined into a weighted ensemble
//! - Hybrid forecasts that blend the ensemble with an external (AI) forecast
//! - What-if scenarios (demand change, weather, economy)
//! - Context summaries for the external forecaster and decoding of its answers
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use demand_forecast::{ForecastEngine, SalesHistory};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let history = SalesHistory::from_daily_quantities(start, &[50; 30]);
//!
//! let engine = ForecastEngine::default();
//! let forecast = engine.statistical_forecast(&history, 7);
//!
//! assert_eq!(forecast.quantities(), vec![50; 7]);
//! ```

pub mod confidence;
pub mod data;
pub mod engine;
pub mod ensemble;
pub mod error;
pub mod external;
pub mod forecast;
pub mod models;
pub mod product;
pub mod scenario;
pub mod settings;
pub mod utils;

// Re-export commonly used types
pub use crate::confidence::{ConfidenceAssessor, ConfidenceLevel};
pub use crate::data::{HistoryLoader, Observation, SalesHistory};
pub use crate::engine::{
    blend_forecast, ForecastEngine, ForecastOutcome, ForecastRequest, RequestedMethod,
};
pub use crate::ensemble::{EnsembleWeights, StatisticalEnsemble};
pub use crate::error::{ForecastError, Result};
pub use crate::external::{
    AiForecast, ExternalContext, ExternalForecastRequest, ExternalForecaster, ForecastInsights,
    SalesSummary,
};
pub use crate::forecast::{Forecast, ForecastMethod, ForecastPoint, ForecastRecord};
pub use crate::models::DemandModel;
pub use crate::product::ProductProfile;
pub use crate::scenario::{EconomicImpact, ScenarioAdjustment, ScenarioForecast, WeatherImpact};
pub use crate::settings::ForecastSettings;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
