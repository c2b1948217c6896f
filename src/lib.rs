//! # demandcast
//!
//! Demand forecasting and alerting for product sales histories.
//!
//! This crate ties the workspace together:
//!
//! - [`demand_math`]: statistics and smoothing primitives
//! - [`demand_forecast`]: the statistical ensemble, hybrid blending with an
//!   external (AI) forecast, and scenario analysis
//! - [`demand_alerts`]: rule-based alerts over recent sales and stored forecasts
//!
//! plus layered [`Settings`], tracing setup and the [`DemandPlanner`], which
//! runs one forecast-and-alert pass for a product.
//!
//! ## Example
//!
//! ```
//! use chrono::{NaiveDate, TimeZone, Utc};
//! use demandcast::{DemandPlanner, PlanRequest};
//! use demandcast::forecast::{ForecastRequest, ProductProfile, SalesHistory};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let history = SalesHistory::from_daily_quantities(start, &[50; 30]);
//! let product = ProductProfile::new("sku-1", "Notebook");
//! let now = Utc.with_ymd_and_hms(2024, 1, 30, 18, 0, 0).unwrap();
//!
//! let planner = DemandPlanner::default();
//! let request = PlanRequest::new(ForecastRequest::statistical(7));
//! let report = planner.plan(&product, &history, &[], &request, now).unwrap();
//!
//! assert_eq!(report.outcome.forecast.quantities(), vec![50; 7]);
//! assert!(report.alerts.is_empty());
//! ```

pub mod logging;
pub mod planner;
pub mod settings;

pub use demand_alerts as alerts;
pub use demand_forecast as forecast;
pub use demand_math as math;

pub use crate::logging::init_tracing;
pub use crate::planner::{DemandPlanner, PlanReport, PlanRequest};
pub use crate::settings::{Settings, SettingsError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
