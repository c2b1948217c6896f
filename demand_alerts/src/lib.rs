//! # Demand Alerts
//!
//! Rule-based alerts over a product's recent sales and stored forecasts.
//!
//! Five rules run for every product:
//!
//! - **Stockout risk** (high): a demand spike on a product whose lead time and
//!   safety stock cover more than a week of demand
//! - **Unusual demand** (medium): the last week moved by more than 50% against
//!   the week before
//! - **Forecast accuracy** (low): a forecast made 7 to 30 days ago missed last
//!   week's sales by more than 30%
//! - **Seasonal anomaly** (medium): this week deviates by more than 75% from the
//!   same ISO week last year
//! - **Supply chain risk** (low): lead time longer than 14 days
//!
//! ## Usage Example
//!
//! ```
//! use chrono::{NaiveDate, TimeZone, Utc};
//! use demand_alerts::{AlertEvaluator, AlertKind, ProductSnapshot};
//! use demand_forecast::{ProductProfile, SalesHistory};
//!
//! let product = ProductProfile::new("sku-1", "Umbrella").with_lead_time(21, 7);
//! let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let history = SalesHistory::from_daily_quantities(start, &[10; 30]);
//! let now = Utc.with_ymd_and_hms(2024, 3, 30, 12, 0, 0).unwrap();
//!
//! let snapshot = ProductSnapshot::new(&product, &history, &[], now);
//! let alerts = AlertEvaluator::default().evaluate_product(&snapshot);
//!
//! assert_eq!(alerts.len(), 1);
//! assert_eq!(alerts[0].kind, AlertKind::SupplyChainRisk);
//! ```

pub mod alert;
pub mod error;
pub mod evaluator;
pub mod rules;
pub mod settings;
pub mod snapshot;

pub use crate::alert::{AlertEvent, AlertKind, Severity};
pub use crate::error::{Result, RuleError};
pub use crate::evaluator::{AlertEvaluator, RuleOutcome, RuleReport};
pub use crate::rules::{
    AlertRule, ForecastAccuracyRule, SeasonalAnomalyRule, StockoutRule, SupplyChainRule,
    UnusualDemandRule,
};
pub use crate::settings::AlertSettings;
pub use crate::snapshot::ProductSnapshot;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
