//! The alert rules
//!
//! Each rule looks at one product snapshot and raises at most one alert.
//! Rules carry their own thresholds and deserialize from configuration.

pub mod forecast_accuracy;
pub mod seasonal_anomaly;
pub mod stockout;
pub mod supply_chain;
pub mod unusual_demand;

pub use forecast_accuracy::ForecastAccuracyRule;
pub use seasonal_anomaly::SeasonalAnomalyRule;
pub use stockout::StockoutRule;
pub use supply_chain::SupplyChainRule;
pub use unusual_demand::{DemandShift, ShiftDirection, UnusualDemandRule};

use crate::alert::{AlertEvent, AlertKind};
use crate::error::Result;
use crate::snapshot::ProductSnapshot;
use std::fmt::Debug;

/// A single alert check
pub trait AlertRule: Debug + Send + Sync {
    /// The kind of alert this rule raises
    fn kind(&self) -> AlertKind;

    /// `Ok(None)` when the rule is quiet or lacks the data to decide
    fn check(&self, snapshot: &ProductSnapshot<'_>) -> Result<Option<AlertEvent>>;
}
