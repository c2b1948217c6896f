//! Alert thresholds

use crate::error::Result;
use crate::rules::{
    ForecastAccuracyRule, SeasonalAnomalyRule, StockoutRule, SupplyChainRule, UnusualDemandRule,
};
use serde::{Deserialize, Serialize};

/// Thresholds for every rule. Missing sections take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertSettings {
    pub stockout: StockoutRule,
    pub unusual_demand: UnusualDemandRule,
    pub forecast_accuracy: ForecastAccuracyRule,
    pub seasonal_anomaly: SeasonalAnomalyRule,
    pub supply_chain: SupplyChainRule,
}

impl AlertSettings {
    pub fn validate(&self) -> Result<()> {
        self.stockout.validate()?;
        self.unusual_demand.validate()?;
        self.forecast_accuracy.validate()?;
        self.seasonal_anomaly.validate()
    }
}
