//! Alert events produced by the rules

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Which rule raised an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    StockoutRisk,
    UnusualDemand,
    ForecastAccuracy,
    SeasonalAnomaly,
    SupplyChainRisk,
}

impl AlertKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::StockoutRisk => "stockout_risk",
            AlertKind::UnusualDemand => "unusual_demand",
            AlertKind::ForecastAccuracy => "forecast_accuracy",
            AlertKind::SeasonalAnomaly => "seasonal_anomaly",
            AlertKind::SupplyChainRisk => "supply_chain_risk",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How urgently an alert needs attention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        };
        f.write_str(label)
    }
}

/// A fired alert, ready to be persisted by the storage layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub kind: AlertKind,
    pub severity: Severity,
    pub product_id: String,
    /// Human-readable summary naming the product and the deciding figure
    pub message: String,
    /// Named facts the rule decided on
    #[serde(default)]
    pub evidence: BTreeMap<String, Value>,
}

impl AlertEvent {
    pub fn new(
        kind: AlertKind,
        severity: Severity,
        product_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            product_id: product_id.into(),
            message: message.into(),
            evidence: BTreeMap::new(),
        }
    }

    /// Attach one named fact
    pub fn with_evidence(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.evidence.insert(key.to_string(), value.into());
        self
    }

    /// Numeric evidence, if present
    pub fn evidence_f64(&self, key: &str) -> Option<f64> {
        self.evidence.get(key).and_then(Value::as_f64)
    }
}
