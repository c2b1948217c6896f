//! Supply chain risk: products with long replenishment lead times

use super::AlertRule;
use crate::alert::{AlertEvent, AlertKind, Severity};
use crate::error::Result;
use crate::snapshot::ProductSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplyChainRule {
    /// Lead times above this many days raise an alert
    pub max_lead_time_days: u32,
}

impl Default for SupplyChainRule {
    fn default() -> Self {
        Self {
            max_lead_time_days: 14,
        }
    }
}

impl AlertRule for SupplyChainRule {
    fn kind(&self) -> AlertKind {
        AlertKind::SupplyChainRisk
    }

    fn check(&self, snapshot: &ProductSnapshot<'_>) -> Result<Option<AlertEvent>> {
        let product = snapshot.product;
        if product.lead_time_days <= self.max_lead_time_days {
            return Ok(None);
        }

        let event = AlertEvent::new(
            self.kind(),
            Severity::Low,
            &product.id,
            format!(
                "Monitor supply chain for {}: Long lead time ({} days)",
                product.name, product.lead_time_days
            ),
        )
        .with_evidence("lead_time", product.lead_time_days)
        .with_evidence("supplier", product.supplier.clone());

        Ok(Some(event))
    }
}
