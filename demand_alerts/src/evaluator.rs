//! Runs every rule over product snapshots

use crate::alert::{AlertEvent, AlertKind};
use crate::error::Result;
use crate::rules::AlertRule;
use crate::settings::AlertSettings;
use crate::snapshot::ProductSnapshot;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// What one rule concluded for one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RuleOutcome {
    Fired { alert: AlertEvent },
    Quiet,
    Failed { error: String },
}

/// Outcome of a rule, labelled with its kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleReport {
    pub kind: AlertKind,
    #[serde(flatten)]
    pub outcome: RuleOutcome,
}

/// A fixed list of rules evaluated in order.
///
/// A rule that fails is logged and counted as quiet; it never stops the
/// remaining rules or products.
#[derive(Debug)]
pub struct AlertEvaluator {
    rules: Vec<Box<dyn AlertRule>>,
}

impl Default for AlertEvaluator {
    fn default() -> Self {
        Self::from_settings(AlertSettings::default())
    }
}

impl AlertEvaluator {
    /// Build the standard five rules from validated settings
    pub fn new(settings: AlertSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::from_settings(settings))
    }

    fn from_settings(settings: AlertSettings) -> Self {
        Self::with_rules(vec![
            Box::new(settings.stockout),
            Box::new(settings.unusual_demand),
            Box::new(settings.forecast_accuracy),
            Box::new(settings.seasonal_anomaly),
            Box::new(settings.supply_chain),
        ])
    }

    /// An evaluator over a custom rule list
    pub fn with_rules(rules: Vec<Box<dyn AlertRule>>) -> Self {
        Self { rules }
    }

    pub fn rule_kinds(&self) -> Vec<AlertKind> {
        self.rules.iter().map(|r| r.kind()).collect()
    }

    /// Outcome of every rule for one product
    pub fn report(&self, snapshot: &ProductSnapshot<'_>) -> Vec<RuleReport> {
        let product_id = &snapshot.product.id;

        self.rules
            .iter()
            .map(|rule| {
                let kind = rule.kind();
                let outcome = match rule.check(snapshot) {
                    Ok(Some(alert)) => RuleOutcome::Fired { alert },
                    Ok(None) => {
                        debug!(product_id = %product_id, rule = %kind, "rule quiet");
                        RuleOutcome::Quiet
                    }
                    Err(e) => {
                        warn!(product_id = %product_id, rule = %kind, error = %e, "rule failed");
                        RuleOutcome::Failed {
                            error: e.to_string(),
                        }
                    }
                };
                RuleReport { kind, outcome }
            })
            .collect()
    }

    /// Alerts raised for one product, in rule order
    pub fn evaluate_product(&self, snapshot: &ProductSnapshot<'_>) -> Vec<AlertEvent> {
        let alerts: Vec<AlertEvent> = self
            .report(snapshot)
            .into_iter()
            .filter_map(|report| match report.outcome {
                RuleOutcome::Fired { alert } => Some(alert),
                _ => None,
            })
            .collect();

        debug!(product_id = %snapshot.product.id, alerts = alerts.len(), "product evaluated");
        alerts
    }

    /// Alerts raised across several products
    pub fn evaluate_all(&self, snapshots: &[ProductSnapshot<'_>]) -> Vec<AlertEvent> {
        let alerts: Vec<AlertEvent> = snapshots
            .iter()
            .flat_map(|snapshot| self.evaluate_product(snapshot))
            .collect();

        info!(products = snapshots.len(), alerts = alerts.len(), "alert pass complete");
        alerts
    }
}
