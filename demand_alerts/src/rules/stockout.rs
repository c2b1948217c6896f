//! Stockout risk: a demand spike on a product with long replenishment cover

use super::AlertRule;
use crate::alert::{AlertEvent, AlertKind, Severity};
use crate::error::{Result, RuleError};
use crate::snapshot::ProductSnapshot;
use demand_forecast::data::quantities_of;
use demand_math::statistics::{mean, tail};
use serde::{Deserialize, Serialize};

/// Figures the stockout decision is based on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockoutAssessment {
    pub daily_average: f64,
    pub required_stock: f64,
    pub current_trend: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockoutRule {
    /// Trailing days of sales considered
    pub window_days: u32,
    /// Most recent observations averaged into the current trend
    pub trend_observations: usize,
    /// Trend over daily average that counts as a spike
    pub spike_ratio: f64,
    /// Required stock must exceed this many days of average demand
    pub cover_days: f64,
}

impl Default for StockoutRule {
    fn default() -> Self {
        Self {
            window_days: 7,
            trend_observations: 3,
            spike_ratio: 1.5,
            cover_days: 7.0,
        }
    }
}

impl StockoutRule {
    pub fn validate(&self) -> Result<()> {
        if self.window_days == 0 || self.trend_observations == 0 {
            return Err(RuleError::InvalidSettings(
                "stockout window and trend sizes must be at least 1".to_string(),
            ));
        }
        if !(self.spike_ratio.is_finite() && self.cover_days.is_finite()) {
            return Err(RuleError::InvalidSettings(
                "stockout thresholds must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Decide on a window of daily sales and its most recent observations.
    ///
    /// Returns the figures only when the risk condition holds.
    pub fn assess(
        &self,
        window: &[f64],
        recent: &[f64],
        coverage_days: u32,
    ) -> Option<StockoutAssessment> {
        let daily_average = mean(window)?;
        let current_trend = mean(recent)?;
        let required_stock = daily_average * f64::from(coverage_days);

        let spiking = current_trend > daily_average * self.spike_ratio;
        let long_cover = required_stock > daily_average * self.cover_days;

        (spiking && long_cover).then_some(StockoutAssessment {
            daily_average,
            required_stock,
            current_trend,
        })
    }
}

impl AlertRule for StockoutRule {
    fn kind(&self) -> AlertKind {
        AlertKind::StockoutRisk
    }

    fn check(&self, snapshot: &ProductSnapshot<'_>) -> Result<Option<AlertEvent>> {
        let window = quantities_of(snapshot.history.trailing(snapshot.today(), self.window_days));
        let recent = tail(&window, self.trend_observations);
        let product = snapshot.product;

        let Some(risk) = self.assess(&window, recent, product.coverage_days()) else {
            return Ok(None);
        };

        let event = AlertEvent::new(
            self.kind(),
            Severity::High,
            &product.id,
            format!(
                "High stockout risk for {}. Current demand spike detected.",
                product.name
            ),
        )
        .with_evidence("daily_average", risk.daily_average)
        .with_evidence("required_stock", risk.required_stock)
        .with_evidence("current_trend", risk.current_trend);

        Ok(Some(event))
    }
}
