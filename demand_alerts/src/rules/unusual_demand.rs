//! Unusual demand: the last week moved sharply against the week before

use super::AlertRule;
use crate::alert::{AlertEvent, AlertKind, Severity};
use crate::error::{Result, RuleError};
use crate::snapshot::ProductSnapshot;
use demand_forecast::data::quantities_of;
use demand_math::statistics::{mean, percent_change};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    Spike,
    Drop,
}

/// A week-over-week change beyond the threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandShift {
    pub direction: ShiftDirection,
    pub change_percent: f64,
    pub recent_average: f64,
    pub previous_average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnusualDemandRule {
    /// Trailing days of sales considered
    pub window_days: u32,
    /// Fewer observations than this in the window and the rule stays quiet
    pub min_observations: usize,
    /// Size of each compared block of observations
    pub compare_observations: usize,
    /// Absolute change, in percent, that must be exceeded
    pub change_threshold_percent: f64,
}

impl Default for UnusualDemandRule {
    fn default() -> Self {
        Self {
            window_days: 30,
            min_observations: 14,
            compare_observations: 7,
            change_threshold_percent: 50.0,
        }
    }
}

impl UnusualDemandRule {
    pub fn validate(&self) -> Result<()> {
        if self.compare_observations == 0 {
            return Err(RuleError::InvalidSettings(
                "unusual demand compare_observations must be at least 1".to_string(),
            ));
        }
        if self.min_observations < 2 * self.compare_observations {
            return Err(RuleError::InvalidSettings(format!(
                "unusual demand min_observations must be at least {}",
                2 * self.compare_observations
            )));
        }
        if !self.change_threshold_percent.is_finite() {
            return Err(RuleError::InvalidSettings(
                "unusual demand threshold must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Compare two blocks of daily sales. Changes exactly at the threshold are not unusual.
    pub fn assess(&self, recent: &[f64], previous: &[f64]) -> Option<DemandShift> {
        let recent_average = mean(recent)?;
        let previous_average = mean(previous)?;
        let change_percent = percent_change(recent_average, previous_average)?;

        let direction = if change_percent > self.change_threshold_percent {
            ShiftDirection::Spike
        } else if change_percent < -self.change_threshold_percent {
            ShiftDirection::Drop
        } else {
            return None;
        };

        Some(DemandShift {
            direction,
            change_percent,
            recent_average,
            previous_average,
        })
    }
}

impl AlertRule for UnusualDemandRule {
    fn kind(&self) -> AlertKind {
        AlertKind::UnusualDemand
    }

    fn check(&self, snapshot: &ProductSnapshot<'_>) -> Result<Option<AlertEvent>> {
        let window = quantities_of(snapshot.history.trailing(snapshot.today(), self.window_days));
        if window.len() < self.min_observations {
            return Ok(None);
        }

        let n = self.compare_observations;
        let (Some(split), Some(begin)) = (
            window.len().checked_sub(n),
            n.checked_mul(2).and_then(|span| window.len().checked_sub(span)),
        ) else {
            return Ok(None);
        };
        let recent = &window[split..];
        let previous = &window[begin..split];

        let Some(shift) = self.assess(recent, previous) else {
            return Ok(None);
        };

        let name = &snapshot.product.name;
        let message = match shift.direction {
            ShiftDirection::Spike => format!(
                "Unusual demand spike for {}: {:.1}% increase",
                name, shift.change_percent
            ),
            ShiftDirection::Drop => format!(
                "Unusual demand drop for {}: {:.1}% decrease",
                name,
                shift.change_percent.abs()
            ),
        };

        let event = AlertEvent::new(self.kind(), Severity::Medium, &snapshot.product.id, message)
            .with_evidence("change_percent", shift.change_percent)
            .with_evidence("recent_average", shift.recent_average)
            .with_evidence("previous_average", shift.previous_average);

        Ok(Some(event))
    }
}
