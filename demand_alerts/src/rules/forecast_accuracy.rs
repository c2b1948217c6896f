//! Forecast accuracy: how well a past forecast matched last week's sales

use super::AlertRule;
use crate::alert::{AlertEvent, AlertKind, Severity};
use crate::error::{Result, RuleError};
use crate::snapshot::ProductSnapshot;
use chrono::{DateTime, Duration, Utc};
use demand_forecast::ForecastRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastAccuracyRule {
    /// Youngest forecast considered, in days before now
    pub min_age_days: i64,
    /// Oldest forecast considered, in days before now
    pub max_age_days: i64,
    /// Forecast days and trailing sales days compared
    pub compare_days: u32,
    /// Accuracy below this raises an alert
    pub min_accuracy: f64,
}

impl Default for ForecastAccuracyRule {
    fn default() -> Self {
        Self {
            min_age_days: 7,
            max_age_days: 30,
            compare_days: 7,
            min_accuracy: 0.7,
        }
    }
}

impl ForecastAccuracyRule {
    /// Upper bound on `max_age_days`
    pub const MAX_AGE_LIMIT_DAYS: i64 = 3650;

    pub fn validate(&self) -> Result<()> {
        if self.min_age_days < 0
            || self.max_age_days < self.min_age_days
            || self.max_age_days > Self::MAX_AGE_LIMIT_DAYS
        {
            return Err(RuleError::InvalidSettings(format!(
                "forecast accuracy ages must satisfy 0 <= min_age_days <= max_age_days <= {}",
                Self::MAX_AGE_LIMIT_DAYS
            )));
        }
        if self.compare_days == 0 {
            return Err(RuleError::InvalidSettings(
                "forecast accuracy compare_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Creation times accepted for a record, `(oldest, newest)`
    pub fn age_window(&self, now: DateTime<Utc>) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        self.validate()?;
        let before = |days: i64| {
            now.checked_sub_signed(Duration::days(days)).ok_or_else(|| {
                RuleError::DateOutOfRange(format!("{} days before {}", days, now))
            })
        };
        Ok((before(self.max_age_days)?, before(self.min_age_days)?))
    }

    /// The newest record for `product_id` created between `max_age_days`
    /// and `min_age_days` ago, bounds inclusive.
    ///
    /// Records for other products are skipped; a non-empty set holding
    /// none for `product_id` is an error.
    pub fn select_record<'r>(
        &self,
        records: &'r [ForecastRecord],
        product_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<&'r ForecastRecord>> {
        if let Some(foreign) = records.first() {
            if records.iter().all(|r| r.product_id != product_id) {
                return Err(RuleError::InvalidData(format!(
                    "forecast record for product {} supplied for product {}",
                    foreign.product_id, product_id
                )));
            }
        }

        let (oldest, newest) = self.age_window(now)?;
        Ok(records
            .iter()
            .filter(|r| r.product_id == product_id)
            .filter(|r| r.created_at >= oldest && r.created_at <= newest)
            .max_by_key(|r| r.created_at))
    }

    /// `1 - |forecast - actual| / forecast`, `None` when nothing was forecast
    pub fn accuracy(forecasted: f64, actual: f64) -> Option<f64> {
        (forecasted > 0.0).then(|| 1.0 - (forecasted - actual).abs() / forecasted)
    }
}

impl AlertRule for ForecastAccuracyRule {
    fn kind(&self) -> AlertKind {
        AlertKind::ForecastAccuracy
    }

    fn check(&self, snapshot: &ProductSnapshot<'_>) -> Result<Option<AlertEvent>> {
        let product = snapshot.product;
        let Some(record) = self.select_record(snapshot.forecasts, &product.id, snapshot.now)? else {
            return Ok(None);
        };

        let forecasted = record.forecast.total_for_first(self.compare_days as usize) as f64;
        let actual: f64 = snapshot
            .history
            .trailing(snapshot.today(), self.compare_days)
            .iter()
            .map(|o| f64::from(o.quantity))
            .sum();

        let Some(accuracy) = Self::accuracy(forecasted, actual) else {
            return Ok(None);
        };
        if accuracy >= self.min_accuracy {
            return Ok(None);
        }

        let event = AlertEvent::new(
            self.kind(),
            Severity::Low,
            &product.id,
            format!(
                "Low forecast accuracy for {}: {:.1}%",
                product.name,
                accuracy * 100.0
            ),
        )
        .with_evidence("accuracy", accuracy)
        .with_evidence("forecasted", forecasted)
        .with_evidence("actual", actual);

        Ok(Some(event))
    }
}
