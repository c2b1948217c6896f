//! Seasonal anomaly: this week against the same ISO week a year earlier

use super::AlertRule;
use crate::alert::{AlertEvent, AlertKind, Severity};
use crate::error::{Result, RuleError};
use crate::snapshot::ProductSnapshot;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use demand_math::statistics::percent_change;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonalAnomalyRule {
    /// Trailing days of sales making up "this week"
    pub window_days: u32,
    /// Absolute deviation, in percent, that must be exceeded
    pub deviation_threshold_percent: f64,
}

impl Default for SeasonalAnomalyRule {
    fn default() -> Self {
        Self {
            window_days: 7,
            deviation_threshold_percent: 75.0,
        }
    }
}

impl SeasonalAnomalyRule {
    pub fn validate(&self) -> Result<()> {
        if self.window_days == 0 {
            return Err(RuleError::InvalidSettings(
                "seasonal window_days must be at least 1".to_string(),
            ));
        }
        if !self.deviation_threshold_percent.is_finite() {
            return Err(RuleError::InvalidSettings(
                "seasonal threshold must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a deviation is beyond the threshold. The threshold itself is normal.
    pub fn is_anomalous(&self, deviation_percent: f64) -> bool {
        deviation_percent.abs() > self.deviation_threshold_percent
    }
}

/// Monday to Sunday of the ISO week `today` falls in, one year earlier.
///
/// Week 53 maps to week 52 when the earlier year has no week 53.
pub fn same_week_last_year(today: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let week = today.iso_week();
    let year = week.year() - 1;

    let monday = NaiveDate::from_isoywd_opt(year, week.week(), Weekday::Mon)
        .or_else(|| NaiveDate::from_isoywd_opt(year, 52, Weekday::Mon))
        .ok_or_else(|| {
            RuleError::DateOutOfRange(format!("no ISO week {} in {}", week.week(), year))
        })?;

    Ok((monday, monday + Duration::days(6)))
}

impl AlertRule for SeasonalAnomalyRule {
    fn kind(&self) -> AlertKind {
        AlertKind::SeasonalAnomaly
    }

    fn check(&self, snapshot: &ProductSnapshot<'_>) -> Result<Option<AlertEvent>> {
        let today = snapshot.today();
        let current = snapshot.history.trailing(today, self.window_days);
        let (start, end) = same_week_last_year(today)?;
        let last_year = snapshot.history.between(start, end);

        if current.is_empty() || last_year.is_empty() {
            return Ok(None);
        }

        let current_total: f64 = current.iter().map(|o| f64::from(o.quantity)).sum();
        let last_year_total: f64 = last_year.iter().map(|o| f64::from(o.quantity)).sum();

        let Some(deviation) = percent_change(current_total, last_year_total) else {
            return Ok(None);
        };
        if !self.is_anomalous(deviation) {
            return Ok(None);
        }

        let product = snapshot.product;
        let event = AlertEvent::new(
            self.kind(),
            Severity::Medium,
            &product.id,
            format!(
                "Seasonal anomaly for {}: {:.1}% vs last year",
                product.name, deviation
            ),
        )
        .with_evidence("seasonal_change", deviation)
        .with_evidence("current_week", current_total)
        .with_evidence("last_year_week", last_year_total);

        Ok(Some(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_same_week_last_year() {
        // 2024-06-12 is in ISO week 24; week 24 of 2023 starts on 2023-06-12
        assert_eq!(
            same_week_last_year(date(2024, 6, 12)).unwrap(),
            (date(2023, 6, 12), date(2023, 6, 18))
        );
    }

    #[test]
    fn test_week_53_falls_back_to_52() {
        // 2020-12-31 is in ISO week 53; 2019 has 52 weeks
        assert_eq!(
            same_week_last_year(date(2020, 12, 31)).unwrap(),
            (date(2019, 12, 23), date(2019, 12, 29))
        );
    }
}
