//! Sales history handling for forecasting

use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One day of demand for a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Calendar day of the sales
    pub date: NaiveDate,
    /// Units sold
    pub quantity: u32,
    /// Revenue for the day, when known
    #[serde(default)]
    pub revenue: Option<f64>,
}

impl Observation {
    /// Create an observation without revenue
    pub fn new(date: NaiveDate, quantity: u32) -> Self {
        Self {
            date,
            quantity,
            revenue: None,
        }
    }

    /// Attach a revenue figure
    pub fn with_revenue(mut self, revenue: f64) -> Self {
        self.revenue = Some(revenue);
        self
    }
}

/// Date-ordered demand history for a single product.
///
/// Duplicate dates are a caller error and are not checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesHistory {
    observations: Vec<Observation>,
}

impl SalesHistory {
    /// Create a history, ordering the observations by date
    pub fn new(mut observations: Vec<Observation>) -> Self {
        observations.sort_by_key(|o| o.date);
        Self { observations }
    }

    /// Build a history of consecutive days starting at `start`
    pub fn from_daily_quantities(start: NaiveDate, quantities: &[u32]) -> Self {
        let observations = quantities
            .iter()
            .enumerate()
            .map(|(i, &q)| Observation::new(start + Duration::days(i as i64), q))
            .collect();
        Self { observations }
    }

    /// All observations, oldest first
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Quantities as floating point values, oldest first
    pub fn quantities(&self) -> Vec<f64> {
        quantities_of(&self.observations)
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the history has no observations
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Date of the newest observation
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }

    /// Date of the oldest observation
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    /// Observations in the `days` calendar days ending at `as_of`,
    /// i.e. dates in `(as_of - days, as_of]`
    pub fn trailing(&self, as_of: NaiveDate, days: u32) -> &[Observation] {
        if days == 0 {
            return &[];
        }
        let start = as_of
            .checked_sub_signed(Duration::days(i64::from(days) - 1))
            .unwrap_or(NaiveDate::MIN);
        self.between(start, as_of)
    }

    /// Observations with `start <= date <= end`
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> &[Observation] {
        if start > end {
            return &[];
        }
        let lo = self.observations.partition_point(|o| o.date < start);
        let hi = self.observations.partition_point(|o| o.date <= end);
        &self.observations[lo..hi]
    }
}

impl From<Vec<Observation>> for SalesHistory {
    fn from(observations: Vec<Observation>) -> Self {
        Self::new(observations)
    }
}

/// Quantities of a run of observations as `f64`
pub fn quantities_of(observations: &[Observation]) -> Vec<f64> {
    observations.iter().map(|o| f64::from(o.quantity)).collect()
}

/// Loader for sales histories stored as CSV (`date,quantity[,revenue]`)
#[derive(Debug)]
pub struct HistoryLoader;

impl HistoryLoader {
    /// Load a history from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<SalesHistory> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load a history from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<SalesHistory> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut observations = Vec::new();
        for row in csv_reader.deserialize() {
            let observation: Observation = row?;
            observations.push(observation);
        }

        if observations.is_empty() {
            return Err(ForecastError::DataError(
                "No sales rows found in CSV input".to_string(),
            ));
        }

        Ok(SalesHistory::new(observations))
    }
}
