//! The per-product input of an alert pass

use chrono::{DateTime, NaiveDate, Utc};
use demand_forecast::{ForecastRecord, ProductProfile, SalesHistory};

/// Everything the rules read about one product at one evaluation instant
#[derive(Debug, Clone, Copy)]
pub struct ProductSnapshot<'a> {
    pub product: &'a ProductProfile,
    pub history: &'a SalesHistory,
    /// Stored forecasts for the product, in any order
    pub forecasts: &'a [ForecastRecord],
    /// Evaluation instant; sales windows end on its UTC date
    pub now: DateTime<Utc>,
}

impl<'a> ProductSnapshot<'a> {
    pub fn new(
        product: &'a ProductProfile,
        history: &'a SalesHistory,
        forecasts: &'a [ForecastRecord],
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            product,
            history,
            forecasts,
            now,
        }
    }

    /// The UTC calendar day sales windows end on
    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}
