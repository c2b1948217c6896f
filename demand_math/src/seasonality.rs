//! Weekly seasonality profile
//!
//! Observations are bucketed by position modulo 7 (bucket `d` holds indices
//! `d, d + 7, d + 14, ...`). Buckets are relative to the start of the series,
//! not to calendar weekdays.

use crate::statistics::mean;
use serde::{Deserialize, Serialize};

/// Number of buckets in a weekly cycle
pub const DAYS_PER_WEEK: usize = 7;

/// Per-bucket averages of a daily series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyProfile {
    averages: [f64; DAYS_PER_WEEK],
}

impl WeeklyProfile {
    /// Build the profile from a daily series. Empty buckets average to zero.
    pub fn from_series(values: &[f64]) -> Self {
        let mut averages = [0.0; DAYS_PER_WEEK];
        for (day, average) in averages.iter_mut().enumerate() {
            let bucket: Vec<f64> = values.iter().skip(day).step_by(DAYS_PER_WEEK).copied().collect();
            *average = mean(&bucket).unwrap_or(0.0);
        }
        Self { averages }
    }

    /// Raw bucket averages
    pub fn averages(&self) -> &[f64; DAYS_PER_WEEK] {
        &self.averages
    }

    /// Average of the bucket averages
    pub fn grand_average(&self) -> f64 {
        self.averages.iter().sum::<f64>() / DAYS_PER_WEEK as f64
    }

    /// Bucket average divided by the grand average.
    ///
    /// A zero grand average means every bucket is zero; factors are then 1.0.
    pub fn factor(&self, bucket: usize) -> f64 {
        let grand = self.grand_average();
        if grand == 0.0 {
            return 1.0;
        }
        self.averages[bucket % DAYS_PER_WEEK] / grand
    }
}
