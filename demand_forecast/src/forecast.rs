//! Forecast output types

use crate::confidence::ConfidenceLevel;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Predicted demand for one future day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub quantity: u32,
    /// Per-point score in `[0, 1]`, when the producer supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl ForecastPoint {
    pub fn new(date: NaiveDate, quantity: u32) -> Self {
        Self {
            date,
            quantity,
            confidence: None,
        }
    }
}

/// How a forecast was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    #[serde(rename = "statistical_ensemble")]
    Statistical,
    #[serde(rename = "ai_enhanced")]
    Ai,
    Hybrid,
    #[serde(rename = "scenario_analysis")]
    Scenario,
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ForecastMethod::Statistical => "statistical_ensemble",
            ForecastMethod::Ai => "ai_enhanced",
            ForecastMethod::Hybrid => "hybrid",
            ForecastMethod::Scenario => "scenario_analysis",
        };
        f.write_str(name)
    }
}

/// A contiguous daily demand forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    points: Vec<ForecastPoint>,
    method: ForecastMethod,
    confidence: ConfidenceLevel,
}

impl Forecast {
    pub fn new(points: Vec<ForecastPoint>, method: ForecastMethod, confidence: ConfidenceLevel) -> Self {
        Self {
            points,
            method,
            confidence,
        }
    }

    /// Forecast points, earliest first
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// Number of forecast days
    pub fn horizon(&self) -> usize {
        self.points.len()
    }

    pub fn method(&self) -> ForecastMethod {
        self.method
    }

    pub fn confidence(&self) -> ConfidenceLevel {
        self.confidence
    }

    /// Forecast quantities, earliest first
    pub fn quantities(&self) -> Vec<u32> {
        self.points.iter().map(|p| p.quantity).collect()
    }

    /// Forecast dates, earliest first
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Sum of the first `days` quantities
    pub fn total_for_first(&self, days: usize) -> u64 {
        self.points
            .iter()
            .take(days)
            .map(|p| u64::from(p.quantity))
            .sum()
    }
}

/// A forecast as persisted by the storage layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub product_id: String,
    pub created_at: DateTime<Utc>,
    pub forecast: Forecast,
}

impl ForecastRecord {
    pub fn new(product_id: impl Into<String>, created_at: DateTime<Utc>, forecast: Forecast) -> Self {
        Self {
            product_id: product_id.into(),
            created_at,
            forecast,
        }
    }
}
