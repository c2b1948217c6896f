//! Forecast confidence labelling

use demand_math::statistics::{mean, population_variance, tail};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse confidence label attached to a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfidenceLevel::High => "High",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::Low => "Low",
        };
        f.write_str(label)
    }
}

/// Labels a history by how noisy its recent observations are.
///
/// The score is `variance / (mean + 1)` over the last `lookback` values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceAssessor {
    /// Histories shorter than this are always `Low`
    pub min_history: usize,
    pub lookback: usize,
    /// Scores below this are `High`
    pub high_threshold: f64,
    /// Scores below this (and not `High`) are `Medium`
    pub medium_threshold: f64,
}

impl Default for ConfidenceAssessor {
    fn default() -> Self {
        Self {
            min_history: 7,
            lookback: 14,
            high_threshold: 0.1,
            medium_threshold: 0.3,
        }
    }
}

impl ConfidenceAssessor {
    /// Dispersion score of the recent window, `None` when the series is empty
    pub fn score(&self, series: &[f64]) -> Option<f64> {
        let recent = tail(series, self.lookback);
        let variance = population_variance(recent)?;
        let mean = mean(recent)?;
        Some(variance / (mean + 1.0))
    }

    pub fn assess(&self, series: &[f64]) -> ConfidenceLevel {
        if series.len() < self.min_history {
            return ConfidenceLevel::Low;
        }

        match self.score(series) {
            Some(score) if score < self.high_threshold => ConfidenceLevel::High,
            Some(score) if score < self.medium_threshold => ConfidenceLevel::Medium,
            _ => ConfidenceLevel::Low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_history_is_high() {
        let assessor = ConfidenceAssessor::default();
        assert_eq!(assessor.assess(&[50.0; 30]), ConfidenceLevel::High);
    }

    #[test]
    fn test_short_history_is_low() {
        let assessor = ConfidenceAssessor::default();
        assert_eq!(assessor.assess(&[50.0; 6]), ConfidenceLevel::Low);
    }

    #[test]
    fn test_noise_bands() {
        // Alternating 9 / 11: variance 1, mean 10, score 1/11 < 0.1 -> High
        let calm: Vec<f64> = (0..14).map(|i| if i % 2 == 0 { 9.0 } else { 11.0 }).collect();
        assert_eq!(ConfidenceAssessor::default().assess(&calm), ConfidenceLevel::High);

        // Alternating 8 / 12: variance 4, mean 10, score 4/11 >= 0.3 -> Low
        let noisy: Vec<f64> = (0..14).map(|i| if i % 2 == 0 { 8.0 } else { 12.0 }).collect();
        assert_eq!(ConfidenceAssessor::default().assess(&noisy), ConfidenceLevel::Low);

        // Alternating 8.5 / 11.5: variance 2.25, score 2.25/11 ~= 0.205 -> Medium
        let mid: Vec<f64> = (0..14).map(|i| if i % 2 == 0 { 8.5 } else { 11.5 }).collect();
        assert_eq!(ConfidenceAssessor::default().assess(&mid), ConfidenceLevel::Medium);
    }
}
