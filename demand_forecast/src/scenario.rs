//! What-if scenario adjustments

use crate::confidence::ConfidenceLevel;
use crate::forecast::{Forecast, ForecastMethod, ForecastPoint};
use serde::{Deserialize, Serialize};

/// Assumed weather conditions over the forecast horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherImpact {
    ExtremeHeat,
    Rain,
    Normal,
}

impl WeatherImpact {
    pub fn multiplier(self) -> f64 {
        match self {
            WeatherImpact::ExtremeHeat => 0.8,
            WeatherImpact::Rain => 1.2,
            WeatherImpact::Normal => 1.0,
        }
    }
}

/// Assumed economic conditions over the forecast horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EconomicImpact {
    Recession,
    Growth,
    Stable,
}

impl EconomicImpact {
    pub fn multiplier(self) -> f64 {
        match self {
            EconomicImpact::Recession => 0.7,
            EconomicImpact::Growth => 1.3,
            EconomicImpact::Stable => 1.0,
        }
    }
}

/// Hypothetical conditions applied to a base forecast. Unset fields are neutral.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAdjustment {
    #[serde(default)]
    pub demand_change_percent: Option<f64>,
    #[serde(default)]
    pub weather_impact: Option<WeatherImpact>,
    #[serde(default)]
    pub economic_impact: Option<EconomicImpact>,
}

impl ScenarioAdjustment {
    /// Combined multiplicative factor of all set fields
    pub fn adjustment_factor(&self) -> f64 {
        let demand = self
            .demand_change_percent
            .map_or(1.0, |percent| 1.0 + percent / 100.0);
        let weather = self.weather_impact.map_or(1.0, WeatherImpact::multiplier);
        let economic = self.economic_impact.map_or(1.0, EconomicImpact::multiplier);
        demand * weather * economic
    }

    /// Scale every quantity of `base`, truncating and flooring at zero
    pub fn apply(&self, base: &Forecast) -> ScenarioForecast {
        let factor = self.adjustment_factor();
        let points = base
            .points()
            .iter()
            .map(|p| ForecastPoint {
                quantity: scale_quantity(p.quantity, factor),
                ..p.clone()
            })
            .collect();

        ScenarioForecast {
            forecast: Forecast::new(points, ForecastMethod::Scenario, ConfidenceLevel::Medium),
            scenario: self.clone(),
            adjustment_factor: factor,
        }
    }
}

fn scale_quantity(quantity: u32, factor: f64) -> u32 {
    let scaled = (f64::from(quantity) * factor).trunc();
    if !scaled.is_finite() || scaled <= 0.0 {
        0
    } else if scaled >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        scaled as u32
    }
}

/// A base forecast adjusted for a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioForecast {
    pub forecast: Forecast,
    pub scenario: ScenarioAdjustment,
    pub adjustment_factor: f64,
}
