//! The forecast engine
//!
//! Statistical forecasts never fail: sparse or empty histories fall back to
//! each estimator's degenerate output. The request boundary
//! ([`ForecastEngine::forecast`]) is where caller contracts are enforced.

use crate::confidence::ConfidenceLevel;
use crate::data::SalesHistory;
use crate::ensemble::StatisticalEnsemble;
use crate::error::{ForecastError, Result};
use crate::external::{AiForecast, ForecastInsights};
use crate::forecast::{Forecast, ForecastMethod, ForecastPoint};
use crate::scenario::{ScenarioAdjustment, ScenarioForecast};
use crate::settings::ForecastSettings;
use crate::utils::future_dates;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Forecasting method a caller asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestedMethod {
    Statistical,
    Ai,
    Hybrid,
}

/// A forecast request at the engine boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    /// Days to forecast; the configured default when unset
    #[serde(default)]
    pub horizon_days: Option<usize>,
    pub method: RequestedMethod,
}

impl ForecastRequest {
    pub fn new(horizon_days: usize, method: RequestedMethod) -> Self {
        Self {
            horizon_days: Some(horizon_days),
            method,
        }
    }

    pub fn statistical(horizon_days: usize) -> Self {
        Self::new(horizon_days, RequestedMethod::Statistical)
    }
}

/// What the engine produced for a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastOutcome {
    pub forecast: Forecast,
    /// Narrative from the external forecaster, when one was used
    pub insights: Option<ForecastInsights>,
    /// An external method was requested but no external forecast was supplied
    pub fell_back: bool,
}

/// Stateless forecasting component built from [`ForecastSettings`]
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    settings: ForecastSettings,
    ensemble: StatisticalEnsemble,
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self {
            settings: ForecastSettings::default(),
            ensemble: StatisticalEnsemble::default(),
        }
    }
}

impl ForecastEngine {
    pub fn new(settings: ForecastSettings) -> Result<Self> {
        settings.validate()?;
        let ensemble = StatisticalEnsemble::with_weights(settings.weights)?;
        Ok(Self { settings, ensemble })
    }

    pub fn settings(&self) -> &ForecastSettings {
        &self.settings
    }

    /// Ensemble forecast for the `horizon` days after the last observation.
    ///
    /// An empty history yields an all-zero forecast starting tomorrow (UTC).
    pub fn statistical_forecast(&self, history: &SalesHistory, horizon: usize) -> Forecast {
        let series = history.quantities();
        let quantities = self.ensemble.predict(&series, horizon);

        let points = forecast_dates(history, horizon)
            .into_iter()
            .zip(quantities)
            .map(|(date, quantity)| ForecastPoint::new(date, quantity))
            .collect();

        let confidence = self.settings.confidence.assess(&series);
        debug!(observations = series.len(), horizon, %confidence, "statistical forecast");

        Forecast::new(points, ForecastMethod::Statistical, confidence)
    }

    /// See [`blend_forecast`]
    pub fn blend_forecast(&self, statistical: &Forecast, external: &Forecast) -> Result<Forecast> {
        blend_forecast(statistical, external)
    }

    /// See [`ScenarioAdjustment::apply`]
    pub fn scenario_forecast(&self, base: &Forecast, scenario: &ScenarioAdjustment) -> ScenarioForecast {
        scenario.apply(base)
    }

    /// Check a request against the history and horizon limits, returning
    /// the horizon it resolves to
    pub fn validate_request(&self, history: &SalesHistory, request: &ForecastRequest) -> Result<usize> {
        if history.len() < self.settings.min_historical_days {
            return Err(ForecastError::InsufficientData {
                required: self.settings.min_historical_days,
                available: history.len(),
            });
        }
        self.resolve_horizon(request.horizon_days)
    }

    /// Produce a forecast for a request, enforcing the history and horizon limits.
    ///
    /// `external` is the external forecaster's answer, if it gave one.
    /// Without it, or when it does not cover exactly the forecast days,
    /// AI and hybrid requests are served statistically.
    pub fn forecast(
        &self,
        history: &SalesHistory,
        request: &ForecastRequest,
        external: Option<&AiForecast>,
    ) -> Result<ForecastOutcome> {
        let horizon = self.validate_request(history, request)?;
        let expected = forecast_dates(history, horizon);
        let wants_external = request.method != RequestedMethod::Statistical;
        let external = external.filter(|ai| {
            if !wants_external {
                return false;
            }
            let covers = ai.covers(&expected);
            if !covers {
                warn!(
                    requested = horizon,
                    received = ai.horizon(),
                    "external forecast does not cover the forecast days, discarding it"
                );
            }
            covers
        });

        let outcome = match (request.method, external) {
            (RequestedMethod::Statistical, _) => ForecastOutcome {
                forecast: self.statistical_forecast(history, horizon),
                insights: None,
                fell_back: false,
            },
            (RequestedMethod::Ai, Some(ai)) => ForecastOutcome {
                forecast: ai.to_forecast(),
                insights: Some(ai.insights()),
                fell_back: false,
            },
            (RequestedMethod::Hybrid, Some(ai)) => {
                let statistical = self.statistical_forecast(history, horizon);
                ForecastOutcome {
                    forecast: blend_forecast(&statistical, &ai.to_forecast())?,
                    insights: Some(ai.insights()),
                    fell_back: false,
                }
            }
            (method, None) => {
                warn!(?method, "external forecast unavailable, using statistical forecast");
                ForecastOutcome {
                    forecast: self.statistical_forecast(history, horizon),
                    insights: None,
                    fell_back: true,
                }
            }
        };

        Ok(outcome)
    }

    /// Statistical base forecast adjusted for a what-if scenario
    pub fn scenario(
        &self,
        history: &SalesHistory,
        horizon_days: Option<usize>,
        scenario: &ScenarioAdjustment,
    ) -> Result<ScenarioForecast> {
        let horizon = self.resolve_horizon(horizon_days)?;
        let base = self.statistical_forecast(history, horizon);
        Ok(scenario.apply(&base))
    }

    fn resolve_horizon(&self, horizon_days: Option<usize>) -> Result<usize> {
        let horizon = horizon_days.unwrap_or(self.settings.default_forecast_days);
        if horizon == 0 || horizon > self.settings.max_forecast_days {
            return Err(ForecastError::InvalidParameter(format!(
                "Forecast horizon must be between 1 and {} days, got {}",
                self.settings.max_forecast_days, horizon
            )));
        }
        Ok(horizon)
    }
}

/// The `horizon` days after the last observation, or after today (UTC)
/// for an empty history
fn forecast_dates(history: &SalesHistory, horizon: usize) -> Vec<NaiveDate> {
    let last_date = history
        .last_date()
        .unwrap_or_else(|| Utc::now().date_naive());
    future_dates(last_date, horizon)
}

/// Average two forecasts of the same horizon point by point.
///
/// Quantities are the integer average `(a + b) / 2`; dates and per-point
/// scores come from `statistical`.
pub fn blend_forecast(statistical: &Forecast, external: &Forecast) -> Result<Forecast> {
    if statistical.horizon() != external.horizon() {
        return Err(ForecastError::ShapeMismatch {
            expected: statistical.horizon(),
            actual: external.horizon(),
        });
    }

    let points = statistical
        .points()
        .iter()
        .zip(external.points())
        .map(|(stat, ext)| {
            let average = (u64::from(stat.quantity) + u64::from(ext.quantity)) / 2;
            ForecastPoint {
                // The average of two u32 values always fits in a u32
                quantity: average as u32,
                ..stat.clone()
            }
        })
        .collect();

    Ok(Forecast::new(points, ForecastMethod::Hybrid, ConfidenceLevel::Medium))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_empty_history_gives_zero_forecast() {
        let forecast = ForecastEngine::default().statistical_forecast(&SalesHistory::default(), 5);
        assert_eq!(forecast.quantities(), vec![0; 5]);
        assert_eq!(forecast.confidence(), ConfidenceLevel::Low);
    }

    #[test]
    fn test_empty_history_starts_after_today() {
        let before = Utc::now().date_naive();
        let forecast = ForecastEngine::default().statistical_forecast(&SalesHistory::default(), 3);
        let after = Utc::now().date_naive();

        let first = forecast.points()[0].date;
        assert!(first == before.succ_opt().unwrap() || first == after.succ_opt().unwrap());
        let dates: Vec<NaiveDate> = forecast.points().iter().map(|p| p.date).collect();
        assert_eq!(dates, future_dates(first.pred_opt().unwrap(), 3));
    }

    #[test]
    fn test_validate_request() {
        let engine = ForecastEngine::default();
        let history = SalesHistory::from_daily_quantities(start(), &[10; 20]);
        assert_eq!(engine.validate_request(&history, &ForecastRequest::statistical(7)).unwrap(), 7);
        assert!(engine.validate_request(&history, &ForecastRequest::statistical(0)).is_err());

        let short = SalesHistory::from_daily_quantities(start(), &[10; 5]);
        assert!(matches!(
            engine.validate_request(&short, &ForecastRequest::statistical(7)),
            Err(ForecastError::InsufficientData { required: 14, available: 5 })
        ));
    }

    #[test]
    fn test_single_observation() {
        let history = SalesHistory::from_daily_quantities(start(), &[12]);
        let forecast = ForecastEngine::default().statistical_forecast(&history, 3);
        assert_eq!(forecast.quantities(), vec![12; 3]);
        assert_eq!(forecast.points()[0].date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    }

    #[test]
    fn test_blend_rounds_down() {
        let history = SalesHistory::from_daily_quantities(start(), &[10; 20]);
        let engine = ForecastEngine::default();
        let a = engine.statistical_forecast(&history, 2);
        let mut b_points = a.points().to_vec();
        b_points[0].quantity = 13;
        let b = Forecast::new(b_points, ForecastMethod::Ai, ConfidenceLevel::High);

        let blended = engine.blend_forecast(&a, &b).unwrap();
        assert_eq!(blended.quantities(), vec![11, 10]);
        assert_eq!(blended.method(), ForecastMethod::Hybrid);
    }

    #[test]
    fn test_horizon_limits() {
        let history = SalesHistory::from_daily_quantities(start(), &[10; 20]);
        let engine = ForecastEngine::default();
        assert!(engine.forecast(&history, &ForecastRequest::statistical(0), None).is_err());
        assert!(engine.forecast(&history, &ForecastRequest::statistical(366), None).is_err());

        let default_horizon = ForecastRequest {
            horizon_days: None,
            method: RequestedMethod::Statistical,
        };
        let outcome = engine.forecast(&history, &default_horizon, None).unwrap();
        assert_eq!(outcome.forecast.horizon(), 30);
    }
}
