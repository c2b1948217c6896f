//! One planning pass for a product: forecast, optional scenario, alerts

use crate::settings::{Settings, SettingsError};
use chrono::{DateTime, Utc};
use demand_alerts::{AlertEvaluator, AlertEvent, ProductSnapshot};
use demand_forecast::{
    ExternalContext, ExternalForecastRequest, ExternalForecaster, ForecastEngine,
    ForecastOutcome, ForecastRecord, ForecastRequest, ProductProfile, RequestedMethod,
    SalesHistory, ScenarioAdjustment, ScenarioForecast,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// What to produce for a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub forecast: ForecastRequest,
    /// External data handed to the AI forecaster
    #[serde(default)]
    pub context: ExternalContext,
    #[serde(default)]
    pub user_notes: Option<String>,
    /// What-if adjustment of the statistical forecast
    #[serde(default)]
    pub scenario: Option<ScenarioAdjustment>,
}

impl PlanRequest {
    pub fn new(forecast: ForecastRequest) -> Self {
        Self {
            forecast,
            context: ExternalContext::default(),
            user_notes: None,
            scenario: None,
        }
    }

    pub fn with_scenario(mut self, scenario: ScenarioAdjustment) -> Self {
        self.scenario = Some(scenario);
        self
    }

    pub fn with_context(mut self, context: ExternalContext, user_notes: Option<String>) -> Self {
        self.context = context;
        self.user_notes = user_notes;
        self
    }
}

/// Result of a planning pass, ready to be stored or printed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    pub product_id: String,
    pub generated_at: DateTime<Utc>,
    pub history_days: usize,
    pub outcome: ForecastOutcome,
    /// The new forecast as the storage layer persists it
    pub record: ForecastRecord,
    pub scenario: Option<ScenarioForecast>,
    pub alerts: Vec<AlertEvent>,
}

/// Forecast engine, alert evaluator and an optional AI forecaster
pub struct DemandPlanner {
    engine: ForecastEngine,
    evaluator: AlertEvaluator,
    forecaster: Option<Box<dyn ExternalForecaster>>,
}

impl fmt::Debug for DemandPlanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DemandPlanner")
            .field("engine", &self.engine)
            .field("evaluator", &self.evaluator)
            .field("forecaster", &self.forecaster.is_some())
            .finish()
    }
}

impl Default for DemandPlanner {
    fn default() -> Self {
        Self {
            engine: ForecastEngine::default(),
            evaluator: AlertEvaluator::default(),
            forecaster: None,
        }
    }
}

impl DemandPlanner {
    pub fn new(settings: &Settings) -> Result<Self, SettingsError> {
        Ok(Self {
            engine: ForecastEngine::new(settings.forecast.clone())?,
            evaluator: AlertEvaluator::new(settings.alerts.clone())?,
            forecaster: None,
        })
    }

    /// Use `forecaster` for AI and hybrid requests
    pub fn with_forecaster(mut self, forecaster: Box<dyn ExternalForecaster>) -> Self {
        self.forecaster = Some(forecaster);
        self
    }

    pub fn engine(&self) -> &ForecastEngine {
        &self.engine
    }

    pub fn evaluator(&self) -> &AlertEvaluator {
        &self.evaluator
    }

    /// Forecast `product`, apply the scenario if any, and run the alert rules
    /// against `history` and the previously stored forecasts
    pub fn plan(
        &self,
        product: &ProductProfile,
        history: &SalesHistory,
        stored_forecasts: &[ForecastRecord],
        request: &PlanRequest,
        now: DateTime<Utc>,
    ) -> demand_forecast::Result<PlanReport> {
        let horizon = self.engine.validate_request(history, &request.forecast)?;
        let external = match request.forecast.method {
            RequestedMethod::Statistical => None,
            RequestedMethod::Ai | RequestedMethod::Hybrid => {
                self.ask_forecaster(product, history, horizon, request)
            }
        };

        let outcome = self
            .engine
            .forecast(history, &request.forecast, external.as_ref())?;
        let record = ForecastRecord::new(&product.id, now, outcome.forecast.clone());

        let scenario = match &request.scenario {
            Some(adjustment) => Some(self.engine.scenario(
                history,
                request.forecast.horizon_days,
                adjustment,
            )?),
            None => None,
        };

        let snapshot = ProductSnapshot::new(product, history, stored_forecasts, now);
        let alerts = self.evaluator.evaluate_product(&snapshot);

        info!(
            product_id = %product.id,
            method = %outcome.forecast.method(),
            horizon = outcome.forecast.horizon(),
            alerts = alerts.len(),
            "plan complete"
        );

        Ok(PlanReport {
            product_id: product.id.clone(),
            generated_at: now,
            history_days: history.len(),
            outcome,
            record,
            scenario,
            alerts,
        })
    }

    fn ask_forecaster(
        &self,
        product: &ProductProfile,
        history: &SalesHistory,
        horizon: usize,
        request: &PlanRequest,
    ) -> Option<demand_forecast::AiForecast> {
        let Some(forecaster) = &self.forecaster else {
            warn!(product_id = %product.id, "no external forecaster configured");
            return None;
        };

        let external_request = ExternalForecastRequest::new(
            product,
            history,
            horizon,
            &request.context,
            request.user_notes.as_deref(),
        );
        forecaster.forecast(&external_request)
    }
}
