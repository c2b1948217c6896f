//! Forecast a product and check it for alerts, printing a JSON report.
//!
//! ```text
//! demand_report --input sales.csv --name "Sun Cream" --horizon 14
//! demand_report --demo --lead-time 21 --scenario-weather rain
//! ```

use anyhow::{bail, Context, Result};
use chrono::{Duration, Utc};
use clap::{Parser, ValueEnum};
use demandcast::forecast::utils::{generate_demand_history, SyntheticDemand};
use demandcast::forecast::{
    EconomicImpact, ForecastRecord, ForecastRequest, HistoryLoader, ProductProfile,
    RequestedMethod, ScenarioAdjustment, WeatherImpact,
};
use demandcast::{init_tracing, DemandPlanner, PlanRequest, Settings};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Method {
    Statistical,
    Ai,
    Hybrid,
}

impl From<Method> for RequestedMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::Statistical => RequestedMethod::Statistical,
            Method::Ai => RequestedMethod::Ai,
            Method::Hybrid => RequestedMethod::Hybrid,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Weather {
    ExtremeHeat,
    Rain,
    Normal,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Economy {
    Recession,
    Growth,
    Stable,
}

#[derive(Parser, Debug)]
#[command(name = "demand_report")]
#[command(about = "Demand forecast and alert report for one product", long_about = None)]
struct Cli {
    /// Sales history CSV (date,quantity[,revenue])
    #[arg(short, long, required_unless_present = "demo")]
    input: Option<PathBuf>,

    /// Use a generated 90-day history instead of a CSV file
    #[arg(long)]
    demo: bool,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "product-1")]
    product_id: String,

    #[arg(long, default_value = "Product")]
    name: String,

    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    supplier: Option<String>,

    #[arg(long, default_value_t = 7)]
    lead_time: u32,

    #[arg(long, default_value_t = 7)]
    safety_stock: u32,

    /// Days to forecast; the configured default when omitted
    #[arg(long)]
    horizon: Option<usize>,

    /// AI and hybrid fall back to statistical without an external forecaster
    #[arg(short, long, value_enum, default_value = "statistical")]
    method: Method,

    /// Stored forecasts (JSON array of records) for the accuracy rule
    #[arg(long)]
    forecasts: Option<PathBuf>,

    #[arg(long, allow_hyphen_values = true)]
    scenario_change: Option<f64>,

    #[arg(long, value_enum)]
    scenario_weather: Option<Weather>,

    #[arg(long, value_enum)]
    scenario_economy: Option<Economy>,
}

impl Cli {
    fn scenario(&self) -> Option<ScenarioAdjustment> {
        if self.scenario_change.is_none()
            && self.scenario_weather.is_none()
            && self.scenario_economy.is_none()
        {
            return None;
        }

        Some(ScenarioAdjustment {
            demand_change_percent: self.scenario_change,
            weather_impact: self.scenario_weather.map(|w| match w {
                Weather::ExtremeHeat => WeatherImpact::ExtremeHeat,
                Weather::Rain => WeatherImpact::Rain,
                Weather::Normal => WeatherImpact::Normal,
            }),
            economic_impact: self.scenario_economy.map(|e| match e {
                Economy::Recession => EconomicImpact::Recession,
                Economy::Growth => EconomicImpact::Growth,
                Economy::Stable => EconomicImpact::Stable,
            }),
        })
    }

    fn product(&self) -> ProductProfile {
        let mut product = ProductProfile::new(&self.product_id, &self.name)
            .with_lead_time(self.lead_time, self.safety_stock);
        if let Some(category) = &self.category {
            product = product.with_category(category);
        }
        if let Some(supplier) = &self.supplier {
            product = product.with_supplier(supplier);
        }
        product
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    init_tracing(&settings.log_level, settings.log_json);

    let now = Utc::now();
    let history = match (&cli.input, cli.demo) {
        (_, true) => {
            let shape = SyntheticDemand {
                base_level: 40.0,
                daily_drift: 0.1,
                weekly_amplitude: 0.25,
                noise: 5.0,
                seed: 7,
            };
            generate_demand_history(now.date_naive() - Duration::days(89), 90, &shape)?
        }
        (Some(path), false) => HistoryLoader::from_csv(path)
            .with_context(|| format!("failed to read sales history from {}", path.display()))?,
        (None, false) => bail!("either --input or --demo is required"),
    };
    info!(observations = history.len(), "sales history loaded");

    let stored: Vec<ForecastRecord> = match &cli.forecasts {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read forecasts from {}", path.display()))?;
            serde_json::from_str(&raw).context("invalid forecast records")?
        }
        None => Vec::new(),
    };

    let mut request = PlanRequest::new(ForecastRequest {
        horizon_days: cli.horizon,
        method: cli.method.into(),
    });
    if let Some(scenario) = cli.scenario() {
        request = request.with_scenario(scenario);
    }

    let planner = DemandPlanner::new(&settings)?;
    let report = planner.plan(&cli.product(), &history, &stored, &request, now)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
