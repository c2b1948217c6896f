//! Layered configuration
//!
//! Sources, later ones overriding earlier ones:
//! 1. Built-in defaults
//! 2. An optional configuration file (TOML, YAML or JSON by extension)
//! 3. `DEMANDCAST__*` environment variables, `__` separating nested keys,
//!    e.g. `DEMANDCAST__FORECAST__MIN_HISTORICAL_DAYS=21`

use config::{Config, ConfigError, Environment, File};
use demand_alerts::{AlertSettings, RuleError};
use demand_forecast::{ForecastError, ForecastSettings};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] ConfigError),

    #[error("Invalid forecast settings: {0}")]
    Forecast(#[from] ForecastError),

    #[error("Invalid alert settings: {0}")]
    Alerts(#[from] RuleError),

    #[error("Invalid settings: {0}")]
    Validation(String),
}

/// Everything the planner and the binary can be configured with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub forecast: ForecastSettings,
    pub alerts: AlertSettings,
    /// Default tracing level when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            forecast: ForecastSettings::default(),
            alerts: AlertSettings::default(),
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Settings {
    pub const ENV_PREFIX: &'static str = "DEMANDCAST";

    /// Load from an optional file and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_with_env(path, None)
    }

    /// Load from an optional file and the given variables instead of the
    /// process environment when `env` is set
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, SettingsError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            debug!(path = %path.display(), "reading configuration file");
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(Self::ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.forecast.validate()?;
        self.alerts.validate()?;

        let level = self.log_level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(SettingsError::Validation(format!(
                "log_level must be one of {}, got {}",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }
        Ok(())
    }
}
