//! Context for, and responses from, the external (AI) forecaster
//!
//! The call itself lives outside this crate. This module prepares the
//! summaries that are handed to it and decodes what comes back.

use crate::confidence::ConfidenceLevel;
use crate::data::SalesHistory;
use crate::error::Result;
use crate::forecast::{Forecast, ForecastMethod, ForecastPoint};
use crate::product::ProductProfile;
use chrono::NaiveDate;
use demand_math::statistics::{mean, percent_change, population_variance, tail, total};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of recent demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemandTrend {
    Increasing,
    Decreasing,
    Stable,
}

impl fmt::Display for DemandTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DemandTrend::Increasing => "increasing",
            DemandTrend::Decreasing => "decreasing",
            DemandTrend::Stable => "stable",
        };
        f.write_str(label)
    }
}

/// Headline figures of a sales history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub days: usize,
    pub total: f64,
    pub daily_average: f64,
    pub min: f64,
    pub max: f64,
    pub trend: DemandTrend,
    pub last_week: Vec<u32>,
    pub variance: f64,
}

impl SalesSummary {
    /// Relative change of the last-7 average over the previous-7 average
    /// that counts as a trend
    pub const TREND_THRESHOLD_PERCENT: f64 = 10.0;

    pub fn from_history(history: &SalesHistory) -> Self {
        let quantities = history.quantities();
        let last_week: Vec<u32> = history
            .observations()
            .iter()
            .rev()
            .take(7)
            .rev()
            .map(|o| o.quantity)
            .collect();

        Self {
            days: quantities.len(),
            total: total(&quantities),
            daily_average: mean(&quantities).unwrap_or(0.0),
            min: quantities.iter().copied().reduce(f64::min).unwrap_or(0.0),
            max: quantities.iter().copied().reduce(f64::max).unwrap_or(0.0),
            trend: classify_trend(&quantities),
            last_week,
            variance: population_variance(&quantities).unwrap_or(0.0),
        }
    }
}

fn classify_trend(quantities: &[f64]) -> DemandTrend {
    if quantities.len() < 14 {
        return DemandTrend::Stable;
    }

    let recent = tail(quantities, 7);
    let previous = &quantities[quantities.len() - 14..quantities.len() - 7];
    let change = match (mean(recent), mean(previous)) {
        (Some(r), Some(p)) => percent_change(r, p),
        _ => None,
    };

    match change {
        Some(c) if c > SalesSummary::TREND_THRESHOLD_PERCENT => DemandTrend::Increasing,
        Some(c) if c < -SalesSummary::TREND_THRESHOLD_PERCENT => DemandTrend::Decreasing,
        _ => DemandTrend::Stable,
    }
}

impl fmt::Display for SalesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total sales ({} days): {}", self.days, self.total)?;
        writeln!(f, "Daily average: {:.1}", self.daily_average)?;
        writeln!(f, "Range: {} - {}", self.min, self.max)?;
        writeln!(f, "Recent trend: {}", self.trend)?;
        writeln!(f, "Last 7 days: {:?}", self.last_week)?;
        writeln!(f, "Variance: {:.2}", self.variance)?;
        Ok(())
    }
}

/// Weather readings for the product's region
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSummary {
    pub temperature_avg: Vec<f64>,
    pub precipitation: Vec<f64>,
    pub humidity: Vec<f64>,
    pub extreme_weather_alerts: Vec<String>,
}

/// Macro indicators for the product's region
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomicSummary {
    pub gdp_growth: f64,
    pub inflation_rate: f64,
    pub unemployment_rate: f64,
}

/// Aggregate news sentiment for the product category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsSummary {
    /// Sentiment in `[-1, 1]`
    pub sentiment_score: f64,
    pub news_count: u32,
    pub sample_headlines: Vec<String>,
}

/// Everything the external-data fetchers returned. Passed through as text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalContext {
    pub weather: Option<WeatherSummary>,
    pub economic: Option<EconomicSummary>,
    pub news: Option<NewsSummary>,
}

impl ExternalContext {
    /// Sentiment beyond this magnitude is reported as positive or negative
    pub const SENTIMENT_THRESHOLD: f64 = 0.1;

    /// One line per available source
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        if let Some(weather) = &self.weather {
            let precipitation: f64 = weather.precipitation.iter().sum();
            match mean(&weather.temperature_avg) {
                Some(temp) => lines.push(format!(
                    "Weather: Avg temp {:.1}°C, Precipitation {}mm",
                    temp, precipitation
                )),
                None => lines.push(format!("Weather: Precipitation {}mm", precipitation)),
            }

            if !weather.extreme_weather_alerts.is_empty() {
                lines.push(format!(
                    "Weather alerts: {}",
                    weather.extreme_weather_alerts.join(", ")
                ));
            }
        }

        if let Some(economic) = &self.economic {
            lines.push(format!(
                "Economic: GDP growth {}%, Inflation {}%",
                economic.gdp_growth, economic.inflation_rate
            ));
        }

        if let Some(news) = &self.news {
            let sentiment = news.sentiment_score;
            let label = if sentiment > Self::SENTIMENT_THRESHOLD {
                "positive"
            } else if sentiment < -Self::SENTIMENT_THRESHOLD {
                "negative"
            } else {
                "neutral"
            };
            lines.push(format!("News sentiment: {} ({:.2})", label, sentiment));
        }

        if lines.is_empty() {
            "No external data available".to_string()
        } else {
            lines.join("\n")
        }
    }
}

/// Input handed to an [`ExternalForecaster`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalForecastRequest {
    pub product: ProductProfile,
    pub horizon_days: usize,
    pub sales_summary: SalesSummary,
    pub external_summary: String,
    pub user_notes: Option<String>,
}

impl ExternalForecastRequest {
    pub fn new(
        product: &ProductProfile,
        history: &SalesHistory,
        horizon_days: usize,
        context: &ExternalContext,
        user_notes: Option<&str>,
    ) -> Self {
        Self {
            product: product.clone(),
            horizon_days,
            sales_summary: SalesSummary::from_history(history),
            external_summary: context.summary(),
            user_notes: user_notes
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
        }
    }

    /// Plain-text briefing of the product, its sales and its environment
    pub fn context_text(&self) -> String {
        let mut text = String::new();
        text.push_str("Product Information:\n");
        text.push_str(&format!("- Name: {}\n", self.product.name));
        text.push_str(&format!(
            "- Category: {}\n",
            self.product.category.as_deref().unwrap_or("general")
        ));
        text.push_str(&format!("- Lead Time: {} days\n", self.product.lead_time_days));
        text.push_str(&format!(
            "- Safety Stock: {} days\n\n",
            self.product.safety_stock_days
        ));
        text.push_str("Sales Data Analysis:\n");
        text.push_str(&self.sales_summary.to_string());
        text.push_str("\nExternal Factors:\n");
        text.push_str(&self.external_summary);
        text.push('\n');
        if let Some(notes) = &self.user_notes {
            text.push_str(&format!("\nUser Notes: {}\n", notes));
        }
        text.push_str(&format!("\nForecast horizon: {} days\n", self.horizon_days));
        text
    }
}

/// Source of externally produced forecasts, typically an LLM.
///
/// `None` means the collaborator is unavailable; callers then forecast
/// statistically.
pub trait ExternalForecaster: Send + Sync {
    fn forecast(&self, request: &ExternalForecastRequest) -> Option<AiForecast>;
}

/// One day of an external forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiForecastDay {
    pub forecast_date: NaiveDate,
    pub forecast_qty: i64,
    #[serde(default)]
    pub confidence_score: Option<f64>,
}

/// Narrative output that accompanies an external forecast
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastInsights {
    pub reorder_quantity: Option<u32>,
    pub key_factors: Vec<String>,
    pub risk_assessment: Option<String>,
    pub recommendations: Vec<String>,
    pub explanation: Option<String>,
}

/// An external forecast as returned by the collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiForecast {
    pub forecasts: Vec<AiForecastDay>,
    #[serde(default)]
    pub reorder_quantity: Option<u32>,
    #[serde(default)]
    pub confidence_level: Option<ConfidenceLevel>,
    #[serde(default)]
    pub key_factors: Vec<String>,
    #[serde(default)]
    pub risk_assessment: Option<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl AiForecast {
    /// Decode the collaborator's JSON response
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn horizon(&self) -> usize {
        self.forecasts.len()
    }

    /// Whether the forecast has exactly one day for each of `dates`, in order
    pub fn covers(&self, dates: &[NaiveDate]) -> bool {
        self.forecasts.len() == dates.len()
            && self
                .forecasts
                .iter()
                .zip(dates)
                .all(|(day, date)| day.forecast_date == *date)
    }

    /// Convert to a forecast, clamping negative quantities and scores into range
    pub fn to_forecast(&self) -> Forecast {
        let points = self
            .forecasts
            .iter()
            .map(|day| ForecastPoint {
                date: day.forecast_date,
                quantity: u32::try_from(day.forecast_qty.max(0)).unwrap_or(u32::MAX),
                confidence: day.confidence_score.map(|s| s.clamp(0.0, 1.0)),
            })
            .collect();

        Forecast::new(
            points,
            ForecastMethod::Ai,
            self.confidence_level.unwrap_or(ConfidenceLevel::Medium),
        )
    }

    pub fn insights(&self) -> ForecastInsights {
        ForecastInsights {
            reorder_quantity: self.reorder_quantity,
            key_factors: self.key_factors.clone(),
            risk_assessment: self.risk_assessment.clone(),
            recommendations: self.recommendations.clone(),
            explanation: self.explanation.clone(),
        }
    }
}
