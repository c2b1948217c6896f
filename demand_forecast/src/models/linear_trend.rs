//! Linear trend model: least-squares line extrapolated past the history

use crate::models::DemandModel;
use demand_math::LinearRegression;

/// Extrapolates an OLS line fitted against day index
#[derive(Debug, Clone, Default)]
pub struct LinearTrendModel;

impl LinearTrendModel {
    pub fn new() -> Self {
        Self
    }
}

impl DemandModel for LinearTrendModel {
    fn forecast(&self, series: &[f64], horizon: usize) -> Vec<f64> {
        let fit = match LinearRegression::fit(series) {
            Ok(fit) => fit,
            Err(_) => {
                let last = series.last().copied().unwrap_or(0.0);
                return vec![last; horizon];
            }
        };

        (0..horizon)
            .map(|i| fit.predict((series.len() + i) as f64).max(0.0))
            .collect()
    }

    fn name(&self) -> &str {
        "Linear Trend"
    }
}
