//! Product attributes supplied by the storage layer

use serde::{Deserialize, Serialize};

/// The product attributes forecasting and alerting read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    /// Days between placing and receiving a replenishment order
    pub lead_time_days: u32,
    /// Extra days of demand held as buffer stock
    pub safety_stock_days: u32,
}

impl ProductProfile {
    /// A product with the default 7-day lead time and 7-day safety stock
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: None,
            supplier: None,
            lead_time_days: 7,
            safety_stock_days: 7,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    pub fn with_lead_time(mut self, lead_time_days: u32, safety_stock_days: u32) -> Self {
        self.lead_time_days = lead_time_days;
        self.safety_stock_days = safety_stock_days;
        self
    }

    /// Lead time plus safety stock, in days
    pub fn coverage_days(&self) -> u32 {
        self.lead_time_days + self.safety_stock_days
    }
}
