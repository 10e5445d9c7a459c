use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::models::{budget::DEFAULT_PERIOD, BudgetRecord};

#[derive(Debug, Deserialize, Validate)]
pub struct BudgetIn {
    pub category: String,
    #[validate(range(min = 0.0, message = "Limit cannot be negative"))]
    pub limit: f64,
    #[serde(default = "default_period")]
    pub period: String,
    pub start_date: Option<NaiveDate>,
}

fn default_period() -> String {
    DEFAULT_PERIOD.to_string()
}

impl From<BudgetIn> for BudgetRecord {
    fn from(input: BudgetIn) -> Self {
        Self {
            category: input.category,
            limit: input.limit,
            period: input.period,
            start_date: input.start_date.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}
