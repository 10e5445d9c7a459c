use mongodb::bson::{self, Document};
use serde::Serialize;
use serde_json::json;
use service_core::error::AppError;

use super::schema::{FieldSchema, RecordSchema};

pub const COLLECTION: &str = "budget";
pub const DEFAULT_PERIOD: &str = "monthly";

#[derive(Debug, Clone, Serialize)]
pub struct BudgetRecord {
    pub category: String,
    pub limit: f64,
    pub period: String,
    /// Calendar date as `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
}

impl BudgetRecord {
    pub fn to_document(&self) -> Result<Document, AppError> {
        Ok(bson::to_document(self)?)
    }
}

pub fn schema() -> RecordSchema {
    RecordSchema {
        title: "Budget",
        collection: COLLECTION,
        fields: vec![
            FieldSchema::required("category", "string", "Category this budget applies to"),
            FieldSchema::required("limit", "number", "Spending limit for the period")
                .with_minimum(0.0),
            FieldSchema::optional("period", "string", "Budget period: monthly/weekly/annual")
                .with_default(json!(DEFAULT_PERIOD)),
            FieldSchema::optional("start_date", "date", "Start date for the budget period"),
        ],
    }
}
