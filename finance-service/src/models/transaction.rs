use mongodb::bson::{self, DateTime, Document};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;

use super::schema::{FieldSchema, RecordSchema};

pub const COLLECTION: &str = "transaction";

/// Direction of money flow; `amount` itself is always stored as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    pub const VALUES: &'static [&'static str] = &["expense", "income"];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
        }
    }
}

/// Storage shape written on insert. Reads do not deserialize into this type
/// because the store does not enforce it on existing documents.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRecord {
    pub date: DateTime,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub merchant: Option<String>,
    pub account: Option<String>,
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl TransactionRecord {
    pub fn to_document(&self) -> Result<Document, AppError> {
        Ok(bson::to_document(self)?)
    }
}

pub fn schema() -> RecordSchema {
    RecordSchema {
        title: "Transaction",
        collection: COLLECTION,
        fields: vec![
            FieldSchema::required("date", "datetime", "Transaction date"),
            FieldSchema::required(
                "amount",
                "number",
                "Positive number; type determines inflow/outflow",
            ),
            FieldSchema::required("type", "string", "expense or income")
                .with_allowed(TransactionType::VALUES),
            FieldSchema::required("category", "string", "Category name"),
            FieldSchema::optional("merchant", "string", "Merchant or source"),
            FieldSchema::optional("account", "string", "Account used"),
            FieldSchema::optional("notes", "string", "Additional notes"),
            FieldSchema::optional("tags", "array<string>", "Optional tag labels"),
        ],
    }
}
