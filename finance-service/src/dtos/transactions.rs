use chrono::{DateTime, Utc};
use mongodb::bson;
use serde::Deserialize;
use validator::Validate;

use super::common::deserialize_timestamp;
use crate::models::{TransactionRecord, TransactionType};

/// Body of `POST /api/transactions`. An unknown `type` fails deserialization
/// and is reported as a validation error.
#[derive(Debug, Deserialize, Validate)]
pub struct TransactionIn {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date: DateTime<Utc>,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub merchant: Option<String>,
    pub account: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl From<TransactionIn> for TransactionRecord {
    fn from(input: TransactionIn) -> Self {
        Self {
            date: bson::DateTime::from_chrono(input.date),
            amount: input.amount,
            kind: input.kind,
            category: input.category,
            merchant: input.merchant,
            account: input.account,
            notes: input.notes,
            tags: input.tags,
        }
    }
}
