use serde::{Deserialize, Serialize};

use super::schema::{FieldSchema, RecordSchema};

pub const COLLECTION: &str = "category";

/// Category documents are managed by external tooling; the API only
/// publishes their schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub name: String,
    pub color: Option<String>,
    pub icon: Option<String>,
}

pub fn schema() -> RecordSchema {
    RecordSchema {
        title: "Category",
        collection: COLLECTION,
        fields: vec![
            FieldSchema::required("name", "string", "Category name, e.g., Groceries, Rent"),
            FieldSchema::optional("color", "string", "Hex color like #22c55e"),
            FieldSchema::optional("icon", "string", "Icon identifier for UI usage"),
        ],
    }
}
