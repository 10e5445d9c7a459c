use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};
use service_core::error::AppError;
use std::collections::BTreeMap;
use std::sync::Mutex;

use super::database::{stamp_timestamps, DocumentStore};

/// In-process document store keeping each collection in insertion order.
/// Used by tests and for local runs without MongoDB.
pub struct MemoryStore {
    name: String,
    collections: Mutex<BTreeMap<String, Vec<Document>>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new("memory")
    }
}

impl MemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: Mutex::new(BTreeMap::new()),
        }
    }

    /// Number of documents held in `collection`.
    pub fn count(&self, collection: &str) -> Result<usize, AppError> {
        let collections = self
            .collections
            .lock()
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Memory store mutex poisoned: {}", e)))?;
        Ok(collections.get(collection).map(Vec::len).unwrap_or(0))
    }
}

fn matches(doc: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| doc.get(key) == Some(expected))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn database_name(&self) -> &str {
        &self.name
    }

    async fn create_document(
        &self,
        collection: &str,
        mut data: Document,
    ) -> Result<String, AppError> {
        let id = ObjectId::new();
        stamp_timestamps(&mut data);
        data.insert("_id", id);

        self.collections
            .lock()
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Memory store mutex poisoned: {}", e)))?
            .entry(collection.to_string())
            .or_default()
            .push(data);

        Ok(id.to_hex())
    }

    async fn get_documents(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, AppError> {
        let limit = usize::try_from(limit).unwrap_or(0);
        let collections = self
            .collections
            .lock()
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Memory store mutex poisoned: {}", e)))?;

        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches(doc, &filter))
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, AppError> {
        let collections = self
            .collections
            .lock()
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Memory store mutex poisoned: {}", e)))?;
        Ok(collections.keys().cloned().collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
