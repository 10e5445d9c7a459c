use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, DateTime, Document},
    options::FindOptions,
    Client as MongoClient, Database,
};
use service_core::error::AppError;

/// Generic data-access seam over a document store.
///
/// Filters are top-level equality matches. Results come back in whatever
/// order the store yields them; no sort is applied.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    fn database_name(&self) -> &str;

    /// Insert one document and return its store-assigned id as hex text.
    async fn create_document(&self, collection: &str, data: Document) -> Result<String, AppError>;

    async fn get_documents(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, AppError>;

    async fn list_collection_names(&self) -> Result<Vec<String>, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

/// Stamp `created_at`/`updated_at` with the insert time.
pub fn stamp_timestamps(data: &mut Document) {
    let now = DateTime::now();
    data.insert("created_at", now);
    data.insert("updated_at", now);
}

pub fn inserted_id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}

#[derive(Clone)]
pub struct MongoStore {
    client: MongoClient,
    db: Database,
}

impl MongoStore {
    /// Parses the connection string and prepares the client. The driver
    /// connects lazily, so an unreachable server surfaces on first use.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "MongoDB client ready");
        Ok(Self { client, db })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn database_name(&self) -> &str {
        self.db.name()
    }

    async fn create_document(
        &self,
        collection: &str,
        mut data: Document,
    ) -> Result<String, AppError> {
        stamp_timestamps(&mut data);

        let result = self
            .db
            .collection::<Document>(collection)
            .insert_one(data, None)
            .await
            .map_err(|e| {
                tracing::error!(collection = %collection, "Failed to insert document: {}", e);
                AppError::from(e)
            })?;

        Ok(inserted_id_to_string(result.inserted_id))
    }

    async fn get_documents(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, AppError> {
        let options = FindOptions::builder().limit(limit).build();

        let cursor = self
            .db
            .collection::<Document>(collection)
            .find(filter, options)
            .await
            .map_err(|e| {
                tracing::error!(collection = %collection, "Failed to query documents: {}", e);
                AppError::from(e)
            })?;

        let documents: Vec<Document> = cursor.try_collect().await.map_err(AppError::from)?;
        Ok(documents)
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, AppError> {
        Ok(self.db.list_collection_names(None).await?)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
