use axum::{extract::State, Json};
use mongodb::bson::doc;
use service_core::error::AppError;

use crate::dtos::{CreatedResponse, ItemsResponse, ListParams, TransactionIn};
use crate::models::{RecordKind, TransactionRecord};
use crate::services::metrics::record_document_created;
use crate::startup::AppState;
use crate::utils::{ValidatedJson, ValidatedQuery};

pub const DEFAULT_LIMIT: i64 = 100;

#[tracing::instrument(skip(state, params))]
pub async fn list_transactions(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<ListParams>,
) -> Result<Json<ItemsResponse>, AppError> {
    let limit = params.limit_or(DEFAULT_LIMIT);
    let docs = state
        .store()?
        .get_documents(RecordKind::Transaction.collection(), doc! {}, limit)
        .await?;

    tracing::debug!(count = docs.len(), limit, "Listed transactions");

    Ok(Json(ItemsResponse::from(docs)))
}

#[tracing::instrument(skip(state, payload))]
pub async fn add_transaction(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TransactionIn>,
) -> Result<Json<CreatedResponse>, AppError> {
    let collection = RecordKind::Transaction.collection();
    let record = TransactionRecord::from(payload);

    let id = state
        .store()?
        .create_document(collection, record.to_document()?)
        .await?;
    record_document_created(collection);

    tracing::info!(
        transaction_id = %id,
        kind = record.kind.as_str(),
        amount = record.amount,
        category = %record.category,
        "Transaction created"
    );

    Ok(Json(CreatedResponse::new(id)))
}
