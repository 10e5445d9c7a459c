use axum::{extract::State, Json};
use mongodb::bson::doc;
use service_core::error::AppError;

use crate::dtos::{BudgetIn, CreatedResponse, ItemsResponse, ListParams};
use crate::models::{BudgetRecord, RecordKind};
use crate::services::metrics::record_document_created;
use crate::startup::AppState;
use crate::utils::{ValidatedJson, ValidatedQuery};

pub const DEFAULT_LIMIT: i64 = 50;

#[tracing::instrument(skip(state, params))]
pub async fn list_budgets(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<ListParams>,
) -> Result<Json<ItemsResponse>, AppError> {
    let limit = params.limit_or(DEFAULT_LIMIT);
    let docs = state
        .store()?
        .get_documents(RecordKind::Budget.collection(), doc! {}, limit)
        .await?;

    tracing::debug!(count = docs.len(), limit, "Listed budgets");

    Ok(Json(ItemsResponse::from(docs)))
}

#[tracing::instrument(skip(state, payload))]
pub async fn add_budget(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BudgetIn>,
) -> Result<Json<CreatedResponse>, AppError> {
    let collection = RecordKind::Budget.collection();
    let record = BudgetRecord::from(payload);

    let id = state
        .store()?
        .create_document(collection, record.to_document()?)
        .await?;
    record_document_created(collection);

    tracing::info!(
        budget_id = %id,
        category = %record.category,
        period = %record.period,
        "Budget created"
    );

    Ok(Json(CreatedResponse::new(id)))
}
