use axum::Json;
use std::collections::BTreeMap;

use crate::models::{RecordKind, RecordSchema};

/// Record schemas keyed by collection name.
pub async fn get_schema() -> Json<BTreeMap<&'static str, RecordSchema>> {
    Json(
        RecordKind::ALL
            .iter()
            .map(|kind| (kind.collection(), kind.schema()))
            .collect(),
    )
}
