use axum::{extract::State, Json};
use serde::Serialize;

use crate::startup::AppState;

const MAX_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

#[derive(Debug, Serialize)]
pub struct DiagnosticsResponse {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// Connectivity report for the backend and its database. Probe failures are
/// folded into the status strings; this handler never fails.
pub async fn test_database(State(state): State<AppState>) -> Json<DiagnosticsResponse> {
    let mut response = DiagnosticsResponse {
        backend: "✅ Running".to_string(),
        database: "❌ Not Available".to_string(),
        database_url: presence(state.config.database.url.is_some()),
        database_name: presence(state.config.database.name.is_some()),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    if let Some(store) = state.store.as_ref() {
        response.connection_status = "Connected".to_string();

        match store.list_collection_names().await {
            Ok(mut names) => {
                names.truncate(MAX_COLLECTIONS);
                response.collections = names;
                response.database = "✅ Connected & Working".to_string();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Database probe failed");
                let message = e.to_string();
                response.database = format!(
                    "⚠️  Connected but Error: {}",
                    truncate_chars(&message, MAX_ERROR_CHARS)
                );
            }
        }
    }

    Json(response)
}

fn presence(set: bool) -> String {
    let label = if set { "✅ Set" } else { "❌ Not Set" };
    label.to_string()
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
