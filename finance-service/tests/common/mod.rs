#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use finance_service::config::{DatabaseConfig, FinanceConfig};
use finance_service::services::{DocumentStore, MemoryStore};
use finance_service::{build_router, AppState};
use secrecy::Secret;
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tower::util::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub store: Option<Arc<MemoryStore>>,
}

pub fn test_config(database: DatabaseConfig) -> FinanceConfig {
    FinanceConfig {
        common: CoreConfig {
            port: 0,
            log_level: "error".to_string(),
            otlp_endpoint: None,
        },
        database,
    }
}

impl TestApp {
    /// Router backed by a fresh in-memory store.
    pub fn spawn() -> Self {
        let store = Arc::new(MemoryStore::new("finance_test"));
        let database = DatabaseConfig {
            url: Some(Secret::new("memory://".to_string())),
            name: Some("finance_test".to_string()),
        };
        let state = AppState::new(
            test_config(database),
            Some(store.clone() as Arc<dyn DocumentStore>),
        );

        Self {
            router: build_router(state),
            store: Some(store),
        }
    }

    /// Router with no database configured at all.
    pub fn spawn_without_store() -> Self {
        let state = AppState::new(test_config(DatabaseConfig::default()), None);

        Self {
            router: build_router(state),
            store: None,
        }
    }

    /// Router around an arbitrary store implementation.
    pub fn spawn_with(store: Arc<dyn DocumentStore>) -> Self {
        let database = DatabaseConfig {
            url: Some(Secret::new("memory://".to_string())),
            name: Some(store.database_name().to_string()),
        };
        let state = AppState::new(test_config(database), Some(store));

        Self {
            router: build_router(state),
            store: None,
        }
    }

    pub fn stored(&self, collection: &str) -> usize {
        self.store
            .as_ref()
            .expect("TestApp has no memory store")
            .count(collection)
            .expect("Failed to count documents")
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.post_raw(uri, body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(request).await
    }

    /// POST without a `content-type` header.
    pub async fn post_untyped(&self, uri: &str, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, body)
    }
}
