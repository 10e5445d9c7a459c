//! Application startup and lifecycle management.

use crate::config::FinanceConfig;
use crate::handlers;
use crate::services::{DocumentStore, MongoStore};
use axum::{
    middleware::from_fn,
    routing::get,
    Router,
};
use secrecy::ExposeSecret;
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware, REQUEST_ID_HEADER};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state. The store is `None` when no database is
/// configured; data endpoints then fail with a server error while the
/// diagnostics endpoint keeps answering.
#[derive(Clone)]
pub struct AppState {
    pub config: FinanceConfig,
    pub store: Option<Arc<dyn DocumentStore>>,
}

impl AppState {
    pub fn new(config: FinanceConfig, store: Option<Arc<dyn DocumentStore>>) -> Self {
        Self { config, store }
    }

    pub fn store(&self) -> Result<&Arc<dyn DocumentStore>, AppError> {
        self.store.as_ref().ok_or(AppError::DatabaseUnavailable)
    }
}

async fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Route not found"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route(
            "/api/transactions",
            get(handlers::list_transactions).post(handlers::add_transaction),
        )
        .route(
            "/api/budgets",
            get(handlers::list_budgets).post(handlers::add_budget),
        )
        .route("/test", get(handlers::test_database))
        .route("/schema", get(handlers::get_schema))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(request_id_middleware))
        // Mirrors origin, methods and headers so credentials can be allowed
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Connect the document store when both `DATABASE_URL` and
/// `DATABASE_NAME` are configured.
pub async fn connect_store(
    config: &FinanceConfig,
) -> Result<Option<Arc<dyn DocumentStore>>, AppError> {
    match config.database.connection() {
        Some((url, name)) => {
            let store = MongoStore::connect(url.expose_secret(), name).await?;
            Ok(Some(Arc::new(store)))
        }
        None => {
            tracing::warn!("DATABASE_URL or DATABASE_NAME not set - running without a database");
            Ok(None)
        }
    }
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application, connecting the store from configuration.
    pub async fn build(config: FinanceConfig) -> Result<Self, AppError> {
        let store = connect_store(&config).await?;
        Self::with_store(config, store).await
    }

    /// Build the application around an already constructed store.
    pub async fn with_store(
        config: FinanceConfig,
        store: Option<Arc<dyn DocumentStore>>,
    ) -> Result<Self, AppError> {
        // Port 0 picks a random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Finance service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState::new(config, store),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
