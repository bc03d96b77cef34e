//! HTTP API for the todo collection.
//!
//! # Overview
//! Serves five CRUD operations (plus a single-record lookup) under
//! `/api/todos`, translating between wire JSON and stored documents.
//!
//! # Design
//! - Handlers depend on `Arc<dyn TodoStore>` only; the backing store
//!   (`MemoryStore` or `FileStore`) is picked at startup from `Config`.
//! - Ids are validated before any storage access so malformed ids (400) never
//!   look like missing records (404).
//! - CORS and request tracing are tower layers applied in `router`, so tests
//!   can drive the bare `app` with `oneshot`.

pub mod config;
pub mod error;
pub mod routes;
pub mod store;
pub mod types;

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::{Config, ConfigError, CorsOrigin};
pub use error::AppError;
pub use routes::SharedStore;
pub use store::{FileStore, Filter, MemoryStore, StoreError, TodoStore};
pub use types::{DeletedCount, Message, NewTodo, Todo};

/// Route table bound to `store`, without middleware.
pub fn app(store: SharedStore) -> Router {
    Router::new()
        .nest("/api/todos", routes::todo_routes())
        .with_state(store)
}

/// `app` wrapped with the CORS policy from `config` and request tracing.
pub fn router(store: SharedStore, config: &Config) -> Router {
    let cors = match &config.cors_origin {
        CorsOrigin::Any => CorsLayer::new().allow_origin(Any),
        CorsOrigin::Exact(origin) => CorsLayer::new().allow_origin(origin.clone()),
    }
    .allow_methods(Any)
    .allow_headers(Any);

    app(store).layer(cors).layer(TraceLayer::new_for_http())
}

/// Open the store selected by `config`.
pub async fn open_store(config: &Config) -> Result<SharedStore, StoreError> {
    match &config.store_path {
        Some(path) => {
            let store = FileStore::open(path).await?;
            tracing::info!(path = %store.path().display(), "using file-backed todo store");
            Ok(Arc::new(store))
        }
        None => {
            tracing::info!("using in-memory todo store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Serve until the process receives Ctrl+C.
pub async fn run(listener: TcpListener, store: SharedStore, config: &Config) -> Result<(), std::io::Error> {
    axum::serve(listener, router(store, config))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
