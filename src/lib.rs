//! A single-list todo service: four JSON routes over one SQLite table, plus a typed client
//! for talking to it.

pub mod api;
pub mod app_env;
pub mod client;
pub mod db;
pub mod domain;
pub mod dto;
pub mod external_connections;
pub mod logging;
pub mod persistence;
pub mod routing_utils;

use anyhow::Context;
use axum::Router;
use axum::extract::State;
use sqlx::SqlitePool;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Process-wide resources shared by every request handler
pub struct SharedData {
    pub ext_cxn: persistence::ExternalConnectivity,
}

/// Extractor handlers use to reach [SharedData]
pub type AppState = State<Arc<SharedData>>;

/// Assembles the full application router: todo routes, API documentation, permissive CORS
/// and per-request tracing
pub fn build_app(shared_data: Arc<SharedData>) -> Router {
    let router = Router::new()
        .merge(api::todo::todo_routes())
        .merge(api::swagger_main::build_documentation())
        .layer(CorsLayer::permissive())
        .with_state(shared_data);

    logging::attach_tracing_http(router)
}

/// Serves the API on [listener] until [shutdown] resolves, then lets in-flight requests finish
/// and closes the database pool.
pub async fn serve(
    listener: TcpListener,
    pool: SqlitePool,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), anyhow::Error> {
    let shared_data = Arc::new(SharedData {
        ext_cxn: persistence::ExternalConnectivity::new(pool.clone()),
    });

    axum::serve(listener, build_app(shared_data))
        .with_graceful_shutdown(shutdown)
        .await
        .context("serving HTTP requests")?;
    info!("Server stopped.");

    db::close(pool).await;
    Ok(())
}
