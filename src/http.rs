// src/http.rs

//! HTTP transport: axum router, shared state and the access-gate
//! extractors. The transport maps core results to JSON or binary downloads
//! and core errors to 400/401/403/409/500.

pub mod extract;
pub mod routes;
pub mod state;

use axum::Json;
use axum::Router;
use axum::routing::{get, post};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/config", get(routes::settings::get_config))
        .route("/admin/config", post(routes::settings::update_config))
        .route(
            "/pins",
            get(routes::pins::list_pins).post(routes::pins::create_pin),
        )
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route("/admin/export/{target}", get(routes::export::export_pins))
        // The map SPA is served from another origin.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

/// Open the database, ensure the schema and serve until shutdown.
pub async fn serve(cfg: Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;

    let state = AppState::new(cfg.clone(), pool);
    let app = router(state);

    tracing::info!("pinmap listening on {}", cfg.bind);

    let listener = TcpListener::bind(&cfg.bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
