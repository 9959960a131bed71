// Web server: Axum request/response boundary around the analyzer.
//
// POST /analyze_symptoms serves JSON; every other path is served from the
// configured static directory (index.html for "/"), so the browser
// frontend can live next to the binary.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::analysis::analyzer::SymptomAnalyzer;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<SymptomAnalyzer>,
}

/// Start the Axum web server and block until `shutdown` resolves.
pub async fn run_server<F>(
    analyzer: Arc<SymptomAnalyzer>,
    bind: &str,
    port: u16,
    static_dir: &Path,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(AppState { analyzer }, static_dir);

    let addr = format!("{bind}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Triage listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route(
            "/analyze_symptoms",
            post(handlers::analyze::analyze_symptoms),
        )
        .route("/health", get(handlers::health::health))
        .fallback_service(ServeDir::new(static_dir))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
