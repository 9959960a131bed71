// GET /health: liveness check. The analyzer is built before the listener
// binds, so a server that answers is ready to score.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::web::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "vectors": state.analyzer.provider_name(),
        })),
    )
}
