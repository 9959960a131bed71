// POST /analyze_symptoms: recommend a specialty for free-text symptoms.
//
// Request:  {"symptoms": "..."}  (missing or null symptoms count as "")
// Success:  200 {"specialty": "...", "message": "..."}
// Failure:  500 {"error": "..."}  for any failure, including a body that
//           is not a JSON object or whose `symptoms` is not a string.
//
// Scoring is CPU-bound, so it runs on the blocking pool.

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use tracing::error;

use crate::web::{api_error, AppState};

/// Extract the symptom text from a request body.
pub fn symptoms_from_body(body: &[u8]) -> Result<String> {
    let value: Value = serde_json::from_slice(body).context("Invalid request body")?;
    let Value::Object(mut fields) = value else {
        anyhow::bail!("Request body must be a JSON object");
    };

    match fields.remove("symptoms") {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(text)) => Ok(text),
        Some(other) => anyhow::bail!("`symptoms` must be a string, got {other}"),
    }
}

pub async fn analyze_symptoms(State(state): State<AppState>, body: Bytes) -> Response {
    let symptoms = match symptoms_from_body(&body) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "Rejected symptom request body");
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, &format!("{e:#}"));
        }
    };

    let analyzer = state.analyzer.clone();

    match tokio::task::spawn_blocking(move || analyzer.analyze(&symptoms)).await {
        Ok(Ok(recommendation)) => Json(recommendation).into_response(),
        Ok(Err(e)) => {
            error!(error = %e, "Symptom analysis failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
        Err(e) => {
            error!(error = %e, "Symptom analysis task panicked");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Symptom analysis failed")
        }
    }
}
