use crate::config::SERVICE_NAME;
use crate::services::{get_metrics, Readiness};
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

/// Liveness: the process is up, regardless of the datastore.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness: 200 only once the datastore connection is established.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let readiness = state.forms.readiness();
    let mut body = json!({ "status": readiness.name() });

    let status = match &readiness {
        Readiness::Ready => StatusCode::OK,
        Readiness::Connecting => StatusCode::SERVICE_UNAVAILABLE,
        Readiness::Failed(reason) => {
            body["error"] = json!(reason);
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    (status, Json(body))
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}

pub async fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Route not found"))
}
