//! Health check controller.

use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use roster_core::{ErrorResponse, FieldError, HealthStatus, RosterError};
use roster_service::StatusResponse;
use tracing::warn;

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
}

/// Liveness probe. Touches no dependency.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Process is up", body = StatusResponse)
    )
)]
pub async fn health_check() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}

/// Readiness probe. Checks the database and, when enabled, the cache.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "All dependencies reachable", body = StatusResponse),
        (status = 503, description = "A dependency is unreachable", body = ErrorResponse)
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> Response {
    let mut failures = Vec::new();

    for check in &state.health_checks {
        if let HealthStatus::Unhealthy(reason) = check.check().await {
            warn!("Readiness check '{}' failed: {}", check.name(), reason);
            failures.push(FieldError {
                field: check.name().to_string(),
                message: reason,
                code: "UNHEALTHY".to_string(),
            });
        }
    }

    if failures.is_empty() {
        return Json(StatusResponse::ok()).into_response();
    }

    let names: Vec<&str> = failures.iter().map(|f| f.field.as_str()).collect();
    let error = RosterError::Unavailable(names.join(", "));
    let body = ErrorResponse::from_error(&error).with_details(failures);

    (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
}
