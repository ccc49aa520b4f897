use crate::api::MgmtState;
use crate::api::schemas::health::HealthResponse;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

/// Liveness probe: returns 200 OK as long as the server is running.
pub async fn livez() -> impl IntoResponse {
    StatusCode::OK
}

/// Readiness probe: checks connectivity to the database.
pub async fn readyz(State(state): State<MgmtState>) -> impl IntoResponse {
    match state.health_service.check_db().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse { status: "ok".to_string(), database: "ok".to_string() })),
        Err(e) => {
            tracing::warn!(error = %e, component = "database", "Readiness probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse { status: "error".to_string(), database: "error".to_string() }),
            )
        }
    }
}
