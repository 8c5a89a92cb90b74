//! Handler for the health check endpoint.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::warn;

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Reports service liveness and store reachability.
///
/// # Endpoint
///
/// `GET /health`
///
/// Probes the store with a read; an unreachable store is reported with
/// `503 Service Unavailable` so load balancers can rotate the instance out.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.get("health:probe").await {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                store: "ok",
            }),
        ),
        Err(e) => {
            warn!(error = %e, "health check: store unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded",
                    store: "unreachable",
                }),
            )
        }
    }
}
