//! Health check endpoint handlers.
//!
//! `/health` runs a full configuration check on every call, so it doubles as
//! the drift poll for load balancers and uptime monitors.

use axum::{extract::State, http::StatusCode, response::Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::config_health::HealthResult;
use crate::state::AppState;

/// Creates health check routes.
///
/// # Routes
/// - `GET /health` - Configuration health check
/// - `GET /health/live` - Liveness probe
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(liveness_check))
}

/// Validate the configuration and check it for drift.
///
/// Alerts are emitted for every failing check.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Configuration is valid and unchanged", body = HealthResult),
        (status = 503, description = "Configuration is invalid or has drifted", body = HealthResult)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResult>) {
    let result = state.manager.run_config_check();
    let status = if result.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(result))
}

/// Liveness probe; never touches configuration.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive")
    ),
    tag = HEALTH_TAG
)]
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}
