//! Status and configuration handlers.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::{CONFIG_TAG, STATUS_TAG};
use crate::api::dto::ErrorResponse;
use crate::config_health::{ConfigSnapshot, ConfigValue};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::status::{CommitInfo, DependencyList, DeploymentStatus, StatusOverview};

/// Register routes nested under `/api`.
pub fn status_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_config))
        .routes(routes!(get_status))
        .routes(routes!(get_dependencies))
        .routes(routes!(get_commit))
        .routes(routes!(get_deployment))
}

/// GET /api/config - Working configuration, in load order.
#[utoipa::path(
    get,
    path = "/config",
    tag = CONFIG_TAG,
    responses(
        (status = 200, description = "Monitored settings", body = std::collections::BTreeMap<String, ConfigValue>)
    )
)]
async fn get_config(State(state): State<AppState>) -> Json<ConfigSnapshot> {
    Json(state.manager.get_config())
}

/// GET /api/status - Everything the dashboard shows.
///
/// Sections that fail to load are listed under `errors` instead of failing
/// the request.
#[utoipa::path(
    get,
    path = "/status",
    tag = STATUS_TAG,
    responses(
        (status = 200, description = "Status overview", body = StatusOverview)
    )
)]
async fn get_status(State(state): State<AppState>) -> Json<StatusOverview> {
    let application = &state.settings.application;
    let overview = state
        .status
        .overview(&application.name, &application.version, &state.manager)
        .await;
    Json(overview)
}

/// GET /api/dependencies - Dependencies from the package manifest.
#[utoipa::path(
    get,
    path = "/dependencies",
    tag = STATUS_TAG,
    responses(
        (status = 200, description = "Declared dependencies", body = DependencyList),
        (status = 404, description = "Manifest not found", body = ErrorResponse),
        (status = 500, description = "Manifest unreadable", body = ErrorResponse)
    )
)]
async fn get_dependencies(State(state): State<AppState>) -> AppResult<Json<DependencyList>> {
    let dependencies = state
        .status
        .dependencies()
        .await
        .map_err(|e| AppError::from_status("dependencies", e))?;
    Ok(Json(dependencies))
}

/// GET /api/commit - Last commit of the deployed checkout.
#[utoipa::path(
    get,
    path = "/commit",
    tag = STATUS_TAG,
    responses(
        (status = 200, description = "Last commit", body = CommitInfo),
        (status = 500, description = "Git unavailable", body = ErrorResponse),
        (status = 504, description = "Git timed out", body = ErrorResponse)
    )
)]
async fn get_commit(State(state): State<AppState>) -> AppResult<Json<CommitInfo>> {
    let commit = state
        .status
        .last_commit()
        .await
        .map_err(|e| AppError::from_status("commit", e))?;
    Ok(Json(commit))
}

/// GET /api/deployment - Contents of the deployment status file.
#[utoipa::path(
    get,
    path = "/deployment",
    tag = STATUS_TAG,
    responses(
        (status = 200, description = "Deployment status", body = std::collections::BTreeMap<String, serde_json::Value>),
        (status = 404, description = "Status file not found", body = ErrorResponse),
        (status = 500, description = "Status file unreadable", body = ErrorResponse)
    )
)]
async fn get_deployment(State(state): State<AppState>) -> AppResult<Json<DeploymentStatus>> {
    let deployment = state
        .status
        .deployment()
        .await
        .map_err(|e| AppError::from_status("deployment", e))?;
    Ok(Json(deployment))
}
