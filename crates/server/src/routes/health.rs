use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    message: String,
    version: String,
}

#[derive(Serialize, ToSchema)]
pub struct LivenessResponse {
    status: String,
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Site deployer is running. POST tasks to /api-endpoint.".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Liveness check the evaluator calls before it sends tasks; also answers `HEAD`.
#[utoipa::path(
    get,
    path = "/api-endpoint",
    responses(
        (status = 200, description = "Task endpoint is reachable", body = LivenessResponse)
    ),
    tag = "health"
)]
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: "alive".to_string(),
    })
}
