use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use deployer_core::TaskRequest;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct TaskAccepted {
    pub usercode: String,
}

/// Accepts a task and queues it for a worker.
///
/// The secret is checked on the raw JSON so that a caller without the secret
/// learns nothing about the expected shape.
#[utoipa::path(
    post,
    path = "/api-endpoint",
    request_body = TaskRequest,
    responses(
        (status = 200, description = "Task accepted for processing", body = TaskAccepted),
        (status = 400, description = "Body is not JSON or not a valid task"),
        (status = 403, description = "Secret mismatch"),
        (status = 413, description = "Body exceeds the configured size limit"),
        (status = 503, description = "Task queue is full")
    ),
    tag = "tasks"
)]
pub async fn submit_task(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TaskAccepted>, AppError> {
    let Json(body) = payload?;

    let provided = body.get("secret").and_then(Value::as_str).unwrap_or_default();
    if !state.config.secret_matches(provided) {
        tracing::warn!("Rejected task with invalid secret");
        return Err(AppError::Forbidden("Invalid secret".to_string()));
    }

    let task: TaskRequest = serde_json::from_value(body)
        .map_err(|e| AppError::BadRequest(format!("Malformed task: {}", e)))?;

    let usercode = task.email.clone();
    tracing::info!(task = %task.task, round = task.round, "Task accepted");
    state.queue.submit(task)?;

    Ok(Json(TaskAccepted { usercode }))
}
