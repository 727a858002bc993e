// rest/routes/tasks.rs — Task CRUD routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::tasks::{Task, TaskError, DUE_DATE_FORMAT};
use crate::AppContext;

/// Incoming task body for create and full update.
///
/// Every field is optional so that a missing field lands in our 400
/// validation path instead of a framework decode rejection.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<String>,
}

#[derive(Deserialize)]
pub struct StatusUpdateRequest {
    pub status: Option<String>,
}

/// Required-field validation: non-empty `title` and `status`, present and
/// parseable `dueDate`. Violations are a 400 with an empty body.
fn validate(body: TaskPayload) -> Result<Task, StatusCode> {
    let title = body
        .title
        .filter(|t| !t.is_empty())
        .ok_or(StatusCode::BAD_REQUEST)?;
    let status = body
        .status
        .filter(|s| !s.is_empty())
        .ok_or(StatusCode::BAD_REQUEST)?;
    let due_date = body
        .due_date
        .as_deref()
        .and_then(|s| NaiveDateTime::parse_from_str(s, DUE_DATE_FORMAT).ok())
        .ok_or(StatusCode::BAD_REQUEST)?;

    Ok(Task::new(title, body.description, status, due_date))
}

/// Map a service error to an HTTP response. Status selection is driven by
/// the error variant, never by the message text.
fn error_response(err: TaskError) -> (StatusCode, Json<Value>) {
    let status = match err {
        TaskError::NotFound(_) => StatusCode::NOT_FOUND,
    };
    (status, Json(json!({ "error": err.to_string() })))
}

pub async fn list_tasks(State(ctx): State<Arc<AppContext>>) -> Json<Vec<Task>> {
    Json(ctx.task_service.get_all_tasks().await)
}

pub async fn get_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<i64>,
) -> Result<Json<Task>, (StatusCode, Json<Value>)> {
    match ctx.task_service.get_task_by_id(id).await {
        Ok(task) => Ok(Json(task)),
        Err(err) => Err(error_response(err)),
    }
}

pub async fn create_task(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<TaskPayload>,
) -> Result<(StatusCode, Json<Task>), StatusCode> {
    let task = validate(body)?;
    let created = ctx.task_service.create_task(task).await;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<i64>,
    Json(body): Json<TaskPayload>,
) -> Response {
    let details = match validate(body) {
        Ok(task) => task,
        Err(code) => return code.into_response(),
    };

    match ctx.task_service.update_task(id, details).await {
        Ok(task) => Json(task).into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

pub async fn update_task_status(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<i64>,
    Json(body): Json<StatusUpdateRequest>,
) -> Response {
    let Some(status) = body.status else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    match ctx.task_service.update_task_status(id, status).await {
        Ok(task) => Json(task).into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

pub async fn delete_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    match ctx.task_service.delete_task(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(err) => Err(error_response(err)),
    }
}
