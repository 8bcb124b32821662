//! Task request handlers.
//!
//! The authenticated account comes from request extensions (injected by
//! `middleware::auth::require_auth`); the owner id is never taken from the
//! request body or path.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use taskhub_core::models::task::{NewTask, TaskChanges};
use taskhub_core::tasks;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::CurrentUser;
use crate::models::{
    CreateTaskRequest, PatchTaskRequest, SetCompletedRequest, TaskResponse, UpdateTaskRequest,
};

/// `GET /api/tasks` — list the caller's tasks.
pub async fn list_tasks_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<CurrentUser>,
) -> AppResult<Json<Vec<TaskResponse>>> {
    let rows = tasks::list_tasks(&state.pool, &user.0.id).await?;
    Ok(Json(rows.into_iter().map(TaskResponse::from).collect()))
}

/// `POST /api/tasks` — create a task owned by the caller.
pub async fn create_task_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<CurrentUser>,
    Json(body): Json<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<TaskResponse>)> {
    let row = tasks::create_task(
        &state.pool,
        &user.0.id,
        NewTask {
            title: body.title,
            description: body.description,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from(row))))
}

/// `GET /api/tasks/{id}` — fetch one of the caller's tasks.
pub async fn get_task_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<CurrentUser>,
    Path(task_id): Path<Uuid>,
) -> AppResult<Json<TaskResponse>> {
    let row = tasks::get_task(&state.pool, &user.0.id, task_id).await?;
    Ok(Json(TaskResponse::from(row)))
}

/// `PUT /api/tasks/{id}` — full update.
pub async fn update_task_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<CurrentUser>,
    Path(task_id): Path<Uuid>,
    Json(body): Json<UpdateTaskRequest>,
) -> AppResult<Json<TaskResponse>> {
    let row = tasks::update_task(
        &state.pool,
        &user.0.id,
        task_id,
        TaskChanges {
            title: Some(body.title),
            description: body.description,
            completed: Some(body.completed),
        },
    )
    .await?;
    Ok(Json(TaskResponse::from(row)))
}

/// `PATCH /api/tasks/{id}` — partial update.
pub async fn patch_task_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<CurrentUser>,
    Path(task_id): Path<Uuid>,
    Json(body): Json<PatchTaskRequest>,
) -> AppResult<Json<TaskResponse>> {
    let row = tasks::update_task(
        &state.pool,
        &user.0.id,
        task_id,
        TaskChanges {
            title: body.title,
            description: body.description,
            completed: body.completed,
        },
    )
    .await?;
    Ok(Json(TaskResponse::from(row)))
}

/// `PATCH /api/tasks/{id}/complete` — set the completion flag.
pub async fn set_completed_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<CurrentUser>,
    Path(task_id): Path<Uuid>,
    Json(body): Json<SetCompletedRequest>,
) -> AppResult<Json<TaskResponse>> {
    let row = tasks::set_completed(&state.pool, &user.0.id, task_id, body.completed).await?;
    Ok(Json(TaskResponse::from(row)))
}

/// `DELETE /api/tasks/{id}` — permanently delete.
pub async fn delete_task_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<CurrentUser>,
    Path(task_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    tasks::delete_task(&state.pool, &user.0.id, task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
