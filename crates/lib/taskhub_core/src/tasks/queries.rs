//! Task database queries.
//!
//! Single-task statements filter by `(id, owner_id)` in SQL rather than
//! fetching by id and comparing the owner in application code — the
//! ownership check and the row access are one atomic statement.

use sqlx::PgPool;
use uuid::Uuid;

use super::TaskError;
use crate::models::task::TaskRow;

/// List tasks for an owner, oldest first.
pub async fn list_by_owner(pool: &PgPool, owner_id: &str) -> Result<Vec<TaskRow>, TaskError> {
    let rows = sqlx::query_as::<_, TaskRow>(
        r#"
        SELECT id, owner_id, title, description, completed, created_at, updated_at
        FROM tasks
        WHERE owner_id = $1
        ORDER BY created_at
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Insert a new task.
pub async fn insert(
    pool: &PgPool,
    id: Uuid,
    owner_id: &str,
    title: &str,
    description: Option<&str>,
) -> Result<TaskRow, TaskError> {
    let row = sqlx::query_as::<_, TaskRow>(
        r#"
        INSERT INTO tasks (id, owner_id, title, description)
        VALUES ($1, $2, $3, $4)
        RETURNING id, owner_id, title, description, completed, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .bind(title)
    .bind(description)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Get a task by id, scoped to its owner.
pub async fn find_for_owner(
    pool: &PgPool,
    task_id: Uuid,
    owner_id: &str,
) -> Result<Option<TaskRow>, TaskError> {
    let row = sqlx::query_as::<_, TaskRow>(
        r#"
        SELECT id, owner_id, title, description, completed, created_at, updated_at
        FROM tasks
        WHERE id = $1 AND owner_id = $2
        "#,
    )
    .bind(task_id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Check whether a task exists under any owner.
pub async fn task_exists(pool: &PgPool, task_id: Uuid) -> Result<bool, TaskError> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM tasks WHERE id = $1)")
        .bind(task_id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

/// Write final field values in one statement, refreshing `updated_at`.
/// Returns `None` when the row is gone or owned by someone else.
pub async fn update_row(
    pool: &PgPool,
    task_id: Uuid,
    owner_id: &str,
    title: &str,
    description: Option<&str>,
    completed: bool,
) -> Result<Option<TaskRow>, TaskError> {
    let row = sqlx::query_as::<_, TaskRow>(
        r#"
        UPDATE tasks
        SET title = $1, description = $2, completed = $3, updated_at = now()
        WHERE id = $4 AND owner_id = $5
        RETURNING id, owner_id, title, description, completed, created_at, updated_at
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(completed)
    .bind(task_id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Set the completion flag, refreshing `updated_at`.
pub async fn set_completed(
    pool: &PgPool,
    task_id: Uuid,
    owner_id: &str,
    completed: bool,
) -> Result<Option<TaskRow>, TaskError> {
    let row = sqlx::query_as::<_, TaskRow>(
        r#"
        UPDATE tasks
        SET completed = $1, updated_at = now()
        WHERE id = $2 AND owner_id = $3
        RETURNING id, owner_id, title, description, completed, created_at, updated_at
        "#,
    )
    .bind(completed)
    .bind(task_id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Delete a task scoped to its owner. Returns whether a row was removed.
pub async fn delete(pool: &PgPool, task_id: Uuid, owner_id: &str) -> Result<bool, TaskError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
        .bind(task_id)
        .bind(owner_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
