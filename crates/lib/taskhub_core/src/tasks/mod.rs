//! Owner-scoped task service.
//!
//! Every operation takes the caller's account id and touches only rows
//! owned by it. Single-task operations query by `(id, owner_id)`; only
//! when that misses does a second, owner-unfiltered probe decide between
//! "no such task" and "someone else's task". Ownership is settled before
//! field validation so a validation message can never leak the state of
//! another user's task.

pub mod queries;

use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::task::{NewTask, TaskChanges, TaskRow};
use crate::uuid::uuidv7;

/// Title length bounds (chars, after trimming).
const TITLE_MAX: usize = 200;

/// Description length bound (chars, after trimming).
const DESCRIPTION_MAX: usize = 1000;

/// Task service errors.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found: {0}")]
    NotFound(Uuid),

    #[error("Forbidden: task {0} belongs to another account")]
    Forbidden(Uuid),

    #[error("Validation error on {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Trim and bound-check a title (1–200 chars).
fn validate_title(raw: &str) -> Result<String, TaskError> {
    let title = raw.trim();
    if title.is_empty() || title.chars().count() > TITLE_MAX {
        return Err(TaskError::Validation {
            field: "title",
            message: format!("Title must be between 1 and {TITLE_MAX} characters"),
        });
    }
    Ok(title.to_string())
}

/// Trim and bound-check a description (≤1000 chars).
fn validate_description(raw: &str) -> Result<String, TaskError> {
    let description = raw.trim();
    if description.chars().count() > DESCRIPTION_MAX {
        return Err(TaskError::Validation {
            field: "description",
            message: format!("Description must not exceed {DESCRIPTION_MAX} characters"),
        });
    }
    Ok(description.to_string())
}

/// Classify a miss on an owner-scoped lookup: the task either does not
/// exist at all, or exists under a different owner.
async fn missing_task(pool: &PgPool, task_id: Uuid) -> TaskError {
    match queries::task_exists(pool, task_id).await {
        Ok(true) => TaskError::Forbidden(task_id),
        Ok(false) => TaskError::NotFound(task_id),
        Err(e) => e,
    }
}

/// List all tasks owned by the caller. An empty list is success.
pub async fn list_tasks(pool: &PgPool, owner_id: &str) -> Result<Vec<TaskRow>, TaskError> {
    queries::list_by_owner(pool, owner_id).await
}

/// Create a task owned by the caller, `completed = false`.
pub async fn create_task(
    pool: &PgPool,
    owner_id: &str,
    input: NewTask,
) -> Result<TaskRow, TaskError> {
    let title = validate_title(&input.title)?;
    let description = match input.description.as_deref() {
        Some(d) => Some(validate_description(d)?),
        None => None,
    };

    let row = queries::insert(pool, uuidv7(), owner_id, &title, description.as_deref()).await?;
    info!(task_id = %row.id, owner_id, "task created");
    Ok(row)
}

/// Fetch a single task owned by the caller.
pub async fn get_task(pool: &PgPool, owner_id: &str, task_id: Uuid) -> Result<TaskRow, TaskError> {
    match queries::find_for_owner(pool, task_id, owner_id).await? {
        Some(row) => Ok(row),
        None => Err(missing_task(pool, task_id).await),
    }
}

/// Apply field changes to a task owned by the caller.
///
/// `None` fields keep their current value, so this serves both full and
/// partial updates. The final values land in one UPDATE statement that
/// also rewrites `updated_at` — concurrent updates resolve last-write-wins,
/// and a validation failure leaves the row untouched.
pub async fn update_task(
    pool: &PgPool,
    owner_id: &str,
    task_id: Uuid,
    changes: TaskChanges,
) -> Result<TaskRow, TaskError> {
    let Some(existing) = queries::find_for_owner(pool, task_id, owner_id).await? else {
        return Err(missing_task(pool, task_id).await);
    };

    let title = match changes.title.as_deref() {
        Some(t) => validate_title(t)?,
        None => existing.title,
    };
    let description = match changes.description.as_deref() {
        Some(d) => Some(validate_description(d)?),
        None => existing.description,
    };
    let completed = changes.completed.unwrap_or(existing.completed);

    match queries::update_row(
        pool,
        task_id,
        owner_id,
        &title,
        description.as_deref(),
        completed,
    )
    .await?
    {
        Some(row) => {
            info!(task_id = %row.id, owner_id, "task updated");
            Ok(row)
        }
        // Row vanished between the lookup and the write.
        None => Err(missing_task(pool, task_id).await),
    }
}

/// Set the completion flag on a task owned by the caller.
pub async fn set_completed(
    pool: &PgPool,
    owner_id: &str,
    task_id: Uuid,
    completed: bool,
) -> Result<TaskRow, TaskError> {
    match queries::set_completed(pool, task_id, owner_id, completed).await? {
        Some(row) => {
            info!(task_id = %row.id, owner_id, completed, "task completion toggled");
            Ok(row)
        }
        None => Err(missing_task(pool, task_id).await),
    }
}

/// Permanently delete a task owned by the caller.
pub async fn delete_task(pool: &PgPool, owner_id: &str, task_id: Uuid) -> Result<(), TaskError> {
    if queries::delete(pool, task_id, owner_id).await? {
        info!(task_id = %task_id, owner_id, "task deleted");
        Ok(())
    } else {
        Err(missing_task(pool, task_id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_bounds() {
        assert!(validate_title("Buy milk").is_ok());
        assert!(validate_title(&"x".repeat(200)).is_ok());
        assert!(matches!(
            validate_title(&"x".repeat(201)),
            Err(TaskError::Validation { field: "title", .. })
        ));
        assert!(matches!(
            validate_title(""),
            Err(TaskError::Validation { field: "title", .. })
        ));
        // Whitespace-only trims down to empty.
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn title_is_trimmed() {
        assert_eq!(validate_title("  Buy milk  ").unwrap(), "Buy milk");
        // 201 chars of which one is trailing whitespace still fits.
        let padded = format!("{} ", "x".repeat(200));
        assert_eq!(validate_title(&padded).unwrap().len(), 200);
    }

    #[test]
    fn description_bounds() {
        assert!(validate_description("").is_ok());
        assert!(validate_description(&"x".repeat(1000)).is_ok());
        assert!(matches!(
            validate_description(&"x".repeat(1001)),
            Err(TaskError::Validation {
                field: "description",
                ..
            })
        ));
    }

    #[test]
    fn title_length_counts_chars_not_bytes() {
        // 200 multibyte chars are within bounds even though the byte
        // length is far larger.
        let title = "ü".repeat(200);
        assert!(validate_title(&title).is_ok());
    }
}
