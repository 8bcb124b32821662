//! # taskhub_api
//!
//! HTTP API library for Taskhub.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;

use axum::Router;
use axum::routing::{get, patch};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{health, tasks};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,
    /// API configuration.
    pub config: ApiConfig,
}

/// Run embedded database migrations.
///
/// Delegates to `taskhub_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    taskhub_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new().route("/api/health", get(health::health_handler));

    // Protected routes (require auth)
    let protected = Router::new()
        .route(
            "/api/tasks",
            get(tasks::list_tasks_handler).post(tasks::create_task_handler),
        )
        .route(
            "/api/tasks/{id}",
            get(tasks::get_task_handler)
                .put(tasks::update_task_handler)
                .patch(tasks::patch_task_handler)
                .delete(tasks::delete_task_handler),
        )
        .route("/api/tasks/{id}/complete", patch(tasks::set_completed_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors)
        .with_state(state)
}
