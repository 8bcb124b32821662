//! Authentication middleware — Bearer token verification and lazy
//! account provisioning.

use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use taskhub_core::auth::{jwt, provision};
use taskhub_core::models::auth::Account;

use crate::AppState;
use crate::error::AppError;

/// Key used to store the resolved [`Account`] in request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Account);

/// Axum middleware: extracts `Authorization: Bearer <token>`, verifies the
/// token, resolves the account (creating it on first use), and injects
/// `CurrentUser` into request extensions.
///
/// The verified identity lives only for this request; nothing about it is
/// cached across requests.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let token = jwt::extract_bearer_token(header)?;
    let ctx = jwt::verify_bearer_token(token, state.config.jwt_secret.as_bytes())?;
    let account = provision::resolve_account(&state.pool, &ctx).await?;

    request.extensions_mut().insert(CurrentUser(account));

    Ok(next.run(request).await)
}
