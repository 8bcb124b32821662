//! Lazy account provisioning.

use sqlx::PgPool;
use tracing::info;

use super::{AuthError, queries};
use crate::models::auth::{Account, AuthContext};

/// Resolve the account for a verified identity, creating it on first use.
///
/// Idempotent under concurrent first use: the insert is guarded by the
/// primary-key constraint, and a lost race falls back to re-fetching the
/// row the winner created. Existing accounts are returned as-is — a changed
/// email claim does not rewrite the stored one.
pub async fn resolve_account(pool: &PgPool, ctx: &AuthContext) -> Result<Account, AuthError> {
    if let Some(account) = queries::find_account(pool, &ctx.subject_id).await? {
        return Ok(account);
    }

    let email = ctx.email().unwrap_or("");
    if let Some(account) = queries::insert_account(pool, &ctx.subject_id, email).await? {
        info!(account_id = %account.id, "provisioned new account");
        return Ok(account);
    }

    // A concurrent request created the row between our lookup and insert.
    queries::find_account(pool, &ctx.subject_id)
        .await?
        .ok_or(AuthError::Db(sqlx::Error::RowNotFound))
}
