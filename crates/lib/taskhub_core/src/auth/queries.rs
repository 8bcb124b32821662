//! Account database queries.

use sqlx::PgPool;

use super::AuthError;
use crate::models::auth::Account;

/// Fetch an account by id.
pub async fn find_account(pool: &PgPool, id: &str) -> Result<Option<Account>, AuthError> {
    let row = sqlx::query_as::<_, Account>(
        "SELECT id, email, created_at FROM accounts WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Insert an account, yielding `None` when the id already exists.
///
/// `ON CONFLICT DO NOTHING` makes the insert race-safe: when two first
/// requests for the same subject arrive together, exactly one insert wins
/// and the loser sees no returned row.
pub async fn insert_account(
    pool: &PgPool,
    id: &str,
    email: &str,
) -> Result<Option<Account>, AuthError> {
    let row = sqlx::query_as::<_, Account>(
        r#"
        INSERT INTO accounts (id, email)
        VALUES ($1, $2)
        ON CONFLICT (id) DO NOTHING
        RETURNING id, email, created_at
        "#,
    )
    .bind(id)
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
