//! Authentication domain models.
//!
//! These are internal domain models, distinct from the API wire models
//! (which have `#[serde(rename)]` for camelCase etc.).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account record, keyed by the token subject.
///
/// Accounts are never created by a direct API call; they are provisioned
/// lazily the first time a verified token presents a new subject.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Account {
    /// Stable identity — the subject claim of a verified token.
    pub id: String,
    /// Display-only; empty when the token carried no email claim.
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Raw claim set carried by an access token.
///
/// Every field is optional at the parse layer; which combinations are
/// acceptable is decided by [`crate::auth::jwt::verify_bearer_token`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — the caller's stable identity (standard JWT `sub` claim).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Alias for `sub` used by some token issuers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Email claim, surfaced to account provisioning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Expiry (unix timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Issued at (unix timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

/// Verified request identity.
///
/// Built once per request by token verification, consumed by account
/// provisioning and the task service, and dropped when the request ends.
/// Never persisted or cached.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Subject extracted from the verified token (`sub`, or `user_id`).
    pub subject_id: String,
    /// The full verified claim set.
    pub claims: TokenClaims,
}

impl AuthContext {
    /// Email claim, if present and non-empty.
    pub fn email(&self) -> Option<&str> {
        self.claims.email.as_deref().filter(|e| !e.is_empty())
    }
}
