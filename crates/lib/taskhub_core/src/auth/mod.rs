//! Token verification and account provisioning.
//!
//! Tokens are issued by an external identity provider and verified here
//! against a shared secret. The first verified request from a new subject
//! provisions its account row.

pub mod jwt;
pub mod provision;
pub mod queries;

use thiserror::Error;

/// Authentication errors.
///
/// Each way a credential can fail is a distinct variant so callers can map
/// them deterministically; the HTTP layer collapses everything except
/// `MissingCredential` into a single response.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No credential presented")]
    MissingCredential,

    #[error("Malformed token")]
    Malformed,

    #[error("Token signature mismatch")]
    BadSignature,

    #[error("Token expired")]
    Expired,

    #[error("Token not yet valid")]
    NotYetValid,

    #[error("Token carries no usable subject claim")]
    MissingSubject,

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
}
