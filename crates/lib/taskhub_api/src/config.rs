//! API server configuration.

/// Configuration for the API server.
///
/// Constructed explicitly and passed into [`crate::AppState`] — there is no
/// ambient/global configuration, so tests inject fixtures per case.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3200").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Shared secret for verifying token signatures. Must match the secret
    /// the external identity provider signs with.
    pub jwt_secret: String,
}
