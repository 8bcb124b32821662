//! Bearer token verification.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use super::AuthError;
use crate::models::auth::{AuthContext, TokenClaims};

/// Clock skew tolerance for `exp`/`iat`, in seconds.
const LEEWAY_SECS: u64 = 60;

/// Pull the token out of an `Authorization` header value.
///
/// `None` means no header was presented at all; a header with the wrong
/// scheme or an empty token is malformed rather than missing.
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingCredential)?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::Malformed)?
        .trim();
    if token.is_empty() {
        return Err(AuthError::Malformed);
    }
    Ok(token)
}

/// Verify a bearer token (HS256) and derive the request identity.
///
/// Checks structure, signature, `exp` when present, and `iat` when present
/// (a token issued in the future is rejected). The subject is the `sub`
/// claim, falling back to the `user_id` claim for issuers that use that
/// convention; empty strings count as absent.
///
/// Pure function of (token, current time, secret) — no IO.
pub fn verify_bearer_token(token: &str, secret: &[u8]) -> Result<AuthContext, AuthError> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = LEEWAY_SECS;
    // `exp` is validated when present but tokens without one are accepted.
    validation.required_spec_claims = Default::default();

    let data = decode::<TokenClaims>(token, &key, &validation).map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidSignature => AuthError::BadSignature,
        ErrorKind::ImmatureSignature => AuthError::NotYetValid,
        _ => AuthError::Malformed,
    })?;
    let claims = data.claims;

    if let Some(iat) = claims.iat
        && iat > Utc::now().timestamp() + LEEWAY_SECS as i64
    {
        return Err(AuthError::NotYetValid);
    }

    let subject_id = claims
        .sub
        .clone()
        .filter(|s| !s.is_empty())
        .or_else(|| claims.user_id.clone().filter(|s| !s.is_empty()))
        .ok_or(AuthError::MissingSubject)?;

    Ok(AuthContext { subject_id, claims })
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{EncodingKey, Header, encode};

    use super::*;

    const SECRET: &[u8] = b"test-secret";

    fn mint(claims: &TokenClaims, secret: &[u8]) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap()
    }

    fn base_claims(sub: &str) -> TokenClaims {
        TokenClaims {
            sub: Some(sub.to_string()),
            exp: Some(Utc::now().timestamp() + 3600),
            iat: Some(Utc::now().timestamp()),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_valid_token() {
        let token = mint(&base_claims("u1"), SECRET);
        let ctx = verify_bearer_token(&token, SECRET).unwrap();
        assert_eq!(ctx.subject_id, "u1");
    }

    #[test]
    fn surfaces_email_claim() {
        let mut claims = base_claims("u1");
        claims.email = Some("u1@example.com".into());
        let token = mint(&claims, SECRET);
        let ctx = verify_bearer_token(&token, SECRET).unwrap();
        assert_eq!(ctx.email(), Some("u1@example.com"));
    }

    #[test]
    fn accepts_user_id_alias() {
        let claims = TokenClaims {
            user_id: Some("u2".into()),
            exp: Some(Utc::now().timestamp() + 3600),
            ..Default::default()
        };
        let token = mint(&claims, SECRET);
        let ctx = verify_bearer_token(&token, SECRET).unwrap();
        assert_eq!(ctx.subject_id, "u2");
    }

    #[test]
    fn empty_sub_falls_back_to_user_id() {
        let claims = TokenClaims {
            sub: Some(String::new()),
            user_id: Some("u3".into()),
            ..Default::default()
        };
        let token = mint(&claims, SECRET);
        let ctx = verify_bearer_token(&token, SECRET).unwrap();
        assert_eq!(ctx.subject_id, "u3");
    }

    #[test]
    fn accepts_token_without_expiry() {
        let claims = TokenClaims {
            sub: Some("u1".into()),
            ..Default::default()
        };
        let token = mint(&claims, SECRET);
        assert!(verify_bearer_token(&token, SECRET).is_ok());
    }

    #[test]
    fn rejects_expired_token() {
        let mut claims = base_claims("u1");
        claims.exp = Some(Utc::now().timestamp() - 3600);
        let token = mint(&claims, SECRET);
        assert!(matches!(
            verify_bearer_token(&token, SECRET),
            Err(AuthError::Expired)
        ));
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = mint(&base_claims("u1"), b"other-secret");
        assert!(matches!(
            verify_bearer_token(&token, SECRET),
            Err(AuthError::BadSignature)
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            verify_bearer_token("not.a.jwt", SECRET),
            Err(AuthError::Malformed)
        ));
        assert!(matches!(
            verify_bearer_token("", SECRET),
            Err(AuthError::Malformed)
        ));
    }

    #[test]
    fn rejects_missing_subject() {
        let claims = TokenClaims {
            email: Some("nobody@example.com".into()),
            exp: Some(Utc::now().timestamp() + 3600),
            ..Default::default()
        };
        let token = mint(&claims, SECRET);
        assert!(matches!(
            verify_bearer_token(&token, SECRET),
            Err(AuthError::MissingSubject)
        ));
    }

    #[test]
    fn rejects_future_issued_at() {
        let mut claims = base_claims("u1");
        claims.iat = Some(Utc::now().timestamp() + 3600);
        let token = mint(&claims, SECRET);
        assert!(matches!(
            verify_bearer_token(&token, SECRET),
            Err(AuthError::NotYetValid)
        ));
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(extract_bearer_token(Some("Bearer abc")).unwrap(), "abc");
        assert_eq!(extract_bearer_token(Some("Bearer  abc ")).unwrap(), "abc");
        assert!(matches!(
            extract_bearer_token(None),
            Err(AuthError::MissingCredential)
        ));
        assert!(matches!(
            extract_bearer_token(Some("Token abc")),
            Err(AuthError::Malformed)
        ));
        assert!(matches!(
            extract_bearer_token(Some("Bearer ")),
            Err(AuthError::Malformed)
        ));
    }
}
