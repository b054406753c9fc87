use axum::http::{header, HeaderMap};

use crate::models::AccountId;

use super::token::TokenKeys;

/// Authentication and authorization failures; all of these collapse to a
/// 401 response
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Missing or malformed Authorization header")]
    MissingCredential,
    #[error("Bearer token failed verification")]
    InvalidCredential,
    #[error("Subject does not own the resource")]
    Forbidden,
}

/// Resolve a bearer token from the request headers to a subject account id.
/// The header must be present and use the Bearer scheme; the remainder must
/// verify as a signed, unexpired token.
pub fn authenticate(headers: &HeaderMap, token_keys: &TokenKeys) -> Result<AccountId, AuthError> {
    let token = extract_bearer_token(headers).ok_or(AuthError::MissingCredential)?;

    token_keys
        .verify(token)
        .map(|claims| claims.sub)
        .map_err(|_| AuthError::InvalidCredential)
}

/// Strict-equality ownership check, run for every mutating operation before
/// validation or persistence. For existing resources the owner comes from
/// the stored row, never from the request body.
pub fn authorize_owner(subject: AccountId, owner: AccountId) -> Result<(), AuthError> {
    if subject == owner {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

/// Extract the Bearer token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
}
