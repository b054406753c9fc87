use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::auth::{AuthError, PasswordHashError, TokenError};
use crate::repository::RepositoryError;

/// Application error taxonomy, mapped onto HTTP responses.
///
/// Authentication and ownership failures both collapse to 401. Validation
/// failures carry the full violation-code list as the response body. Store
/// failures never leak internal error text to the client.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Resource not found")]
    NotFound,

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    pub fn violation(code: &str) -> Self {
        AppError::Validation(vec![code.to_string()])
    }
}

impl From<AuthError> for AppError {
    fn from(_: AuthError) -> Self {
        AppError::Unauthorized
    }
}

impl From<RepositoryError> for AppError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound => AppError::NotFound,
            RepositoryError::DuplicateEmail(_) => AppError::violation("emailNotUnique"),
            RepositoryError::MissingAccount => AppError::violation("accountNotFound"),
            RepositoryError::MissingPost => AppError::violation("postNotFound"),
            RepositoryError::Database(e) => {
                tracing::error!("Repository error: {:?}", e);
                sentry::capture_error(&e);
                AppError::Internal
            }
        }
    }
}

impl From<PasswordHashError> for AppError {
    fn from(error: PasswordHashError) -> Self {
        tracing::error!("Password hashing error: {}", error);
        sentry::capture_error(&error);
        AppError::Internal
    }
}

impl From<TokenError> for AppError {
    fn from(error: TokenError) -> Self {
        tracing::error!("Token error: {}", error);
        sentry::capture_error(&error);
        AppError::Internal
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MalformedPayload(detail) => {
                tracing::debug!("Rejected malformed payload: {}", detail);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(vec!["malformedPayload".to_string()]),
                )
                    .into_response()
            }
            AppError::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            AppError::Validation(codes) => (StatusCode::BAD_REQUEST, Json(codes)).into_response(),
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_not_found_maps_to_404() {
        let error: AppError = RepositoryError::NotFound.into();
        assert!(matches!(error, AppError::NotFound));
    }

    #[test]
    fn duplicate_email_maps_to_violation_code() {
        let error: AppError = RepositoryError::DuplicateEmail("a@student.ju.se".to_string()).into();
        match error {
            AppError::Validation(codes) => assert_eq!(codes, vec!["emailNotUnique"]),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn missing_references_map_to_distinct_codes() {
        let account: AppError = RepositoryError::MissingAccount.into();
        let post: AppError = RepositoryError::MissingPost.into();
        assert!(matches!(account, AppError::Validation(ref c) if c == &vec!["accountNotFound".to_string()]));
        assert!(matches!(post, AppError::Validation(ref c) if c == &vec!["postNotFound".to_string()]));
    }

    #[test]
    fn every_auth_error_collapses_to_unauthorized() {
        for auth_error in [
            AuthError::MissingCredential,
            AuthError::InvalidCredential,
            AuthError::Forbidden,
        ] {
            let error: AppError = auth_error.into();
            assert!(matches!(error, AppError::Unauthorized));
        }
    }
}
