pub mod account_repository;
pub mod comment_repository;
pub mod post_repository;

pub use account_repository::*;
pub use comment_repository::*;
pub use post_repository::*;

/// Repository error types. Constraint violations are surfaced distinctly
/// from generic database failures so the web layer can map them to specific
/// client-facing codes.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Row not found")]
    NotFound,

    #[error("Duplicate email: {0}")]
    DuplicateEmail(String),

    #[error("Referenced account does not exist")]
    MissingAccount,

    #[error("Referenced post does not exist")]
    MissingPost,
}

/// Name of the violated constraint, if the error is a database-level
/// constraint violation
pub(crate) fn constraint_of(error: &sqlx::Error) -> Option<String> {
    if let sqlx::Error::Database(db_err) = error {
        db_err.constraint().map(|c| c.to_string())
    } else {
        None
    }
}

/// Map foreign-key violations on owned resources to their distinct variants
pub(crate) fn map_reference_error(error: sqlx::Error) -> RepositoryError {
    match constraint_of(&error).as_deref() {
        Some("product_posts_account_id_fkey") | Some("comments_account_id_fkey") => {
            RepositoryError::MissingAccount
        }
        Some("comments_post_id_fkey") => RepositoryError::MissingPost,
        _ => RepositoryError::Database(error),
    }
}
