use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::models::{Comment, CommentFields, CommentId, PostId};

use super::{map_reference_error, RepositoryError};

/// Comment data access
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, fields: CommentFields) -> Result<Comment, RepositoryError>;
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, RepositoryError>;
    /// Comments newest first, optionally restricted to one post
    async fn list(&self, post_id: Option<PostId>) -> Result<Vec<Comment>, RepositoryError>;
    /// Full-row update of the merged field set; `NotFound` when no row matched
    async fn update(&self, id: CommentId, fields: CommentFields) -> Result<(), RepositoryError>;
    async fn delete(&self, id: CommentId) -> Result<(), RepositoryError>;
}

/// SQLx implementation of CommentRepository
pub struct SqlxCommentRepository {
    pool: PgPool,
}

impl SqlxCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    #[instrument(skip(self, fields), fields(post_id = %fields.post_id))]
    async fn insert(&self, fields: CommentFields) -> Result<Comment, RepositoryError> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (id, title, content, created_at, account_id, post_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, content, created_at, account_id, post_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&fields.title)
        .bind(&fields.content)
        .bind(fields.created_at)
        .bind(fields.account_id)
        .bind(fields.post_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!("Failed to create comment: {}", e);
            map_reference_error(e)
        })?;

        info!("Successfully created comment with ID: {}", comment.id);
        Ok(comment)
    }

    #[instrument(skip(self), fields(comment_id = %id))]
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, RepositoryError> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, title, content, created_at, account_id, post_id
            FROM comments WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    #[instrument(skip(self))]
    async fn list(&self, post_id: Option<PostId>) -> Result<Vec<Comment>, RepositoryError> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, title, content, created_at, account_id, post_id
            FROM comments
            WHERE $1::uuid IS NULL OR post_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        info!("Retrieved {} comments", comments.len());
        Ok(comments)
    }

    #[instrument(skip(self, fields), fields(comment_id = %id))]
    async fn update(&self, id: CommentId, fields: CommentFields) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE comments
            SET title = $2, content = $3, created_at = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&fields.title)
        .bind(&fields.content)
        .bind(fields.created_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("Successfully updated comment with ID: {}", id);
        Ok(())
    }

    #[instrument(skip(self), fields(comment_id = %id))]
    async fn delete(&self, id: CommentId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("Successfully deleted comment with ID: {}", id);
        Ok(())
    }
}
