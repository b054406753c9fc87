use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::models::{PostId, ProductPost, ProductPostFields};

use super::{map_reference_error, RepositoryError};

/// Product post data access
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn insert(&self, fields: ProductPostFields) -> Result<ProductPost, RepositoryError>;
    async fn find_by_id(&self, id: PostId) -> Result<Option<ProductPost>, RepositoryError>;
    /// All posts, newest first
    async fn list(&self) -> Result<Vec<ProductPost>, RepositoryError>;
    /// Full-row update of the merged field set; `NotFound` when no row matched
    async fn update(&self, id: PostId, fields: ProductPostFields) -> Result<(), RepositoryError>;
    async fn delete(&self, id: PostId) -> Result<(), RepositoryError>;
}

/// SQLx implementation of PostRepository
pub struct SqlxPostRepository {
    pool: PgPool,
}

impl SqlxPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for SqlxPostRepository {
    #[instrument(skip(self, fields), fields(account_id = %fields.account_id))]
    async fn insert(&self, fields: ProductPostFields) -> Result<ProductPost, RepositoryError> {
        let post = sqlx::query_as::<_, ProductPost>(
            r#"
            INSERT INTO product_posts (id, title, price, category, content, created_at, account_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, price, category, content, created_at, account_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&fields.title)
        .bind(fields.price)
        .bind(&fields.category)
        .bind(&fields.content)
        .bind(fields.created_at)
        .bind(fields.account_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!("Failed to create product post: {}", e);
            map_reference_error(e)
        })?;

        info!("Successfully created product post with ID: {}", post.id);
        Ok(post)
    }

    #[instrument(skip(self), fields(post_id = %id))]
    async fn find_by_id(&self, id: PostId) -> Result<Option<ProductPost>, RepositoryError> {
        let post = sqlx::query_as::<_, ProductPost>(
            r#"
            SELECT id, title, price, category, content, created_at, account_id
            FROM product_posts WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<ProductPost>, RepositoryError> {
        let posts = sqlx::query_as::<_, ProductPost>(
            r#"
            SELECT id, title, price, category, content, created_at, account_id
            FROM product_posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        info!("Retrieved {} product posts", posts.len());
        Ok(posts)
    }

    #[instrument(skip(self, fields), fields(post_id = %id))]
    async fn update(&self, id: PostId, fields: ProductPostFields) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE product_posts
            SET title = $2, price = $3, category = $4, content = $5, created_at = $6
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&fields.title)
        .bind(fields.price)
        .bind(&fields.category)
        .bind(&fields.content)
        .bind(fields.created_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("Successfully updated product post with ID: {}", id);
        Ok(())
    }

    #[instrument(skip(self), fields(post_id = %id))]
    async fn delete(&self, id: PostId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM product_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("Successfully deleted product post with ID: {}", id);
        Ok(())
    }
}
