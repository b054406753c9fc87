use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::models::{Account, AccountFields, AccountId};

use super::{constraint_of, RepositoryError};

/// Account data access
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn insert(&self, fields: AccountFields) -> Result<Account, RepositoryError>;
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, RepositoryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError>;
    async fn list(&self) -> Result<Vec<Account>, RepositoryError>;
    /// Full-row update of the merged field set; `NotFound` when no row matched
    async fn update(&self, id: AccountId, fields: AccountFields) -> Result<(), RepositoryError>;
    async fn delete(&self, id: AccountId) -> Result<(), RepositoryError>;
}

/// SQLx implementation of AccountRepository
pub struct SqlxAccountRepository {
    pool: PgPool,
}

impl SqlxAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_unique_email(error: sqlx::Error, email: &str) -> RepositoryError {
        if constraint_of(&error).as_deref() == Some("accounts_email_key") {
            return RepositoryError::DuplicateEmail(email.to_string());
        }
        RepositoryError::Database(error)
    }
}

#[async_trait]
impl AccountRepository for SqlxAccountRepository {
    #[instrument(skip(self, fields), fields(email = %fields.email))]
    async fn insert(&self, fields: AccountFields) -> Result<Account, RepositoryError> {
        info!("Creating new account with email: {}", fields.email);

        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (id, email, password_hash, username)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, username
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&fields.email)
        .bind(&fields.password_hash)
        .bind(&fields.username)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!("Failed to create account: {}", e);
            Self::map_unique_email(e, &fields.email)
        })?;

        info!("Successfully created account with ID: {}", account.id);
        Ok(account)
    }

    #[instrument(skip(self), fields(account_id = %id))]
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, RepositoryError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, email, password_hash, username FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    #[instrument(skip(self, email))]
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, email, password_hash, username FROM accounts WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Account>, RepositoryError> {
        let accounts = sqlx::query_as::<_, Account>(
            "SELECT id, email, password_hash, username FROM accounts ORDER BY email",
        )
        .fetch_all(&self.pool)
        .await?;

        info!("Retrieved {} accounts", accounts.len());
        Ok(accounts)
    }

    #[instrument(skip(self, fields), fields(account_id = %id))]
    async fn update(&self, id: AccountId, fields: AccountFields) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET email = $2, password_hash = $3, username = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&fields.email)
        .bind(&fields.password_hash)
        .bind(&fields.username)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!("Failed to update account {}: {}", id, e);
            Self::map_unique_email(e, &fields.email)
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("Successfully updated account with ID: {}", id);
        Ok(())
    }

    #[instrument(skip(self), fields(account_id = %id))]
    async fn delete(&self, id: AccountId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("Successfully deleted account with ID: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(email: &str) -> AccountFields {
        AccountFields {
            email: email.to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c3R1Yg$c3R1Yg".to_string(),
            username: "alice".to_string(),
        }
    }

    #[sqlx::test]
    async fn insert_with_taken_email_is_duplicate_email(pool: PgPool) {
        let repo = SqlxAccountRepository::new(pool);
        repo.insert(fields("a@student.ju.se")).await.unwrap();

        let error = repo.insert(fields("a@student.ju.se")).await.unwrap_err();
        match error {
            RepositoryError::DuplicateEmail(email) => assert_eq!(email, "a@student.ju.se"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[sqlx::test]
    async fn update_to_taken_email_is_duplicate_email(pool: PgPool) {
        let repo = SqlxAccountRepository::new(pool);
        repo.insert(fields("a@student.ju.se")).await.unwrap();
        let other = repo.insert(fields("b@student.ju.se")).await.unwrap();

        let error = repo
            .update(other.id, fields("a@student.ju.se"))
            .await
            .unwrap_err();
        assert!(matches!(error, RepositoryError::DuplicateEmail(_)));
    }

    #[sqlx::test]
    async fn update_of_missing_row_is_not_found(pool: PgPool) {
        let repo = SqlxAccountRepository::new(pool);
        let error = repo
            .update(Uuid::new_v4(), fields("a@student.ju.se"))
            .await
            .unwrap_err();
        assert!(matches!(error, RepositoryError::NotFound));
    }

    #[sqlx::test]
    async fn find_by_email_resolves_the_stored_row(pool: PgPool) {
        let repo = SqlxAccountRepository::new(pool);
        let created = repo.insert(fields("a@student.ju.se")).await.unwrap();

        let found = repo.find_by_email("a@student.ju.se").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(repo.find_by_email("b@student.ju.se").await.unwrap().is_none());
    }
}
