use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::settings::DatabaseConfig;

/// Database connection pool and related utilities
pub struct Database {
    pool: PgPool,
}

/// Database error types
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
}

impl Database {
    /// Create a new database connection pool
    pub async fn new(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        info!("Initializing database connection pool");

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .test_before_acquire(true)
            .connect(&config.url)
            .await
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        info!(
            "Database connection pool initialized with {} max connections",
            config.max_connections
        );

        Ok(Self { pool })
    }

    /// Get a clone of the connection pool
    pub fn pool_cloned(&self) -> PgPool {
        self.pool.clone()
    }

    /// Check database connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1 as health_check")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| {
                warn!("Database health check failed: {}", e);
                DatabaseError::HealthCheckFailed(e.to_string())
            })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        info!("Running database migrations");

        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Close the database connection pool gracefully
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}
