//! SQLite persistence for saved analyses.

pub mod analysis_repository;
pub mod connection;
pub mod migrations;

pub use analysis_repository::SqliteAnalysisRepository;
pub use connection::{create_pool, create_test_pool, ConnectionError, PoolConfig};
pub use migrations::{all_embedded_migrations, Migration, MigrationError, Migrator};

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::errors::{IntegrationError, IntegrationResult};
use crate::domain::models::DatabaseConfig;

/// Parse a UUID string from a SQLite row field.
pub fn parse_uuid(s: &str) -> IntegrationResult<Uuid> {
    Uuid::parse_str(s).map_err(|e| IntegrationError::Persistence(format!("invalid id {s}: {e}")))
}

/// Parse an RFC3339 datetime string from a SQLite row field.
pub fn parse_datetime(s: &str) -> IntegrationResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| IntegrationError::Persistence(format!("invalid timestamp {s}: {e}")))
}

/// Failure opening or migrating the database.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Pool could not be created
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),
    /// Schema could not be brought up to date
    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),
}

/// Open (creating if needed) the configured database and bring its schema
/// up to date.
pub async fn initialize_database(config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
    let pool = create_pool(&config.url(), Some(PoolConfig::from(config))).await?;
    let migrator = Migrator::new(pool.clone());
    migrator.run_embedded_migrations(all_embedded_migrations()).await?;
    Ok(pool)
}

/// In-memory pool with all migrations applied.
pub async fn create_migrated_test_pool() -> Result<SqlitePool, DatabaseError> {
    let pool = create_test_pool().await?;
    let migrator = Migrator::new(pool.clone());
    migrator.run_embedded_migrations(all_embedded_migrations()).await?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_helpers_reject_garbage() {
        assert!(parse_uuid("not-a-uuid").is_err());
        assert!(parse_datetime("yesterday").is_err());
        assert!(parse_datetime("2026-01-02T03:04:05+00:00").is_ok());
    }

    #[tokio::test]
    async fn test_initialize_database_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            path: dir.path().join("db").join("ideagauge.db").display().to_string(),
            max_connections: 2,
        };

        let pool = initialize_database(&config).await.unwrap();
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM analyses")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
