//! SQLite schema migrations, embedded in the binary.

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::debug;

/// Schema migration failure.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// A migration's SQL or its bookkeeping insert failed
    #[error("Failed to execute migration {version}: {source}")]
    ExecutionError {
        /// Migration being applied (0 for the bookkeeping table)
        version: i64,
        /// Underlying database error
        #[source]
        source: sqlx::Error,
    },
    /// Reading the applied version failed
    #[error("Failed to get schema version: {0}")]
    VersionCheckError(#[source] sqlx::Error),
}

/// One versioned schema change.
#[derive(Debug, Clone)]
pub struct Migration {
    /// Monotonic version number
    pub version: i64,
    /// Human-readable summary
    pub description: String,
    /// SQL script to run
    pub sql: String,
}

/// Applies embedded migrations and records them in `schema_migrations`.
pub struct Migrator {
    pool: SqlitePool,
}

impl Migrator {
    /// Migrator for `pool`.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Apply every migration newer than the recorded version. Returns how
    /// many were applied.
    pub async fn run_embedded_migrations(
        &self,
        migrations: Vec<Migration>,
    ) -> Result<usize, MigrationError> {
        self.ensure_migrations_table().await?;
        let current_version = self.get_current_version().await?;
        let pending: Vec<_> = migrations
            .into_iter()
            .filter(|m| m.version > current_version)
            .collect();

        for migration in &pending {
            self.apply_migration(migration).await?;
        }

        Ok(pending.len())
    }

    async fn ensure_migrations_table(&self) -> Result<(), MigrationError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT (datetime('now')),
                description TEXT
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| MigrationError::ExecutionError {
            version: 0,
            source: e,
        })?;
        Ok(())
    }

    /// Highest applied version, 0 on a fresh database.
    pub async fn get_current_version(&self) -> Result<i64, MigrationError> {
        let result: Option<(i64,)> =
            sqlx::query_as("SELECT COALESCE(MAX(version), 0) FROM schema_migrations")
                .fetch_optional(&self.pool)
                .await
                .map_err(MigrationError::VersionCheckError)?;
        Ok(result.map_or(0, |(v,)| v))
    }

    async fn apply_migration(&self, migration: &Migration) -> Result<(), MigrationError> {
        let failed = |e| MigrationError::ExecutionError {
            version: migration.version,
            source: e,
        };

        sqlx::raw_sql(&migration.sql)
            .execute(&self.pool)
            .await
            .map_err(failed)?;

        sqlx::query("INSERT INTO schema_migrations (version, description) VALUES (?, ?)")
            .bind(migration.version)
            .bind(&migration.description)
            .execute(&self.pool)
            .await
            .map_err(failed)?;

        debug!(version = migration.version, "applied migration");
        Ok(())
    }
}

/// Creates the `analyses` table.
pub fn analyses_migration() -> Migration {
    Migration {
        version: 1,
        description: "Saved analyses".to_string(),
        sql: include_str!("../../../migrations/001_analyses.sql").to_string(),
    }
}

/// Every migration shipped with the binary, oldest first.
pub fn all_embedded_migrations() -> Vec<Migration> {
    vec![analyses_migration()]
}
