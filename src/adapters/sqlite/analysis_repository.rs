//! SQLite implementation of the AnalysisRepository.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::adapters::sqlite::{parse_datetime, parse_uuid};
use crate::domain::errors::{IntegrationError, IntegrationResult};
use crate::domain::models::AnalysisRecord;
use crate::domain::ports::{AnalysisRepository, SavedAnalysis};

/// [`AnalysisRepository`] over the `analyses` table.
#[derive(Clone)]
pub struct SqliteAnalysisRepository {
    pool: SqlitePool,
}

impl SqliteAnalysisRepository {
    /// Repository on an already migrated pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisRepository for SqliteAnalysisRepository {
    async fn save(&self, record: &AnalysisRecord) -> IntegrationResult<SavedAnalysis> {
        let saved = SavedAnalysis {
            id: Uuid::new_v4(),
            saved_at: Utc::now(),
            record: record.clone(),
        };
        let record_json = serde_json::to_string(record)
            .map_err(|e| IntegrationError::Persistence(format!("serialization error: {e}")))?;

        sqlx::query(
            r#"INSERT INTO analyses (id, idea_description, tier, success_score, record, saved_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(saved.id.to_string())
        .bind(&record.idea_description)
        .bind(record.tier_classification.as_str())
        .bind(record.success_score)
        .bind(&record_json)
        .bind(saved.saved_at.to_rfc3339_opts(SecondsFormat::Nanos, true))
        .execute(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn get(&self, id: Uuid) -> IntegrationResult<Option<SavedAnalysis>> {
        let row: Option<AnalysisRow> =
            sqlx::query_as("SELECT id, record, saved_at FROM analyses WHERE id = ?")
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list(&self, limit: usize) -> IntegrationResult<Vec<SavedAnalysis>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<AnalysisRow> = sqlx::query_as(
            "SELECT id, record, saved_at FROM analyses ORDER BY saved_at DESC, rowid DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn delete(&self, id: Uuid) -> IntegrationResult<bool> {
        let result = sqlx::query("DELETE FROM analyses WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct AnalysisRow {
    id: String,
    record: String,
    saved_at: String,
}

impl TryFrom<AnalysisRow> for SavedAnalysis {
    type Error = IntegrationError;

    fn try_from(row: AnalysisRow) -> Result<Self, Self::Error> {
        let record: AnalysisRecord = serde_json::from_str(&row.record)
            .map_err(|e| IntegrationError::Persistence(format!("corrupt record {}: {e}", row.id)))?;

        Ok(Self {
            id: parse_uuid(&row.id)?,
            saved_at: parse_datetime(&row.saved_at)?,
            record,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;
    use crate::domain::models::Tier;
    use crate::services::test_support::sample_record;

    async fn repository() -> SqliteAnalysisRepository {
        SqliteAnalysisRepository::new(create_migrated_test_pool().await.unwrap())
    }

    #[tokio::test]
    async fn test_round_trip_is_verbatim() {
        let repo = repository().await;
        let mut record = sample_record(Tier::Bad, 12);
        record.competitors[0].source = Some("https://example.com".to_string());
        record.rule_flags.bad.health_legal_liability = true;
        record.rule_flags.bad.details = "Handles biohazards".to_string();

        let saved = repo.save(&record).await.unwrap();
        let loaded = repo.get(saved.id).await.unwrap().unwrap();

        assert_eq!(loaded.record, record);
        assert_eq!(loaded.id, saved.id);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let repo = repository().await;
        assert!(repo.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_newest_first_with_limit() {
        let repo = repository().await;
        let first = repo.save(&sample_record(Tier::Bad, 10)).await.unwrap();
        let second = repo.save(&sample_record(Tier::Medium, 40)).await.unwrap();
        let third = repo.save(&sample_record(Tier::Good, 80)).await.unwrap();

        let all = repo.list(10).await.unwrap();
        let ids: Vec<Uuid> = all.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);

        assert_eq!(repo.list(2).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repository().await;
        let saved = repo.save(&sample_record(Tier::Medium, 33)).await.unwrap();

        assert!(repo.delete(saved.id).await.unwrap());
        assert!(!repo.delete(saved.id).await.unwrap());
        assert!(repo.get(saved.id).await.unwrap().is_none());
    }
}
