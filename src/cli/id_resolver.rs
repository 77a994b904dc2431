//! Short ID prefix resolution for saved analyses.
//!
//! Any unique prefix of an analysis UUID is accepted, like git short hashes.

use anyhow::{bail, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

const ANALYSIS_QUERY: &str = "SELECT id FROM analyses WHERE id LIKE ? ORDER BY saved_at DESC";

fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        bail!("ID prefix must not be empty");
    }
    if !prefix.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
        bail!("Invalid ID prefix '{prefix}': must contain only hex characters and dashes");
    }
    Ok(())
}

/// Resolve an analysis ID prefix to a full UUID.
pub async fn resolve_analysis_id(pool: &SqlitePool, prefix: &str) -> Result<Uuid> {
    if let Ok(uuid) = Uuid::parse_str(prefix) {
        return Ok(uuid);
    }

    validate_prefix(prefix)?;

    let pattern = format!("{}%", prefix.to_lowercase());
    let rows: Vec<(String,)> = sqlx::query_as(ANALYSIS_QUERY)
        .bind(&pattern)
        .fetch_all(pool)
        .await?;

    match rows.as_slice() {
        [] => bail!("No analysis found matching '{prefix}'"),
        [(id,)] => Ok(Uuid::parse_str(id)?),
        _ => {
            let mut msg = format!(
                "Ambiguous prefix '{prefix}': matches {} analyses:",
                rows.len()
            );
            for (id,) in &rows {
                msg.push_str(&format!("\n  {id}"));
            }
            bail!("{msg}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqliteAnalysisRepository};
    use crate::domain::models::Tier;
    use crate::domain::ports::AnalysisRepository;
    use crate::services::test_support::sample_record;

    #[test]
    fn test_validate_prefix() {
        assert!(validate_prefix("").is_err());
        assert!(validate_prefix("xyz").is_err());
        assert!(validate_prefix("a1b2-").is_ok());
    }

    #[tokio::test]
    async fn test_resolves_unique_prefix() {
        let pool = create_migrated_test_pool().await.unwrap();
        let repo = SqliteAnalysisRepository::new(pool.clone());
        let saved = repo.save(&sample_record(Tier::Medium, 40)).await.unwrap();

        let id = saved.id.to_string();
        let resolved = resolve_analysis_id(&pool, &id[..8]).await.unwrap();
        assert_eq!(resolved, saved.id);

        let upper = id[..8].to_uppercase();
        assert_eq!(resolve_analysis_id(&pool, &upper).await.unwrap(), saved.id);
    }

    #[tokio::test]
    async fn test_unknown_prefix_fails() {
        let pool = create_migrated_test_pool().await.unwrap();
        let err = resolve_analysis_id(&pool, "abc").await.unwrap_err();
        assert!(err.to_string().contains("No analysis found"));
    }

    #[tokio::test]
    async fn test_full_uuid_short_circuits() {
        let pool = create_migrated_test_pool().await.unwrap();
        let id = Uuid::new_v4();
        assert_eq!(resolve_analysis_id(&pool, &id.to_string()).await.unwrap(), id);
    }
}
