//! Analysis repository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::IntegrationResult;
use crate::domain::models::AnalysisRecord;

/// A persisted analysis with its storage metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAnalysis {
    /// Storage ID
    pub id: Uuid,
    /// When the record was stored
    pub saved_at: DateTime<Utc>,
    /// The record exactly as saved
    pub record: AnalysisRecord,
}

/// Repository interface for analysis persistence.
///
/// Records are stored verbatim: `get` after `save` yields a record equal to
/// the one saved.
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// Persist a record under a fresh ID.
    async fn save(&self, record: &AnalysisRecord) -> IntegrationResult<SavedAnalysis>;

    /// Get a saved analysis by ID.
    async fn get(&self, id: Uuid) -> IntegrationResult<Option<SavedAnalysis>>;

    /// List saved analyses, newest first.
    async fn list(&self, limit: usize) -> IntegrationResult<Vec<SavedAnalysis>>;

    /// Delete a saved analysis. Returns false when nothing matched.
    async fn delete(&self, id: Uuid) -> IntegrationResult<bool>;
}
