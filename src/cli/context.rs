//! Wiring shared by the commands: config, database and reasoning backend.

use anyhow::{anyhow, Context, Result};
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

use crate::adapters::reasoning::{AnthropicReasoningConfig, AnthropicReasoningService};
use crate::adapters::sqlite::{initialize_database, SqliteAnalysisRepository};
use crate::cli::id_resolver::resolve_analysis_id;
use crate::domain::models::Config;
use crate::domain::ports::{AnalysisRepository, ReasoningService, SavedAnalysis};
use crate::infrastructure::claude::{ClaudeClient, ClaudeClientConfig};
use crate::infrastructure::config::ConfigLoader;
use crate::services::AnalyzerSession;

/// Load configuration from `--config` or the project hierarchy.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Anthropic-backed reasoning service built from configuration.
pub fn build_reasoning(config: &Config) -> Result<Arc<dyn ReasoningService>> {
    let api_key = config.llm.resolve_api_key().ok_or_else(|| {
        anyhow!("No Anthropic API key configured. Set ANTHROPIC_API_KEY or llm.api_key")
    })?;

    let client = ClaudeClient::new(ClaudeClientConfig::from_config(config, api_key))
        .context("Failed to create Anthropic API client")?;

    Ok(Arc::new(AnthropicReasoningService::new(
        Arc::new(client),
        AnthropicReasoningConfig::from(&config.llm),
    )))
}

/// Open database plus repository for one command invocation.
pub struct AppContext {
    /// Effective configuration
    pub config: Config,
    /// Migrated database pool
    pub pool: SqlitePool,
    /// Repository over `pool`
    pub repository: Arc<SqliteAnalysisRepository>,
}

impl AppContext {
    /// Open the configured database, applying pending migrations.
    pub async fn open(config: &Config) -> Result<Self> {
        let pool = initialize_database(&config.database)
            .await
            .with_context(|| {
                format!(
                    "Failed to open database at {}. Run 'ideagauge init' first.",
                    config.database.path
                )
            })?;

        Ok(Self {
            config: config.clone(),
            repository: Arc::new(SqliteAnalysisRepository::new(pool.clone())),
            pool,
        })
    }

    /// Fetch a saved analysis by full ID or unique prefix.
    pub async fn find_analysis(&self, id_or_prefix: &str) -> Result<SavedAnalysis> {
        let id: Uuid = resolve_analysis_id(&self.pool, id_or_prefix).await?;
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| anyhow!("Analysis not found: {id}"))
    }

    /// Session backed by the configured reasoning service and this database.
    pub fn session(&self) -> Result<AnalyzerSession> {
        let reasoning = build_reasoning(&self.config)?;
        Ok(AnalyzerSession::new(
            reasoning,
            self.repository.clone(),
            self.config.forecast.clone(),
        ))
    }
}
