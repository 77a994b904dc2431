//! Implementation of the `ideagauge list` command.

use anyhow::Result;
use clap::Args;

use crate::cli::context::AppContext;
use crate::cli::display::{colorize_score, colorize_tier, list_table, render_list};
use crate::cli::output::{output, truncate, CommandOutput};
use crate::domain::models::{Config, Tier};
use crate::domain::ports::{AnalysisRepository, SavedAnalysis};

/// List saved analyses
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Maximum number of analyses to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// One row of the list.
#[derive(Debug, serde::Serialize)]
pub struct AnalysisSummaryOutput {
    /// Storage ID
    pub id: String,
    /// Save time, RFC3339
    pub saved_at: String,
    /// Tier of the record
    pub tier: Tier,
    /// Score of the record
    pub success_score: i64,
    /// Idea text
    pub idea: String,
}

impl From<&SavedAnalysis> for AnalysisSummaryOutput {
    fn from(saved: &SavedAnalysis) -> Self {
        Self {
            id: saved.id.to_string(),
            saved_at: saved.saved_at.format("%Y-%m-%d %H:%M").to_string(),
            tier: saved.record.tier_classification,
            success_score: saved.record.success_score,
            idea: saved.record.idea_description.clone(),
        }
    }
}

/// Result of `list`.
#[derive(Debug, serde::Serialize)]
pub struct AnalysisListOutput {
    /// Rows, newest first
    pub analyses: Vec<AnalysisSummaryOutput>,
    /// Number of rows shown
    pub total: usize,
}

impl CommandOutput for AnalysisListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["id", "saved", "tier", "score", "idea"]);
        for analysis in &self.analyses {
            table.add_row(vec![
                analysis.id.chars().take(8).collect::<String>(),
                analysis.saved_at.clone(),
                colorize_tier(analysis.tier).to_string(),
                colorize_score(analysis.success_score).to_string(),
                truncate(&analysis.idea, 50),
            ]);
        }
        render_list("analysis", "analyses", &table, self.total)
    }
}

/// Run `list`.
pub async fn execute(args: ListArgs, config: &Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::open(config).await?;
    let saved = ctx.repository.list(args.limit).await?;

    let out = AnalysisListOutput {
        total: saved.len(),
        analyses: saved.iter().map(AnalysisSummaryOutput::from).collect(),
    };
    output(&out, json_mode);
    Ok(())
}
