//! Implementation of the `ideagauge show` command.

use anyhow::Result;
use clap::Args;

use crate::cli::context::AppContext;
use crate::cli::display::render_report;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::domain::ports::SavedAnalysis;
use crate::services::ReportSummary;

/// Show a saved analysis
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Analysis ID (any unique prefix)
    pub id: String,
}

/// Result of `show`.
#[derive(Debug, serde::Serialize)]
pub struct ShowOutput {
    /// Stored analysis
    #[serde(flatten)]
    pub saved: SavedAnalysis,
    /// Labels and formatted forecast
    pub summary: ReportSummary,
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        format!(
            "ID: {}\nSaved: {}\n\n{}",
            self.saved.id,
            self.saved.saved_at.format("%Y-%m-%d %H:%M:%S UTC"),
            render_report(&self.saved.record)
        )
    }
}

/// Run `show`.
pub async fn execute(args: ShowArgs, config: &Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::open(config).await?;
    let saved = ctx.find_analysis(&args.id).await?;

    let out = ShowOutput {
        summary: ReportSummary::from_record(&saved.record),
        saved,
    };
    output(&out, json_mode);
    Ok(())
}
