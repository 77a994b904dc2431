//! Implementation of the `ideagauge research` command.

use anyhow::{anyhow, Context, Result};
use clap::Args;
use uuid::Uuid;

use crate::cli::context::AppContext;
use crate::cli::display::{action_success, colorize_threat, list_table};
use crate::cli::output::{output, CommandOutput};
use crate::cli::progress::{create_spinner, ProgressBarExt};
use crate::domain::models::Config;
use crate::services::CompetitorResearch;

/// Re-run competitor research for a saved analysis
#[derive(Args, Debug)]
pub struct ResearchArgs {
    /// Analysis ID (any unique prefix)
    pub id: String,

    /// Save the refreshed analysis as a new record
    #[arg(long, short)]
    pub save: bool,
}

/// Result of `research`.
#[derive(Debug, serde::Serialize)]
pub struct ResearchOutput {
    /// Analysis researched
    pub analysis_id: Uuid,
    /// Fresh competitor sweep
    pub research: CompetitorResearch,
    /// ID of the refreshed copy, with `--save`
    pub saved_id: Option<Uuid>,
}

impl CommandOutput for ResearchOutput {
    fn to_human(&self) -> String {
        let mut lines = Vec::new();

        if self.research.competitors.is_empty() {
            lines.push("No competitors found.".to_string());
        } else {
            let mut table = list_table(&["name", "threat", "description", "source"]);
            for competitor in &self.research.competitors {
                table.add_row(vec![
                    competitor.name.clone(),
                    colorize_threat(competitor.threat_level).to_string(),
                    competitor.description.clone(),
                    competitor.source.clone().unwrap_or_default(),
                ]);
            }
            lines.push(format!("{} competitor(s):", self.research.competitors.len()));
            lines.push(table.to_string());
        }

        if let Some(status) = &self.research.market_status {
            lines.push(format!("\nMarket: {status}"));
        }
        if let Some(recommendation) = &self.research.recommendation {
            lines.push(format!("Recommendation: {recommendation}"));
        }
        if let Some(id) = self.saved_id {
            lines.push(format!("\n{}", action_success(&format!("Refreshed analysis saved: {id}"))));
        }

        lines.join("\n")
    }
}

/// Run `research`.
pub async fn execute(args: ResearchArgs, config: &Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::open(config).await?;
    let saved = ctx.find_analysis(&args.id).await?;

    let mut session = ctx.session()?;
    session.resume(saved.record);

    let spinner = create_spinner("Researching competitors...", json_mode);
    let research = match session.refresh_competitors().await {
        Ok(research) => research.ok_or_else(|| anyhow!("No analysis loaded"))?,
        Err(err) => {
            spinner.finish_error("Research failed");
            return Err(err).context("Competitor research failed; the analysis is unchanged");
        }
    };

    let saved_id = if args.save {
        spinner.set_message("Saving analysis...");
        session.save_analysis().await?.map(|s| s.id)
    } else {
        None
    };
    spinner.finish_and_clear();

    let out = ResearchOutput {
        analysis_id: saved.id,
        research,
        saved_id,
    };
    output(&out, json_mode);
    Ok(())
}
