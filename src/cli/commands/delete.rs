//! Implementation of the `ideagauge delete` command.

use anyhow::{bail, Result};
use clap::Args;
use uuid::Uuid;

use crate::cli::context::AppContext;
use crate::cli::display::action_success;
use crate::cli::id_resolver::resolve_analysis_id;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::domain::ports::AnalysisRepository;

/// Delete a saved analysis
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Analysis ID (any unique prefix)
    pub id: String,
}

/// Result of `delete`.
#[derive(Debug, serde::Serialize)]
pub struct DeleteOutput {
    /// Always true when printed
    pub success: bool,
    /// Deleted analysis
    pub id: Uuid,
}

impl CommandOutput for DeleteOutput {
    fn to_human(&self) -> String {
        action_success(&format!("Deleted analysis {}", self.id))
    }
}

/// Run `delete`.
pub async fn execute(args: DeleteArgs, config: &Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::open(config).await?;
    let id = resolve_analysis_id(&ctx.pool, &args.id).await?;

    if !ctx.repository.delete(id).await? {
        bail!("Analysis not found: {id}");
    }

    output(&DeleteOutput { success: true, id }, json_mode);
    Ok(())
}
