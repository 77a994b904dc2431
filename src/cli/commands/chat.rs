//! Implementation of the `ideagauge chat` command.

use anyhow::{anyhow, Result};
use clap::Args;
use uuid::Uuid;

use crate::cli::context::AppContext;
use crate::cli::output::{output, CommandOutput};
use crate::cli::progress::create_spinner;
use crate::domain::models::Config;

/// Ask the advisor about a saved analysis
#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Analysis ID (any unique prefix)
    pub id: String,

    /// Question for the advisor
    pub message: String,
}

/// Result of `chat`.
#[derive(Debug, serde::Serialize)]
pub struct ChatOutput {
    /// Analysis discussed
    pub analysis_id: Uuid,
    /// Question as asked
    pub question: String,
    /// Advisor reply
    pub answer: String,
}

impl CommandOutput for ChatOutput {
    fn to_human(&self) -> String {
        self.answer.clone()
    }
}

/// Run `chat`.
pub async fn execute(args: ChatArgs, config: &Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::open(config).await?;
    let saved = ctx.find_analysis(&args.id).await?;

    let mut session = ctx.session()?;
    session.resume(saved.record);

    let spinner = create_spinner("Thinking...", json_mode);
    let answer = session.send_chat_message(&args.message).await;
    spinner.finish_and_clear();

    let out = ChatOutput {
        analysis_id: saved.id,
        question: args.message,
        answer: answer.ok_or_else(|| anyhow!("Message must not be blank"))?,
    };
    output(&out, json_mode);
    Ok(())
}
