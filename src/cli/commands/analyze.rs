//! Implementation of the `ideagauge analyze` command.

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::cli::context::AppContext;
use crate::cli::display::{action_success, render_report};
use crate::cli::output::{output, CommandOutput};
use crate::cli::progress::{create_spinner, follow_pending, ProgressBarExt};
use crate::domain::models::{AnalysisRecord, Config};
use crate::domain::ports::SavedAnalysis;
use crate::services::{AnalyzerSession, ReportSummary};

/// Analyze a business idea
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Idea description
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the idea description from a file
    #[arg(long, short, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Persist the analysis after it completes
    #[arg(long, short)]
    pub save: bool,

    /// Open an interactive advisory chat after the report
    #[arg(long)]
    pub chat: bool,
}

/// Result of `analyze`.
#[derive(Debug, serde::Serialize)]
pub struct AnalyzeOutput {
    /// Storage metadata, with `--save`
    pub saved: Option<SavedAnalysis>,
    /// Labels and formatted forecast
    pub summary: ReportSummary,
    /// Full record
    pub record: AnalysisRecord,
}

impl CommandOutput for AnalyzeOutput {
    fn to_human(&self) -> String {
        let mut text = render_report(&self.record);
        if let Some(saved) = &self.saved {
            text.push_str("\n\n");
            text.push_str(&action_success(&format!("Analysis saved: {}", saved.id)));
        }
        text
    }
}

async fn read_idea(args: &AnalyzeArgs) -> Result<String> {
    match (&args.text, &args.file) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read idea from {}", path.display())),
        (None, None) => bail!("Provide an idea description or --file"),
    }
}

/// Run `analyze`.
pub async fn execute(args: AnalyzeArgs, config: &Config, json_mode: bool) -> Result<()> {
    if args.chat && json_mode {
        bail!("--chat is interactive and cannot be combined with --json");
    }

    let idea = read_idea(&args).await?;
    let ctx = AppContext::open(config).await?;
    let mut session = ctx.session()?;

    let spinner = create_spinner("Starting analysis...", json_mode);
    let watcher = tokio::spawn(follow_pending(session.subscribe(), spinner.clone()));

    let analyzed = session.analyze_idea(&idea).await.cloned();
    let record = match analyzed {
        Ok(record) => record,
        Err(err) => {
            spinner.finish_error("Analysis failed");
            watcher.abort();
            return Err(err).context("Analysis failed; nothing was recorded");
        }
    };

    let saved = if args.save {
        session
            .save_analysis()
            .await
            .context("Analysis completed but could not be saved")?
    } else {
        None
    };

    spinner.finish_and_clear();
    watcher.abort();

    let out = AnalyzeOutput {
        saved,
        summary: ReportSummary::from_record(&record),
        record,
    };
    output(&out, json_mode);

    if args.chat {
        chat_loop(&mut session).await?;
    }
    Ok(())
}

/// Read questions from stdin until EOF, `exit` or `quit`.
async fn chat_loop(session: &mut AnalyzerSession) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if let Some(greeting) = session.transcript().last() {
        println!("\n{}", greeting.content);
    }

    loop {
        stdout.write_all(b"\n> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let question = line.trim();
        if matches!(question, "exit" | "quit") {
            break;
        }

        let spinner = create_spinner("Thinking...", false);
        let reply = session.send_chat_message(question).await;
        spinner.finish_and_clear();

        if let Some(reply) = reply {
            println!("{reply}");
        }
    }
    Ok(())
}
