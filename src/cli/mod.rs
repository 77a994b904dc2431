//! Command-line front-end.

pub mod commands;
pub mod context;
pub mod display;
pub mod id_resolver;
pub mod output;
pub mod progress;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{
    analyze::AnalyzeArgs, chat::ChatArgs, delete::DeleteArgs, init::InitArgs, list::ListArgs,
    research::ResearchArgs, show::ShowArgs,
};

/// Top-level arguments.
#[derive(Parser, Debug)]
#[command(name = "ideagauge")]
#[command(about = "Ideagauge - score a business idea, forecast it, and talk it over", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this YAML file instead of .ideagauge/
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create .ideagauge/ with a default config and an empty database
    Init(InitArgs),

    /// Analyze a business idea
    Analyze(AnalyzeArgs),

    /// List saved analyses
    List(ListArgs),

    /// Show a saved analysis
    Show(ShowArgs),

    /// Ask the advisor about a saved analysis
    Chat(ChatArgs),

    /// Re-run competitor research for a saved analysis
    Research(ResearchArgs),

    /// Delete a saved analysis
    Delete(DeleteArgs),
}

/// Print a command failure to stderr.
pub fn handle_error(err: &anyhow::Error, json_mode: bool) {
    if json_mode {
        let chain: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        let body = serde_json::json!({
            "error": err.to_string(),
            "causes": chain,
        });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("{} {err:#}", console::style("Error:").red().bold());
    }
}
