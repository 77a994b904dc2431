//! CLI command implementations.

pub mod analyze;
pub mod chat;
pub mod delete;
pub mod init;
pub mod list;
pub mod research;
pub mod show;

use anyhow::Result;

use crate::cli::Commands;
use crate::domain::models::Config;

/// Run one parsed subcommand.
pub async fn dispatch(command: Commands, config: &Config, json_mode: bool) -> Result<()> {
    match command {
        Commands::Init(args) => init::execute(args, config, json_mode).await,
        Commands::Analyze(args) => analyze::execute(args, config, json_mode).await,
        Commands::List(args) => list::execute(args, config, json_mode).await,
        Commands::Show(args) => show::execute(args, config, json_mode).await,
        Commands::Chat(args) => chat::execute(args, config, json_mode).await,
        Commands::Research(args) => research::execute(args, config, json_mode).await,
        Commands::Delete(args) => delete::execute(args, config, json_mode).await,
    }
}
