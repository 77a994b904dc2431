//! Implementation of the `ideagauge init` command.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::adapters::sqlite::initialize_database;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, DatabaseConfig};
use crate::infrastructure::config::loader::PROJECT_DIR;

/// Create .ideagauge/ with a default config and an empty database
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config.yaml with defaults
    #[arg(long, short)]
    pub force: bool,

    /// Target directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

/// Result of `init`.
#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    /// Always true when printed
    pub success: bool,
    /// Summary line
    pub message: String,
    /// Directory that now holds `.ideagauge/`
    pub initialized_path: PathBuf,
    /// Whether config.yaml was (re)written
    pub config_written: bool,
    /// Database file created or reused
    pub database_path: PathBuf,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.message.clone()];
        if self.config_written {
            lines.push(format!("\nWrote {PROJECT_DIR}/config.yaml"));
        }
        lines.push(format!("Database ready at {}", self.database_path.display()));
        lines.join("\n")
    }
}

fn resolve_under(target: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        target.join(path)
    }
}

/// Run `init`.
pub async fn execute(args: InitArgs, config: &Config, json_mode: bool) -> Result<()> {
    let target_path = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir()
            .context("Failed to get current directory")?
            .join(&args.path)
    };

    let project_dir = target_path.join(PROJECT_DIR);
    fs::create_dir_all(project_dir.join("logs"))
        .await
        .with_context(|| format!("Failed to create {}", project_dir.display()))?;

    let config_path = project_dir.join("config.yaml");
    let config_written = if config_path.exists() && !args.force {
        false
    } else {
        let yaml = serde_yaml::to_string(&Config::default())
            .context("Failed to serialize default configuration")?;
        fs::write(&config_path, yaml)
            .await
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        true
    };

    let database = DatabaseConfig {
        path: resolve_under(&target_path, &config.database.path)
            .display()
            .to_string(),
        ..config.database.clone()
    };
    initialize_database(&database)
        .await
        .context("Failed to initialize database")?;

    let out = InitOutput {
        success: true,
        message: if config_written {
            "Project initialized successfully.".to_string()
        } else {
            "Project already initialized; kept existing config.yaml (use --force to reset it)."
                .to_string()
        },
        initialized_path: target_path,
        config_written,
        database_path: PathBuf::from(database.path),
    };

    output(&out, json_mode);
    Ok(())
}
