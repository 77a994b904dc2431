//! Layered configuration loading and validation.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project directory holding config, logs and the database
pub const PROJECT_DIR: &str = ".ideagauge";
/// Shared project configuration
pub const PROJECT_CONFIG: &str = ".ideagauge/config.yaml";
/// Per-machine overrides, not meant for version control
pub const LOCAL_CONFIG: &str = ".ideagauge/local.yaml";
/// Prefix of overriding environment variables (`__` nests)
pub const ENV_PREFIX: &str = "IDEAGAUGE_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Non-positive requests per second
    #[error("Invalid rate limit: {0}. Must be positive")]
    InvalidRateLimit(f64),

    /// Unknown log level
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown log format
    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    /// Empty database path
    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    /// Zero pool size
    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    /// Zero rate-limit burst
    #[error("Invalid burst_size: {0}. Must be at least 1")]
    InvalidBurstSize(u32),

    /// Zero retries
    #[error("Invalid max_retries: {0}. Cannot be 0")]
    InvalidMaxRetries(u32),

    /// Initial backoff not below the cap
    #[error(
        "Invalid backoff configuration: initial_backoff_ms ({0}) must be less than max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),

    /// Empty model name
    #[error("LLM model name cannot be empty")]
    EmptyModel,

    /// Zero output token cap
    #[error("Invalid max_tokens: {0}. Must be at least 1")]
    InvalidMaxTokens(u32),

    /// Empty API base URL
    #[error("LLM base_url cannot be empty")]
    EmptyBaseUrl,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .ideagauge/config.yaml (project config, created by init)
    /// 3. .ideagauge/local.yaml (local overrides, optional)
    /// 4. Environment variables (IDEAGAUGE_* prefix, `__` nests)
    pub fn load() -> Result<Config> {
        let config: Config = Self::figment()
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honouring env overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(PROJECT_CONFIG))
            .merge(Yaml::file(LOCAL_CONFIG))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.llm.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }

        if config.llm.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens(config.llm.max_tokens));
        }

        if config.llm.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }

        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(
                config.database.max_connections,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if config.rate_limit.requests_per_second <= 0.0 {
            return Err(ConfigError::InvalidRateLimit(
                config.rate_limit.requests_per_second,
            ));
        }

        if config.rate_limit.burst_size == 0 {
            return Err(ConfigError::InvalidBurstSize(config.rate_limit.burst_size));
        }

        if config.retry.max_retries == 0 {
            return Err(ConfigError::InvalidMaxRetries(config.retry.max_retries));
        }

        if config.retry.initial_backoff_ms >= config.retry.max_backoff_ms {
            return Err(ConfigError::InvalidBackoff(
                config.retry.initial_backoff_ms,
                config.retry.max_backoff_ms,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn yaml_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!((config.rate_limit.requests_per_second - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.database.path, ".ideagauge/ideagauge.db");
        assert_eq!(config.logging.level, "warn");
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
llm:
  model: claude-test
  max_tokens: 2048
rate_limit:
  requests_per_second: 5.0
  burst_size: 4
database:
  path: /custom/path.db
logging:
  level: debug
  format: json
forecast:
  medium:
    revenue: [100000, 200000, 300000]
    units: [1000, 2000, 3000]
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.llm.model, "claude-test");
        assert_eq!(config.llm.max_tokens, 2048);
        assert_eq!(config.rate_limit.burst_size, 4);
        assert_eq!(config.database.path, "/custom/path.db");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.forecast.medium.revenue, [100_000, 200_000, 300_000]);
        assert_eq!(config.forecast.good.revenue, [650_000, 1_400_000, 2_800_000]);

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_negative_unit_template_rejected_at_parse() {
        let yaml = "forecast:\n  bad:\n    revenue: [0, 0, 0]\n    units: [-1, 0, 0]\n";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidLogLevel(level)) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogFormat(_))
        ));
    }

    #[test]
    fn test_validate_rate_limit() {
        let mut config = Config::default();
        config.rate_limit.requests_per_second = 0.0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidRateLimit(_))
        ));

        let mut config = Config::default();
        config.rate_limit.burst_size = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidBurstSize(0))
        ));
    }

    #[test]
    fn test_validate_database() {
        let mut config = Config::default();
        config.database.path = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyDatabasePath)
        ));

        let mut config = Config::default();
        config.database.max_connections = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxConnections(0))
        ));
    }

    #[test]
    fn test_validate_retry() {
        let mut config = Config::default();
        config.retry.max_retries = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxRetries(0))
        ));

        let mut config = Config::default();
        config.retry.initial_backoff_ms = 30000;
        config.retry.max_backoff_ms = 10000;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidBackoff(30000, 10000))
        ));
    }

    #[test]
    fn test_validate_llm() {
        let mut config = Config::default();
        config.llm.model = "  ".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyModel)
        ));

        let mut config = Config::default();
        config.llm.max_tokens = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxTokens(0))
        ));

        let mut config = Config::default();
        config.llm.base_url = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyBaseUrl)
        ));
    }

    #[test]
    fn test_load_from_file_merges_over_defaults() {
        let file = yaml_file("logging:\n  level: debug\nretry:\n  max_retries: 7\n");

        let config = temp_env::with_vars_unset(
            ["IDEAGAUGE_LOGGING__LEVEL", "IDEAGAUGE_RETRY__MAX_RETRIES"],
            || ConfigLoader::load_from_file(file.path()),
        )
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.retry.max_retries, 7);
        assert_eq!(config.retry.max_backoff_ms, 60_000);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = yaml_file("logging:\n  level: debug\n");

        let config = temp_env::with_vars(
            [
                ("IDEAGAUGE_LOGGING__LEVEL", Some("error")),
                ("IDEAGAUGE_LLM__MODEL", Some("claude-env")),
            ],
            || ConfigLoader::load_from_file(file.path()),
        )
        .unwrap();

        assert_eq!(config.logging.level, "error");
        assert_eq!(config.llm.model, "claude-env");
    }

    #[test]
    fn test_load_from_file_rejects_invalid_values() {
        let file = yaml_file("logging:\n  format: xml\n");
        let result = temp_env::with_var_unset("IDEAGAUGE_LOGGING__FORMAT", || {
            ConfigLoader::load_from_file(file.path())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        assert!(ConfigLoader::load_from_file("/nonexistent/ideagauge.yaml").is_err());
    }
}
