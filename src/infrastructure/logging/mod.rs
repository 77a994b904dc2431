//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - pretty or JSON console output on stderr
//! - optional rotating JSON log files
//! - API key scrubbing on every sink

pub mod config;
pub mod logger;
pub mod scrub;

pub use config::{LogConfig, LogFormat, RotationPolicy};
pub use logger::{parse_log_level, LoggerImpl};
pub use scrub::{redact_api_key, scrub_secrets, ScrubbingMakeWriter};
