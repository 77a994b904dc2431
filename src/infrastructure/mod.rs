//! Infrastructure layer module
//!
//! External integrations and process-wide concerns:
//! - Anthropic Messages API client
//! - Configuration management
//! - Logging infrastructure

pub mod claude;
pub mod config;
pub mod logging;
