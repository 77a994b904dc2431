//! Ideagauge - business idea evaluator
//!
//! An idea description goes through three stages:
//!
//! 1. a rubric of red and green flags fixes its tier (bad, medium, good);
//! 2. a reasoning service scores it inside that tier's score range;
//! 3. a per-tier forecast template is jittered into three-year revenue and
//!    unit-sales projections.
//!
//! The result can be saved, reopened, discussed with an advisor, and have
//! its competitor list refreshed.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, errors, schemas and port traits
//! - **Service Layer** (`services`): the pipeline and the session around it
//! - **Adapters** (`adapters`): Anthropic reasoning, SQLite persistence
//! - **Infrastructure Layer** (`infrastructure`): HTTP client, config, logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use ideagauge::services::AnalyzerSession;
//!
//! let mut session = AnalyzerSession::new(reasoning, repository, config.forecast.clone());
//! let record = session.analyze_idea("A mobile app for dog walking").await?;
//! println!("{} {}", record.tier_classification, record.success_score);
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use domain::errors::{DomainError, DomainResult, IntegrationError, IntegrationResult};
pub use domain::models::{AnalysisRecord, Config, Tier};
pub use domain::ports::{AnalysisRepository, ReasoningService, SavedAnalysis};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{AnalysisPipeline, AnalyzerSession, PendingAction};
