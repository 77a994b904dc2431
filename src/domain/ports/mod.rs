//! Port trait definitions (Hexagonal Architecture)
//!
//! - ReasoningService: the hosted LLM integration
//! - AnalysisRepository: durable storage of finished analyses

pub mod analysis_repository;
pub mod reasoning_service;

pub use analysis_repository::{AnalysisRepository, SavedAnalysis};
pub use reasoning_service::ReasoningService;
