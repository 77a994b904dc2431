//! Domain models.

pub mod analysis;
pub mod chat;
pub mod config;
pub mod forecast;
pub mod reasoning;
pub mod tier;

pub use analysis::{
    AnalysisRecord, Competitor, Impact, KeyFactor, Priority, Recommendation, RevenueForecast,
    ThreatLevel, UnitSalesForecast,
};
pub use chat::{ChatMessage, ChatRole, ScoreBand, Transcript, ADVISOR_FALLBACK, ADVISOR_GREETING};
pub use config::{
    Config, DatabaseConfig, LlmConfig, LoggingConfig, RateLimitConfig, RetryConfig,
};
pub use forecast::{ForecastTemplates, TierTemplate};
pub use reasoning::{ReasoningOutput, ReasoningRequest, ResponseSchema};
pub use tier::{BadFlags, GoodFlags, RuleFlags, ScoreRange, Tier};
