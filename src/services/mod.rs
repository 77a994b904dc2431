//! Service layer: the analysis pipeline and the session around it.

pub mod advisor;
pub mod aggregator;
pub mod competitor_research;
pub mod forecast;
pub mod prompts;
pub mod report;
pub mod rule_evaluator;
pub mod session;
pub mod structured;
pub mod tier_analyzer;

#[cfg(test)]
pub(crate) mod test_support;

pub use advisor::AdvisoryResponder;
pub use competitor_research::{CompetitorResearch, CompetitorResearcher};
pub use forecast::ForecastTemplater;
pub use report::ReportSummary;
pub use rule_evaluator::{RuleEvaluation, RuleEvaluator};
pub use session::{AnalysisPipeline, AnalyzerSession, PendingAction};
pub use tier_analyzer::{TierAnalysis, TierAnalyzer};
