//! Tier-constrained analyzer.
//!
//! Second reasoning call. The tier and its score range go into the prompt as
//! a hard instruction, but the returned score is not trusted: anything outside
//! the range is pulled back in with a random offset from the violated bound.
//! The categorical parts (factors, competitors, recommendations) are taken
//! as returned, in order.

use rand::Rng;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::domain::errors::{IntegrationError, IntegrationResult};
use crate::domain::models::{Competitor, KeyFactor, ReasoningRequest, Recommendation, ScoreRange};
use crate::domain::ports::ReasoningService;
use crate::domain::schemas;
use crate::services::rule_evaluator::RuleEvaluation;
use crate::services::{prompts, structured::request_structured};

/// Maximum inward offset applied when the raw score overshoots a bound.
pub const CLAMP_SPREAD: f64 = 10.0;

/// Detailed analysis exactly as returned by the reasoning service.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailedAnalysis {
    /// Score as the service gave it, possibly out of range
    pub success_score: f64,
    /// Factors explaining the score
    pub key_factors: Vec<KeyFactor>,
    /// Competitors the service found
    pub competitors: Vec<Competitor>,
    /// Suggested actions
    pub recommendations: Vec<Recommendation>,
    /// Informational; the rule-derived tier stays authoritative.
    #[serde(default)]
    pub tier_classification: Option<String>,
}

/// Analyzer output with the enforced score.
#[derive(Debug, Clone, PartialEq)]
pub struct TierAnalysis {
    /// Final score, inside the tier's range
    pub success_score: i64,
    /// Score before enforcement
    pub raw_score: f64,
    /// Factors, service order
    pub key_factors: Vec<KeyFactor>,
    /// Competitors, service order
    pub competitors: Vec<Competitor>,
    /// Recommendations, service order
    pub recommendations: Vec<Recommendation>,
}

/// Round half up, matching the usual "nearest integer" convention for
/// scores and currency (-3.5 rounds to -3).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Force a raw score into `range`.
///
/// Below the minimum it becomes `min + U[0,1) * 10`; above the maximum it
/// becomes `max - U[0,1) * 10`; the result is rounded. A score already in range
/// is only rounded. The replacement is not clamped again, which is safe while
/// every range is at least `CLAMP_SPREAD` wide.
pub fn enforce_score_range<R: Rng + ?Sized>(raw: f64, range: ScoreRange, rng: &mut R) -> i64 {
    let mut score = raw;
    if score < range.min as f64 {
        score = range.min as f64 + rng.gen::<f64>() * CLAMP_SPREAD;
    }
    if score > range.max as f64 {
        score = range.max as f64 - rng.gen::<f64>() * CLAMP_SPREAD;
    }
    round_half_up(score) as i64
}

/// Second pipeline stage: detailed analysis inside the tier's score range.
pub struct TierAnalyzer {
    reasoning: Arc<dyn ReasoningService>,
}

impl TierAnalyzer {
    /// Analyzer over `reasoning`.
    pub fn new(reasoning: Arc<dyn ReasoningService>) -> Self {
        Self { reasoning }
    }

    /// Fetch the detailed analysis for an already classified idea.
    #[instrument(skip(self, idea, evaluation), fields(tier = %evaluation.tier))]
    pub async fn request(
        &self,
        idea: &str,
        evaluation: &RuleEvaluation,
    ) -> IntegrationResult<DetailedAnalysis> {
        let prompt = prompts::detailed_analysis(
            idea,
            evaluation.tier,
            evaluation.score_range,
            evaluation.justification(),
        );
        let request = ReasoningRequest::structured(prompt, schemas::detailed_analysis()).grounded();

        let analysis: DetailedAnalysis =
            request_structured(self.reasoning.as_ref(), &request).await?;

        if !analysis.success_score.is_finite() {
            return Err(IntegrationError::malformed(
                schemas::DETAILED_ANALYSIS,
                "success_score is not a finite number",
            ));
        }

        Ok(analysis)
    }

    /// Apply score enforcement to a fetched analysis.
    pub fn finalize<R: Rng + ?Sized>(
        analysis: DetailedAnalysis,
        range: ScoreRange,
        rng: &mut R,
    ) -> TierAnalysis {
        let raw_score = analysis.success_score;
        let success_score = enforce_score_range(raw_score, range, rng);

        if raw_score < range.min as f64 || raw_score > range.max as f64 {
            warn!(
                raw_score,
                final_score = success_score,
                range = %range,
                "analyzer score outside tier range; clamped"
            );
        } else {
            info!(success_score, "analyzer score accepted");
        }

        TierAnalysis {
            success_score,
            raw_score,
            key_factors: analysis.key_factors,
            competitors: analysis.competitors,
            recommendations: analysis.recommendations,
        }
    }
}
