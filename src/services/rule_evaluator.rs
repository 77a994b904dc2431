//! Rule evaluator: rubric flags in, tier out.
//!
//! The reasoning service answers the rubric; the tier is then derived here
//! from the flags alone. Any `tier_classification` the service volunteers is
//! kept for logging only.

use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::domain::errors::IntegrationResult;
use crate::domain::models::{BadFlags, GoodFlags, ReasoningRequest, RuleFlags, ScoreRange, Tier};
use crate::domain::ports::ReasoningService;
use crate::domain::schemas;
use crate::services::{prompts, structured::request_structured};

#[derive(Debug, Deserialize)]
struct RuleFlagsResponse {
    bad_flags: BadFlags,
    good_flags: GoodFlags,
    #[serde(default)]
    tier_classification: Option<String>,
    #[serde(default)]
    reasoning: String,
}

/// Output of the rule evaluator.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleEvaluation {
    /// Tier derived from the flags
    pub tier: Tier,
    /// Score range of that tier
    pub score_range: ScoreRange,
    /// Flags as answered
    pub rule_flags: RuleFlags,
    /// Overall reasoning text from the service.
    pub reasoning: String,
    /// Tier the service suggested, never used for gating.
    pub suggested_tier: Option<String>,
}

impl RuleEvaluation {
    /// Build an evaluation from flags, deriving tier and range.
    pub fn from_flags(rule_flags: RuleFlags, reasoning: impl Into<String>) -> Self {
        let tier = Tier::classify(&rule_flags);
        Self {
            tier,
            score_range: tier.score_range(),
            rule_flags,
            reasoning: reasoning.into(),
            suggested_tier: None,
        }
    }

    /// Justification handed to the analyzer: the details of the side that
    /// decided the tier, or the overall reasoning for medium.
    pub fn justification(&self) -> &str {
        match self.tier {
            Tier::Bad => &self.rule_flags.bad.details,
            Tier::Good => &self.rule_flags.good.details,
            Tier::Medium => &self.reasoning,
        }
    }
}

/// First pipeline stage: grounded rubric evaluation.
pub struct RuleEvaluator {
    reasoning: Arc<dyn ReasoningService>,
}

impl RuleEvaluator {
    /// Evaluator over `reasoning`.
    pub fn new(reasoning: Arc<dyn ReasoningService>) -> Self {
        Self { reasoning }
    }

    /// Ask the service for the rubric flags and derive the tier from them.
    ///
    /// Missing or malformed flags fail the call.
    #[instrument(skip(self, idea), fields(backend = self.reasoning.name()))]
    pub async fn evaluate(&self, idea: &str) -> IntegrationResult<RuleEvaluation> {
        let request = ReasoningRequest::structured(prompts::rule_evaluation(idea), schemas::rule_flags())
            .grounded();

        let response: RuleFlagsResponse = request_structured(self.reasoning.as_ref(), &request).await?;

        let mut evaluation = RuleEvaluation::from_flags(
            RuleFlags {
                bad: response.bad_flags,
                good: response.good_flags,
            },
            response.reasoning,
        );

        if let Some(suggested) = response.tier_classification {
            if Tier::from_str(&suggested) != Some(evaluation.tier) {
                debug!(
                    suggested = %suggested,
                    derived = %evaluation.tier,
                    "service tier disagrees with rule-derived tier; ignoring"
                );
            }
            evaluation.suggested_tier = Some(suggested);
        }

        info!(
            tier = %evaluation.tier,
            range = %evaluation.score_range,
            good_flags = evaluation.rule_flags.good.count(),
            "rule evaluation complete"
        );

        Ok(evaluation)
    }
}
