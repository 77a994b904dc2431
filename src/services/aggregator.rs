//! Record assembly.

use crate::domain::models::{AnalysisRecord, RevenueForecast, UnitSalesForecast};
use crate::services::rule_evaluator::RuleEvaluation;
use crate::services::tier_analyzer::TierAnalysis;

/// Merge stage outputs into the final record.
///
/// Tier and flags come from the rule evaluation, score and lists from the
/// analyzer, curves from the templater. The idea text is stored verbatim.
pub fn assemble(
    idea: &str,
    evaluation: RuleEvaluation,
    analysis: TierAnalysis,
    forecast: (RevenueForecast, UnitSalesForecast),
) -> AnalysisRecord {
    let (revenue_forecast, unit_sales_forecast) = forecast;
    AnalysisRecord {
        idea_description: idea.to_string(),
        success_score: analysis.success_score,
        revenue_forecast,
        unit_sales_forecast,
        key_factors: analysis.key_factors,
        competitors: analysis.competitors,
        recommendations: analysis.recommendations,
        tier_classification: evaluation.tier,
        rule_flags: evaluation.rule_flags,
    }
}
