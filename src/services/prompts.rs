//! Prompt text for every reasoning call.

use std::fmt::Write as _;

use crate::domain::models::{AnalysisRecord, ChatRole, ScoreBand, ScoreRange, Tier, Transcript};
use crate::services::report::format_currency;

/// Rubric prompt for the rule evaluator.
pub fn rule_evaluation(idea: &str) -> String {
    format!(
        r#"Evaluate this business idea against a fixed set of hard market rules to determine its tier.

"{idea}"

BAD IDEA FLAGS (the idea is bad if ANY of these is true):
1. Health/Legal Liability: it involves health risks, legal liability, bodily fluids, privacy breaches or dangerous materials.
2. Shrinking TAM: the total addressable market has shrunk (CAGR below -5%) over the last 3 years.
3. Low Gross Margin: gross margin would stay below 15% at scale.
4. Cultural Revulsion: more than 60% of people would find it disgusting, offensive or unethical.

GOOD IDEA FLAGS (the idea is good only if ALL of these are true):
1. TAM CAGR > 8%: the market grows at least 8% a year.
2. Gross Margin > 45%: gross margin of 45% or more is reachable at scale.
3. Google Trends Up: search interest has risen for 3 or more years.
4. Low Competitor Density: fewer than 3 dominant brands hold more than 10% share each.
5. ESG/Regulatory Tailwind: regulation supports it (plastic bans, carbon credits, sustainability mandates).

OTHERWISE the idea is MEDIUM tier.

Be objective and data-driven. Search current market data. Justify the flags of each side in its details field and summarise in reasoning."#
    )
}

fn tier_focus(tier: Tier) -> &'static str {
    match tier {
        Tier::Bad => {
            "- Focus on fundamental flaws and why to pivot or abandon\n\
             - Highlight legal, health or market risks\n\
             - Recommendations should be pivot strategies"
        }
        Tier::Medium => {
            "- Balance strengths and weaknesses\n\
             - Show a viable path while acknowledging the challenges\n\
             - Recommendations should target execution and differentiation"
        }
        Tier::Good => {
            "- Highlight the strong market position and advantages\n\
             - Focus on scaling and optimisation opportunities\n\
             - Recommendations should maximise the high potential"
        }
    }
}

fn justification_label(tier: Tier) -> &'static str {
    match tier {
        Tier::Bad => "Bad Flags Triggered",
        Tier::Medium => "Reasoning",
        Tier::Good => "Good Flags Met",
    }
}

/// Prompt for the tier-constrained analyzer.
pub fn detailed_analysis(idea: &str, tier: Tier, range: ScoreRange, justification: &str) -> String {
    let tier_upper = tier.as_str().to_uppercase();
    format!(
        r#"You are an expert business analyst. This idea has been PRE-CLASSIFIED as "{tier_upper}" tier by hard market rules.

"{idea}"

TIER CLASSIFICATION: {tier_upper}
{label}: {justification}

YOUR TASK:
1. Assign a success score within the REQUIRED range: {min}% to {max}%
2. Provide 6-8 key factors explaining the {tier} classification
3. Identify real competitors
4. Give 8 actionable recommendations appropriate for {tier} tier ideas

FOR {tier_upper} TIER:
{focus}

Be thorough and analytical. The success score MUST be within {min}-{max}%."#,
        label = justification_label(tier),
        min = range.min,
        max = range.max,
        focus = tier_focus(tier),
    )
}

/// Prompt for a web-grounded competitor sweep.
pub fn competitor_research(idea: &str) -> String {
    format!(
        r#"Research competitors and similar products for this business idea: "{idea}"

Search for:
- Direct competitors
- Similar products on Kickstarter or Indiegogo
- Existing patents or trademarks
- Reddit threads or forums discussing similar ideas
- Existing apps or services

Return a comprehensive competitive analysis, citing the source of each competitor."#
    )
}

fn band_guidance(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::High => {
            "This is a HIGH score (60%+):\n\
             - Reinforce strengths and help optimise\n\
             - Focus on scaling strategies and execution excellence\n\
             - Suggest refinements that maximise potential\n\
             - Be encouraging about achievable milestones"
        }
        ScoreBand::Moderate => {
            "This is a MODERATE score (30-60%):\n\
             - Focus on addressing the key weaknesses\n\
             - Provide clear, actionable improvements\n\
             - Help prioritise what moves the needle most\n\
             - Be realistic about the effort required but show the path forward"
        }
        ScoreBand::Low => {
            "This is a LOW score (<30%):\n\
             - If fundamentally flawed, recommend a pivot or major redesign\n\
             - If salvageable, fix the business model fundamentals first\n\
             - Be honest about the challenges but constructive\n\
             - Consider whether shutting down or pivoting is the best advice"
        }
    }
}

/// Prompt for one advisory chat turn.
///
/// `history` is the transcript before the new question.
pub fn advisory(record: &AnalysisRecord, history: &Transcript, question: &str) -> String {
    let factors = serde_json::to_string(&record.key_factors).unwrap_or_default();
    let recommendations = serde_json::to_string(&record.recommendations).unwrap_or_default();

    let mut conversation = String::new();
    for message in history.messages() {
        let speaker = match message.role {
            ChatRole::User => "FOUNDER",
            ChatRole::Assistant => "ADVISOR",
        };
        let _ = writeln!(conversation, "{speaker}: {}", message.content);
    }
    if conversation.is_empty() {
        conversation.push_str("(none)\n");
    }

    format!(
        r#"You are an experienced business strategy advisor. Be realistic but constructive.

BUSINESS IDEA: "{idea}"

CURRENT ANALYSIS:
- Success Score: {score}%
- Tier: {tier}
- Year 1 Revenue: {revenue}
- Key Factors: {factors}
- Current Recommendations: {recommendations}

CONVERSATION SO FAR:
{conversation}
USER QUESTION: {question}

RESPONSE GUIDELINES:
{guidance}

RESPONSE FORMAT:
- Direct answer to the question
- 3-5 specific, actionable recommendations ranked by impact
- For each: why it helps, how to do it, and the realistic expected impact ($ or % improvement)
- Concrete numbers and timeframes
- Honest about difficulty while showing an achievable path

Max 3 paragraphs. Be conversational, data-driven and proportionally encouraging based on the idea's actual merit."#,
        idea = record.idea_description,
        score = record.success_score,
        tier = record.tier_classification,
        revenue = format_currency(record.revenue_forecast.year_1),
        guidance = band_guidance(ScoreBand::from_score(record.success_score)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ChatMessage;
    use crate::services::test_support::sample_record;

    #[test]
    fn test_rule_prompt_embeds_idea_and_rubric() {
        let prompt = rule_evaluation("Solar-powered bike lockers");
        assert!(prompt.contains("\"Solar-powered bike lockers\""));
        assert!(prompt.contains("Cultural Revulsion"));
        assert!(prompt.contains("ESG/Regulatory Tailwind"));
        assert!(prompt.contains("MEDIUM tier"));
    }

    #[test]
    fn test_detailed_prompt_embeds_range_and_focus() {
        let prompt = detailed_analysis("Used syringes", Tier::Bad, Tier::Bad.score_range(), "biohazard");
        assert!(prompt.contains("PRE-CLASSIFIED as \"BAD\""));
        assert!(prompt.contains("5% to 29%"));
        assert!(prompt.contains("Bad Flags Triggered: biohazard"));
        assert!(prompt.contains("pivot strategies"));

        let prompt = detailed_analysis("Drone delivery", Tier::Good, Tier::Good.score_range(), "all met");
        assert!(prompt.contains("70-95%"));
        assert!(prompt.contains("Good Flags Met: all met"));
        assert!(prompt.contains("scaling"));
    }

    #[test]
    fn test_advisory_prompt_uses_score_band() {
        let mut record = sample_record(Tier::Medium, 45);
        let prompt = advisory(&record, &Transcript::new(), "What's my biggest risk?");
        assert!(prompt.contains("MODERATE score"));
        assert!(prompt.contains("USER QUESTION: What's my biggest risk?"));
        assert!(prompt.contains("Year 1 Revenue: $180,000"));

        record.success_score = 12;
        let prompt = advisory(&record, &Transcript::new(), "Should I pivot?");
        assert!(prompt.contains("LOW score"));
    }

    #[test]
    fn test_advisory_prompt_includes_history() {
        let record = sample_record(Tier::Good, 80);
        let mut history = Transcript::new();
        history.push(ChatMessage::user("How do I price it?"));
        history.push(ChatMessage::assistant("Start at $29/month."));

        let prompt = advisory(&record, &history, "And annual plans?");
        assert!(prompt.contains("FOUNDER: How do I price it?"));
        assert!(prompt.contains("ADVISOR: Start at $29/month."));
        assert!(prompt.contains("HIGH score"));
    }
}
