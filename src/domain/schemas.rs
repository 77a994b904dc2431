//! Response schemas for every structured reasoning call.
//!
//! Field names here are the contract with the deserialized domain types; a
//! rename on either side breaks parsing.

use serde_json::json;

use crate::domain::models::ResponseSchema;

/// Schema name of the rubric answer
pub const RULE_FLAGS: &str = "rule_flags";
/// Schema name of the tier-constrained analysis
pub const DETAILED_ANALYSIS: &str = "detailed_analysis";
/// Schema name of the competitor research answer
pub const COMPETITOR_RESEARCH: &str = "competitor_research";

/// Rubric flags plus free-text justification.
pub fn rule_flags() -> ResponseSchema {
    ResponseSchema {
        name: RULE_FLAGS.to_string(),
        description: "Report the hard-rule evaluation of the business idea".to_string(),
        schema: json!({
            "type": "object",
            "properties": {
                "bad_flags": {
                    "type": "object",
                    "properties": {
                        "health_legal_liability": { "type": "boolean" },
                        "shrinking_tam": { "type": "boolean" },
                        "low_gross_margin": { "type": "boolean" },
                        "cultural_revulsion": { "type": "boolean" },
                        "details": { "type": "string" }
                    },
                    "required": [
                        "health_legal_liability",
                        "shrinking_tam",
                        "low_gross_margin",
                        "cultural_revulsion",
                        "details"
                    ]
                },
                "good_flags": {
                    "type": "object",
                    "properties": {
                        "tam_cagr_high": { "type": "boolean" },
                        "gross_margin_high": { "type": "boolean" },
                        "google_trends_up": { "type": "boolean" },
                        "low_competitor_density": { "type": "boolean" },
                        "esg_tailwind": { "type": "boolean" },
                        "details": { "type": "string" }
                    },
                    "required": [
                        "tam_cagr_high",
                        "gross_margin_high",
                        "google_trends_up",
                        "low_competitor_density",
                        "esg_tailwind",
                        "details"
                    ]
                },
                "tier_classification": {
                    "type": "string",
                    "enum": ["bad", "medium", "good"]
                },
                "reasoning": { "type": "string" }
            },
            "required": ["bad_flags", "good_flags", "reasoning"]
        }),
    }
}

fn competitor_item(with_source: bool) -> serde_json::Value {
    let mut properties = json!({
        "name": { "type": "string" },
        "description": { "type": "string" },
        "threat_level": { "type": "string", "enum": ["low", "medium", "high"] }
    });
    if with_source {
        properties["source"] = json!({ "type": "string" });
    }
    json!({
        "type": "object",
        "properties": properties,
        "required": ["name", "description", "threat_level"]
    })
}

/// Score, factors, competitors and recommendations for a pre-classified idea.
pub fn detailed_analysis() -> ResponseSchema {
    ResponseSchema {
        name: DETAILED_ANALYSIS.to_string(),
        description: "Report the detailed analysis of the pre-classified business idea"
            .to_string(),
        schema: json!({
            "type": "object",
            "properties": {
                "success_score": { "type": "number" },
                "key_factors": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "factor": { "type": "string" },
                            "impact": { "type": "string", "enum": ["positive", "negative", "neutral"] },
                            "weight": { "type": "number" },
                            "description": { "type": "string" }
                        },
                        "required": ["factor", "impact", "weight", "description"]
                    }
                },
                "competitors": {
                    "type": "array",
                    "items": competitor_item(false)
                },
                "recommendations": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "action": { "type": "string" },
                            "impact_on_score": { "type": "number" },
                            "priority": { "type": "string", "enum": ["low", "medium", "high"] }
                        },
                        "required": ["action", "impact_on_score", "priority"]
                    }
                }
            },
            "required": ["success_score", "key_factors", "competitors", "recommendations"]
        }),
    }
}

/// Web-grounded competitor sweep.
pub fn competitor_research() -> ResponseSchema {
    ResponseSchema {
        name: COMPETITOR_RESEARCH.to_string(),
        description: "Report competitors and similar products found for the business idea"
            .to_string(),
        schema: json!({
            "type": "object",
            "properties": {
                "competitors": {
                    "type": "array",
                    "items": competitor_item(true)
                },
                "market_status": { "type": "string" },
                "recommendation": { "type": "string" }
            },
            "required": ["competitors"]
        }),
    }
}
