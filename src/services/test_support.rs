//! Fixtures shared by service unit tests.

use serde_json::json;

use crate::domain::models::{
    AnalysisRecord, BadFlags, Competitor, ForecastTemplates, GoodFlags, Impact, KeyFactor,
    Priority, Recommendation, RevenueForecast, RuleFlags, ThreatLevel, Tier, UnitSalesForecast,
};

/// Record built from the unjittered base tables.
pub fn sample_record(tier: Tier, score: i64) -> AnalysisRecord {
    let template = *ForecastTemplates::default().for_tier(tier);
    AnalysisRecord {
        idea_description: "A mobile app for dog walking with GPS tracking".to_string(),
        success_score: score,
        revenue_forecast: RevenueForecast {
            year_1: template.revenue[0],
            year_2: template.revenue[1],
            year_3: template.revenue[2],
        },
        unit_sales_forecast: UnitSalesForecast {
            year_1: template.units[0],
            year_2: template.units[1],
            year_3: template.units[2],
        },
        key_factors: vec![KeyFactor {
            factor: "Market growth".to_string(),
            impact: Impact::Positive,
            weight: 12.0,
            description: "Pet spending keeps rising".to_string(),
        }],
        competitors: vec![Competitor {
            name: "Rover".to_string(),
            description: "Pet sitting marketplace".to_string(),
            threat_level: ThreatLevel::High,
            source: None,
        }],
        recommendations: vec![
            Recommendation {
                action: "Partner with vets".to_string(),
                impact_on_score: 5.0,
                priority: Priority::Medium,
            },
            Recommendation {
                action: "Launch in one city".to_string(),
                impact_on_score: 8.0,
                priority: Priority::High,
            },
            Recommendation {
                action: "Add a referral bonus".to_string(),
                impact_on_score: 2.0,
                priority: Priority::Low,
            },
        ],
        tier_classification: tier,
        rule_flags: RuleFlags {
            bad: BadFlags::default(),
            good: GoodFlags::default(),
        },
    }
}

/// Rule-flags payload with the given bad flags and good-flag count.
pub fn rule_flags_json(bad: [bool; 4], good_true: usize) -> serde_json::Value {
    let good: Vec<bool> = (0..5).map(|i| i < good_true).collect();
    json!({
        "bad_flags": {
            "health_legal_liability": bad[0],
            "shrinking_tam": bad[1],
            "low_gross_margin": bad[2],
            "cultural_revulsion": bad[3],
            "details": "bad side details"
        },
        "good_flags": {
            "tam_cagr_high": good[0],
            "gross_margin_high": good[1],
            "google_trends_up": good[2],
            "low_competitor_density": good[3],
            "esg_tailwind": good[4],
            "details": "good side details"
        },
        "tier_classification": "medium",
        "reasoning": "overall reasoning"
    })
}

/// Detailed-analysis payload with the given raw score.
pub fn detailed_analysis_json(score: f64) -> serde_json::Value {
    json!({
        "success_score": score,
        "key_factors": [
            { "factor": "Market growth", "impact": "positive", "weight": 12, "description": "Rising pet spend" },
            { "factor": "Competition", "impact": "negative", "weight": -8, "description": "Rover and Wag" }
        ],
        "competitors": [
            { "name": "Rover", "description": "Marketplace", "threat_level": "high" },
            { "name": "Wag", "description": "On-demand walks", "threat_level": "medium" }
        ],
        "recommendations": [
            { "action": "Niche down", "impact_on_score": 6, "priority": "high" },
            { "action": "Insurance bundle", "impact_on_score": 3, "priority": "medium" }
        ]
    })
}
