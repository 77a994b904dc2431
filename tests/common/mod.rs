//! Common test utilities for integration tests
//!
//! Scripted reasoning payloads and a session wired to an in-memory database.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use std::sync::Arc;

use ideagauge::adapters::reasoning::ScriptedReasoningService;
use ideagauge::adapters::sqlite::{create_migrated_test_pool, SqliteAnalysisRepository};
use ideagauge::domain::models::ForecastTemplates;
use ideagauge::services::AnalyzerSession;

pub const DOG_WALKING: &str = "A mobile app for dog walking services with GPS tracking";
pub const SYRINGES: &str = "Selling used syringes online";

/// Session, the script feeding it, and the repository behind it.
pub struct Harness {
    pub session: AnalyzerSession,
    pub reasoning: Arc<ScriptedReasoningService>,
    pub repository: Arc<SqliteAnalysisRepository>,
}

pub async fn harness(seed: u64) -> Harness {
    let pool = create_migrated_test_pool()
        .await
        .expect("Failed to create test database");
    let repository = Arc::new(SqliteAnalysisRepository::new(pool));
    let reasoning = Arc::new(ScriptedReasoningService::new());

    let session = AnalyzerSession::with_rng(
        reasoning.clone(),
        repository.clone(),
        ForecastTemplates::default(),
        StdRng::seed_from_u64(seed),
    );

    Harness {
        session,
        reasoning,
        repository,
    }
}

/// Rubric answer with no red flags and three of five green flags.
pub fn mixed_flags() -> Value {
    json!({
        "bad_flags": {
            "health_legal_liability": false,
            "shrinking_tam": false,
            "low_gross_margin": false,
            "cultural_revulsion": false,
            "details": "No red flags"
        },
        "good_flags": {
            "tam_cagr_high": true,
            "gross_margin_high": true,
            "google_trends_up": true,
            "low_competitor_density": false,
            "esg_tailwind": false,
            "details": "Crowded market, no regulatory tailwind"
        },
        "tier_classification": "medium",
        "reasoning": "Growing pet market but heavy competition"
    })
}

/// Rubric answer tripping the health/legal red flag.
pub fn liability_flags() -> Value {
    json!({
        "bad_flags": {
            "health_legal_liability": true,
            "shrinking_tam": false,
            "low_gross_margin": false,
            "cultural_revulsion": true,
            "details": "Biohazard handling and illegal resale"
        },
        "good_flags": {
            "tam_cagr_high": true,
            "gross_margin_high": true,
            "google_trends_up": true,
            "low_competitor_density": true,
            "esg_tailwind": true,
            "details": ""
        },
        "tier_classification": "good",
        "reasoning": "Never viable"
    })
}

pub fn detailed_analysis(score: f64) -> Value {
    json!({
        "success_score": score,
        "key_factors": [
            { "factor": "Pet spending growth", "impact": "positive", "weight": 10, "description": "Rising" },
            { "factor": "Competition", "impact": "negative", "weight": -12, "description": "Rover, Wag" }
        ],
        "competitors": [
            { "name": "Rover", "description": "Pet care marketplace", "threat_level": "high" }
        ],
        "recommendations": [
            { "action": "Target one neighbourhood", "impact_on_score": 4, "priority": "medium" },
            { "action": "Add insurance", "impact_on_score": 7, "priority": "high" }
        ]
    })
}

pub fn competitor_research() -> Value {
    json!({
        "competitors": [
            { "name": "Wag!", "description": "On-demand dog walking", "threat_level": "high", "source": "https://wagwalking.com" },
            { "name": "Fetch Pet Care", "description": "Franchise pet sitting", "threat_level": "medium" }
        ],
        "market_status": "Saturated in large cities",
        "recommendation": "Differentiate on trust"
    })
}
