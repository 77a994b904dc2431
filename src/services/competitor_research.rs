//! Web-grounded competitor sweep.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domain::errors::IntegrationResult;
use crate::domain::models::{Competitor, ReasoningRequest};
use crate::domain::ports::ReasoningService;
use crate::domain::schemas;
use crate::services::{prompts, structured::request_structured};

/// Result of a competitor sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorResearch {
    /// Competitors found, most relevant first
    pub competitors: Vec<Competitor>,
    /// Short read on how crowded the market is.
    #[serde(default)]
    pub market_status: Option<String>,
    /// Suggested positioning given what was found.
    #[serde(default)]
    pub recommendation: Option<String>,
}

/// Grounded search for products, crowdfunding campaigns, patents and apps
/// competing with an idea.
pub struct CompetitorResearcher {
    reasoning: Arc<dyn ReasoningService>,
}

impl CompetitorResearcher {
    /// Researcher over `reasoning`.
    pub fn new(reasoning: Arc<dyn ReasoningService>) -> Self {
        Self { reasoning }
    }

    /// Run one sweep for `idea`.
    #[instrument(skip_all)]
    pub async fn research(&self, idea: &str) -> IntegrationResult<CompetitorResearch> {
        let request =
            ReasoningRequest::structured(prompts::competitor_research(idea), schemas::competitor_research())
                .grounded();

        let research: CompetitorResearch = request_structured(self.reasoning.as_ref(), &request).await?;
        info!(found = research.competitors.len(), "competitor research complete");
        Ok(research)
    }
}
