//! Analysis record and its parts.

use serde::{Deserialize, Serialize};

use super::tier::{RuleFlags, Tier};

/// Direction a key factor pushes the success score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    /// Raises the odds of success
    Positive,
    /// Lowers the odds of success
    Negative,
    /// Worth noting, no clear direction
    Neutral,
}

impl Impact {
    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

/// Competitive threat posed by an existing player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatLevel {
    /// Adjacent player, little overlap
    Low,
    /// Overlapping offer or audience
    Medium,
    /// Direct substitute with traction
    High,
}

impl ThreatLevel {
    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Priority of a recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Nice to have
    Low,
    /// Worth scheduling soon
    Medium,
    /// Do first
    High,
}

impl Priority {
    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// One factor explaining the classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyFactor {
    /// Short name of the factor
    pub factor: String,
    /// Direction it pushes the score
    pub impact: Impact,
    /// Signed contribution, in score percentage points.
    pub weight: f64,
    /// One-sentence explanation
    #[serde(default)]
    pub description: String,
}

/// An existing product or company competing with the idea.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    /// Company or product name
    pub name: String,
    /// What it offers
    #[serde(default)]
    pub description: String,
    /// How directly it competes
    pub threat_level: ThreatLevel,
    /// Where it was found (URL or reference), when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// An action the founder could take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// What to do
    pub action: String,
    /// Expected score gain in percentage points
    pub impact_on_score: f64,
    /// How urgent it is
    pub priority: Priority,
}

/// Three-year revenue curve in currency units. Values may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueForecast {
    /// First-year revenue
    pub year_1: i64,
    /// Second-year revenue
    pub year_2: i64,
    /// Third-year revenue
    pub year_3: i64,
}

impl RevenueForecast {
    /// Years in order.
    pub fn years(&self) -> [i64; 3] {
        [self.year_1, self.year_2, self.year_3]
    }

    /// Any year projected at a loss.
    pub fn has_loss(&self) -> bool {
        self.years().iter().any(|v| *v < 0)
    }

    /// Negative first year followed by a non-positive second year.
    pub fn is_wind_down(&self) -> bool {
        self.year_1 < 0 && self.year_2 <= 0
    }
}

/// Three-year unit-sales curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSalesForecast {
    /// First-year units sold
    pub year_1: u64,
    /// Second-year units sold
    pub year_2: u64,
    /// Third-year units sold
    pub year_3: u64,
}

impl UnitSalesForecast {
    /// Years in order.
    pub fn years(&self) -> [u64; 3] {
        [self.year_1, self.year_2, self.year_3]
    }
}

/// Complete result of one analysis run.
///
/// Produced once by the aggregator and never mutated; a new run (or a
/// competitor refresh) replaces it with a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Idea text as analyzed (trimmed)
    pub idea_description: String,
    /// Success probability in percent, inside the tier's range
    pub success_score: i64,
    /// Templated three-year revenue
    pub revenue_forecast: RevenueForecast,
    /// Templated three-year unit sales
    pub unit_sales_forecast: UnitSalesForecast,
    /// Factors in the order the analyzer gave them
    pub key_factors: Vec<KeyFactor>,
    /// Known competitors
    pub competitors: Vec<Competitor>,
    /// Suggested actions in service order
    pub recommendations: Vec<Recommendation>,
    /// Tier derived from the rule flags
    pub tier_classification: Tier,
    /// Flags that decided the tier
    pub rule_flags: RuleFlags,
}

impl AnalysisRecord {
    /// Copy of this record with a different competitor list.
    pub fn with_competitors(&self, competitors: Vec<Competitor>) -> Self {
        Self {
            competitors,
            ..self.clone()
        }
    }
}
