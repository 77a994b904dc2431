//! Per-tier forecast base tables.
//!
//! Forecasts are not derived from the idea text. Each tier maps to a fixed
//! three-year curve which the templater jitters. The tables live in
//! configuration so they can be swapped without touching code.

use serde::{Deserialize, Serialize};

use super::tier::Tier;

/// Base values for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierTemplate {
    /// Revenue bases for years 1 to 3, in currency units.
    pub revenue: [i64; 3],
    /// Unit-sales bases for years 1 to 3.
    pub units: [u64; 3],
}

/// Forecast base tables for every tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ForecastTemplates {
    /// Loss-making wind-down curve
    #[serde(default = "default_bad")]
    pub bad: TierTemplate,
    /// Steady growth curve
    #[serde(default = "default_medium")]
    pub medium: TierTemplate,
    /// Fast growth curve
    #[serde(default = "default_good")]
    pub good: TierTemplate,
}

const fn default_bad() -> TierTemplate {
    TierTemplate {
        revenue: [-20_000, -8_000, 0],
        units: [500, 200, 0],
    }
}

const fn default_medium() -> TierTemplate {
    TierTemplate {
        revenue: [180_000, 320_000, 550_000],
        units: [3_000, 6_000, 10_000],
    }
}

const fn default_good() -> TierTemplate {
    TierTemplate {
        revenue: [650_000, 1_400_000, 2_800_000],
        units: [15_000, 35_000, 70_000],
    }
}

impl Default for ForecastTemplates {
    fn default() -> Self {
        Self {
            bad: default_bad(),
            medium: default_medium(),
            good: default_good(),
        }
    }
}

impl ForecastTemplates {
    /// Bases for `tier`.
    pub fn for_tier(&self, tier: Tier) -> &TierTemplate {
        match tier {
            Tier::Bad => &self.bad,
            Tier::Medium => &self.medium,
            Tier::Good => &self.good,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables() {
        let templates = ForecastTemplates::default();
        assert_eq!(templates.for_tier(Tier::Bad).revenue, [-20_000, -8_000, 0]);
        assert_eq!(templates.for_tier(Tier::Bad).units, [500, 200, 0]);
        assert_eq!(
            templates.for_tier(Tier::Medium).revenue,
            [180_000, 320_000, 550_000]
        );
        assert_eq!(templates.for_tier(Tier::Medium).units, [3_000, 6_000, 10_000]);
        assert_eq!(
            templates.for_tier(Tier::Good).revenue,
            [650_000, 1_400_000, 2_800_000]
        );
        assert_eq!(templates.for_tier(Tier::Good).units, [15_000, 35_000, 70_000]);
    }

    #[test]
    fn test_partial_yaml_override_keeps_other_tiers() {
        let yaml = "good:\n  revenue: [1000000, 2000000, 4000000]\n  units: [20000, 40000, 80000]\n";
        let templates: ForecastTemplates = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(templates.good.revenue[0], 1_000_000);
        assert_eq!(templates.medium, default_medium());
        assert_eq!(templates.bad, default_bad());
    }

    #[test]
    fn test_negative_units_rejected() {
        let yaml = "bad:\n  revenue: [0, 0, 0]\n  units: [-5, 0, 0]\n";
        assert!(serde_yaml::from_str::<ForecastTemplates>(yaml).is_err());
    }
}
