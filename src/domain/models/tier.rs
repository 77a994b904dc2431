//! Tier classification.
//!
//! A tier is derived once from the rubric flags and never changes afterwards.
//! It gates the permitted success-score range, the analyzer's tone and the
//! forecast template.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification of a business idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// At least one red flag
    Bad,
    /// Neither bad nor good
    Medium,
    /// Every green flag and no red flag
    Good,
}

impl Tier {
    /// Every tier, worst first.
    pub const ALL: [Self; 3] = [Self::Bad, Self::Medium, Self::Good];

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bad => "bad",
            Self::Medium => "medium",
            Self::Good => "good",
        }
    }

    /// Parse a wire name, ignoring case.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bad" => Some(Self::Bad),
            "medium" => Some(Self::Medium),
            "good" => Some(Self::Good),
            _ => None,
        }
    }

    /// Permitted success-score interval for this tier.
    pub const fn score_range(self) -> ScoreRange {
        match self {
            Self::Bad => ScoreRange { min: 5, max: 29 },
            Self::Medium => ScoreRange { min: 30, max: 69 },
            Self::Good => ScoreRange { min: 70, max: 95 },
        }
    }

    /// Derive the tier from rubric flags.
    ///
    /// Any bad flag wins outright. Good requires every good flag and no bad
    /// flag. Everything else is medium.
    pub fn classify(flags: &RuleFlags) -> Self {
        if flags.bad.any() {
            Self::Bad
        } else if flags.good.all() {
            Self::Good
        } else {
            Self::Medium
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive integer score interval bound to a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRange {
    /// Lowest permitted score
    pub min: i64,
    /// Highest permitted score
    pub max: i64,
}

impl ScoreRange {
    /// Whether `score` lies inside the interval.
    pub fn contains(&self, score: i64) -> bool {
        (self.min..=self.max).contains(&score)
    }
}

impl fmt::Display for ScoreRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}%", self.min, self.max)
    }
}

/// Red-flag criteria. Any one of them makes an idea bad.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadFlags {
    /// Health risks, legal liability, bodily fluids, privacy breaches or dangerous materials.
    pub health_legal_liability: bool,
    /// Addressable market shrinking faster than 5% a year.
    pub shrinking_tam: bool,
    /// Gross margin below 15% at scale.
    pub low_gross_margin: bool,
    /// More than 60% of people would find it disgusting, offensive or unethical.
    pub cultural_revulsion: bool,
    /// Justification for the red-flag verdicts.
    #[serde(default)]
    pub details: String,
}

impl BadFlags {
    /// Any red flag raised.
    pub fn any(&self) -> bool {
        self.health_legal_liability
            || self.shrinking_tam
            || self.low_gross_margin
            || self.cultural_revulsion
    }
}

/// Green-flag criteria. All of them are needed for a good idea.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoodFlags {
    /// Market growing at least 8% a year.
    pub tam_cagr_high: bool,
    /// Gross margin of 45% or more at scale.
    pub gross_margin_high: bool,
    /// Search interest rising for three or more years.
    pub google_trends_up: bool,
    /// Fewer than three brands holding more than 10% share each.
    pub low_competitor_density: bool,
    /// Supportive regulation or ESG mandates.
    pub esg_tailwind: bool,
    /// Justification for the green-flag verdicts.
    #[serde(default)]
    pub details: String,
}

impl GoodFlags {
    /// Every green flag raised.
    pub fn all(&self) -> bool {
        self.tam_cagr_high
            && self.gross_margin_high
            && self.google_trends_up
            && self.low_competitor_density
            && self.esg_tailwind
    }

    /// Number of green flags raised.
    pub fn count(&self) -> usize {
        [
            self.tam_cagr_high,
            self.gross_margin_high,
            self.google_trends_up,
            self.low_competitor_density,
            self.esg_tailwind,
        ]
        .into_iter()
        .filter(|flag| *flag)
        .count()
    }
}

/// Rubric evaluation results, trusted as returned by the reasoning service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFlags {
    /// Red-flag verdicts
    pub bad: BadFlags,
    /// Green-flag verdicts
    pub good: GoodFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bad_from_bits(bits: u8) -> BadFlags {
        BadFlags {
            health_legal_liability: bits & 1 != 0,
            shrinking_tam: bits & 2 != 0,
            low_gross_margin: bits & 4 != 0,
            cultural_revulsion: bits & 8 != 0,
            details: String::new(),
        }
    }

    fn good_from_bits(bits: u8) -> GoodFlags {
        GoodFlags {
            tam_cagr_high: bits & 1 != 0,
            gross_margin_high: bits & 2 != 0,
            google_trends_up: bits & 4 != 0,
            low_competitor_density: bits & 8 != 0,
            esg_tailwind: bits & 16 != 0,
            details: String::new(),
        }
    }

    #[test]
    fn test_any_bad_flag_is_bad_regardless_of_good_flags() {
        for bad in 1..16u8 {
            for good in 0..32u8 {
                let flags = RuleFlags {
                    bad: bad_from_bits(bad),
                    good: good_from_bits(good),
                };
                assert_eq!(Tier::classify(&flags), Tier::Bad, "bad={bad:#b} good={good:#b}");
            }
        }
    }

    #[test]
    fn test_all_good_flags_without_bad_is_good() {
        let flags = RuleFlags {
            bad: bad_from_bits(0),
            good: good_from_bits(0b11111),
        };
        assert_eq!(Tier::classify(&flags), Tier::Good);
    }

    #[test]
    fn test_partial_good_flags_is_medium() {
        for good in 0..31u8 {
            let flags = RuleFlags {
                bad: bad_from_bits(0),
                good: good_from_bits(good),
            };
            assert_eq!(Tier::classify(&flags), Tier::Medium, "good={good:#b}");
        }
    }

    #[test]
    fn test_score_ranges_are_fixed_and_disjoint() {
        assert_eq!(Tier::Bad.score_range(), ScoreRange { min: 5, max: 29 });
        assert_eq!(Tier::Medium.score_range(), ScoreRange { min: 30, max: 69 });
        assert_eq!(Tier::Good.score_range(), ScoreRange { min: 70, max: 95 });

        for pair in Tier::ALL.windows(2) {
            assert!(pair[0].score_range().max < pair[1].score_range().min);
        }
    }

    #[test]
    fn test_ranges_leave_room_for_clamp_offset() {
        // The clamp draws up to 10 points inward from a bound.
        for tier in Tier::ALL {
            let range = tier.score_range();
            assert!(range.max - 10 >= range.min, "{tier} range too narrow");
        }
    }

    #[test]
    fn test_tier_string_round_trip() {
        for tier in Tier::ALL {
            assert_eq!(Tier::from_str(tier.as_str()), Some(tier));
        }
        assert_eq!(Tier::from_str("GOOD"), Some(Tier::Good));
        assert_eq!(Tier::from_str("great"), None);
    }

    #[test]
    fn test_flags_deserialize_without_details() {
        let json = serde_json::json!({
            "health_legal_liability": false,
            "shrinking_tam": false,
            "low_gross_margin": true,
            "cultural_revulsion": false
        });
        let flags: BadFlags = serde_json::from_value(json).unwrap();
        assert!(flags.any());
        assert!(flags.details.is_empty());
    }

    #[test]
    fn test_missing_flag_is_rejected() {
        let json = serde_json::json!({
            "tam_cagr_high": true,
            "gross_margin_high": true,
            "details": "growing"
        });
        assert!(serde_json::from_value::<GoodFlags>(json).is_err());
    }

    #[test]
    fn test_good_flag_count() {
        assert_eq!(good_from_bits(0b00111).count(), 3);
        assert_eq!(good_from_bits(0).count(), 0);
    }
}
