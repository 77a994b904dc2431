//! Forecast templater.
//!
//! Revenue and unit curves come from the tier's base table, each value
//! scaled by an independent factor in [0.85, 1.15] and rounded to the
//! nearest 5 000 (revenue) or 100 (units).

use rand::Rng;

use crate::domain::models::{ForecastTemplates, RevenueForecast, Tier, UnitSalesForecast};
use crate::services::tier_analyzer::round_half_up;

/// Smallest jitter factor
pub const JITTER_LOW: f64 = 0.85;
/// Largest jitter factor
pub const JITTER_HIGH: f64 = 1.15;
/// Revenue rounding step
pub const REVENUE_STEP: f64 = 5_000.0;
/// Unit-sales rounding step
pub const UNIT_STEP: f64 = 100.0;

/// Scale `base` by a random factor and snap it to a multiple of `step`.
pub fn jitter<R: Rng + ?Sized>(base: f64, step: f64, rng: &mut R) -> f64 {
    let factor = rng.gen_range(JITTER_LOW..=JITTER_HIGH);
    round_half_up(base * factor / step) * step
}

/// Third pipeline stage: tier-templated forecasts.
#[derive(Debug, Clone, Default)]
pub struct ForecastTemplater {
    templates: ForecastTemplates,
}

impl ForecastTemplater {
    /// Templater over the given base tables.
    pub fn new(templates: ForecastTemplates) -> Self {
        Self { templates }
    }

    /// Base tables in use.
    pub fn templates(&self) -> &ForecastTemplates {
        &self.templates
    }

    /// Jittered three-year curves for `tier`.
    pub fn forecast<R: Rng + ?Sized>(
        &self,
        tier: Tier,
        rng: &mut R,
    ) -> (RevenueForecast, UnitSalesForecast) {
        let template = self.templates.for_tier(tier);

        let mut revenue = [0i64; 3];
        for (slot, base) in revenue.iter_mut().zip(template.revenue) {
            *slot = jitter(base as f64, REVENUE_STEP, rng) as i64;
        }

        let mut units = [0u64; 3];
        for (slot, base) in units.iter_mut().zip(template.units) {
            *slot = jitter(base as f64, UNIT_STEP, rng).max(0.0) as u64;
        }

        (
            RevenueForecast {
                year_1: revenue[0],
                year_2: revenue[1],
                year_3: revenue[2],
            },
            UnitSalesForecast {
                year_1: units[0],
                year_2: units[1],
                year_3: units[2],
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::TierTemplate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_medium_values_stay_within_jitter_band() {
        let templater = ForecastTemplater::default();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (revenue, units) = templater.forecast(Tier::Medium, &mut rng);

            assert!((153_000..=207_000).contains(&revenue.year_1), "{}", revenue.year_1);
            assert_eq!(revenue.year_1 % 5_000, 0);
            assert!((270_000..=370_000).contains(&revenue.year_2));
            assert!((465_000..=635_000).contains(&revenue.year_3));
            assert!((2_500..=3_500).contains(&units.year_1));
            assert_eq!(units.year_2 % 100, 0);
        }
    }

    #[test]
    fn test_bad_tier_is_a_wind_down() {
        let templater = ForecastTemplater::default();
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (revenue, units) = templater.forecast(Tier::Bad, &mut rng);
            assert!(revenue.year_1 < 0);
            assert!(revenue.year_2 <= 0);
            assert_eq!(revenue.year_3, 0);
            assert!(revenue.is_wind_down());
            assert_eq!(units.year_3, 0);
        }
    }

    #[test]
    fn test_good_tier_grows_year_on_year() {
        let templater = ForecastTemplater::default();
        let mut rng = StdRng::seed_from_u64(11);
        let (revenue, units) = templater.forecast(Tier::Good, &mut rng);
        assert!(revenue.year_1 < revenue.year_2 && revenue.year_2 < revenue.year_3);
        assert!(units.year_1 < units.year_2 && units.year_2 < units.year_3);
    }

    #[test]
    fn test_custom_templates_are_used() {
        let mut templates = ForecastTemplates::default();
        templates.good = TierTemplate {
            revenue: [0, 0, 0],
            units: [0, 0, 0],
        };
        let templater = ForecastTemplater::new(templates);
        let mut rng = StdRng::seed_from_u64(5);
        let (revenue, units) = templater.forecast(Tier::Good, &mut rng);
        assert_eq!(revenue.years(), [0, 0, 0]);
        assert_eq!(units.years(), [0, 0, 0]);
    }

    #[test]
    fn test_jitter_snaps_to_step() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            let value = jitter(180_000.0, REVENUE_STEP, &mut rng);
            assert!((value / REVENUE_STEP).fract().abs() < f64::EPSILON);
        }
    }
}
