//! Display-layer interpretation of an analysis record.
//!
//! Nothing here changes the record; it derives labels and orderings for
//! front-ends.

use serde::Serialize;

use crate::domain::models::{AnalysisRecord, Recommendation, RevenueForecast};

/// Headline label for a success score.
pub fn probability_label(score: i64) -> &'static str {
    if score >= 75 {
        "High Probability"
    } else if score >= 50 {
        "Moderate Probability"
    } else {
        "Low Probability"
    }
}

/// Annotation for one forecast year (1-based), if any.
pub fn revenue_label(forecast: &RevenueForecast, year: usize) -> Option<&'static str> {
    let value = *forecast.years().get(year.checked_sub(1)?)?;
    if value <= 0 && year == 2 && forecast.year_1 < 0 {
        Some("Wind-down")
    } else if value < 0 {
        Some("Expected Loss")
    } else if value == 0 {
        Some("Break-even/Closure")
    } else {
        None
    }
}

/// `$1,400,000` / `-$20,000`.
pub fn format_currency(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(value.unsigned_abs()))
}

/// `70,000`.
pub fn format_count(value: u64) -> String {
    group_thousands(value)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Recommendations ordered by expected score impact, largest first.
pub fn recommendations_by_impact(recommendations: &[Recommendation]) -> Vec<&Recommendation> {
    let mut ordered: Vec<&Recommendation> = recommendations.iter().collect();
    ordered.sort_by(|a, b| b.impact_on_score.total_cmp(&a.impact_on_score));
    ordered
}

/// One forecast year, ready to print.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastYear {
    /// 1-based year
    pub year: usize,
    /// Formatted currency
    pub revenue: String,
    /// Formatted unit count
    pub units: String,
    /// Loss / wind-down / closure marker
    pub label: Option<&'static str>,
}

/// Summary block shown above the detailed lists.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    /// Tier name
    pub tier: String,
    /// Success score in percent
    pub success_score: i64,
    /// Probability label for the score
    pub probability: &'static str,
    /// Loss in year 1 with no recovery in year 2
    pub wind_down: bool,
    /// Per-year forecast rows
    pub forecast: Vec<ForecastYear>,
}

impl ReportSummary {
    /// Derive the summary without touching the record.
    pub fn from_record(record: &AnalysisRecord) -> Self {
        let revenue = record.revenue_forecast;
        let forecast = revenue
            .years()
            .iter()
            .zip(record.unit_sales_forecast.years())
            .enumerate()
            .map(|(i, (rev, units))| {
                let year = i + 1;
                let wind_down_year = revenue.is_wind_down() && year > 1 && *rev <= 0;
                ForecastYear {
                    year,
                    revenue: if wind_down_year {
                        "\u{2264} $0".to_string()
                    } else {
                        format_currency(*rev)
                    },
                    units: format_count(units),
                    label: revenue_label(&revenue, year),
                }
            })
            .collect();

        Self {
            tier: record.tier_classification.as_str().to_uppercase(),
            success_score: record.success_score,
            probability: probability_label(record.success_score),
            wind_down: revenue.is_wind_down(),
            forecast,
        }
    }
}
