//! Full analysis report for the terminal.

use comfy_table::{presets, Cell, ContentArrangement, Table};
use console::style;

use super::colors::{
    colorize_impact, colorize_priority, colorize_revenue, colorize_score, colorize_threat,
    colorize_tier,
};
use crate::domain::models::{AnalysisRecord, RuleFlags};
use crate::services::report::{recommendations_by_impact, ReportSummary};

fn section_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_HORIZONTAL_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| Cell::new(*h)));
    table
}

fn heading(text: &str) -> String {
    style(text).bold().underlined().to_string()
}

fn flag_lines(flags: &RuleFlags) -> Vec<String> {
    let mark = |set: bool| if set { "\u{2713}" } else { "\u{00b7}" };
    let bad = &flags.bad;
    let good = &flags.good;

    let mut lines = vec![
        format!("  Red flags ({}):", if bad.any() { "present" } else { "none" }),
        format!("    {} health / legal liability", mark(bad.health_legal_liability)),
        format!("    {} shrinking market", mark(bad.shrinking_tam)),
        format!("    {} gross margin below 15%", mark(bad.low_gross_margin)),
        format!("    {} cultural revulsion", mark(bad.cultural_revulsion)),
    ];
    if !bad.details.is_empty() {
        lines.push(format!("    {}", style(&bad.details).dim()));
    }

    lines.push(format!("  Green flags ({}/5):", good.count()));
    lines.push(format!("    {} market growing 8%+ a year", mark(good.tam_cagr_high)));
    lines.push(format!("    {} gross margin 45%+", mark(good.gross_margin_high)));
    lines.push(format!("    {} search interest rising", mark(good.google_trends_up)));
    lines.push(format!("    {} low competitor density", mark(good.low_competitor_density)));
    lines.push(format!("    {} regulatory / ESG tailwind", mark(good.esg_tailwind)));
    if !good.details.is_empty() {
        lines.push(format!("    {}", style(&good.details).dim()));
    }
    lines
}

/// Render every section of an analysis record.
pub fn render_report(record: &AnalysisRecord) -> String {
    let summary = ReportSummary::from_record(record);
    let mut lines = vec![
        style("Idea Analysis").bold().to_string(),
        format!("  {}", record.idea_description),
        String::new(),
        format!(
            "  Tier: {}   Success: {} ({})",
            colorize_tier(record.tier_classification),
            colorize_score(record.success_score),
            summary.probability
        ),
        String::new(),
    ];

    lines.extend(flag_lines(&record.rule_flags));

    lines.push(String::new());
    lines.push(heading("3-Year Forecast"));
    if summary.wind_down {
        lines.push(format!(
            "  {}",
            style("Wind-down scenario: losses in year 1 with no recovery").red()
        ));
    }
    let mut forecast = section_table(&["Year", "Revenue", "Units", ""]);
    for (year, revenue) in summary
        .forecast
        .iter()
        .zip(record.revenue_forecast.years())
    {
        forecast.add_row(vec![
            Cell::new(format!("Year {}", year.year)),
            Cell::new(colorize_revenue(year.revenue.clone(), revenue)),
            Cell::new(&year.units),
            Cell::new(year.label.unwrap_or_default()),
        ]);
    }
    lines.push(forecast.to_string());

    if !record.key_factors.is_empty() {
        lines.push(String::new());
        lines.push(heading("Key Factors"));
        let mut factors = section_table(&["Factor", "Impact", "Weight", "Why"]);
        for factor in &record.key_factors {
            factors.add_row(vec![
                Cell::new(&factor.factor),
                Cell::new(colorize_impact(factor.impact)),
                Cell::new(format!("{:+.1}", factor.weight)),
                Cell::new(&factor.description),
            ]);
        }
        lines.push(factors.to_string());
    }

    lines.push(String::new());
    lines.push(heading("Competitors"));
    if record.competitors.is_empty() {
        lines.push("  None identified.".to_string());
    } else {
        let mut competitors = section_table(&["Name", "Threat", "Description"]);
        for competitor in &record.competitors {
            competitors.add_row(vec![
                Cell::new(&competitor.name),
                Cell::new(colorize_threat(competitor.threat_level)),
                Cell::new(&competitor.description),
            ]);
        }
        lines.push(competitors.to_string());
    }

    if !record.recommendations.is_empty() {
        lines.push(String::new());
        lines.push(heading("Recommendations"));
        let mut recommendations = section_table(&["Action", "Impact", "Priority"]);
        for rec in recommendations_by_impact(&record.recommendations) {
            recommendations.add_row(vec![
                Cell::new(&rec.action),
                Cell::new(format!("+{:.0}%", rec.impact_on_score)),
                Cell::new(colorize_priority(rec.priority)),
            ]);
        }
        lines.push(recommendations.to_string());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Tier;
    use crate::services::test_support::sample_record;

    #[test]
    fn test_report_mentions_every_section() {
        let record = sample_record(Tier::Medium, 45);
        let report = render_report(&record);

        assert!(report.contains("MEDIUM"));
        assert!(report.contains("45%"));
        assert!(report.contains("Low Probability"));
        assert!(report.contains("3-Year Forecast"));
        assert!(report.contains("Competitors"));
        assert!(report.contains(&record.competitors[0].name));
    }

    #[test]
    fn test_bad_report_flags_wind_down() {
        let record = sample_record(Tier::Bad, 10);
        let report = render_report(&record);

        assert!(report.contains("Wind-down scenario"));
        assert!(report.contains("-$20,000"));
    }
}
