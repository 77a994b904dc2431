//! Tier, threat, priority and impact color mapping for CLI output.
//!
//! `console` drops styling automatically when stdout is not a terminal.

use console::{style, StyledObject};

use crate::domain::models::{Impact, Priority, ThreatLevel, Tier};

/// Bad = red bold, Medium = yellow, Good = green bold.
pub fn colorize_tier(tier: Tier) -> StyledObject<String> {
    let text = tier.as_str().to_uppercase();
    match tier {
        Tier::Bad => style(text).red().bold(),
        Tier::Medium => style(text).yellow(),
        Tier::Good => style(text).green().bold(),
    }
}

/// Score colored by the probability band it falls in.
pub fn colorize_score(score: i64) -> StyledObject<String> {
    let text = format!("{score}%");
    if score >= 75 {
        style(text).green().bold()
    } else if score >= 50 {
        style(text).yellow()
    } else {
        style(text).red()
    }
}

/// Threat level, hotter colors for bigger threats.
pub fn colorize_threat(level: ThreatLevel) -> StyledObject<&'static str> {
    match level {
        ThreatLevel::High => style(level.as_str()).red().bold(),
        ThreatLevel::Medium => style(level.as_str()).yellow(),
        ThreatLevel::Low => style(level.as_str()).dim(),
    }
}

/// Recommendation priority.
pub fn colorize_priority(priority: Priority) -> StyledObject<&'static str> {
    match priority {
        Priority::High => style(priority.as_str()).red(),
        Priority::Medium => style(priority.as_str()).white(),
        Priority::Low => style(priority.as_str()).dim(),
    }
}

/// Factor impact: green up, red down.
pub fn colorize_impact(impact: Impact) -> StyledObject<&'static str> {
    match impact {
        Impact::Positive => style(impact.as_str()).green(),
        Impact::Negative => style(impact.as_str()).red(),
        Impact::Neutral => style(impact.as_str()).dim(),
    }
}

/// Revenue figure, red when it is a loss.
pub fn colorize_revenue(formatted: String, value: i64) -> StyledObject<String> {
    if value < 0 {
        style(formatted).red()
    } else {
        style(formatted)
    }
}
