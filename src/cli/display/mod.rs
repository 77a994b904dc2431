//! Display framework for CLI output formatting.
//!
//! Colors, tables and the full analysis report shared by the commands.

pub mod colors;
pub mod report;
pub mod table;

pub use colors::*;
pub use report::render_report;
pub use table::*;

/// Render a success action result.
pub fn action_success(message: &str) -> String {
    format!("{} {}", console::style("\u{2713}").green().bold(), message)
}

/// Render a failure action result.
pub fn action_failure(message: &str) -> String {
    format!("{} {}", console::style("\u{2717}").red().bold(), message)
}
