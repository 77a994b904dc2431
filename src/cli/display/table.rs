//! Table builder wrapper around comfy-table for consistent list display.

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};

/// Create a standard list table with the given headers.
///
/// Uses the NOTHING preset (no borders) for a clean CLI aesthetic.
pub fn list_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h.to_uppercase()).set_alignment(CellAlignment::Left)),
        );
    table
}

/// Render the table to string with a count header.
pub fn render_list(entity_name: &str, plural: &str, table: &Table, total: usize) -> String {
    if total == 0 {
        return format!("No {plural} found.");
    }
    let noun = if total == 1 { entity_name } else { plural };
    format!("{} {noun}:\n{table}", console::style(total).bold())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_list() {
        let table = list_table(&["id", "tier"]);
        assert_eq!(render_list("analysis", "analyses", &table, 0), "No analyses found.");
    }

    #[test]
    fn test_render_list_has_headers_and_rows() {
        let mut table = list_table(&["id", "tier"]);
        table.add_row(vec!["1a2b3c4d", "medium"]);

        let rendered = render_list("analysis", "analyses", &table, 1);
        assert!(rendered.contains("analysis:"));
        assert!(rendered.contains("ID"));
        assert!(rendered.contains("1a2b3c4d"));
    }
}
