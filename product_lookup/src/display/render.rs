use super::ProductTable;
use anyhow::Context;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};

pub const HEADERS: [&str; 3] = ["ID", "Name", "Origin"];

/// Renders the visible table as a terminal table. A hidden table renders nothing.
pub fn render_table(table: &ProductTable) -> Option<String> {
    if !table.is_visible() {
        return None;
    }

    let mut rendered = Table::new();
    rendered.load_preset(UTF8_FULL_CONDENSED);
    rendered.set_content_arrangement(ContentArrangement::Dynamic);
    rendered.set_header(HEADERS.to_vec());
    for row in table.rows() {
        rendered.add_row(row.cells().to_vec());
    }

    Some(rendered.to_string())
}

/// Renders the visible rows as JSON objects, one per line.
pub fn render_json(table: &ProductTable) -> anyhow::Result<Option<String>> {
    if !table.is_visible() {
        return Ok(None);
    }

    let lines = table
        .rows()
        .iter()
        .map(|row| serde_json::to_string(row).context("Failed to serialize product row"))
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Some(lines.join("\n")))
}
