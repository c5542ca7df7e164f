//! Table rendering. The first row is always the header.

use crate::common::escape::escape_html;
use crate::ir::nodes::{Table, TableRow};

/// Render `table` as `<table>` with a `<thead>` and, when there is more
/// than one row, a `<tbody>`. A table without rows renders as nothing.
pub fn render_table(table: &Table) -> String {
    let Some((header, body)) = table.rows.split_first() else {
        return String::new();
    };

    let mut parts = vec!["<table>".to_string()];

    parts.push("  <thead>".to_string());
    push_row(&mut parts, header, "th");
    parts.push("  </thead>".to_string());

    if !body.is_empty() {
        parts.push("  <tbody>".to_string());
        for row in body {
            push_row(&mut parts, row, "td");
        }
        parts.push("  </tbody>".to_string());
    }

    parts.push("</table>".to_string());
    parts.join("\n")
}

fn push_row(parts: &mut Vec<String>, row: &TableRow, cell_tag: &str) {
    parts.push("    <tr>".to_string());
    for cell in &row.cells {
        parts.push(format!(
            "      <{cell_tag}>{}</{cell_tag}>",
            escape_html(cell.trim())
        ));
    }
    parts.push("    </tr>".to_string());
}
