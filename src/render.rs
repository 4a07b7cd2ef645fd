//! Text rendering of a grid projection.

use jsongrid_core::document::{CellView, GridView, NestedRowView, NestedTableView};

/// Render the projection as markdown-style tables: the main grid first,
/// then one section per nested cell.
pub fn render_grid(view: &GridView) -> String {
    let mut out = String::new();
    if view.rows.is_empty() {
        out.push_str("(empty document)\n");
        return out;
    }

    out.push_str("|   |");
    for header in &view.headers {
        out.push_str(&format!(" {} |", escape(header)));
    }
    out.push('\n');
    out.push_str("|---|");
    for _ in &view.headers {
        out.push_str("---|");
    }
    out.push('\n');

    let mut nested: Vec<&NestedTableView> = Vec::new();
    for row in &view.rows {
        out.push_str(&format!("| {} |", row.index));
        for cell in &row.cells {
            match cell {
                CellView::Primitive(cell) => out.push_str(&format!(" {} |", escape(&cell.text))),
                CellView::Nested(table) => {
                    out.push_str(&format!(
                        " [table {}x{}] |",
                        table.rows.len(),
                        table.headers.len()
                    ));
                    nested.push(table);
                }
            }
        }
        out.push('\n');
    }

    for table in nested {
        out.push('\n');
        out.push_str(&format!("## row {}, column {}\n\n", table.row, table.column));
        out.push_str(&render_nested(table));
    }
    out
}

fn render_nested(table: &NestedTableView) -> String {
    let mut out = String::new();
    out.push_str("|   |");
    for header in &table.headers {
        out.push_str(&format!(" {} |", escape(header)));
    }
    out.push('\n');
    out.push_str("|---|");
    for _ in &table.headers {
        out.push_str("---|");
    }
    out.push('\n');

    for row in &table.rows {
        match row {
            NestedRowView::Record(record) => {
                let label = match record.index {
                    Some(index) => index.to_string(),
                    None => "-".to_string(),
                };
                out.push_str(&format!("| {label} |"));
                for cell in &record.cells {
                    out.push_str(&format!(" {} |", escape(cell)));
                }
                out.push('\n');
            }
            NestedRowView::Opaque(item) => {
                out.push_str(&format!("| {} | {} |\n", item.index, escape(&item.text)));
            }
        }
    }
    out
}

fn escape(text: &str) -> String {
    text.replace('|', "\\|")
}
