//! Grid projection: the render plan handed to a UI layer.

use super::schema;
use super::state::DocumentStore;
use super::value::{classify, display_text, FieldKind};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridView {
    pub headers: Vec<String>,
    pub rows: Vec<RowView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub index: usize,
    pub cells: Vec<CellView>,
}

/// A classified cell descriptor carrying the addressing information the
/// edit and mutation operations need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CellView {
    Primitive(PrimitiveCell),
    Nested(NestedTableView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimitiveCell {
    pub row: usize,
    pub column: String,
    pub text: String,
}

/// A nested table cell. `headers` is the column's shared sub-column set,
/// identical across every row of the same top-level column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NestedTableView {
    pub row: usize,
    pub column: String,
    pub headers: Vec<String>,
    pub rows: Vec<NestedRowView>,
    pub single_object: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NestedRowView {
    Record(NestedRecordView),
    /// A non-record list item: displayed, never edited.
    Opaque(OpaqueItemView),
}

/// `index` is `None` for the single-object case, where edits target the
/// object directly instead of a list element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NestedRecordView {
    pub index: Option<usize>,
    /// Display texts aligned to the table's `headers`; missing keys are
    /// empty cells.
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpaqueItemView {
    pub index: usize,
    pub text: String,
}

impl DocumentStore {
    /// Build the render plan for the current document.
    ///
    /// Nested header sets are computed once per top-level column per call,
    /// as the union across all rows, so sibling nested tables under the
    /// same column stay aligned no matter how individual rows diverge.
    pub fn project(&self) -> GridView {
        let records = self.snapshot();
        let headers = schema::columns(records);

        let mut nested_headers: HashMap<String, Vec<String>> = HashMap::new();
        for header in &headers {
            let has_nested = records
                .iter()
                .filter_map(|record| record.get(header))
                .any(|value| !matches!(classify(value), FieldKind::Primitive(_)));
            if has_nested {
                nested_headers.insert(header.clone(), schema::nested_columns(records, header));
            }
        }

        let rows = records
            .iter()
            .enumerate()
            .map(|(index, record)| RowView {
                index,
                cells: headers
                    .iter()
                    .map(|header| project_cell(index, header, record.get(header), &nested_headers))
                    .collect(),
            })
            .collect();

        GridView { headers, rows }
    }
}

fn project_cell(
    row: usize,
    column: &str,
    value: Option<&Value>,
    nested_headers: &HashMap<String, Vec<String>>,
) -> CellView {
    let Some(value) = value else {
        // Absent keys surface as empty cells, not errors.
        return CellView::Primitive(PrimitiveCell {
            row,
            column: column.to_string(),
            text: String::new(),
        });
    };
    match classify(value) {
        FieldKind::Primitive(value) => CellView::Primitive(PrimitiveCell {
            row,
            column: column.to_string(),
            text: display_text(value),
        }),
        FieldKind::NestedList(items) => {
            let headers = nested_headers.get(column).cloned().unwrap_or_default();
            let rows = items
                .iter()
                .enumerate()
                .map(|(index, item)| match classify(item) {
                    FieldKind::NestedObject(map) => NestedRowView::Record(NestedRecordView {
                        index: Some(index),
                        cells: headers
                            .iter()
                            .map(|h| map.get(h).map(display_text).unwrap_or_default())
                            .collect(),
                    }),
                    _ => NestedRowView::Opaque(OpaqueItemView {
                        index,
                        text: display_text(item),
                    }),
                })
                .collect();
            CellView::Nested(NestedTableView {
                row,
                column: column.to_string(),
                headers,
                rows,
                single_object: false,
            })
        }
        FieldKind::NestedObject(map) => {
            let headers = nested_headers.get(column).cloned().unwrap_or_default();
            let cells = headers
                .iter()
                .map(|h| map.get(h).map(display_text).unwrap_or_default())
                .collect();
            CellView::Nested(NestedTableView {
                row,
                column: column.to_string(),
                headers,
                rows: vec![NestedRowView::Record(NestedRecordView { index: None, cells })],
                single_object: true,
            })
        }
    }
}
