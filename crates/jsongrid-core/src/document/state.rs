//! Document ownership and cell edits.

use super::value::{classify, classify_mut, coerce, FieldKind, FieldKindMut, Record};
use crate::error::{JsonGridError, Result};
use serde_json::Value;

/// Default top-level column limit per record.
pub const DEFAULT_MAX_COLUMNS: usize = 10;

/// Address of one editable cell.
///
/// `Column` targets a top-level cell. `Nested` targets a cell inside a
/// nested table; `index: None` means the field is a single-record table
/// (an object edited directly, not element 0 of a list).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellPath {
    Column(String),
    Nested {
        column: String,
        index: Option<usize>,
        field: String,
    },
}

/// Exclusive owner of the in-memory document.
///
/// All reads go through [`snapshot`](DocumentStore::snapshot) (or the grid
/// projection) and all writes through the mutation methods here and in the
/// structural-operation module. Mutations are synchronous and visible to
/// the next snapshot; failed mutations leave the document untouched.
pub struct DocumentStore {
    pub(crate) records: Vec<Record>,
    max_columns: usize,
}

impl DocumentStore {
    /// Create an empty store with the default column limit.
    pub fn new() -> Self {
        Self::with_max_columns(DEFAULT_MAX_COLUMNS)
    }

    /// Create an empty store with a custom column limit.
    pub fn with_max_columns(max_columns: usize) -> Self {
        DocumentStore {
            records: Vec::new(),
            max_columns,
        }
    }

    pub fn max_columns(&self) -> usize {
        self.max_columns
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Read-only view of the current document.
    pub fn snapshot(&self) -> &[Record] {
        &self.records
    }

    /// The current document as a JSON value, for persistence.
    pub fn to_value(&self) -> Value {
        Value::Array(self.records.iter().cloned().map(Value::Object).collect())
    }

    /// Discard the current document and start blank.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Replace the document wholesale.
    ///
    /// The only accepted shape is a sequence of keyed records (the empty
    /// sequence included). On failure the previous document is kept.
    pub fn load(&mut self, doc: Value) -> Result<()> {
        let Value::Array(items) = doc else {
            return Err(JsonGridError::Validation(
                "document root must be a sequence of records".to_string(),
            ));
        };
        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match item {
                Value::Object(map) => records.push(map),
                _ => {
                    return Err(JsonGridError::Validation(format!(
                        "row {index} is not a record"
                    )));
                }
            }
        }
        self.records = records;
        Ok(())
    }

    /// Write user-entered text into one cell.
    ///
    /// The text is coerced (numeric-looking input becomes a number) and
    /// written at the resolved path. An edit never creates a key: missing
    /// columns or fields fail, as do paths whose shape disagrees with the
    /// field's classification. Out-of-range row or nested indices fail.
    pub fn set_cell(&mut self, row: usize, path: &CellPath, raw_text: &str) -> Result<()> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(row)
            .ok_or(JsonGridError::RowOutOfBounds { index: row, len })?;
        let value = coerce(raw_text);

        match path {
            CellPath::Column(key) => {
                let slot = record
                    .get_mut(key)
                    .ok_or_else(|| JsonGridError::UnknownColumn(key.clone()))?;
                if !matches!(classify(slot), FieldKind::Primitive(_)) {
                    return Err(JsonGridError::Unsupported(format!(
                        "column '{key}' holds a nested table, not a cell"
                    )));
                }
                *slot = value;
            }
            CellPath::Nested {
                column,
                index,
                field,
            } => {
                let slot = record
                    .get_mut(column)
                    .ok_or_else(|| JsonGridError::UnknownColumn(column.clone()))?;
                let target = match (classify_mut(slot), index) {
                    (FieldKindMut::NestedList(items), Some(i)) => {
                        let len = items.len();
                        let item = items
                            .get_mut(*i)
                            .ok_or(JsonGridError::NestedRowOutOfBounds { index: *i, len })?;
                        match classify_mut(item) {
                            FieldKindMut::NestedObject(map) => map,
                            _ => {
                                return Err(JsonGridError::Unsupported(format!(
                                    "item {i} in column '{column}' is not a record"
                                )));
                            }
                        }
                    }
                    (FieldKindMut::NestedObject(map), None) => map,
                    (FieldKindMut::NestedList(_), None) => {
                        return Err(JsonGridError::Unsupported(format!(
                            "column '{column}' is a nested list and needs a row index"
                        )));
                    }
                    (FieldKindMut::NestedObject(_), Some(_)) => {
                        return Err(JsonGridError::Unsupported(format!(
                            "column '{column}' is a single-record table and takes no row index"
                        )));
                    }
                    (FieldKindMut::Primitive(_), _) => {
                        return Err(JsonGridError::Unsupported(format!(
                            "column '{column}' is not a nested table"
                        )));
                    }
                };
                let cell = target
                    .get_mut(field)
                    .ok_or_else(|| JsonGridError::UnknownColumn(field.clone()))?;
                if !matches!(classify(cell), FieldKind::Primitive(_)) {
                    return Err(JsonGridError::Unsupported(format!(
                        "field '{field}' holds structured data, not a cell"
                    )));
                }
                *cell = value;
            }
        }
        Ok(())
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}
