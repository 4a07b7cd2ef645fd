//! Structural operations: rows, columns, nested rows.

use super::state::DocumentStore;
use super::value::{classify, classify_mut, empty_cell, FieldKind, FieldKindMut, Record};
use crate::error::{JsonGridError, Result};
use serde_json::Value;

/// Shape of a newly added column.
#[derive(Debug, Clone)]
pub enum ColumnKind {
    Primitive,
    /// Ordered sub-columns for a nested-table column. Must be non-empty.
    Nested(Vec<String>),
}

/// A record with the given keys, each set to the blank cell value.
fn blank_record<I, S>(keys: I) -> Record
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut record = Record::new();
    for key in keys {
        record.insert(key.as_ref().to_string(), empty_cell());
    }
    record
}

/// A blank row shaped like `first`, so the new row is immediately editable
/// without re-declaring nested shape.
fn clone_row_shape(first: &Record) -> Record {
    let mut row = Record::new();
    for (key, value) in first {
        let blank = match classify(value) {
            FieldKind::NestedList(items) => {
                // The first nested record provides the sub-column template;
                // a list with no records stays an empty table.
                let template = items.iter().find_map(|item| match classify(item) {
                    FieldKind::NestedObject(map) => Some(map),
                    _ => None,
                });
                match template {
                    Some(map) => Value::Array(vec![Value::Object(blank_record(map.keys()))]),
                    None => Value::Array(Vec::new()),
                }
            }
            FieldKind::NestedObject(map) => Value::Object(blank_record(map.keys())),
            FieldKind::Primitive(_) => empty_cell(),
        };
        row.insert(key.clone(), blank);
    }
    row
}

impl DocumentStore {
    /// Append a row. An empty document gains one record with no keys;
    /// otherwise the new row clones the shape of the first record.
    pub fn add_row(&mut self) {
        let row = match self.records.first() {
            None => Record::new(),
            Some(first) => clone_row_shape(first),
        };
        self.records.push(row);
    }

    /// Add a column to every record.
    ///
    /// The first record decides duplicates and capacity. A primitive column
    /// starts empty everywhere; a nested column starts as a one-record table
    /// with the given sub-columns everywhere. On an empty document this
    /// creates a single record holding only the new column.
    pub fn add_column(&mut self, key: &str, kind: ColumnKind) -> Result<()> {
        if let ColumnKind::Nested(sub_keys) = &kind {
            if sub_keys.is_empty() {
                return Err(JsonGridError::MissingSubColumns);
            }
        }
        if let Some(first) = self.records.first() {
            if first.contains_key(key) {
                return Err(JsonGridError::DuplicateColumn(key.to_string()));
            }
            if first.len() >= self.max_columns() {
                return Err(JsonGridError::Capacity {
                    limit: self.max_columns(),
                });
            }
        }

        let template = || match &kind {
            ColumnKind::Primitive => empty_cell(),
            ColumnKind::Nested(sub_keys) => {
                Value::Array(vec![Value::Object(blank_record(sub_keys))])
            }
        };

        if self.records.is_empty() {
            let mut record = Record::new();
            record.insert(key.to_string(), template());
            self.records.push(record);
        } else {
            for record in &mut self.records {
                record.insert(key.to_string(), template());
            }
        }
        Ok(())
    }

    /// Remove a column from every record. Records without the key are left
    /// alone; this is never an error.
    pub fn delete_column(&mut self, key: &str) {
        for record in &mut self.records {
            record.shift_remove(key);
        }
    }

    /// Remove one row.
    pub fn delete_row(&mut self, index: usize) -> Result<()> {
        let len = self.records.len();
        if index >= len {
            return Err(JsonGridError::RowOutOfBounds { index, len });
        }
        self.records.remove(index);
        Ok(())
    }

    /// Append a record to the nested list at `key` in one row.
    ///
    /// Single-record tables do not grow rows; addressing one (or a
    /// primitive column) fails without touching the document.
    pub fn add_nested_row(&mut self, row: usize, key: &str, sub_keys: &[String]) -> Result<()> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(row)
            .ok_or(JsonGridError::RowOutOfBounds { index: row, len })?;
        let slot = record
            .get_mut(key)
            .ok_or_else(|| JsonGridError::UnknownColumn(key.to_string()))?;
        match classify_mut(slot) {
            FieldKindMut::NestedList(items) => {
                items.push(Value::Object(blank_record(sub_keys)));
                Ok(())
            }
            FieldKindMut::NestedObject(_) => Err(JsonGridError::Unsupported(format!(
                "column '{key}' is a single-record table and cannot grow rows"
            ))),
            FieldKindMut::Primitive(_) => Err(JsonGridError::Unsupported(format!(
                "column '{key}' is not a nested table"
            ))),
        }
    }

    /// Remove one record from the nested list at `key` in one row.
    pub fn delete_nested_row(&mut self, row: usize, key: &str, nested_index: usize) -> Result<()> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(row)
            .ok_or(JsonGridError::RowOutOfBounds { index: row, len })?;
        let slot = record
            .get_mut(key)
            .ok_or_else(|| JsonGridError::UnknownColumn(key.to_string()))?;
        match classify_mut(slot) {
            FieldKindMut::NestedList(items) => {
                let len = items.len();
                if nested_index >= len {
                    return Err(JsonGridError::NestedRowOutOfBounds {
                        index: nested_index,
                        len,
                    });
                }
                items.remove(nested_index);
                Ok(())
            }
            FieldKindMut::NestedObject(_) => Err(JsonGridError::Unsupported(format!(
                "column '{key}' is a single-record table and cannot drop rows"
            ))),
            FieldKindMut::Primitive(_) => Err(JsonGridError::Unsupported(format!(
                "column '{key}' is not a nested table"
            ))),
        }
    }
}
