//! Column set inference.

use super::value::{classify, FieldKind, Record};
use std::collections::HashSet;

/// Derive the ordered column set of a sequence of records.
///
/// Keys appear in first-occurrence order across records; a key is never
/// repeated and never removed. Runs in O(total keys).
pub fn columns<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for record in records {
        for key in record.keys() {
            if seen.insert(key.clone()) {
                out.push(key.clone());
            }
        }
    }
    out
}

/// Derive the shared sub-column set of one nested column.
///
/// Unions the keys of every nested record found under `key` across all
/// parent rows, whether the field there is a list or a single object, so
/// sibling nested tables in the same column render with identical headers.
pub fn nested_columns<'a, I>(records: I, key: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    let push_keys = |map: &Record, seen: &mut HashSet<String>, out: &mut Vec<String>| {
        for sub_key in map.keys() {
            if seen.insert(sub_key.clone()) {
                out.push(sub_key.clone());
            }
        }
    };
    for record in records {
        let Some(value) = record.get(key) else {
            continue;
        };
        match classify(value) {
            FieldKind::NestedList(items) => {
                for item in items {
                    if let FieldKind::NestedObject(map) = classify(item) {
                        push_keys(map, &mut seen, &mut out);
                    }
                }
            }
            FieldKind::NestedObject(map) => push_keys(map, &mut seen, &mut out),
            FieldKind::Primitive(_) => {}
        }
    }
    out
}
