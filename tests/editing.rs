//! End-to-end editing session against a temporary file store.

use jsongrid_core::{CellPath, CellView, ColumnKind, DocumentStore, FileStore, JsonGridError};
use serde_json::json;

fn sample_document() -> serde_json::Value {
    json!([
        {
            "id": 1,
            "name": "Project Alpha",
            "kpis": [
                {"metric": "Revenue", "value": 100},
                {"metric": "Cost", "value": 50}
            ],
            "owner": "Alice"
        },
        {
            "id": 2,
            "name": "Project Beta",
            "owner": "Bob",
            "kpis": [
                {"metric": "Revenue", "value": 200}
            ]
        }
    ])
}

#[test]
fn test_full_editing_session_round_trips_through_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store.save("demo", &sample_document()).unwrap();

    let mut doc = DocumentStore::new();
    doc.open(&store, "demo").unwrap();

    // Headers come out in first-appearance order across both records.
    let view = doc.project();
    assert_eq!(view.headers, vec!["id", "name", "kpis", "owner"]);

    // The kpis header set is shared across rows even though row 1 only
    // carries one nested record.
    for row in &view.rows {
        match &row.cells[2] {
            CellView::Nested(table) => {
                assert_eq!(table.headers, vec!["metric", "value"]);
            }
            other => panic!("expected nested kpis cell, got {other:?}"),
        }
    }

    // Top-level and nested edits, with coercion.
    doc.set_cell(0, &CellPath::Column("name".to_string()), "Project Gamma")
        .unwrap();
    doc.set_cell(
        1,
        &CellPath::Nested {
            column: "kpis".to_string(),
            index: Some(0),
            field: "value".to_string(),
        },
        "250",
    )
    .unwrap();

    // Structural changes.
    doc.add_column("status", ColumnKind::Primitive).unwrap();
    doc.add_nested_row(0, "kpis", &["metric".to_string(), "value".to_string()])
        .unwrap();
    doc.add_row();

    doc.save(&store, "demo").unwrap();

    let mut reloaded = DocumentStore::new();
    reloaded.open(&store, "demo").unwrap();
    let records = reloaded.snapshot();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["name"], json!("Project Gamma"));
    assert_eq!(records[1]["kpis"][0]["value"], json!(250));
    assert_eq!(records[0]["status"], json!(""));
    assert_eq!(records[1]["status"], json!(""));
    assert_eq!(records[0]["kpis"].as_array().unwrap().len(), 3);
    // Row 1's nested list was not touched by row 0's nested append.
    assert_eq!(records[1]["kpis"].as_array().unwrap().len(), 1);
    // The new row cloned the first record's shape, nested tables included.
    assert_eq!(
        records[2]["kpis"],
        json!([{"metric": "", "value": ""}])
    );
}

#[test]
fn test_revert_last_save_restores_previous_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store.save("demo", &sample_document()).unwrap();

    let mut doc = DocumentStore::new();
    doc.open(&store, "demo").unwrap();
    doc.set_cell(0, &CellPath::Column("owner".to_string()), "Mallory")
        .unwrap();
    doc.save(&store, "demo").unwrap();

    doc.revert_last_save(&store, "demo").unwrap();
    assert_eq!(doc.snapshot()[0]["owner"], json!("Alice"));
}

#[test]
fn test_upload_then_open_under_the_new_id() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    let payload = serde_json::to_vec(&sample_document()).unwrap();
    let receipt = store.upload(&payload).unwrap();

    let mut doc = DocumentStore::new();
    doc.open(&store, &receipt.id).unwrap();
    assert_eq!(doc.row_count(), 2);
}

#[test]
fn test_failed_mutations_leave_the_session_document_intact() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store.save("demo", &sample_document()).unwrap();

    let mut doc = DocumentStore::with_max_columns(4);
    doc.open(&store, "demo").unwrap();
    let before = doc.to_value();

    assert!(matches!(
        doc.add_column("extra", ColumnKind::Primitive),
        Err(JsonGridError::Capacity { limit: 4 })
    ));
    assert!(matches!(
        doc.add_column("name", ColumnKind::Primitive),
        Err(JsonGridError::DuplicateColumn(_))
    ));
    assert!(matches!(
        doc.set_cell(9, &CellPath::Column("name".to_string()), "x"),
        Err(JsonGridError::RowOutOfBounds { .. })
    ));
    assert_eq!(doc.to_value(), before);
}
