//! Document model and mutation logic (UI- and transport-agnostic).

mod io;
mod ops;
mod project;
pub mod schema;
mod state;
mod value;

pub use ops::ColumnKind;
pub use project::{
    CellView, GridView, NestedRecordView, NestedRowView, NestedTableView, OpaqueItemView,
    PrimitiveCell, RowView,
};
pub use state::{CellPath, DocumentStore, DEFAULT_MAX_COLUMNS};
pub use value::{classify, classify_mut, coerce, display_text, FieldKind, FieldKindMut, Record};
