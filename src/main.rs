//! jsongrid - edit JSON record documents as a spreadsheet-like grid.

use clap::{Parser, Subcommand};
use jsongrid_core::{CellPath, ColumnKind, DocumentStore, FileStore, Limits};
use std::path::PathBuf;
use std::time::Duration;

mod config;
mod render;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "jsongrid")]
#[command(about = "Edit JSON record documents as a grid", long_about = None)]
struct Cli {
    /// Document id to operate on.
    #[arg(long, default_value = "demo")]
    id: String,

    /// Data directory (defaults to JSONGRID_DATA_DIR, then ./data).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the document as a grid.
    Show,
    /// Write one cell. Use --field (and --index for lists) for nested cells.
    Set {
        row: usize,
        column: String,
        value: String,

        /// Nested row index (omit when the cell is a single-record table).
        #[arg(long)]
        index: Option<usize>,

        /// Nested column key.
        #[arg(long)]
        field: Option<String>,
    },
    /// Append a row shaped like the first record.
    AddRow,
    /// Add a column to every record.
    AddColumn {
        key: String,

        /// Comma-separated sub-columns; makes the new column a nested table.
        #[arg(long, value_delimiter = ',')]
        nested: Option<Vec<String>>,
    },
    /// Delete a row.
    DeleteRow { row: usize },
    /// Delete a column from every record.
    DeleteColumn { key: String },
    /// Append a record to a nested table.
    AddNestedRow {
        row: usize,
        key: String,

        /// Comma-separated sub-columns for the new record.
        #[arg(value_delimiter = ',')]
        sub_keys: Vec<String>,
    },
    /// Delete a record from a nested table.
    DeleteNestedRow {
        row: usize,
        key: String,
        index: usize,
    },
    /// Import a JSON file under a freshly assigned id.
    Upload { file: PathBuf },
    /// Print (or write) the stored document as pretty JSON.
    Download {
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },
    /// Undo the last save.
    Revert,
    /// Seed the demo document if it does not exist yet.
    Init,
    /// Delete stored documents older than the given age.
    Gc {
        #[arg(long, default_value_t = 24)]
        max_age_hours: u64,
    },
}

fn demo_document() -> serde_json::Value {
    serde_json::json!([
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

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let cfg = config::Config::from_env();

    let data_dir = cli.data_dir.unwrap_or(cfg.data_dir);
    let store = FileStore::new(data_dir)
        .with_limits(Limits {
            max_keys_per_record: cfg.max_columns,
        })
        .with_max_upload_bytes(cfg.max_upload_mb * 1024 * 1024);
    let mut doc = DocumentStore::with_max_columns(cfg.max_columns);
    let id = cli.id;

    match cli.cmd {
        Commands::Show => {
            doc.open(&store, &id)?;
            print!("{}", render::render_grid(&doc.project()));
        }
        Commands::Set {
            row,
            column,
            value,
            index,
            field,
        } => {
            doc.open(&store, &id)?;
            let path = match field {
                Some(field) => CellPath::Nested {
                    column,
                    index,
                    field,
                },
                None => CellPath::Column(column),
            };
            doc.set_cell(row, &path, &value)?;
            doc.save(&store, &id)?;
            println!("Saved.");
        }
        Commands::AddRow => {
            doc.open(&store, &id)?;
            doc.add_row();
            doc.save(&store, &id)?;
            println!("Row added.");
        }
        Commands::AddColumn { key, nested } => {
            doc.open(&store, &id)?;
            let kind = match nested {
                Some(sub_keys) => ColumnKind::Nested(sub_keys),
                None => ColumnKind::Primitive,
            };
            doc.add_column(&key, kind)?;
            doc.save(&store, &id)?;
            println!("Column '{key}' added.");
        }
        Commands::DeleteRow { row } => {
            doc.open(&store, &id)?;
            doc.delete_row(row)?;
            doc.save(&store, &id)?;
            println!("Row {row} deleted.");
        }
        Commands::DeleteColumn { key } => {
            doc.open(&store, &id)?;
            doc.delete_column(&key);
            doc.save(&store, &id)?;
            println!("Column '{key}' deleted.");
        }
        Commands::AddNestedRow { row, key, sub_keys } => {
            doc.open(&store, &id)?;
            doc.add_nested_row(row, &key, &sub_keys)?;
            doc.save(&store, &id)?;
            println!("Nested row added to '{key}'.");
        }
        Commands::DeleteNestedRow { row, key, index } => {
            doc.open(&store, &id)?;
            doc.delete_nested_row(row, &key, index)?;
            doc.save(&store, &id)?;
            println!("Nested row {index} deleted from '{key}'.");
        }
        Commands::Upload { file } => {
            let bytes = std::fs::read(&file)?;
            let receipt = store.upload(&bytes)?;
            println!("{} New id: {}", receipt.message, receipt.id);
        }
        Commands::Download { out } => {
            let json = store.download(&id)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("Wrote {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Commands::Revert => {
            doc.revert_last_save(&store, &id)?;
            println!("Reverted '{id}' to its previous save.");
        }
        Commands::Init => {
            if store.exists(&id)? {
                println!("Document '{id}' already exists.");
            } else {
                store.save(&id, &demo_document())?;
                println!("Seeded document '{id}'.");
            }
        }
        Commands::Gc { max_age_hours } => {
            let removed = store.sweep_stale(Duration::from_secs(max_age_hours * 3600))?;
            println!("Removed {removed} stale file(s).");
        }
    }
    Ok(())
}
