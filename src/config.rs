//! Environment-driven configuration (reads .env when present).

use std::env;
use std::path::PathBuf;

pub struct Config {
    pub data_dir: PathBuf,
    pub max_columns: usize,
    pub max_upload_mb: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Config {
            data_dir: env::var("JSONGRID_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            max_columns: parse_var("JSONGRID_MAX_COLUMNS")
                .unwrap_or(jsongrid_core::document::DEFAULT_MAX_COLUMNS),
            max_upload_mb: parse_var("JSONGRID_MAX_UPLOAD_MB").unwrap_or(1),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|value| value.parse().ok())
}
