//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::data::Column;

/// Browse a JSON array of records as a searchable, sortable table.
#[derive(Debug, Parser)]
#[command(name = "datatable")]
#[command(about = "Searchable, sortable, paginated table for JSON records", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON file holding an array of objects
    #[arg(value_name = "DATA.json")]
    pub data: PathBuf,

    /// Columns to show, as comma-separated key:Title pairs
    #[arg(short, long, value_delimiter = ',', value_parser = parse_column)]
    pub columns: Vec<Column>,

    /// Initial page size
    #[arg(short, long, value_name = "N")]
    pub entries_per_page: Option<usize>,

    /// Initial sort column key
    #[arg(short, long, value_name = "KEY")]
    pub sort_column: Option<String>,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Apply command-line overrides on top of `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(n) = self.entries_per_page {
            config.table.default_entries_per_page = n;
        }
        if let Some(key) = &self.sort_column {
            config.table.sort_column = key.clone();
        }
    }
}

fn parse_column(spec: &str) -> Result<Column, String> {
    Column::parse(spec).ok_or_else(|| format!("invalid column '{}', expected key or key:Title", spec))
}
