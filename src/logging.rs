//! Tracing setup.
//!
//! Events go to `<data_local_dir>/datatable/logs/datatable.log.<date>`,
//! never to the terminal the table is drawn on. `RUST_LOG` overrides the
//! default filter, e.g. `RUST_LOG=datatable=trace` logs every dispatch.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

const DEFAULT_LOG_FILTER: &str = "datatable=info,warn";

const LOG_FILE_PREFIX: &str = "datatable.log";

/// Install the global subscriber and return the directory logs go to.
pub fn init() -> anyhow::Result<PathBuf> {
    let base = dirs::data_local_dir().context("Could not determine local data directory")?;
    let log_dir = log_dir_in(&base);
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Could not create {}", log_dir.display()))?;

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(RollingFileAppender::new(
                    Rotation::DAILY,
                    &log_dir,
                    LOG_FILE_PREFIX,
                ))
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter(std::env::var("RUST_LOG").ok().as_deref()));
    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_dir = %log_dir.display(),
        "datatable starting up"
    );
    Ok(log_dir)
}

fn log_dir_in(base: &Path) -> PathBuf {
    base.join("datatable").join("logs")
}

/// The filter from `directives`, or the default when absent or invalid.
fn filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_under_base() {
        let base = tempfile::tempdir().unwrap();
        let dir = log_dir_in(base.path());
        assert!(dir.starts_with(base.path()));
        assert!(dir.ends_with("datatable/logs"));
    }

    #[test]
    fn test_filter_defaults() {
        assert_eq!(filter(None).to_string(), EnvFilter::new(DEFAULT_LOG_FILTER).to_string());
    }

    #[test]
    fn test_filter_uses_directives() {
        assert_eq!(filter(Some("datatable=trace")).to_string(), "datatable=trace");
    }
}
