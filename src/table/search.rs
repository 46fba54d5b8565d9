//! Multi-term, case-insensitive record search.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::trace;

use super::state::SearchColumn;
use crate::data::{Column, Record};

/// Lowercased, space-joined text of the searched columns of `record`.
pub fn searchable_text(record: &Record, columns: &[Column], search_column: &SearchColumn) -> String {
    columns
        .iter()
        .filter(|column| search_column.includes(&column.key))
        .map(|column| record.text(&column.key).to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether every term is a substring of at least one segment of `text`.
fn matches_all_terms(text: &str, terms: &[String]) -> bool {
    let segments: Vec<&str> = text.split_whitespace().collect();
    terms
        .iter()
        .all(|term| segments.iter().any(|segment| segment.contains(term.as_str())))
}

/// Return the records matching every whitespace-separated term of `query`.
///
/// Terms are matched case-insensitively as substrings of individual
/// segments of the searchable text, not of the whole concatenation.
/// Results keep input order and contain each record at most once.
pub fn search(
    query: &str,
    records: &[Arc<Record>],
    columns: &[Column],
    search_column: &SearchColumn,
) -> Vec<Arc<Record>> {
    let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();

    let mut seen: HashSet<*const Record> = HashSet::new();
    let results: Vec<Arc<Record>> = records
        .iter()
        .filter(|record| matches_all_terms(&searchable_text(record, columns, search_column), &terms))
        .filter(|record| seen.insert(Arc::as_ptr(record)))
        .cloned()
        .collect();

    trace!(
        query,
        terms = terms.len(),
        scanned = records.len(),
        matched = results.len(),
        "Search complete"
    );
    results
}
