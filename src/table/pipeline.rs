//! Sort and paginate derivation.
//!
//! The displayed rows are derived in two stages. Sorting depends only on
//! the filtered data and the sort spec, so it is memoized in a
//! [`SortCache`]; slicing into pages is cheap and runs on every render.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use tracing::trace;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::state::{SortDirection, SortSpec};
use crate::data::{Record, RecordList};

/// Compare two strings the way a user expects a sorted column to read.
///
/// Three levels, each only consulted on a tie of the previous one: base
/// letters with accents stripped and case folded, then accents (unaccented
/// first), then case (lowercase first). Raw byte order breaks any final tie.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| case_order(a, b))
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn case_order(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.nfd().zip(b.nfd()) {
        if ca != cb {
            match (ca.is_lowercase(), cb.is_lowercase()) {
                (true, false) => return Ordering::Less,
                (false, true) => return Ordering::Greater,
                _ => {}
            }
        }
    }
    Ordering::Equal
}

/// Return a sorted copy of `records`.
///
/// A neutral direction keeps the input order untouched.
pub fn sort_records(records: &[Arc<Record>], spec: &SortSpec) -> Vec<Arc<Record>> {
    let mut sorted = records.to_vec();
    if spec.direction == SortDirection::Neutral {
        return sorted;
    }

    // Keys are coerced once up front rather than on every comparison.
    let mut keyed: Vec<(String, Arc<Record>)> = sorted
        .drain(..)
        .map(|record| (record.text(&spec.key), record))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match spec.direction {
        SortDirection::Descending => locale_compare(b, a),
        _ => locale_compare(a, b),
    });

    keyed.into_iter().map(|(_, record)| record).collect()
}

/// Memoized sort output.
///
/// Recomputes only when the filtered list (by identity) or the sort spec
/// changes.
#[derive(Debug, Default)]
pub struct SortCache {
    source: Option<RecordList>,
    spec: Option<SortSpec>,
    sorted: Vec<Arc<Record>>,
    recomputes: usize,
}

impl SortCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorted rows for the given inputs.
    pub fn sorted(&mut self, filtered: &RecordList, spec: &SortSpec) -> &[Arc<Record>] {
        let fresh = self
            .source
            .as_ref()
            .is_some_and(|source| Arc::ptr_eq(source, filtered))
            && self.spec.as_ref() == Some(spec);

        if !fresh {
            trace!(rows = filtered.len(), key = %spec.key, direction = ?spec.direction, "Re-sorting rows");
            self.sorted = sort_records(filtered, spec);
            self.source = Some(filtered.clone());
            self.spec = Some(spec.clone());
            self.recomputes += 1;
        }

        &self.sorted
    }

    /// How many times the sort actually ran.
    pub fn recomputes(&self) -> usize {
        self.recomputes
    }
}

/// Number of pages needed for `len` rows.
pub fn total_pages(len: usize, entries_per_page: usize) -> usize {
    if entries_per_page == 0 {
        return 0;
    }
    (len + entries_per_page - 1) / entries_per_page
}

/// The rows of one page, clamped to the bounds of `rows`.
///
/// An out-of-range page yields an empty slice.
pub fn page_slice<T>(rows: &[T], current_page: usize, entries_per_page: usize) -> &[T] {
    let start = current_page
        .saturating_sub(1)
        .saturating_mul(entries_per_page)
        .min(rows.len());
    let end = current_page.saturating_mul(entries_per_page).min(rows.len());
    &rows[start..end.max(start)]
}

/// The "Showing X to Y of Z entries" status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    /// First row number shown (one-based).
    pub from: usize,
    /// Last row number shown.
    pub to: usize,
    /// Total rows after filtering.
    pub total: usize,
}

impl PageSummary {
    /// Compute the summary for a page.
    pub fn new(total: usize, current_page: usize, entries_per_page: usize) -> Self {
        let from = current_page
            .saturating_sub(1)
            .saturating_mul(entries_per_page)
            .saturating_add(1)
            .min(total);
        let to = current_page.saturating_mul(entries_per_page).min(total);
        Self { from, to, total }
    }
}

impl fmt::Display for PageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Showing {} to {} of {} entries",
            self.from, self.to, self.total
        )
    }
}
