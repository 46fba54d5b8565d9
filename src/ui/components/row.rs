//! Row renderer.
//!
//! Turns one record into a table row holding only the visible columns,
//! in column order.

use std::collections::BTreeSet;

use ratatui::widgets::{Cell, Row};

use super::search_box::highlight_terms;
use crate::data::{Column, Record};

/// The visible cell texts of `record`, in column order.
pub fn visible_cells(record: &Record, columns: &[Column], visible: &BTreeSet<String>) -> Vec<String> {
    columns
        .iter()
        .filter(|column| visible.contains(&column.key))
        .map(|column| record.text(&column.key))
        .collect()
}

/// Render `record` as a row, highlighting search `terms` in each cell.
pub fn render_row(
    record: &Record,
    columns: &[Column],
    visible: &BTreeSet<String>,
    terms: &[String],
) -> Row<'static> {
    let cells: Vec<Cell<'static>> = visible_cells(record, columns, visible)
        .iter()
        .map(|text| Cell::from(highlight_terms(text, terms)))
        .collect();
    Row::new(cells)
}
