//! datatable - a searchable, sortable, paginated data table for the terminal.
//!
//! The [`table`] module holds the widget logic (state reducer, debounced
//! search, sort and pagination pipeline) and is independent of the
//! terminal; [`ui`] and [`app`] put it on screen.

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod logging;
pub mod table;
pub mod ui;

pub use data::{Column, Record};
pub use table::DataTable;
