//! User interface components and views.
//!
//! This module contains all TUI rendering logic: the table view and the
//! reusable components it is built from.

pub mod components;
pub mod theme;
mod views;

pub use theme::theme;
pub use views::{Focus, TableView, TableViewAction};
