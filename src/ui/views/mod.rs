//! Application views (screens).

mod table_view;

pub use table_view::{Focus, TableView, TableViewAction};
