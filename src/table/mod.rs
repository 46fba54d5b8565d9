//! The data table core.
//!
//! State, reducer, search, sort/paginate pipeline, debounce and the
//! controller tying them together. Nothing in here renders; the `ui`
//! module consumes [`DataTable`] to draw it.

mod controller;
mod debounce;
mod pipeline;
mod search;
mod state;
mod style;

pub use controller::{DataTable, Page, RowClickHandler};
pub use debounce::{debounce, Debounce};
pub use pipeline::{locale_compare, page_slice, sort_records, total_pages, PageSummary, SortCache};
pub use search::{search, searchable_text};
pub use state::{reduce, Action, SearchColumn, SortDirection, SortSpec, TableState};
pub use style::{InvalidSize, SectionStyle, Size, TableStyles};
