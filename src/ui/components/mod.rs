//! Reusable UI components.

mod row;
mod search_box;
mod selector;

pub use row::{render_row, visible_cells};
pub use search_box::{highlight_terms, query_terms, SearchBox};
pub use selector::{Selector, SelectorAction, SelectorItem};
