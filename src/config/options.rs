//! Table presentation options.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};
use crate::table::Size;

/// Page sizes offered by the entries-per-page selector.
pub const ENTRIES_PER_PAGE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// Options controlling a table's initial state and presentation.
///
/// Every field has a default, so a configuration file only needs to
/// mention what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Initial page size.
    pub default_entries_per_page: usize,
    /// Initial sort column key. The sort starts neutral.
    pub sort_column: String,
    /// Height of the controls row.
    pub header_height: String,
    /// Height of the table body.
    pub table_body_height: String,
    /// Height of the pagination bar.
    pub pagination_height: String,
    pub header_font_size: String,
    pub table_body_font_size: String,
    pub pagination_font_size: String,
    pub font_family: String,
    /// Width of the whole widget.
    pub container_width: String,
    /// Quiet window for search input, in milliseconds.
    pub search_debounce_ms: u64,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            default_entries_per_page: 10,
            sort_column: "name".to_string(),
            header_height: "auto".to_string(),
            table_body_height: "auto".to_string(),
            pagination_height: "auto".to_string(),
            header_font_size: "1rem".to_string(),
            table_body_font_size: "1rem".to_string(),
            pagination_font_size: "1rem".to_string(),
            font_family: "Arial".to_string(),
            container_width: "100%".to_string(),
            search_debounce_ms: 150,
        }
    }
}

impl TableOptions {
    /// Validate these options.
    ///
    /// Checks that:
    /// - The page size is positive
    /// - Every height and the container width parse as sizes
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.default_entries_per_page == 0 {
            return Err(ConfigError::ValidationError(
                "default_entries_per_page must be greater than zero".to_string(),
            ));
        }

        let sizes = [
            ("header_height", &self.header_height),
            ("table_body_height", &self.table_body_height),
            ("pagination_height", &self.pagination_height),
            ("container_width", &self.container_width),
        ];
        for (field, value) in sizes {
            if let Err(e) = value.parse::<Size>() {
                return Err(ConfigError::ValidationError(format!("{}: {}", field, e)));
            }
        }

        Ok(())
    }
}
