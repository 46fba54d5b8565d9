//! Table state and its reducer.
//!
//! All interaction state lives in a single [`TableState`] value. The only
//! way to change it is to [`reduce`] it with an [`Action`]; each action
//! replaces exactly one field and performs no derived computation.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::data::{Column, RecordList};

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Keep the filtered order.
    #[default]
    Neutral,
    /// Natural order.
    Ascending,
    /// Reversed order.
    Descending,
}

impl SortDirection {
    /// The direction a repeated click on the same header moves to.
    pub fn cycle(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Neutral,
            SortDirection::Neutral => SortDirection::Ascending,
        }
    }

    /// Header indicator for this direction.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Neutral => "",
            SortDirection::Ascending => " ▲",
            SortDirection::Descending => " ▼",
        }
    }
}

/// The active sort target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Column key being sorted.
    pub key: String,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortSpec {
    /// A neutral sort on `key`.
    pub fn neutral(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Neutral,
        }
    }

    /// The spec produced by clicking the header of `key`.
    ///
    /// A different column always starts at ascending; the active column
    /// cycles ascending → descending → neutral → ascending.
    pub fn clicked(&self, key: &str) -> Self {
        let direction = if self.key == key {
            self.direction.cycle()
        } else {
            SortDirection::Ascending
        };
        Self {
            key: key.to_string(),
            direction,
        }
    }

    /// Direction shown on the header of `key`.
    pub fn direction_for(&self, key: &str) -> SortDirection {
        if self.key == key {
            self.direction
        } else {
            SortDirection::Neutral
        }
    }
}

/// Which columns the search looks at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchColumn {
    /// Every column.
    #[default]
    All,
    /// A single column key.
    Column(String),
}

impl SearchColumn {
    /// Whether the column with `key` is searched.
    pub fn includes(&self, key: &str) -> bool {
        match self {
            SearchColumn::All => true,
            SearchColumn::Column(selected) => selected == key,
        }
    }
}

impl fmt::Display for SearchColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchColumn::All => f.write_str("all"),
            SearchColumn::Column(key) => f.write_str(key),
        }
    }
}

impl FromStr for SearchColumn {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "all" {
            SearchColumn::All
        } else {
            SearchColumn::Column(s.to_string())
        })
    }
}

/// The table's interaction state.
#[derive(Debug, Clone)]
pub struct TableState {
    /// Text in the search box.
    pub search_term: String,
    /// Result of the last completed search, or the full data.
    pub filtered_data: RecordList,
    /// Column restriction for the search.
    pub search_column: SearchColumn,
    /// One-based page number.
    pub current_page: usize,
    /// Rows per page.
    pub entries_per_page: usize,
    /// Active sort.
    pub sort_column: SortSpec,
    /// Keys of the columns being shown.
    pub visible_columns: BTreeSet<String>,
}

impl TableState {
    /// Initial state for freshly mounted data.
    pub fn new(
        data: RecordList,
        columns: &[Column],
        entries_per_page: usize,
        sort_key: impl Into<String>,
    ) -> Self {
        Self {
            search_term: String::new(),
            filtered_data: data,
            search_column: SearchColumn::All,
            current_page: 1,
            entries_per_page,
            sort_column: SortSpec::neutral(sort_key),
            visible_columns: columns.iter().map(|c| c.key.clone()).collect(),
        }
    }
}

/// Every state transition the table knows about.
#[derive(Debug, Clone)]
pub enum Action {
    SetSearchTerm(String),
    SetFilteredData(RecordList),
    SetSearchColumn(SearchColumn),
    SetCurrentPage(usize),
    SetEntriesPerPage(usize),
    SetSortColumn(SortSpec),
    SetVisibleColumns(BTreeSet<String>),
}

impl Action {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetSearchTerm(_) => "SetSearchTerm",
            Action::SetFilteredData(_) => "SetFilteredData",
            Action::SetSearchColumn(_) => "SetSearchColumn",
            Action::SetCurrentPage(_) => "SetCurrentPage",
            Action::SetEntriesPerPage(_) => "SetEntriesPerPage",
            Action::SetSortColumn(_) => "SetSortColumn",
            Action::SetVisibleColumns(_) => "SetVisibleColumns",
        }
    }
}

/// Apply an action, returning the next state.
pub fn reduce(state: TableState, action: Action) -> TableState {
    match action {
        Action::SetSearchTerm(search_term) => TableState {
            search_term,
            ..state
        },
        Action::SetFilteredData(filtered_data) => TableState {
            filtered_data,
            ..state
        },
        Action::SetSearchColumn(search_column) => TableState {
            search_column,
            ..state
        },
        Action::SetCurrentPage(current_page) => TableState {
            current_page,
            ..state
        },
        Action::SetEntriesPerPage(entries_per_page) => TableState {
            entries_per_page,
            ..state
        },
        Action::SetSortColumn(sort_column) => TableState {
            sort_column,
            ..state
        },
        Action::SetVisibleColumns(visible_columns) => TableState {
            visible_columns,
            ..state
        },
    }
}
