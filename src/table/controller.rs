//! The table controller.
//!
//! [`DataTable`] owns the data, the column set and the [`TableState`].
//! User operations become [`Action`] dispatches; searches go through a
//! debounced channel and are applied on the next [`DataTable::process_pending`].

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use super::debounce::{debounce, Debounce};
use super::pipeline::{page_slice, total_pages, PageSummary, SortCache};
use super::search::search;
use super::state::{reduce, Action, SearchColumn, TableState};
use super::style::TableStyles;
use crate::config::TableOptions;
use crate::data::{into_record_list, Column, Record, RecordList};

/// Callback invoked when a row is activated.
pub type RowClickHandler = Box<dyn FnMut(&Record)>;

/// The rows currently on screen plus pagination facts.
#[derive(Debug, Clone)]
pub struct Page {
    /// Rows of the current page, sorted.
    pub rows: Vec<Arc<Record>>,
    /// Number of pages for the filtered data.
    pub total_pages: usize,
    /// "Showing X to Y of Z entries".
    pub summary: PageSummary,
}

/// A searchable, sortable, paginated table over in-memory records.
pub struct DataTable {
    /// The latest data supplied by the caller.
    data: RecordList,
    columns: Vec<Column>,
    options: TableOptions,
    styles: TableStyles,
    state: TableState,
    sort_cache: SortCache,
    /// Debounced sender of search queries.
    search: Debounce<String>,
    /// Queries whose quiet window has elapsed.
    search_rx: mpsc::UnboundedReceiver<String>,
    on_row_click: Option<RowClickHandler>,
}

impl DataTable {
    /// Create a table over `data`.
    pub fn new(data: RecordList, columns: Vec<Column>, options: TableOptions) -> Self {
        let entries_per_page = options.default_entries_per_page.max(1);
        let state = TableState::new(
            data.clone(),
            &columns,
            entries_per_page,
            options.sort_column.clone(),
        );

        let (tx, search_rx) = mpsc::unbounded_channel();
        let search = debounce(
            move |query: String| {
                let _ = tx.send(query);
            },
            Duration::from_millis(options.search_debounce_ms),
        );

        debug!(
            rows = data.len(),
            columns = columns.len(),
            entries_per_page,
            "Creating data table"
        );

        Self {
            data,
            styles: TableStyles::from_options(&options),
            columns,
            options,
            state,
            sort_cache: SortCache::new(),
            search,
            search_rx,
            on_row_click: None,
        }
    }

    /// Create a table from owned records.
    pub fn from_records(records: Vec<Record>, columns: Vec<Column>, options: TableOptions) -> Self {
        Self::new(into_record_list(records), columns, options)
    }

    /// Register the callback invoked by [`DataTable::activate_row`].
    pub fn on_row_click(&mut self, handler: impl FnMut(&Record) + 'static) {
        self.on_row_click = Some(Box::new(handler));
    }

    /// Current state.
    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// The full data.
    pub fn data(&self) -> &RecordList {
        &self.data
    }

    /// All columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Columns in the visible set, in column order.
    pub fn visible_columns(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|column| self.state.visible_columns.contains(&column.key))
            .collect()
    }

    /// Options the table was built with.
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Presentation parameters derived from the options.
    pub fn styles(&self) -> &TableStyles {
        &self.styles
    }

    /// Apply an action to the state.
    pub fn dispatch(&mut self, action: Action) {
        trace!(action = action.name(), "Dispatch");
        self.state = reduce(self.state.clone(), action);
    }

    /// Replace the data. Only the filtered data is reset.
    pub fn set_data(&mut self, data: RecordList) {
        info!(rows = data.len(), "Table data replaced");
        self.data = data.clone();
        self.dispatch(Action::SetFilteredData(data));
    }

    /// Handle a change of the search box text.
    ///
    /// The term updates immediately; the filtering runs once the quiet
    /// window has passed and [`DataTable::process_pending`] is called.
    pub fn input_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.dispatch(Action::SetSearchTerm(text.clone()));
        self.search.call(text);
    }

    /// Whether a debounced search has not fired yet.
    pub fn is_search_pending(&self) -> bool {
        self.search.is_pending()
    }

    /// Apply the latest search whose quiet window has elapsed.
    ///
    /// Returns true if the filtered data changed.
    pub fn process_pending(&mut self) -> bool {
        let mut latest = None;
        while let Ok(query) = self.search_rx.try_recv() {
            latest = Some(query);
        }

        match latest {
            Some(query) => {
                self.apply_search(&query);
                true
            }
            None => false,
        }
    }

    /// Filter the data with `query` right away and go back to page 1.
    ///
    /// An empty query restores the full data.
    pub fn apply_search(&mut self, query: &str) {
        let results: RecordList = if query.is_empty() {
            self.data.clone()
        } else {
            search(query, &self.data, &self.columns, &self.state.search_column).into()
        };

        debug!(
            query,
            column = %self.state.search_column,
            matched = results.len(),
            "Search applied"
        );
        self.dispatch(Action::SetFilteredData(results));
        self.dispatch(Action::SetCurrentPage(1));
    }

    /// Restrict the search to one column, or all of them.
    ///
    /// A non-empty search term is re-run against the new column.
    pub fn set_search_column(&mut self, column: SearchColumn) {
        self.dispatch(Action::SetSearchColumn(column));
        if !self.state.search_term.is_empty() {
            let term = self.state.search_term.clone();
            self.search.call(term);
        }
    }

    /// Change the page size. Zero is ignored.
    pub fn set_entries_per_page(&mut self, entries_per_page: usize) {
        if entries_per_page == 0 {
            warn!("Ignoring zero entries per page");
            return;
        }
        self.dispatch(Action::SetEntriesPerPage(entries_per_page));
    }

    /// Handle a click on the header of `key`.
    pub fn click_header(&mut self, key: &str) {
        let spec = self.state.sort_column.clicked(key);
        debug!(key, direction = ?spec.direction, "Sort changed");
        self.dispatch(Action::SetSortColumn(spec));
    }

    /// Replace the visible-column set.
    pub fn set_visible_columns(&mut self, keys: BTreeSet<String>) {
        self.dispatch(Action::SetVisibleColumns(keys));
    }

    /// Number of pages for the filtered data.
    pub fn total_pages(&self) -> usize {
        total_pages(self.state.filtered_data.len(), self.state.entries_per_page)
    }

    /// Go to the previous page, stopping at page 1.
    pub fn previous_page(&mut self) {
        let page = self.state.current_page.saturating_sub(1).max(1);
        if page != self.state.current_page {
            self.dispatch(Action::SetCurrentPage(page));
        }
    }

    /// Go to the next page, stopping at the last one.
    pub fn next_page(&mut self) {
        let last = self.total_pages().max(1);
        let page = (self.state.current_page + 1).min(last);
        if page != self.state.current_page {
            self.dispatch(Action::SetCurrentPage(page));
        }
    }

    /// The rows of the current page.
    pub fn page(&mut self) -> Page {
        let total = self.state.filtered_data.len();
        let entries_per_page = self.state.entries_per_page;
        let current_page = self.state.current_page;

        let sorted = self
            .sort_cache
            .sorted(&self.state.filtered_data, &self.state.sort_column);
        let rows = page_slice(sorted, current_page, entries_per_page).to_vec();

        Page {
            rows,
            total_pages: total_pages(total, entries_per_page),
            summary: PageSummary::new(total, current_page, entries_per_page),
        }
    }

    /// How many times the sort has run.
    pub fn sort_recomputes(&self) -> usize {
        self.sort_cache.recomputes()
    }

    /// Activate the row at `index` on the current page.
    ///
    /// Invokes the row-click handler and returns the record.
    pub fn activate_row(&mut self, index: usize) -> Option<Arc<Record>> {
        let record = self.page().rows.get(index).cloned()?;
        debug!(id = record.id(), "Row activated");
        if let Some(handler) = self.on_row_click.as_mut() {
            handler(&record);
        }
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::state::{SortDirection, SortSpec};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("firstName", "First Name"),
            Column::new("lastName", "Last Name"),
            Column::new("dateOfBirth", "Date of Birth"),
            Column::new("startDate", "Start Date"),
            Column::new("street", "Street"),
            Column::new("city", "City"),
            Column::new("state", "State"),
            Column::new("zipCode", "Zip Code"),
            Column::new("department", "Department"),
        ]
    }

    fn person(
        id: i64,
        first: &str,
        last: &str,
        born: &str,
        started: &str,
        address: (&str, &str, &str, &str),
        department: &str,
    ) -> Record {
        Record::new(id.to_string())
            .with("id", id)
            .with("firstName", first)
            .with("lastName", last)
            .with("dateOfBirth", born)
            .with("startDate", started)
            .with("street", address.0)
            .with("city", address.1)
            .with("state", address.2)
            .with("zipCode", address.3)
            .with("department", department)
    }

    fn employees() -> Vec<Record> {
        let main = ("123 Main St", "Anytown", "CA", "12345");
        let elm = ("456 Elm St", "Somewhere", "NY", "54321");
        let maple = ("789 Maple St", "Nowhere", "TX", "67890");
        vec![
            person(1, "John", "Doe", "1990-01-01", "2021-06-01", main, "Engineering"),
            person(2, "Jane", "Smith", "1985-05-05", "2022-01-10", elm, "Marketing"),
            person(3, "Bob", "Smith", "1980-10-10", "2020-12-25", maple, "Sales"),
            person(4, "Joe", "Bloggs", "1975-03-15", "2021-06-01", main, "Engineering"),
            person(5, "Jane", "Doe", "1995-07-20", "2022-01-10", elm, "Marketing"),
            person(6, "John", "Smith", "1980-12-25", "2020-12-25", maple, "Sales"),
            person(7, "Bob", "Bloggs", "1975-08-30", "2021-06-01", main, "Engineering"),
            person(8, "Joe", "Doe", "1995-02-03", "2022-01-10", elm, "Marketing"),
            person(9, "Jane", "Smith", "1980-07-08", "2020-12-25", maple, "Sales"),
            person(10, "John", "Bloggs", "1975-12-13", "2021-06-01", main, "Engineering"),
            person(11, "Bob", "Doe", "1995-06-18", "2022-01-10", elm, "Marketing"),
            person(12, "Joe", "Smith", "1980-11-23", "2020-12-25", maple, "Sales"),
            person(13, "Jane", "Bloggs", "1975-04-28", "2021-06-01", main, "Engineering"),
        ]
    }

    fn table_with(options: TableOptions) -> DataTable {
        DataTable::from_records(employees(), columns(), options)
    }

    fn table() -> DataTable {
        table_with(TableOptions::default())
    }

    fn first_names(page: &Page) -> Vec<String> {
        page.rows.iter().map(|r| r.text("firstName")).collect()
    }

    fn ids(page: &Page) -> Vec<String> {
        page.rows.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn test_initial_page_shows_first_ten() {
        let mut table = table();
        let page = table.page();

        assert_eq!(page.rows.len(), 10);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.summary.to_string(), "Showing 1 to 10 of 13 entries");
        let johns = first_names(&page).iter().filter(|n| *n == "John").count();
        assert_eq!(johns, 3);
    }

    #[test]
    fn test_initial_rows_bounded_by_data_size() {
        let mut table = DataTable::from_records(
            employees().into_iter().take(4).collect(),
            columns(),
            TableOptions::default(),
        );
        assert_eq!(table.page().rows.len(), 4);
    }

    #[test]
    fn test_initial_state_from_options() {
        let table = table_with(TableOptions {
            default_entries_per_page: 25,
            sort_column: "lastName".to_string(),
            ..TableOptions::default()
        });
        assert_eq!(table.state().entries_per_page, 25);
        assert_eq!(table.state().sort_column, SortSpec::neutral("lastName"));
        assert_eq!(table.visible_columns().len(), 9);
    }

    #[test]
    fn test_search_without_runtime_applies_on_process() {
        let mut table = table();
        table.input_search("John");

        assert_eq!(table.state().search_term, "John");
        assert!(table.process_pending());

        let page = table.page();
        assert_eq!(page.rows.len(), 3);
        assert!(first_names(&page).iter().all(|n| n == "John"));
        assert!(!table.process_pending());
    }

    #[tokio::test]
    async fn test_debounced_search_excludes_jane() {
        let mut table = table();
        table.input_search("J");
        table.input_search("Jo");
        table.input_search("John");

        // Still inside the quiet window: nothing filtered yet.
        assert!(table.is_search_pending());
        assert!(!table.process_pending());
        assert_eq!(table.state().filtered_data.len(), 13);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(table.process_pending());

        let page = table.page();
        let names = first_names(&page);
        assert_eq!(names.len(), 3);
        assert!(names.iter().all(|n| n == "John"));
        assert!(!names.iter().any(|n| n == "Jane"));
    }

    #[test]
    fn test_search_results_are_subset_of_data() {
        let mut table = table();
        table.apply_search("smith");
        let data = table.data().clone();
        for record in table.state().filtered_data.iter() {
            assert!(data.iter().any(|r| Arc::ptr_eq(r, record)));
        }
    }

    #[test]
    fn test_empty_query_restores_full_data() {
        let mut table = table();
        table.apply_search("Doe");
        assert_eq!(table.state().filtered_data.len(), 4);

        table.apply_search("");
        assert!(Arc::ptr_eq(&table.state().filtered_data, table.data()));
    }

    #[test]
    fn test_search_terms_are_anded() {
        let mut table = table();
        table.apply_search("John Doe");
        let page = table.page();
        assert_eq!(ids(&page), vec!["1"]);
    }

    #[test]
    fn test_search_column_restriction() {
        let mut table = table();
        table.set_search_column(SearchColumn::Column("lastName".to_string()));
        table.apply_search("jo");
        assert!(table.state().filtered_data.is_empty());

        table.set_search_column(SearchColumn::All);
        table.apply_search("jo");
        assert_eq!(table.state().filtered_data.len(), 6);
    }

    #[test]
    fn test_changing_search_column_reruns_search() {
        let mut table = table();
        table.input_search("smith");
        table.process_pending();
        assert_eq!(table.state().filtered_data.len(), 5);

        table.set_search_column(SearchColumn::Column("firstName".to_string()));
        assert!(table.process_pending());
        assert!(table.state().filtered_data.is_empty());
    }

    #[test]
    fn test_header_click_cycle() {
        let mut table = table();
        assert_eq!(table.state().sort_column.direction, SortDirection::Neutral);

        table.click_header("firstName");
        assert_eq!(table.state().sort_column.direction, SortDirection::Ascending);
        assert_eq!(first_names(&table.page())[0], "Bob");

        table.click_header("firstName");
        assert_eq!(table.state().sort_column.direction, SortDirection::Descending);
        assert_eq!(first_names(&table.page())[0], "John");

        table.click_header("firstName");
        assert_eq!(table.state().sort_column.direction, SortDirection::Neutral);
        assert_eq!(ids(&table.page())[0], "1");

        table.click_header("firstName");
        assert_eq!(table.state().sort_column.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_other_header_starts_ascending() {
        let mut table = table();
        table.click_header("firstName");
        table.click_header("firstName");
        table.click_header("city");
        assert_eq!(
            table.state().sort_column,
            SortSpec {
                key: "city".to_string(),
                direction: SortDirection::Ascending
            }
        );
    }

    #[test]
    fn test_sort_is_memoized_across_pagination() {
        let mut table = table();
        table.click_header("lastName");
        table.page();
        let runs = table.sort_recomputes();

        table.next_page();
        table.page();
        table.set_entries_per_page(25);
        table.page();
        assert_eq!(table.sort_recomputes(), runs);

        table.click_header("lastName");
        table.page();
        assert_eq!(table.sort_recomputes(), runs + 1);
    }

    #[test]
    fn test_next_with_one_entry_per_page() {
        let mut table = table_with(TableOptions {
            default_entries_per_page: 1,
            ..TableOptions::default()
        });
        assert_eq!(ids(&table.page()), vec!["1"]);

        table.next_page();
        let page = table.page();
        assert_eq!(ids(&page), vec!["2"]);
        assert_eq!(first_names(&page), vec!["Jane"]);
    }

    #[test]
    fn test_previous_at_first_page_is_noop() {
        let mut table = table();
        table.previous_page();
        assert_eq!(table.state().current_page, 1);
    }

    #[test]
    fn test_next_at_last_page_is_noop() {
        let mut table = table();
        table.next_page();
        assert_eq!(table.state().current_page, 2);
        table.next_page();
        assert_eq!(table.state().current_page, 2);

        table.previous_page();
        assert_eq!(table.state().current_page, 1);
    }

    #[test]
    fn test_next_on_empty_result_stays_on_first_page() {
        let mut table = table();
        table.apply_search("nobody");
        table.next_page();
        assert_eq!(table.state().current_page, 1);
        assert_eq!(table.page().summary.to_string(), "Showing 0 to 0 of 0 entries");
    }

    #[test]
    fn test_entries_per_page_25_shows_everything() {
        let mut table = table();
        table.set_entries_per_page(25);
        let page = table.page();
        assert_eq!(page.rows.len(), 13);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_zero_entries_per_page_ignored() {
        let mut table = table();
        table.set_entries_per_page(0);
        assert_eq!(table.state().entries_per_page, 10);
    }

    #[test]
    fn test_search_resets_page() {
        let mut table = table_with(TableOptions {
            default_entries_per_page: 1,
            ..TableOptions::default()
        });
        for _ in 0..9 {
            table.next_page();
        }
        assert_eq!(table.state().current_page, 10);

        table.apply_search("John");
        assert_eq!(table.state().current_page, 1);
        assert_eq!(table.page().rows.len(), 1);
    }

    #[test]
    fn test_page_drift_after_shrinking_page_count() {
        // Raising the page size on a high page is not clamped; the slice
        // is simply empty until the user navigates back.
        let mut table = table_with(TableOptions {
            default_entries_per_page: 1,
            ..TableOptions::default()
        });
        for _ in 0..5 {
            table.next_page();
        }
        table.set_entries_per_page(10);

        let page = table.page();
        assert_eq!(table.state().current_page, 6);
        assert!(page.rows.is_empty());

        table.previous_page();
        table.previous_page();
        table.previous_page();
        table.previous_page();
        assert_eq!(table.page().rows.len(), 3);
    }

    #[test]
    fn test_set_data_resets_filtered_only() {
        let mut table = table();
        table.input_search("John");
        table.process_pending();
        table.set_entries_per_page(25);

        let replacement = into_record_list(vec![Record::new("x").with("firstName", "Xena")]);
        table.set_data(replacement.clone());

        assert!(Arc::ptr_eq(&table.state().filtered_data, &replacement));
        assert_eq!(table.state().search_term, "John");
        assert_eq!(table.state().entries_per_page, 25);
    }

    #[test]
    fn test_visible_columns_filtering() {
        let mut table = table();
        let keys: BTreeSet<String> = ["city".to_string(), "firstName".to_string()]
            .into_iter()
            .collect();
        table.set_visible_columns(keys);

        let visible: Vec<&str> = table.visible_columns().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(visible, vec!["firstName", "city"]);
    }

    #[test]
    fn test_activate_row_invokes_handler() {
        let mut table = table();
        let clicked = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&clicked);
        table.on_row_click(move |record| sink.borrow_mut().push(record.id().to_string()));

        let record = table.activate_row(0).unwrap();
        assert_eq!(record.text("firstName"), "John");
        assert_eq!(*clicked.borrow(), vec!["1".to_string()]);

        assert!(table.activate_row(99).is_none());
        assert_eq!(clicked.borrow().len(), 1);
    }

    #[test]
    fn test_activate_row_without_handler() {
        let mut table = table();
        assert!(table.activate_row(1).is_some());
    }
}
