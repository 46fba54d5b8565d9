//! The data table view.
//!
//! Lays out the controls row (page size, search column, search box), the
//! sortable table and the pagination bar, and routes key input to the
//! focused control. Every state change goes through [`DataTable`].

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
    Frame,
};
use tracing::debug;

use crate::config::ENTRIES_PER_PAGE_OPTIONS;
use crate::data::Record;
use crate::events::KeyBindings;
use crate::table::{DataTable, SearchColumn, Size};
use crate::ui::components::{
    query_terms, render_row, SearchBox, Selector, SelectorAction, SelectorItem,
};
use crate::ui::theme::theme;

/// Height of the controls row when sized automatically.
const CONTROLS_HEIGHT: u16 = 3;

/// Height of the pagination bar when sized automatically.
const PAGINATION_HEIGHT: u16 = 1;

/// Which control receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Entries-per-page selector.
    Entries,
    /// Search column selector.
    SearchColumn,
    /// Search box.
    Search,
    /// The table body.
    #[default]
    Table,
}

impl Focus {
    /// The next control in Tab order.
    pub fn next(self) -> Self {
        match self {
            Focus::Entries => Focus::SearchColumn,
            Focus::SearchColumn => Focus::Search,
            Focus::Search => Focus::Table,
            Focus::Table => Focus::Entries,
        }
    }

    /// The previous control in Tab order.
    pub fn prev(self) -> Self {
        match self {
            Focus::Entries => Focus::Table,
            Focus::SearchColumn => Focus::Entries,
            Focus::Search => Focus::SearchColumn,
            Focus::Table => Focus::Search,
        }
    }
}

/// Actions that can be returned from the table view.
#[derive(Debug, Clone, PartialEq)]
pub enum TableViewAction {
    /// A row was activated with Enter.
    RowActivated(Arc<Record>),
}

/// The table screen.
pub struct TableView {
    table: DataTable,
    focus: Focus,
    entries: Selector,
    search_column: Selector,
    search: SearchBox,
    /// Cursor row within the current page.
    selected_row: usize,
    keys: KeyBindings,
}

impl TableView {
    /// Create a view around `table`.
    pub fn new(table: DataTable, keys: KeyBindings) -> Self {
        // A configured page size outside the fixed options is offered too.
        let current = table.state().entries_per_page;
        let mut sizes = ENTRIES_PER_PAGE_OPTIONS.to_vec();
        if !sizes.contains(&current) {
            sizes.push(current);
            sizes.sort_unstable();
        }
        let mut entries = Selector::new(
            "Show entries",
            sizes
                .iter()
                .map(|n| SelectorItem::new(n.to_string(), n.to_string()))
                .collect(),
        );
        entries.select_by_id(&current.to_string());

        let mut columns = vec![SelectorItem::new(SearchColumn::All.to_string(), "All")];
        columns.extend(
            table
                .columns()
                .iter()
                .map(|column| SelectorItem::new(column.key.clone(), column.title.clone())),
        );
        let search_column = Selector::new("Search column", columns);

        Self {
            table,
            focus: Focus::default(),
            entries,
            search_column,
            search: SearchBox::new(),
            selected_row: 0,
            keys,
        }
    }

    /// The underlying table.
    pub fn table(&self) -> &DataTable {
        &self.table
    }

    /// Mutable access to the underlying table.
    pub fn table_mut(&mut self) -> &mut DataTable {
        &mut self.table
    }

    /// The focused control.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Cursor row within the current page.
    pub fn selected_row(&self) -> usize {
        self.selected_row
    }

    /// Whether key input is going into the search box.
    pub fn is_editing(&self) -> bool {
        self.focus == Focus::Search
    }

    /// Apply finished debounced searches. Returns true if rows changed.
    pub fn tick(&mut self) -> bool {
        let changed = self.table.process_pending();
        if changed {
            self.selected_row = 0;
        }
        changed
    }

    /// Handle keyboard input.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<TableViewAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Tab, _) => {
                self.focus = self.focus.next();
                return None;
            }
            (KeyCode::BackTab, _) => {
                self.focus = self.focus.prev();
                return None;
            }
            (KeyCode::Char('/'), KeyModifiers::NONE) if self.focus != Focus::Search => {
                self.focus = Focus::Search;
                return None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Entries => {
                if let Some(SelectorAction::Changed(id)) = self.entries.handle_input(key, &self.keys) {
                    if let Ok(entries_per_page) = id.parse::<usize>() {
                        self.table.set_entries_per_page(entries_per_page);
                        self.selected_row = 0;
                    }
                }
                None
            }
            Focus::SearchColumn => {
                if let Some(SelectorAction::Changed(id)) =
                    self.search_column.handle_input(key, &self.keys)
                {
                    let column: SearchColumn = match id.parse() {
                        Ok(column) => column,
                        Err(never) => match never {},
                    };
                    self.table.set_search_column(column);
                }
                None
            }
            Focus::Search => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                    self.focus = Focus::Table;
                } else if self.search.handle_input(key) {
                    self.table.input_search(self.search.query());
                }
                None
            }
            Focus::Table => self.handle_table_input(key),
        }
    }

    fn handle_table_input(&mut self, key: KeyEvent) -> Option<TableViewAction> {
        if self.keys.is_down(&key) {
            let rows = self.table.page().rows.len();
            if self.selected_row + 1 < rows {
                self.selected_row += 1;
            }
        } else if self.keys.is_up(&key) {
            self.selected_row = self.selected_row.saturating_sub(1);
        } else if self.keys.is_left(&key) {
            self.table.previous_page();
            self.selected_row = 0;
        } else if self.keys.is_right(&key) {
            self.table.next_page();
            self.selected_row = 0;
        } else if key.code == KeyCode::Enter {
            return self
                .table
                .activate_row(self.selected_row)
                .map(TableViewAction::RowActivated);
        } else if let KeyCode::Char(c @ '1'..='9') = key.code {
            let index = (c as usize) - ('1' as usize);
            let key = self
                .table
                .visible_columns()
                .get(index)
                .map(|column| column.key.clone());
            if let Some(key) = key {
                debug!(column = %key, "Header clicked");
                self.table.click_header(&key);
            }
        }
        None
    }

    /// Render the view.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let styles = self.table.styles().clone();

        let width = styles.container_width.resolve(area.width, area.width);
        let area = Rect { width, ..area };

        let body = match styles.body.height {
            Size::Auto => Constraint::Min(3),
            other => other.constraint(3),
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                styles.header.height.constraint(CONTROLS_HEIGHT),
                body,
                styles.pagination.height.constraint(PAGINATION_HEIGHT),
            ])
            .split(area);

        self.render_controls(frame, chunks[0]);
        self.render_table(frame, chunks[1]);
        self.render_pagination(frame, chunks[2]);
    }

    fn render_controls(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(18),
                Constraint::Length(24),
                Constraint::Min(10),
            ])
            .split(area);

        self.entries
            .render(frame, chunks[0], self.focus == Focus::Entries);
        self.search_column
            .render(frame, chunks[1], self.focus == Focus::SearchColumn);
        self.search.render(
            frame,
            chunks[2],
            self.focus == Focus::Search,
            self.table.is_search_pending(),
        );
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let page = self.table.page();
        let state = self.table.state();
        let terms = query_terms(&state.search_term);
        let columns = self.table.visible_columns();

        let header_cells: Vec<String> = columns
            .iter()
            .map(|column| {
                let direction = state.sort_column.direction_for(&column.key);
                format!("{}{}", column.title, direction.indicator())
            })
            .collect();
        let header = Row::new(header_cells).style(t.header_style()).height(1);

        let rows: Vec<Row> = page
            .rows
            .iter()
            .map(|record| render_row(record, self.table.columns(), &state.visible_columns, &terms))
            .collect();

        let widths: Vec<Constraint> = columns
            .iter()
            .map(|_| Constraint::Ratio(1, columns.len().max(1) as u32))
            .collect();

        let focused = self.focus == Focus::Table;
        let block = Block::default()
            .title(Span::styled(" Records ", t.header_style()))
            .borders(Borders::ALL)
            .border_style(t.border_style(focused));

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .highlight_style(t.selected_row_style())
            .highlight_symbol("> ");

        let mut table_state = TableState::default();
        if focused && !page.rows.is_empty() {
            table_state.select(Some(self.selected_row.min(page.rows.len() - 1)));
        }

        frame.render_stateful_widget(table, area, &mut table_state);
    }

    fn render_pagination(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let page = self.table.page();
        let current = self.table.state().current_page;

        let previous_style = if current > 1 {
            Style::default().fg(t.accent)
        } else {
            Style::default().fg(t.muted)
        };
        let next_style = if current < page.total_pages {
            Style::default().fg(t.accent)
        } else {
            Style::default().fg(t.muted)
        };

        let line = Line::from(vec![
            Span::styled("◀ Previous", previous_style),
            Span::raw("   "),
            Span::styled(page.summary.to_string(), Style::default().fg(t.fg)),
            Span::raw("   "),
            Span::styled(
                format!("Page {}/{}", current, page.total_pages.max(1)),
                Style::default().fg(t.muted).add_modifier(Modifier::ITALIC),
            ),
            Span::raw("   "),
            Span::styled("Next ▶", next_style),
        ]);

        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }
}
