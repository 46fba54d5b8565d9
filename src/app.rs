//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern for predictable
//! state management in the TUI application.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{debug, info, trace};

use crate::config::Settings;
use crate::events::{Event, KeyBindings};
use crate::table::DataTable;
use crate::ui::{theme, Focus, TableView, TableViewAction};

/// How long a status message stays in the footer.
const STATUS_DURATION: Duration = Duration::from_secs(3);

/// A transient message shown in the footer.
#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    created_at: Instant,
}

impl StatusMessage {
    fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            created_at: Instant::now(),
        }
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() > STATUS_DURATION
    }
}

/// The main application struct that holds all state.
///
/// This implements the Model part of The Elm Architecture (TEA).
pub struct App {
    /// Title shown in the header.
    title: String,
    /// The table screen.
    view: TableView,
    /// Whether the application should quit.
    should_quit: bool,
    /// Footer status message.
    status: Option<StatusMessage>,
    keys: KeyBindings,
}

impl App {
    /// Create a new application around `table`.
    pub fn new(title: impl Into<String>, table: DataTable, settings: &Settings) -> Self {
        debug!("Creating new application instance");
        let keys = KeyBindings::new(settings.vim_mode);
        Self {
            title: title.into(),
            view: TableView::new(table, keys),
            should_quit: false,
            status: None,
            keys,
        }
    }

    /// The table view.
    pub fn view_state(&self) -> &TableView {
        &self.view
    }

    /// The current status message, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.text.as_str())
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Update the application state based on an event.
    ///
    /// This implements the Update part of The Elm Architecture (TEA).
    /// All state changes flow through this method for predictable behavior.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Quit => {
                info!("Quit event received");
                self.should_quit = true;
            }
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => self.handle_tick(),
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        // Ctrl+C always quits; 'q' only when not typing a query.
        let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL;
        if ctrl_c || (!self.view.is_editing() && self.keys.is_quit(&key)) {
            info!("Quit requested");
            self.should_quit = true;
            return;
        }

        if let Some(TableViewAction::RowActivated(record)) = self.view.handle_input(key) {
            info!(id = record.id(), "Row activated");
            self.status = Some(StatusMessage::new(format!("Selected record {}", record.id())));
        }
    }

    fn handle_tick(&mut self) {
        if self.view.tick() {
            debug!(
                results = self.view.table().state().filtered_data.len(),
                "Search applied"
            );
        }
        if self.status.as_ref().is_some_and(StatusMessage::is_expired) {
            self.status = None;
        }
    }

    /// Render the application UI.
    ///
    /// This implements the View part of The Elm Architecture (TEA).
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(1),    // Content
                Constraint::Length(1), // Footer/Status bar
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.view.render(frame, chunks[1]);
        self.render_footer(frame, chunks[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let title = Paragraph::new(self.title.as_str())
            .style(Style::default().fg(theme().accent))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(theme().border)),
            );
        frame.render_widget(title, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let (mode, hints) = match self.view.focus() {
            Focus::Search => ("SEARCH", "Type to filter  Ctrl+U clear  Esc/Enter done"),
            Focus::Entries | Focus::SearchColumn => ("SELECT", "←/→ change  Tab next"),
            Focus::Table => (
                "TABLE",
                "j/k row  h/l page  1-9 sort  Enter select  / search  Tab focus  q quit",
            ),
        };

        let mut spans = vec![
            Span::styled(
                format!(" {} ", mode),
                Style::default().fg(Color::Black).bg(theme().accent),
            ),
            Span::raw(" "),
        ];
        match &self.status {
            Some(status) => spans.push(Span::styled(
                status.text.clone(),
                Style::default().fg(Color::Green),
            )),
            None => spans.push(Span::styled(hints, Style::default().fg(theme().muted))),
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
