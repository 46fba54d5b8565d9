//! Inline selector for a short, fixed list of options.
//!
//! The selector shows its current value inside a bordered box. While it
//! has focus, Left/Right (or h/l) cycle through the options; every change
//! is reported to the parent as a [`SelectorAction`].

use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::events::KeyBindings;
use crate::ui::theme::theme;

/// A single option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorItem {
    /// Value reported on selection.
    pub id: String,
    /// Text shown to the user.
    pub label: String,
}

impl SelectorItem {
    /// Create a new option.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Action resulting from selector input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorAction {
    /// The selection moved to the option with this id.
    Changed(String),
}

/// A cycling selector.
#[derive(Debug, Clone)]
pub struct Selector {
    /// Title shown on the border.
    label: String,
    items: Vec<SelectorItem>,
    selected: usize,
}

impl Selector {
    /// Create a selector. The first item starts selected.
    pub fn new(label: impl Into<String>, items: Vec<SelectorItem>) -> Self {
        Self {
            label: label.into(),
            items,
            selected: 0,
        }
    }

    /// The options.
    pub fn items(&self) -> &[SelectorItem] {
        &self.items
    }

    /// The selected option.
    pub fn selected_item(&self) -> Option<&SelectorItem> {
        self.items.get(self.selected)
    }

    /// Select the option with `id`, if present.
    pub fn select_by_id(&mut self, id: &str) {
        if let Some(index) = self.items.iter().position(|item| item.id == id) {
            self.selected = index;
        }
    }

    /// Handle keyboard input.
    pub fn handle_input(&mut self, key: KeyEvent, keys: &KeyBindings) -> Option<SelectorAction> {
        if self.items.is_empty() {
            return None;
        }

        let next = if keys.is_left(&key) && self.selected > 0 {
            self.selected - 1
        } else if keys.is_right(&key) && self.selected + 1 < self.items.len() {
            self.selected + 1
        } else {
            return None;
        };

        self.selected = next;
        Some(SelectorAction::Changed(self.items[next].id.clone()))
    }

    /// Render the selector.
    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let t = theme();

        let value = self
            .selected_item()
            .map(|item| item.label.clone())
            .unwrap_or_default();
        let at_start = self.selected == 0;
        let at_end = self.selected + 1 >= self.items.len();
        let display = format!(
            "{} {} {}",
            if at_start { " " } else { "◀" },
            value,
            if at_end { " " } else { "▶" }
        );

        let (text_style, title_style) = if focused {
            (
                Style::default().fg(t.accent),
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            )
        } else {
            (Style::default().fg(t.fg), Style::default().fg(t.fg))
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", self.label), title_style))
            .borders(Borders::ALL)
            .border_style(t.border_style(focused));

        frame.render_widget(Paragraph::new(display).style(text_style).block(block), area);
    }
}
