//! Search box component and match highlighting.
//!
//! The box only edits text; the table decides what to do with it. Match
//! highlighting mirrors the search rules: every whitespace-separated term
//! is highlighted case-insensitively wherever it occurs in a cell.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::theme;

/// Text input for the search term.
#[derive(Debug, Clone, Default)]
pub struct SearchBox {
    /// The current query.
    query: String,
}

impl SearchBox {
    /// Create an empty search box.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Check if the query is empty.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    /// Handle keyboard input.
    ///
    /// Returns true if the query changed.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                let changed = !self.query.is_empty();
                self.query.clear();
                changed
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.query.push(c);
                true
            }
            (KeyCode::Backspace, _) => self.query.pop().is_some(),
            _ => false,
        }
    }

    /// Render the search box.
    ///
    /// `pending` shows that a search is waiting for its quiet window.
    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool, pending: bool) {
        let t = theme();

        let title = if pending { " Search … " } else { " Search " };
        let title_style = if focused {
            Style::default().fg(t.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(t.fg)
        };

        let block = Block::default()
            .title(Span::styled(title, title_style))
            .borders(Borders::ALL)
            .border_style(t.border_style(focused));

        let text = if self.query.is_empty() && !focused {
            Span::styled("press / to search", Style::default().fg(t.muted))
        } else {
            Span::styled(self.query.clone(), Style::default().fg(t.fg))
        };

        frame.render_widget(Paragraph::new(text).block(block), area);

        if focused {
            frame.set_cursor_position(cursor_position(area, &self.query));
        }
    }
}

/// Cursor cell after `query` inside the bordered `area`, kept within it.
fn cursor_position(area: Rect, query: &str) -> Position {
    let offset = u16::try_from(query.chars().count()).unwrap_or(u16::MAX);
    let x = area
        .x
        .saturating_add(1)
        .saturating_add(offset)
        .min(area.right().saturating_sub(2));
    Position::new(x, area.y.saturating_add(1))
}

/// Split a query into lowercase search terms.
pub fn query_terms(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

/// Highlight every occurrence of any of `terms` in `text`.
///
/// Matching is case-insensitive; the original casing is preserved in the
/// output spans.
pub fn highlight_terms(text: &str, terms: &[String]) -> Line<'static> {
    if terms.is_empty() || text.is_empty() {
        return Line::from(text.to_string());
    }

    // Lowercase the text while remembering, for each lowercase byte,
    // which original byte it came from.
    let mut lower = String::with_capacity(text.len());
    let mut origin: Vec<usize> = Vec::with_capacity(text.len() + 1);
    for (index, c) in text.char_indices() {
        for lc in c.to_lowercase() {
            let start = lower.len();
            lower.push(lc);
            origin.extend(std::iter::repeat(index).take(lower.len() - start));
        }
    }
    origin.push(text.len());

    let mut marked = vec![false; text.len()];
    for term in terms.iter().filter(|term| !term.is_empty()) {
        for (start, matched) in lower.match_indices(term.as_str()) {
            let from = origin[start];
            let to = origin[start + matched.len()];
            if to > from {
                marked[from..to].iter_mut().for_each(|m| *m = true);
            }
        }
    }

    let highlight = theme().match_style();
    let mut spans = Vec::new();
    let mut run_start = 0;
    let mut run_marked = marked.first().copied().unwrap_or(false);
    for (index, _) in text.char_indices().skip(1) {
        if marked[index] != run_marked {
            spans.push(span(&text[run_start..index], run_marked, highlight));
            run_start = index;
            run_marked = marked[index];
        }
    }
    spans.push(span(&text[run_start..], run_marked, highlight));

    Line::from(spans)
}

fn span(text: &str, marked: bool, highlight: Style) -> Span<'static> {
    if marked {
        Span::styled(text.to_string(), highlight)
    } else {
        Span::raw(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn terms(query: &str) -> Vec<String> {
        query_terms(query)
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut search = SearchBox::new();
        assert!(search.handle_input(key(KeyCode::Char('J'))));
        assert!(search.handle_input(key(KeyCode::Char('o'))));
        assert_eq!(search.query(), "Jo");

        assert!(search.handle_input(key(KeyCode::Backspace)));
        assert_eq!(search.query(), "J");
        assert!(search.handle_input(key(KeyCode::Backspace)));
        assert!(!search.handle_input(key(KeyCode::Backspace)));
        assert!(search.is_empty());
    }

    #[test]
    fn test_shifted_characters() {
        let mut search = SearchBox::new();
        assert!(search.handle_input(KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT)));
        assert_eq!(search.query(), "D");
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut search = SearchBox::new();
        search.handle_input(key(KeyCode::Char('a')));
        let clear = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert!(search.handle_input(clear));
        assert!(search.is_empty());
        assert!(!search.handle_input(clear));
    }

    #[test]
    fn test_navigation_keys_do_not_change_query() {
        let mut search = SearchBox::new();
        assert!(!search.handle_input(key(KeyCode::Enter)));
        assert!(!search.handle_input(key(KeyCode::Tab)));
    }

    #[test]
    fn test_cursor_follows_query() {
        let area = Rect::new(10, 2, 30, 3);
        assert_eq!(cursor_position(area, ""), Position::new(11, 3));
        assert_eq!(cursor_position(area, "abc"), Position::new(14, 3));
    }

    #[test]
    fn test_cursor_clamped_for_long_query() {
        let area = Rect::new(u16::MAX - 40, 0, 30, 3);
        let long = "x".repeat(usize::from(u16::MAX) + 10);
        let position = cursor_position(area, &long);
        assert_eq!(position.x, area.right() - 2);
    }

    #[test]
    fn test_query_terms() {
        assert_eq!(query_terms("  John   DOE "), vec!["john", "doe"]);
        assert!(query_terms("   ").is_empty());
    }

    #[test]
    fn test_highlight_no_terms() {
        let line = highlight_terms("Hello world", &[]);
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content, "Hello world");
    }

    #[test]
    fn test_highlight_no_match() {
        let line = highlight_terms("Hello world", &terms("xyz"));
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content, "Hello world");
    }

    #[test]
    fn test_highlight_single_match_keeps_case() {
        let line = highlight_terms("123 Main St", &terms("main"));
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[0].content, "123 ");
        assert_eq!(line.spans[1].content, "Main");
        assert_eq!(line.spans[1].style.bg, Some(Color::Yellow));
        assert_eq!(line.spans[2].content, " St");
    }

    #[test]
    fn test_highlight_multiple_terms() {
        let line = highlight_terms("John Doe", &terms("doe jo"));
        let contents: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(contents, vec!["Jo", "hn ", "Doe"]);
    }

    #[test]
    fn test_highlight_overlapping_terms_merge() {
        let line = highlight_terms("Engineering", &terms("engi gine"));
        let contents: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(contents, vec!["Engine", "ering"]);
    }

    #[test]
    fn test_highlight_whole_text() {
        let line = highlight_terms("CA", &terms("ca"));
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content, "CA");
        assert_eq!(line.spans[0].style.bg, Some(Color::Yellow));
    }

    #[test]
    fn test_highlight_non_ascii() {
        let line = highlight_terms("Ökonomie", &terms("öko"));
        assert_eq!(line.spans[0].content, "Öko");
        assert_eq!(line.spans[1].content, "nomie");
    }
}
