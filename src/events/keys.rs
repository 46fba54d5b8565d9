//! Key binding definitions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key binding configuration.
///
/// Arrow keys always work; with `vim_mode` h/j/k/l work too.
#[derive(Debug, Clone, Copy)]
pub struct KeyBindings {
    /// Whether vim-style bindings are enabled.
    pub vim_mode: bool,
}

impl KeyBindings {
    /// Create new key bindings.
    pub fn new(vim_mode: bool) -> Self {
        Self { vim_mode }
    }

    fn is(&self, key: &KeyEvent, arrow: KeyCode, vim: char) -> bool {
        key.code == arrow
            || (self.vim_mode && key.code == KeyCode::Char(vim) && key.modifiers == KeyModifiers::NONE)
    }

    /// Move down.
    pub fn is_down(&self, key: &KeyEvent) -> bool {
        self.is(key, KeyCode::Down, 'j')
    }

    /// Move up.
    pub fn is_up(&self, key: &KeyEvent) -> bool {
        self.is(key, KeyCode::Up, 'k')
    }

    /// Move left / previous.
    pub fn is_left(&self, key: &KeyEvent) -> bool {
        self.is(key, KeyCode::Left, 'h')
    }

    /// Move right / next.
    pub fn is_right(&self, key: &KeyEvent) -> bool {
        self.is(key, KeyCode::Right, 'l')
    }

    /// Quit the application.
    pub fn is_quit(&self, key: &KeyEvent) -> bool {
        matches!(
            (key.code, key.modifiers),
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Char('q'), KeyModifiers::NONE)
        )
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrows_always_work() {
        let keys = KeyBindings::new(false);
        assert!(keys.is_down(&key(KeyCode::Down)));
        assert!(keys.is_up(&key(KeyCode::Up)));
        assert!(keys.is_left(&key(KeyCode::Left)));
        assert!(keys.is_right(&key(KeyCode::Right)));
    }

    #[test]
    fn test_vim_keys_need_vim_mode() {
        assert!(!KeyBindings::new(false).is_down(&key(KeyCode::Char('j'))));
        assert!(KeyBindings::new(true).is_down(&key(KeyCode::Char('j'))));
        assert!(KeyBindings::default().is_right(&key(KeyCode::Char('l'))));
    }

    #[test]
    fn test_quit_keys() {
        let keys = KeyBindings::default();
        assert!(keys.is_quit(&key(KeyCode::Char('q'))));
        assert!(keys.is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!keys.is_quit(&key(KeyCode::Char('c'))));
    }
}
