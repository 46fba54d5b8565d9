//! Event handling for the application.
//!
//! Terminal input is polled by [`EventHandler`] and turned into [`Event`]s
//! for the app's update loop.

mod handler;
mod keys;

pub use handler::EventHandler;
pub use keys::KeyBindings;

use crossterm::event::KeyEvent;

/// An application event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// No input within the tick rate.
    Tick,
    /// Request to leave the application.
    Quit,
}
