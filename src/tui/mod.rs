//! Terminal User Interface for geheimzentrale using ratatui.
//!
//! This module provides a full-screen TUI showing one episode card at a
//! time, with a filter panel, a search bar and mouse-drag navigation.

mod render;
mod state;
mod types;

pub use render::draw;
pub use state::App;
pub use types::{Action, FilterRow, Focus};

use crossterm::event::{self, Event};
use std::io;
use std::time::Duration;

/// Poll for keyboard and mouse events with a timeout.
pub fn poll_event(timeout: Duration) -> io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}
