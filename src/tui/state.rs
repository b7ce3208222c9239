//! Application state management and input handling.

use crate::browse::Browser;
use crate::config::{ColorScheme, Keybindings};
use crate::gesture::Swipe;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use log::debug;
use ratatui::layout::{Position, Rect};
use ratatui::widgets::ListState;

use super::types::{Action, FilterRow, Focus};

/// Pointer units per terminal column. Mouse columns are scaled by this so
/// the swipe threshold keeps roughly the feel of a pixel distance.
pub const UNITS_PER_COLUMN: i32 = 8;

/// Horizontal position of the card shifted by `columns`, kept inside `bounds`.
pub(super) fn shifted(card: Rect, bounds: Rect, columns: i32) -> Rect {
    let min_x = i32::from(bounds.x);
    let max_x = i32::from(bounds.x) + i32::from(bounds.width) - i32::from(card.width);
    let x = (i32::from(card.x) + columns).clamp(min_x, max_x.max(min_x));
    Rect {
        x: x as u16,
        ..card
    }
}

/// Application state for the TUI.
pub struct App {
    /// Catalogue, filters and the current card
    pub browser: Browser,
    /// Which panel receives key input
    pub focus: Focus,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Search text as typed
    pub search_input: String,
    /// Selected row in the filter panel
    pub filter_list_state: ListState,
    /// Whether help modal is shown
    pub show_help: bool,
    /// Error message to display
    pub error_message: Option<String>,
    /// Transient status line
    pub status_message: Option<String>,
    pub keybindings: Keybindings,
    pub colors: ColorScheme,
    /// Resting card area from the last draw
    pub card_area: Rect,
    /// Area the card may slide within while dragged
    pub card_bounds: Rect,
    /// Progress indicator area from the last draw
    pub dots_area: Rect,
    /// Filtered index of the first dot drawn in `dots_area`
    pub dots_start: usize,
}

impl App {
    /// Create a new App around a browser.
    pub fn new(browser: Browser, keybindings: Keybindings, colors: ColorScheme) -> Self {
        let mut filter_list_state = ListState::default();
        filter_list_state.select(Some(0));

        Self {
            browser,
            focus: Focus::Card,
            should_quit: false,
            search_input: String::new(),
            filter_list_state,
            show_help: false,
            error_message: None,
            status_message: None,
            keybindings,
            colors,
            card_area: Rect::default(),
            card_bounds: Rect::default(),
            dots_area: Rect::default(),
            dots_start: 0,
        }
    }

    /// Where the card is drawn: the resting area, or shifted along with the
    /// pointer while a drag is in progress.
    pub fn visible_card_area(&self) -> Rect {
        let gesture = self.browser.gesture();
        if gesture.is_dragging() {
            shifted(
                self.card_area,
                self.card_bounds,
                gesture.offset() / UNITS_PER_COLUMN,
            )
        } else {
            self.card_area
        }
    }

    pub fn filters_open(&self) -> bool {
        self.focus == Focus::Filters
    }

    /// The filter row currently highlighted.
    pub fn selected_filter_row(&self) -> FilterRow {
        let i = self.filter_list_state.selected().unwrap_or(0);
        FilterRow::ALL[i.min(FilterRow::ALL.len() - 1)]
    }

    /// Set an error message.
    pub fn set_error(&mut self, message: &str) {
        self.error_message = Some(message.to_string());
    }

    /// Clear error message.
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    /// Reset all filters and the search text.
    pub fn reset_filters(&mut self) {
        self.browser.reset_filters();
        self.search_input.clear();
        self.set_status("Filter zurückgesetzt");
    }

    /// Handle keyboard input and return an action.
    pub fn handle_input(&mut self, key: KeyEvent) -> Action {
        // Global quit with Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Action::Quit;
        }

        if self.show_help {
            if key.code == KeyCode::Esc
                || self.keybindings.matches(&self.keybindings.help, &key)
                || self.keybindings.matches(&self.keybindings.quit, &key)
            {
                self.show_help = false;
            }
            return Action::None;
        }

        if self.focus == Focus::Search {
            return self.handle_search_input(key);
        }

        if self.keybindings.matches(&self.keybindings.help, &key) {
            self.show_help = true;
            return Action::None;
        }

        self.status_message = None;

        match self.focus {
            Focus::Filters => self.handle_filter_input(key),
            _ => self.handle_card_input(key),
        }
    }

    fn handle_search_input(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter => {
                self.focus = Focus::Card;
            }
            KeyCode::Esc => {
                self.search_input.clear();
                self.browser.set_query("");
                self.focus = Focus::Card;
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
                self.browser.set_query(&self.search_input);
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                self.browser.set_query(&self.search_input);
            }
            _ => {}
        }
        Action::None
    }

    fn handle_filter_input(&mut self, key: KeyEvent) -> Action {
        let kb = &self.keybindings;

        if kb.matches(&kb.filters, &key) || key.code == KeyCode::Esc {
            self.focus = Focus::Card;
        } else if kb.matches(&kb.up, &key) {
            let i = self.filter_list_state.selected().unwrap_or(0);
            if i > 0 {
                self.filter_list_state.select(Some(i - 1));
            }
        } else if kb.matches(&kb.down, &key) {
            let i = self.filter_list_state.selected().unwrap_or(0);
            if i < FilterRow::ALL.len() - 1 {
                self.filter_list_state.select(Some(i + 1));
            }
        } else if kb.matches(&kb.previous, &key) {
            self.change_filter(false);
        } else if kb.matches(&kb.next, &key) || kb.matches(&kb.select, &key) {
            self.change_filter(true);
        } else if kb.matches(&kb.reset, &key) {
            self.reset_filters();
        } else if kb.matches(&kb.random, &key) {
            self.browser.randomize();
        } else if kb.matches(&kb.quit, &key) {
            self.should_quit = true;
            return Action::Quit;
        }
        Action::None
    }

    fn change_filter(&mut self, forward: bool) {
        match self.selected_filter_row() {
            FilterRow::Character => self.browser.update_criteria(|c| c.cycle_character(forward)),
            FilterRow::Mood => self.browser.update_criteria(|c| c.cycle_mood(forward)),
            FilterRow::Listened => self.browser.update_criteria(|c| c.cycle_listened(forward)),
            FilterRow::Favorites => {
                self.browser.update_criteria(|c| c.favorite_only = !c.favorite_only)
            }
            FilterRow::Reset => self.reset_filters(),
        }
    }

    fn handle_card_input(&mut self, key: KeyEvent) -> Action {
        let kb = &self.keybindings;

        if kb.matches(&kb.quit, &key) {
            self.should_quit = true;
            return Action::Quit;
        }
        if kb.matches(&kb.filters, &key) {
            self.focus = Focus::Filters;
            return Action::None;
        }
        if kb.matches(&kb.search, &key) {
            self.focus = Focus::Search;
            return Action::None;
        }
        if kb.matches(&kb.reset, &key) {
            self.reset_filters();
            return Action::None;
        }

        // Nothing matches: only reset, filters, search and quit apply
        if self.browser.is_empty() {
            if kb.matches(&kb.select, &key) {
                self.reset_filters();
            }
            return Action::None;
        }

        let current = self.browser.current_index();
        if kb.matches(&kb.next, &key) {
            self.browser.next();
        } else if kb.matches(&kb.previous, &key) {
            self.browser.previous();
        } else if kb.matches(&kb.first, &key) {
            self.browser.first();
        } else if kb.matches(&kb.last, &key) {
            self.browser.last();
        } else if kb.matches(&kb.random, &key) {
            self.browser.randomize();
        } else if kb.matches(&kb.favorite, &key) {
            self.browser.toggle_favorite(current);
        } else if kb.matches(&kb.listened, &key) {
            self.browser.toggle_listened(current);
        } else if kb.matches(&kb.open_link, &key) {
            let link = self
                .browser
                .current_episode()
                .and_then(|e| e.links.streaming_url.clone());
            match link {
                Some(url) => return Action::OpenLink(url),
                None => self.set_status("Kein Streaming-Link für diese Folge"),
            }
        }
        Action::None
    }

    /// Handle a mouse event: card drags, dot clicks and scrolling.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Action {
        if self.show_help {
            return Action::None;
        }

        let pos = Position::new(mouse.column, mouse.row);
        let x = i32::from(mouse.column) * UNITS_PER_COLUMN;
        // The card follows the pointer, so only leaving it vertically or
        // hitting the clamped edge ends a drag early
        let on_card = self.visible_card_area().contains(pos);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if on_card && !self.browser.is_empty() {
                    self.browser.press(x);
                } else if self.dots_area.contains(pos) {
                    let index = self.dots_start + usize::from(mouse.column - self.dots_area.x) / 2;
                    self.browser.jump_to(index);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if on_card {
                    self.browser.drag_to(x);
                } else {
                    self.release_drag();
                }
            }
            MouseEventKind::Moved if !on_card => self.release_drag(),
            MouseEventKind::Up(MouseButton::Left) => self.release_drag(),
            MouseEventKind::ScrollDown if on_card => self.browser.next(),
            MouseEventKind::ScrollUp if on_card => self.browser.previous(),
            _ => {}
        }
        Action::None
    }

    fn release_drag(&mut self) {
        if let Some(swipe) = self.browser.release() {
            if swipe != Swipe::SpringBack {
                debug!("Swipe {:?} -> index {}", swipe, self.browser.current_index());
            }
        }
    }
}
