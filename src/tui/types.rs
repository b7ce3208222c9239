//! TUI type definitions for focus, filter rows and actions.

/// Which part of the screen receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The episode card and its navigation
    Card,
    /// The expanded filter panel
    Filters,
    /// The title search bar
    Search,
}

/// Rows of the filter panel, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRow {
    Character,
    Mood,
    Listened,
    Favorites,
    Reset,
}

impl FilterRow {
    pub const ALL: [FilterRow; 5] = [
        FilterRow::Character,
        FilterRow::Mood,
        FilterRow::Listened,
        FilterRow::Favorites,
        FilterRow::Reset,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FilterRow::Character => "Charakter",
            FilterRow::Mood => "Stimmung",
            FilterRow::Listened => "Status",
            FilterRow::Favorites => "Nur Favoriten",
            FilterRow::Reset => "Filter zurücksetzen",
        }
    }
}

/// Actions that need the event loop rather than the app state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No action, continue running
    None,
    /// Quit the application
    Quit,
    /// Open a streaming link outside the terminal
    OpenLink(String),
}
