//! Session-only favorite/listened flags.
//!
//! The catalogue itself never changes; everything the user toggles lives
//! here, keyed by episode number. Nothing is written to disk.

use std::collections::HashMap;

/// Flags layered over one catalogue entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overlay {
    pub favorite: bool,
    pub listened: bool,
}

/// Owned map from episode number to its overlay flags.
///
/// Numbers that were never toggled read as the default (both false).
#[derive(Debug, Clone, Default)]
pub struct OverlayStore {
    flags: HashMap<u32, Overlay>,
}

impl OverlayStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flags for `number`, defaulting to all-false.
    pub fn get(&self, number: u32) -> Overlay {
        self.flags.get(&number).copied().unwrap_or_default()
    }

    pub fn is_favorite(&self, number: u32) -> bool {
        self.get(number).favorite
    }

    pub fn is_listened(&self, number: u32) -> bool {
        self.get(number).listened
    }

    /// Flip the favorite flag and return the new value.
    pub fn toggle_favorite(&mut self, number: u32) -> bool {
        let entry = self.flags.entry(number).or_default();
        entry.favorite = !entry.favorite;
        entry.favorite
    }

    /// Flip the listened flag and return the new value.
    pub fn toggle_listened(&mut self, number: u32) -> bool {
        let entry = self.flags.entry(number).or_default();
        entry.listened = !entry.listened;
        entry.listened
    }

    /// Count of episodes currently marked as favorite.
    pub fn favorite_count(&self) -> usize {
        self.flags.values().filter(|o| o.favorite).count()
    }

    /// Count of episodes currently marked as listened.
    pub fn listened_count(&self) -> usize {
        self.flags.values().filter(|o| o.listened).count()
    }
}
