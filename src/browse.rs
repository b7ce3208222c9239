//! Browse state: the filtered view, the current card and its navigation.
//!
//! [`Browser`] owns the immutable catalogue, the session overlay flags and
//! the active filters. The filtered view is recomputed whenever filters or
//! overlay flags change, and `current_index` is clamped positionally against
//! the new length.

use crate::filter::{self, FilterCriteria};
use crate::gesture::{GestureTracker, Swipe};
use crate::overlay::{Overlay, OverlayStore};
use crate::types::Episode;
use log::debug;
use rand::Rng;
use std::time::{Duration, Instant};

/// How long the randomizer's spin effect lasts.
pub const DEFAULT_SPIN_DURATION: Duration = Duration::from_millis(600);

pub struct Browser {
    episodes: Vec<Episode>,
    overlay: OverlayStore,
    criteria: FilterCriteria,
    query: String,
    /// Positions into `episodes`, in catalogue order.
    filtered: Vec<usize>,
    current_index: usize,
    gesture: GestureTracker,
    spin_duration: Duration,
    spin_until: Option<Instant>,
}

impl Browser {
    /// Create a browser over `episodes` with fresh overlay flags.
    pub fn new(episodes: Vec<Episode>) -> Self {
        Self::with_overlay(episodes, OverlayStore::new())
    }

    /// Create a browser with a pre-populated overlay store.
    pub fn with_overlay(episodes: Vec<Episode>, overlay: OverlayStore) -> Self {
        let mut browser = Self {
            episodes,
            overlay,
            criteria: FilterCriteria::default(),
            query: String::new(),
            filtered: Vec::new(),
            current_index: 0,
            gesture: GestureTracker::default(),
            spin_duration: DEFAULT_SPIN_DURATION,
            spin_until: None,
        };
        browser.refilter();
        browser
    }

    pub fn set_swipe_threshold(&mut self, threshold: u16) {
        self.gesture = GestureTracker::new(threshold);
    }

    pub fn set_spin_duration(&mut self, duration: Duration) {
        self.spin_duration = duration;
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn overlay(&self) -> &OverlayStore {
        &self.overlay
    }

    /// Overlay flags for an episode.
    pub fn flags(&self, episode: &Episode) -> Overlay {
        self.overlay.get(episode.number)
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn gesture(&self) -> &GestureTracker {
        &self.gesture
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    pub fn is_at_start(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.current_index + 1 >= self.filtered.len()
    }

    /// The filtered view in catalogue order.
    pub fn filtered_episodes(&self) -> Vec<&Episode> {
        self.filtered.iter().map(|&i| &self.episodes[i]).collect()
    }

    /// Episode at `position` in the filtered view.
    pub fn filtered_episode(&self, position: usize) -> Option<&Episode> {
        self.filtered.get(position).map(|&i| &self.episodes[i])
    }

    /// The card currently shown, or `None` when nothing matches.
    pub fn current_episode(&self) -> Option<&Episode> {
        self.filtered_episode(self.current_index)
    }

    pub fn next(&mut self) {
        if self.current_index + 1 < self.filtered.len() {
            self.current_index += 1;
        }
    }

    pub fn previous(&mut self) {
        if self.current_index > 0 {
            self.current_index -= 1;
        }
    }

    pub fn first(&mut self) {
        self.current_index = 0;
    }

    pub fn last(&mut self) {
        self.current_index = self.filtered.len().saturating_sub(1);
    }

    /// Show the card at `index`. Indices outside the view are ignored.
    pub fn jump_to(&mut self, index: usize) {
        if index < self.filtered.len() {
            self.current_index = index;
        }
    }

    /// Jump to a uniformly random card using the thread RNG.
    pub fn randomize(&mut self) -> Option<usize> {
        self.randomize_with(&mut rand::thread_rng())
    }

    /// Jump to a uniformly random card and start the spin effect.
    ///
    /// The current card may be picked again. Returns the chosen index, or
    /// `None` when the view is empty.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        if self.filtered.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.filtered.len());
        self.current_index = index;
        self.spin_until = Some(Instant::now() + self.spin_duration);
        debug!("Random pick: index {} of {}", index, self.filtered.len());
        Some(index)
    }

    /// Whether the spin effect is still running at `now`.
    pub fn is_spinning(&self, now: Instant) -> bool {
        self.spin_until.is_some_and(|until| now < until)
    }

    /// Drop an expired spin deadline.
    pub fn tick(&mut self, now: Instant) {
        if !self.is_spinning(now) {
            self.spin_until = None;
        }
    }

    /// Flip the favorite flag of the episode at `position` in the filtered view.
    ///
    /// Returns the new value, or `None` (and changes nothing) when the
    /// position does not resolve to a catalogue entry.
    pub fn toggle_favorite(&mut self, position: usize) -> Option<bool> {
        let number = self.resolve(position)?;
        let value = self.overlay.toggle_favorite(number);
        debug!("Episode {} favorite = {}", number, value);
        self.refilter();
        Some(value)
    }

    /// Flip the listened flag of the episode at `position` in the filtered view.
    pub fn toggle_listened(&mut self, position: usize) -> Option<bool> {
        let number = self.resolve(position)?;
        let value = self.overlay.toggle_listened(number);
        debug!("Episode {} listened = {}", number, value);
        self.refilter();
        Some(value)
    }

    /// Replace all filter criteria.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refilter();
    }

    /// Modify the criteria in place and refilter.
    pub fn update_criteria(&mut self, f: impl FnOnce(&mut FilterCriteria)) {
        f(&mut self.criteria);
        self.refilter();
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.refilter();
    }

    /// Restore the default criteria and clear the query.
    pub fn reset_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.query.clear();
        self.refilter();
    }

    /// Pointer down on the card.
    pub fn press(&mut self, x: i32) {
        self.gesture.press(x);
    }

    /// Pointer moved while over the card.
    pub fn drag_to(&mut self, x: i32) {
        self.gesture.drag_to(x);
    }

    /// Pointer up or left the card: apply the swipe decision.
    pub fn release(&mut self) -> Option<Swipe> {
        let swipe = self.gesture.release()?;
        match swipe {
            Swipe::Next => self.next(),
            Swipe::Previous => self.previous(),
            Swipe::SpringBack => {}
        }
        Some(swipe)
    }

    /// Map a filtered position to an episode number that exists in the
    /// full catalogue.
    fn resolve(&self, position: usize) -> Option<u32> {
        let number = self.filtered_episode(position)?.number;
        self.episodes
            .iter()
            .find(|e| e.number == number)
            .map(|e| e.number)
    }

    fn refilter(&mut self) {
        self.filtered = self
            .episodes
            .iter()
            .enumerate()
            .filter(|(_, e)| filter::matches(e, &self.overlay, &self.criteria))
            .filter(|(_, e)| filter::matches_query(e, &self.query))
            .map(|(i, _)| i)
            .collect();

        if self.current_index >= self.filtered.len() {
            self.current_index = self.filtered.len().saturating_sub(1);
        }
        debug!(
            "Filtered view: {} of {} episodes, index {}",
            self.filtered.len(),
            self.episodes.len(),
            self.current_index
        );
    }
}
