//! Filter predicates over the episode catalogue.
//!
//! Everything here is pure: given the catalogue, the overlay flags and a set
//! of criteria, produce the order-preserving subsequence of matching episodes.

use crate::error::AppError;
use crate::overlay::OverlayStore;
use crate::types::Episode;
use std::fmt;
use std::str::FromStr;

/// Label used for "no constraint" in every selector.
pub const ALL_LABEL: &str = "Alle";

/// Characters offered by the filter panel: (substring matched against roles, label).
pub const CHARACTERS: [(&str, &str); 4] = [
    ("Justus", "Justus Jonas"),
    ("Peter", "Peter Shaw"),
    ("Bob", "Bob Andrews"),
    ("Hitchcock", "Alfred Hitchcock"),
];

/// Mood selector values.
///
/// Episodes carry no mood attribute, so this criterion is collected but
/// never evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Spannend,
    Gruselig,
    Mysterioes,
    Abenteuerlich,
    ZumEinschlafen,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Spannend,
        Mood::Gruselig,
        Mood::Mysterioes,
        Mood::Abenteuerlich,
        Mood::ZumEinschlafen,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Spannend => "Spannend",
            Mood::Gruselig => "Gruselig",
            Mood::Mysterioes => "Mysteriös",
            Mood::Abenteuerlich => "Abenteuerlich",
            Mood::ZumEinschlafen => "Zum Einschlafen",
        }
    }
}

/// Listened-status selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListenedFilter {
    #[default]
    All,
    Listened,
    NotListened,
}

impl ListenedFilter {
    pub const ALL: [ListenedFilter; 3] = [
        ListenedFilter::All,
        ListenedFilter::Listened,
        ListenedFilter::NotListened,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ListenedFilter::All => ALL_LABEL,
            ListenedFilter::Listened => "Gehört",
            ListenedFilter::NotListened => "Nicht gehört",
        }
    }

    /// Whether an episode with the given listened flag passes.
    pub fn accepts(&self, listened: bool) -> bool {
        match self {
            ListenedFilter::All => true,
            ListenedFilter::Listened => listened,
            ListenedFilter::NotListened => !listened,
        }
    }
}

impl fmt::Display for ListenedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ListenedFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alle" | "all" => Ok(ListenedFilter::All),
            "gehört" | "gehoert" | "listened" => Ok(ListenedFilter::Listened),
            "nicht gehört" | "nicht-gehört" | "nicht-gehoert" | "unlistened" => {
                Ok(ListenedFilter::NotListened)
            }
            other => Err(AppError::InvalidInput(format!(
                "unknown listened filter '{}' (use alle, gehört or nicht-gehört)",
                other
            ))),
        }
    }
}

/// The four filter criteria. `None` stands for "Alle".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub character: Option<String>,
    pub mood: Option<Mood>,
    pub listened: ListenedFilter,
    pub favorite_only: bool,
}

impl FilterCriteria {
    /// Number of criteria that differ from the default.
    pub fn active_count(&self) -> usize {
        usize::from(self.character.is_some())
            + usize::from(self.mood.is_some())
            + usize::from(self.listened != ListenedFilter::All)
            + usize::from(self.favorite_only)
    }

    pub fn is_default(&self) -> bool {
        self.active_count() == 0
    }

    pub fn character_label(&self) -> String {
        match &self.character {
            None => ALL_LABEL.to_string(),
            Some(name) => CHARACTERS
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, label)| label.to_string())
                .unwrap_or_else(|| name.clone()),
        }
    }

    pub fn mood_label(&self) -> &'static str {
        self.mood.map(|m| m.label()).unwrap_or(ALL_LABEL)
    }

    /// Step the character selector through Alle and [`CHARACTERS`].
    ///
    /// A custom name (not in the list) steps to the first or last entry.
    pub fn cycle_character(&mut self, forward: bool) {
        let keys: Vec<Option<&str>> = std::iter::once(None)
            .chain(CHARACTERS.iter().map(|(k, _)| Some(*k)))
            .collect();
        let current = keys
            .iter()
            .position(|k| k.map(str::to_string) == self.character);
        let next = step(current, keys.len(), forward);
        self.character = keys[next].map(str::to_string);
    }

    /// Step the mood selector through Alle and [`Mood::ALL`].
    pub fn cycle_mood(&mut self, forward: bool) {
        let values: Vec<Option<Mood>> = std::iter::once(None)
            .chain(Mood::ALL.iter().copied().map(Some))
            .collect();
        let current = values.iter().position(|m| *m == self.mood);
        self.mood = values[step(current, values.len(), forward)];
    }

    /// Step the listened selector through [`ListenedFilter::ALL`].
    pub fn cycle_listened(&mut self, forward: bool) {
        let current = ListenedFilter::ALL.iter().position(|l| *l == self.listened);
        self.listened = ListenedFilter::ALL[step(current, ListenedFilter::ALL.len(), forward)];
    }
}

fn step(current: Option<usize>, len: usize, forward: bool) -> usize {
    match (current, forward) {
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
        (None, true) => 0,
        (None, false) => len - 1,
    }
}

/// Whether one episode satisfies all active criteria.
pub fn matches(episode: &Episode, overlay: &OverlayStore, criteria: &FilterCriteria) -> bool {
    let flags = overlay.get(episode.number);

    if !criteria.listened.accepts(flags.listened) {
        return false;
    }
    if criteria.favorite_only && !flags.favorite {
        return false;
    }
    if let Some(character) = &criteria.character {
        if !episode.has_character(character) {
            return false;
        }
    }
    // criteria.mood: no episode attribute to compare against
    true
}

/// Whether an episode matches a free-text query.
///
/// An empty query matches everything. Otherwise the episode number's digits
/// or the case-folded title must contain the trimmed query.
pub fn matches_query(episode: &Episode, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    if episode.number.to_string().contains(query) {
        return true;
    }
    episode.title.to_lowercase().contains(&query.to_lowercase())
}

/// Order-preserving subsequence of `episodes` satisfying `criteria`.
pub fn filter_episodes<'a>(
    episodes: &'a [Episode],
    overlay: &OverlayStore,
    criteria: &FilterCriteria,
) -> Vec<&'a Episode> {
    episodes
        .iter()
        .filter(|e| matches(e, overlay, criteria))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Links, VoiceRole};

    fn episode(number: u32, title: &str, roles: &[&str]) -> Episode {
        Episode {
            number,
            title: title.to_string(),
            author: String::new(),
            description: String::new(),
            release_date: String::new(),
            chapters: Vec::new(),
            voice_roles: roles
                .iter()
                .map(|r| VoiceRole {
                    role: r.to_string(),
                    performer: "Sprecher".to_string(),
                    pseudonym: None,
                })
                .collect(),
            links: Links::default(),
        }
    }

    fn numbers(episodes: &[&Episode]) -> Vec<u32> {
        episodes.iter().map(|e| e.number).collect()
    }

    fn three() -> Vec<Episode> {
        vec![
            episode(1, "und der Super-Papagei", &["Justus Jonas", "Peter Shaw"]),
            episode(2, "und der Phantomsee", &["Bob Andrews"]),
            episode(3, "und der Karpatenhund", &["Justus Jonas", "Alfred Hitchcock"]),
        ]
    }

    #[test]
    fn test_default_criteria_keep_everything_in_order() {
        let eps = three();
        let out = filter_episodes(&eps, &OverlayStore::new(), &FilterCriteria::default());
        assert_eq!(numbers(&out), vec![1, 2, 3]);
    }

    #[test]
    fn test_listened_filter_scenario() {
        let eps = three();
        let mut overlay = OverlayStore::new();
        overlay.toggle_listened(2);

        let listened = FilterCriteria {
            listened: ListenedFilter::Listened,
            ..Default::default()
        };
        assert_eq!(numbers(&filter_episodes(&eps, &overlay, &listened)), vec![2]);

        let not_listened = FilterCriteria {
            listened: ListenedFilter::NotListened,
            ..Default::default()
        };
        assert_eq!(
            numbers(&filter_episodes(&eps, &overlay, &not_listened)),
            vec![1, 3]
        );
    }

    #[test]
    fn test_favorite_only() {
        let eps = three();
        let mut overlay = OverlayStore::new();
        overlay.toggle_favorite(3);
        let criteria = FilterCriteria {
            favorite_only: true,
            ..Default::default()
        };
        assert_eq!(numbers(&filter_episodes(&eps, &overlay, &criteria)), vec![3]);
    }

    #[test]
    fn test_character_substring_case_sensitive() {
        let eps = three();
        let overlay = OverlayStore::new();
        let mut criteria = FilterCriteria {
            character: Some("Justus".to_string()),
            ..Default::default()
        };
        assert_eq!(numbers(&filter_episodes(&eps, &overlay, &criteria)), vec![1, 3]);

        criteria.character = Some("justus".to_string());
        assert!(filter_episodes(&eps, &overlay, &criteria).is_empty());

        criteria.character = Some("Hitch".to_string());
        assert_eq!(numbers(&filter_episodes(&eps, &overlay, &criteria)), vec![3]);
    }

    #[test]
    fn test_mood_is_not_applied() {
        let eps = three();
        let criteria = FilterCriteria {
            mood: Some(Mood::Gruselig),
            ..Default::default()
        };
        let out = filter_episodes(&eps, &OverlayStore::new(), &criteria);
        assert_eq!(numbers(&out), vec![1, 2, 3]);
        assert_eq!(criteria.active_count(), 1);
    }

    #[test]
    fn test_combined_criteria_and_idempotence() {
        let eps = three();
        let mut overlay = OverlayStore::new();
        overlay.toggle_favorite(1);
        overlay.toggle_favorite(3);
        overlay.toggle_listened(3);
        let criteria = FilterCriteria {
            character: Some("Justus".to_string()),
            mood: None,
            listened: ListenedFilter::NotListened,
            favorite_only: true,
        };
        let first = numbers(&filter_episodes(&eps, &overlay, &criteria));
        let second = numbers(&filter_episodes(&eps, &overlay, &criteria));
        assert_eq!(first, vec![1]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_query_matches_number_or_title() {
        let ep = episode(12, "und der Super-Papagei", &[]);
        assert!(matches_query(&ep, ""));
        assert!(matches_query(&ep, "  "));
        assert!(matches_query(&ep, "12"));
        assert!(matches_query(&ep, "papagei"));
        assert!(matches_query(&ep, " SUPER "));
        assert!(!matches_query(&ep, "Phantomsee"));
    }

    #[test]
    fn test_active_count() {
        let mut criteria = FilterCriteria::default();
        assert!(criteria.is_default());
        criteria.character = Some("Bob".to_string());
        criteria.listened = ListenedFilter::Listened;
        criteria.favorite_only = true;
        assert_eq!(criteria.active_count(), 3);
        criteria.mood = Some(Mood::Spannend);
        assert_eq!(criteria.active_count(), 4);
    }

    #[test]
    fn test_cycle_character_wraps() {
        let mut criteria = FilterCriteria::default();
        criteria.cycle_character(true);
        assert_eq!(criteria.character.as_deref(), Some("Justus"));
        assert_eq!(criteria.character_label(), "Justus Jonas");
        criteria.cycle_character(false);
        assert_eq!(criteria.character, None);
        criteria.cycle_character(false);
        assert_eq!(criteria.character.as_deref(), Some("Hitchcock"));
        criteria.cycle_character(true);
        assert_eq!(criteria.character, None);
    }

    #[test]
    fn test_custom_character_label_and_cycle() {
        let mut criteria = FilterCriteria {
            character: Some("Onkel Titus".to_string()),
            ..Default::default()
        };
        assert_eq!(criteria.character_label(), "Onkel Titus");
        criteria.cycle_character(true);
        assert_eq!(criteria.character, None);
    }

    #[test]
    fn test_cycle_mood_and_listened() {
        let mut criteria = FilterCriteria::default();
        criteria.cycle_mood(false);
        assert_eq!(criteria.mood, Some(Mood::ZumEinschlafen));
        assert_eq!(criteria.mood_label(), "Zum Einschlafen");
        criteria.cycle_listened(true);
        assert_eq!(criteria.listened, ListenedFilter::Listened);
        criteria.cycle_listened(false);
        criteria.cycle_listened(false);
        assert_eq!(criteria.listened, ListenedFilter::NotListened);
    }

    #[test]
    fn test_listened_filter_parse() {
        assert_eq!("Gehört".parse::<ListenedFilter>().unwrap(), ListenedFilter::Listened);
        assert_eq!(
            "nicht-gehoert".parse::<ListenedFilter>().unwrap(),
            ListenedFilter::NotListened
        );
        assert_eq!("alle".parse::<ListenedFilter>().unwrap(), ListenedFilter::All);
        assert!("vielleicht".parse::<ListenedFilter>().is_err());
    }
}
