//! Type definitions for the geheimzentrale catalogue.
//!
//! These structs mirror the bundled episode dataset. Field names in the JSON
//! document are German; serde renames map them onto the Rust names.

use serde::Deserialize;

/// The top-level dataset document: `{ "serie": [...] }`.
#[derive(Debug, Deserialize)]
pub struct Dataset {
    /// Ordered sequence of episodes.
    pub serie: Vec<Episode>,
}

/// One audio-drama installment.
///
/// Records are immutable once loaded. Session flags (favorite, listened)
/// live in [`crate::overlay::OverlayStore`], keyed by [`Episode::number`].
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Episode {
    /// Unique episode number, the stable key across filtering.
    #[serde(rename = "nummer")]
    pub number: u32,

    #[serde(rename = "titel")]
    pub title: String,

    #[serde(rename = "autor", default)]
    pub author: String,

    #[serde(rename = "beschreibung", default)]
    pub description: String,

    /// Release date as `YYYY-MM-DD` text.
    #[serde(rename = "veröffentlichungsdatum", default)]
    pub release_date: String,

    #[serde(rename = "kapitel", default)]
    pub chapters: Vec<Chapter>,

    #[serde(rename = "sprechrollen", default)]
    pub voice_roles: Vec<VoiceRole>,

    #[serde(default)]
    pub links: Links,
}

/// A chapter marker. Offsets are opaque ordering values.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Chapter {
    #[serde(rename = "titel")]
    pub title: String,
    pub start: i64,
    pub end: i64,
}

/// A role and the performer speaking it.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct VoiceRole {
    #[serde(rename = "rolle")]
    pub role: String,

    #[serde(rename = "sprecher")]
    pub performer: String,

    #[serde(default)]
    pub pseudonym: Option<String>,
}

/// Cover image and optional streaming link.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Links {
    #[serde(rename = "cover", default)]
    pub cover_image_url: String,

    #[serde(rename = "spotify", default)]
    pub streaming_url: Option<String>,
}

impl Episode {
    /// Format the episode for list and card headings.
    ///
    /// # Examples
    ///
    /// ```
    /// use geheimzentrale::types::{Episode, Links};
    ///
    /// let ep = Episode {
    ///     number: 1,
    ///     title: "und der Super-Papagei".to_string(),
    ///     author: String::new(),
    ///     description: String::new(),
    ///     release_date: String::new(),
    ///     chapters: Vec::new(),
    ///     voice_roles: Vec::new(),
    ///     links: Links::default(),
    /// };
    /// assert_eq!(ep.to_display(), "#1 Die drei ??? und der Super-Papagei");
    /// ```
    pub fn to_display(&self) -> String {
        format!("#{} Die drei ??? {}", self.number, self.title)
    }

    /// Year part of the release date, if it starts with four digits.
    ///
    /// ```
    /// use geheimzentrale::types::{Episode, Links};
    ///
    /// let mut ep = Episode {
    ///     number: 2,
    ///     title: "und der Phantomsee".to_string(),
    ///     author: String::new(),
    ///     description: String::new(),
    ///     release_date: "1979-10-12".to_string(),
    ///     chapters: Vec::new(),
    ///     voice_roles: Vec::new(),
    ///     links: Links::default(),
    /// };
    /// assert_eq!(ep.release_year(), Some(1979));
    ///
    /// ep.release_date = "unbekannt".to_string();
    /// assert_eq!(ep.release_year(), None);
    /// ```
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.get(..4)?.parse().ok()
    }

    /// Whether any voice role contains `character` (case-sensitive).
    pub fn has_character(&self, character: &str) -> bool {
        self.voice_roles.iter().any(|r| r.role.contains(character))
    }
}

impl VoiceRole {
    /// "Role: Performer", with the pseudonym appended when present.
    pub fn to_display(&self) -> String {
        match &self.pseudonym {
            Some(p) if !p.is_empty() => format!("{}: {} ({})", self.role, self.performer, p),
            _ => format!("{}: {}", self.role, self.performer),
        }
    }
}
