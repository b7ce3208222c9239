//! Configuration file support for geheimzentrale.
//!
//! This module provides functionality for loading and saving user preferences
//! from a TOML configuration file, including keybindings and colors.

use crate::error::Result;
use crate::gesture::DEFAULT_SWIPE_THRESHOLD;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::warn;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// User configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Episode dataset to load instead of the bundled one
    #[serde(default)]
    pub data_path: Option<String>,

    /// Drag distance in pointer units needed to change cards.
    /// Read through [`Config::gesture_threshold`].
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: i64,

    /// Duration of the randomizer's spin effect in milliseconds
    #[serde(default = "default_spin_millis")]
    pub spin_millis: u64,

    #[serde(default)]
    pub keybindings: Keybindings,

    #[serde(default)]
    pub colors: ColorScheme,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn default_swipe_threshold() -> i64 {
    i64::from(DEFAULT_SWIPE_THRESHOLD)
}

fn default_spin_millis() -> u64 {
    600
}

impl Config {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self {
            data_path: None,
            swipe_threshold: default_swipe_threshold(),
            spin_millis: default_spin_millis(),
            keybindings: Keybindings::default(),
            colors: ColorScheme::default(),
        }
    }

    /// The configured swipe threshold, or the default when it is not in
    /// `1..=u16::MAX`.
    pub fn gesture_threshold(&self) -> u16 {
        match u16::try_from(self.swipe_threshold) {
            Ok(threshold) if threshold > 0 => threshold,
            _ => {
                warn!(
                    "Invalid swipe_threshold {}, using {}",
                    self.swipe_threshold, DEFAULT_SWIPE_THRESHOLD
                );
                DEFAULT_SWIPE_THRESHOLD
            }
        }
    }

    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.spin_millis)
    }

    /// Get the path to the config file.
    ///
    /// Returns ~/.config/geheimzentrale/config.toml on Linux,
    /// or a platform-appropriate location on other systems.
    pub fn get_config_path() -> std::result::Result<PathBuf, io::Error> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Could not find config directory")
            })?
            .join("geheimzentrale");

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::get_config_path()?;

        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let path = Self::get_config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Create a default config file if one doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn create_default_if_missing() -> Result<PathBuf> {
        let path = Self::get_config_path()?;

        if !path.exists() {
            Self::new().save()?;
        }

        Ok(path)
    }
}

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Key bindings, each a list of key names such as `"l"`, `"right"` or `"ctrl+r"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Keybindings {
    pub next: Vec<String>,
    pub previous: Vec<String>,
    pub first: Vec<String>,
    pub last: Vec<String>,
    pub random: Vec<String>,
    pub favorite: Vec<String>,
    pub listened: Vec<String>,
    pub open_link: Vec<String>,
    /// Applies the selected filter row, or resets from the empty view
    pub select: Vec<String>,
    pub filters: Vec<String>,
    pub reset: Vec<String>,
    pub search: Vec<String>,
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub help: Vec<String>,
    pub quit: Vec<String>,
}

impl Default for Keybindings {
    fn default() -> Self {
        Self {
            next: keys(&["right", "l"]),
            previous: keys(&["left", "h"]),
            first: keys(&["home", "g"]),
            last: keys(&["end", "G"]),
            random: keys(&["r"]),
            favorite: keys(&["f"]),
            listened: keys(&["space", "x"]),
            open_link: keys(&["o"]),
            select: keys(&["enter", "space"]),
            filters: keys(&["tab"]),
            reset: keys(&["z"]),
            search: keys(&["/"]),
            up: keys(&["up", "k"]),
            down: keys(&["down", "j"]),
            help: keys(&["?"]),
            quit: keys(&["q", "esc"]),
        }
    }
}

impl Keybindings {
    /// Whether `key` matches any of the names in `binding`.
    pub fn matches(&self, binding: &[String], key: &KeyEvent) -> bool {
        binding.iter().any(|name| key_matches(name, key))
    }

    /// First configured name of a binding, for help and footer text.
    pub fn label<'a>(&self, binding: &'a [String]) -> &'a str {
        binding.first().map(String::as_str).unwrap_or("?")
    }
}

fn key_matches(name: &str, key: &KeyEvent) -> bool {
    let (ctrl, name) = match name.strip_prefix("ctrl+") {
        Some(rest) => (true, rest),
        None => (false, name),
    };
    if ctrl != key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }

    let code = match name.to_lowercase().as_str() {
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "space" => KeyCode::Char(' '),
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return false,
            }
        }
    };
    key.code == code
}

/// Colors as names or hex strings understood by ratatui (`"magenta"`, `"#ff8800"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScheme {
    pub accent: String,
    pub favorite: String,
    pub listened: String,
    pub muted: String,
    pub error: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            accent: "magenta".to_string(),
            favorite: "red".to_string(),
            listened: "green".to_string(),
            muted: "darkgray".to_string(),
            error: "red".to_string(),
        }
    }
}

fn parse_color(value: &str, fallback: Color) -> Color {
    Color::from_str(value).unwrap_or(fallback)
}

impl ColorScheme {
    pub fn accent(&self) -> Color {
        parse_color(&self.accent, Color::Magenta)
    }

    pub fn favorite(&self) -> Color {
        parse_color(&self.favorite, Color::Red)
    }

    pub fn listened(&self) -> Color {
        parse_color(&self.listened, Color::Green)
    }

    pub fn muted(&self) -> Color {
        parse_color(&self.muted, Color::DarkGray)
    }

    pub fn error(&self) -> Color {
        parse_color(&self.error, Color::Red)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_new_config_has_defaults() {
        let config = Config::new();
        assert!(config.data_path.is_none());
        assert_eq!(config.gesture_threshold(), 50);
        assert_eq!(config.spin_duration(), Duration::from_millis(600));
    }

    #[test]
    fn test_config_partial_deserialization() {
        let toml_str = r#"
            swipe_threshold = 12

            [keybindings]
            random = ["ctrl+r"]

            [colors]
            accent = "cyan"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gesture_threshold(), 12);
        assert_eq!(config.spin_millis, 600); // default
        assert_eq!(config.keybindings.random, vec!["ctrl+r".to_string()]);
        assert_eq!(config.keybindings.next, vec!["right".to_string(), "l".to_string()]);
        assert_eq!(config.colors.accent(), Color::Cyan);
        assert_eq!(config.colors.favorite(), Color::Red);
    }

    #[test]
    fn test_invalid_swipe_threshold_falls_back_to_default() {
        for value in ["-10", "0", "-2147483648", "70000"] {
            let config: Config = toml::from_str(&format!("swipe_threshold = {}", value)).unwrap();
            assert_eq!(config.gesture_threshold(), DEFAULT_SWIPE_THRESHOLD, "value {}", value);
        }
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let mut config = Config::new();
        config.data_path = Some("/tmp/folgen.json".to_string());
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("data_path = \"/tmp/folgen.json\""));
        let back: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.data_path.as_deref(), Some("/tmp/folgen.json"));
        assert_eq!(back.keybindings.quit, config.keybindings.quit);
    }

    #[test]
    fn test_keybinding_matches_named_and_char_keys() {
        let kb = Keybindings::default();
        assert!(kb.matches(&kb.next, &key(KeyCode::Right)));
        assert!(kb.matches(&kb.next, &key(KeyCode::Char('l'))));
        assert!(kb.matches(&kb.listened, &key(KeyCode::Char(' '))));
        assert!(kb.matches(&kb.last, &key(KeyCode::Char('G'))));
        assert!(!kb.matches(&kb.first, &key(KeyCode::Char('G'))));
        assert!(!kb.matches(&kb.next, &key(KeyCode::Left)));
    }

    #[test]
    fn test_select_binding_defaults() {
        let kb = Keybindings::default();
        assert!(kb.matches(&kb.select, &key(KeyCode::Enter)));
        assert!(kb.matches(&kb.select, &key(KeyCode::Char(' '))));
        assert!(!kb.matches(&kb.select, &key(KeyCode::Right)));
    }

    #[test]
    fn test_keybinding_ctrl_prefix() {
        let binding = vec!["ctrl+r".to_string()];
        let kb = Keybindings::default();
        assert!(kb.matches(&binding, &KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)));
        assert!(!kb.matches(&binding, &key(KeyCode::Char('r'))));
        assert!(!kb.matches(&kb.random, &KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_invalid_color_falls_back() {
        let colors = ColorScheme {
            accent: "not-a-color".to_string(),
            ..Default::default()
        };
        assert_eq!(colors.accent(), Color::Magenta);
    }
}
