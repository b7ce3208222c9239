//! A terminal browser for the "Die drei ???" audio-drama catalogue.
//!
//! geheimzentrale shows one episode card at a time. Cards can be swiped with
//! the mouse or paged with the keyboard, marked as favorite or listened for
//! the current session, filtered by character and status, and picked at
//! random.
//!
//! # Features
//!
//! - Bundled episode dataset, or any file with the same schema
//! - Character, mood, status and favorites filters
//! - Title/number search
//! - Mouse drag navigation with a fixed swipe threshold
//! - Opening the streaming link in the system browser
//!
//! # Usage
//!
//! ```bash
//! # Browse the bundled catalogue
//! cargo run
//!
//! # Start with only Hitchcock episodes not yet listened to
//! cargo run -- -c Hitchcock --listened nicht-gehört
//! ```

pub mod browse;
pub mod catalogue;
pub mod config;
pub mod error;
pub mod filter;
pub mod gesture;
pub mod opener;
pub mod overlay;
pub mod tui;
pub mod types;
