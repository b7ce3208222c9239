//! Main entry point for the geheimzentrale terminal browser.

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use geheimzentrale::browse::Browser;
use geheimzentrale::catalogue;
use geheimzentrale::config::Config;
use geheimzentrale::filter::{FilterCriteria, ListenedFilter};
use geheimzentrale::opener::open_url;
use geheimzentrale::tui::{Action, App, draw, poll_event};
use log::{debug, info, warn};
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Command-line arguments for the geheimzentrale application.
#[derive(Parser, Debug)]
#[command(
    name = "geheimzentrale",
    version,
    about = "Browse the Die drei ??? audio-drama catalogue",
    long_about = "Swipe through episode cards, mark favorites and listened episodes, filter and pick a random episode."
)]
struct Args {
    /// Episode dataset (JSON with a top-level "serie" array) instead of the bundled one
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Log verbosity level: 0=error, 1=warn, 2=info, 3=debug, 4=trace
    #[arg(short, long, default_value_t = 1)]
    log: u8,

    /// Start with a character filter, e.g. "Justus" or "Hitchcock"
    #[arg(short, long)]
    character: Option<String>,

    /// Start with a status filter: alle, gehört or nicht-gehört
    #[arg(long, default_value = "alle")]
    listened: ListenedFilter,

    /// Start with only favorites shown
    #[arg(long)]
    favorites: bool,

    /// Write a default config file if none exists and exit
    #[arg(long)]
    init_config: bool,
}

/// Initialize the terminal for TUI rendering.
fn init_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.log {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    debug!("Log level set to {:?}", log_level);

    if args.init_config {
        let path = Config::create_default_if_missing()?;
        println!("Config: {}", path.display());
        return Ok(());
    }

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config: {}. Using defaults.", e);
        Config::new()
    });

    // CLI path wins over the config file
    let data_path = args
        .data
        .clone()
        .or_else(|| config.data_path.as_ref().map(PathBuf::from));

    let episodes = catalogue::load(data_path.as_deref())?;
    info!("Loaded {} episodes", episodes.len());

    let mut browser = Browser::new(episodes);
    browser.set_swipe_threshold(config.gesture_threshold());
    browser.set_spin_duration(config.spin_duration());
    browser.set_criteria(FilterCriteria {
        character: args.character.clone(),
        mood: None,
        listened: args.listened,
        favorite_only: args.favorites,
    });

    let mut app = App::new(browser, config.keybindings.clone(), config.colors.clone());

    let mut terminal = init_terminal()?;
    let result = run_app(&mut terminal, &mut app);
    restore_terminal()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.browser.tick(Instant::now());
        terminal.draw(|f| draw(f, app))?;

        let action = match poll_event(Duration::from_millis(100))? {
            Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                // Any key dismisses a shown error
                if app.error_message.is_some() {
                    app.clear_error();
                    continue;
                }
                app.handle_input(key)
            }
            Some(Event::Mouse(mouse)) => app.handle_mouse(mouse),
            _ => Action::None,
        };

        match action {
            Action::Quit => break,
            Action::OpenLink(url) => match open_url(&url) {
                Ok(()) => {
                    info!("Opened {}", url);
                    app.set_status("Link im Browser geöffnet");
                }
                Err(e) => app.set_error(&e.to_string()),
            },
            Action::None => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
