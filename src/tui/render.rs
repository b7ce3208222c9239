//! UI rendering functions for the TUI.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use std::time::Instant;

use super::state::{App, UNITS_PER_COLUMN};
use super::types::{FilterRow, Focus};
use crate::types::Episode;

const MAX_CHAPTERS: usize = 4;
const MAX_SPEAKERS: usize = 3;

/// Draw the UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search bar
            Constraint::Length(1), // Filter summary + random
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(size);

    draw_header(frame, app, chunks[0]);
    draw_search_bar(frame, app, chunks[1]);
    draw_filter_summary(frame, app, chunks[2]);

    let content = if app.filters_open() {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(FilterRow::ALL.len() as u16 + 2),
                Constraint::Min(0),
            ])
            .split(chunks[3]);
        draw_filter_panel(frame, app, parts[0]);
        parts[1]
    } else {
        chunks[3]
    };

    if app.browser.is_empty() {
        app.card_area = Rect::default();
        app.card_bounds = Rect::default();
        app.dots_area = Rect::default();
        draw_empty(frame, app, content);
    } else {
        draw_browser(frame, app, content);
    }

    draw_footer(frame, app, chunks[4]);

    if let Some(error) = &app.error_message {
        draw_error_popup(frame, app, error);
    }

    if app.show_help {
        draw_help_modal(frame, app);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let overlay = app.browser.overlay();
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "??? Geheimzentrale",
            Style::default()
                .fg(app.colors.accent())
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            "Die moderne Sammlung der drei ??? Hörspiele",
            Style::default().fg(Color::Gray),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[♥ {}]", overlay.favorite_count()),
            Style::default().fg(app.colors.favorite()),
        ),
        Span::raw(" "),
        Span::styled(
            format!("[✓ {}]", overlay.listened_count()),
            Style::default().fg(app.colors.listened()),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Search;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(app.colors.muted())
    };

    let text = if app.search_input.is_empty() && !focused {
        "Folge suchen... (/)"
    } else {
        app.search_input.as_str()
    };

    let search = Paragraph::new(text)
        .style(if focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(app.colors.muted())
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Suche")
                .border_style(border_style),
        );

    frame.render_widget(search, area);

    if focused {
        let width = app.search_input.chars().count() as u16;
        frame.set_cursor_position((area.x + width + 1, area.y + 1));
    }
}

fn draw_filter_summary(frame: &mut Frame, app: &App, area: Rect) {
    let criteria = app.browser.criteria();
    let active = criteria.active_count();

    let mut spans = vec![Span::styled(
        format!(" Filter [{}]", app.keybindings.label(&app.keybindings.filters)),
        Style::default().fg(Color::Gray),
    )];
    if active > 0 {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!(" {} ", active),
            Style::default().fg(Color::White).bg(app.colors.accent()),
        ));
    }
    spans.push(Span::raw("   "));
    spans.push(Span::styled(
        format!("Zufallsfolge [{}]", app.keybindings.label(&app.keybindings.random)),
        Style::default().fg(app.colors.accent()),
    ));
    spans.push(Span::styled(
        format!(
            "   {} von {} Folgen",
            app.browser.filtered_len(),
            app.browser.episodes().len()
        ),
        Style::default().fg(app.colors.muted()),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_filter_panel(frame: &mut Frame, app: &mut App, area: Rect) {
    let criteria = app.browser.criteria();
    let items: Vec<ListItem> = FilterRow::ALL
        .iter()
        .map(|row| {
            let value = match row {
                FilterRow::Character => criteria.character_label(),
                FilterRow::Mood => criteria.mood_label().to_string(),
                FilterRow::Listened => criteria.listened.label().to_string(),
                FilterRow::Favorites if criteria.favorite_only => "[x]".to_string(),
                FilterRow::Favorites => "[ ]".to_string(),
                FilterRow::Reset => String::new(),
            };
            if value.is_empty() {
                ListItem::new(row.label())
            } else {
                ListItem::new(format!("{:<15} ◀ {} ▶", row.label(), value))
            }
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Filter")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.filter_list_state);
}

fn draw_empty(frame: &mut Frame, app: &App, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Keine Episoden gefunden.",
            Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "[{}/{}] Filter zurücksetzen",
                app.keybindings.label(&app.keybindings.reset),
                app.keybindings.label(&app.keybindings.select)
            ),
            Style::default().fg(app.colors.accent()),
        )),
    ];
    let empty = Paragraph::new(text)
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(empty, area);
}

fn draw_browser(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Progress dots
            Constraint::Min(0),    // Card
            Constraint::Length(1), // Navigation controls
        ])
        .split(area);

    draw_progress(frame, app, chunks[0]);

    let card_width = chunks[1].width.min(72);
    let card_area = Rect {
        x: chunks[1].x + (chunks[1].width - card_width) / 2,
        width: card_width,
        ..chunks[1]
    };
    app.card_area = card_area;
    app.card_bounds = chunks[1];
    draw_card(frame, app);

    draw_navigation(frame, app, chunks[2]);
}

fn draw_progress(frame: &mut Frame, app: &mut App, area: Rect) {
    let len = app.browser.filtered_len();
    let current = app.browser.current_index();
    let visible = usize::from(area.width / 2).max(1);

    // Keep the current dot inside the visible window
    let start = if len <= visible {
        0
    } else {
        current.saturating_sub(visible / 2).min(len - visible)
    };
    let end = (start + visible).min(len);

    let spans: Vec<Span> = (start..end)
        .map(|i| {
            if i == current {
                Span::styled("● ", Style::default().fg(app.colors.accent()))
            } else {
                Span::styled("· ", Style::default().fg(app.colors.muted()))
            }
        })
        .collect();

    let used = ((end - start) * 2) as u16;
    let dots_area = Rect {
        x: area.x + area.width.saturating_sub(used) / 2,
        width: used.min(area.width),
        ..area
    };
    app.dots_area = dots_area;
    app.dots_start = start;

    frame.render_widget(Paragraph::new(Line::from(spans)), dots_area);
}

/// Columns a drag must cover before it passes `threshold` pointer units.
fn swipe_columns(threshold: u16) -> i32 {
    i32::from(threshold) / UNITS_PER_COLUMN + 1
}

fn tilt_marker(offset: i32) -> &'static str {
    match offset {
        o if o <= -20 => "↶↶ ",
        o if o < 0 => "↶ ",
        0 => "",
        o if o < 20 => "↷ ",
        _ => "↷↷ ",
    }
}

fn draw_card(frame: &mut Frame, app: &App) {
    let Some(episode) = app.browser.current_episode() else {
        return;
    };
    let flags = app.browser.flags(episode);
    let gesture = app.browser.gesture();
    let spinning = app.browser.is_spinning(Instant::now());

    let area = app.visible_card_area();

    let favorite = Span::styled(
        " ♥ ",
        if flags.favorite {
            Style::default().fg(Color::White).bg(app.colors.favorite())
        } else {
            Style::default().fg(app.colors.muted())
        },
    );
    let listened = Span::styled(
        " ✓ ",
        if flags.listened {
            Style::default().fg(Color::White).bg(app.colors.listened())
        } else {
            Style::default().fg(app.colors.muted())
        },
    );

    let title = Line::from(vec![
        Span::raw(if spinning { "⟳ " } else { "" }),
        Span::raw(tilt_marker(gesture.offset())),
        Span::styled(
            format!("#{}", episode.number),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        favorite,
        listened,
    ]);

    let border_style = if spinning {
        Style::default().fg(app.colors.accent())
    } else if gesture.is_dragging() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let body = Paragraph::new(card_lines(app, episode))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style)
                .title(title),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, area);
    frame.render_widget(body, area);
}

fn card_lines<'a>(app: &App, episode: &'a Episode) -> Vec<Line<'a>> {
    let heading = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(app.colors.muted());

    let mut lines = vec![Line::from(Span::styled(
        format!("Die drei ??? {}", episode.title),
        heading,
    ))];

    let mut byline = format!("von {}", episode.author);
    if let Some(year) = episode.release_year() {
        byline.push_str(&format!(" • {}", year));
    }
    lines.push(Line::from(Span::styled(byline, Style::default().fg(Color::Gray))));

    if !episode.links.cover_image_url.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Cover: {}", episode.links.cover_image_url),
            muted,
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(episode.description.as_str()));

    if !episode.chapters.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Kapitel", heading)));
        for chapter in episode.chapters.iter().take(MAX_CHAPTERS) {
            lines.push(Line::from(format!("  {}", chapter.title)));
        }
        if episode.chapters.len() > MAX_CHAPTERS {
            lines.push(Line::from(Span::styled(
                format!("  + {} weitere Kapitel", episode.chapters.len() - MAX_CHAPTERS),
                muted,
            )));
        }
    }

    if !episode.voice_roles.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Sprecher", heading)));
        for role in episode.voice_roles.iter().take(MAX_SPEAKERS) {
            lines.push(Line::from(format!("  {}", role.to_display())));
        }
        if episode.voice_roles.len() > MAX_SPEAKERS {
            lines.push(Line::from(Span::styled(
                format!(
                    "  + {} weitere Sprecher",
                    episode.voice_roles.len() - MAX_SPEAKERS
                ),
                muted,
            )));
        }
    }

    if episode.links.streaming_url.is_some() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "[{}] Auf Spotify hören ↗",
                app.keybindings.label(&app.keybindings.open_link)
            ),
            Style::default().fg(app.colors.accent()),
        )));
    }

    lines
}

fn draw_navigation(frame: &mut Frame, app: &App, area: Rect) {
    let enabled = Style::default().fg(Color::White);
    let disabled = Style::default().fg(app.colors.muted());

    let line = Line::from(vec![
        Span::styled(
            "◀ zurück",
            if app.browser.is_at_start() { disabled } else { enabled },
        ),
        Span::raw("     "),
        Span::styled("⟳ zufällig", Style::default().fg(app.colors.accent())),
        Span::raw("     "),
        Span::styled(
            "weiter ▶",
            if app.browser.is_at_end() { disabled } else { enabled },
        ),
    ]);

    frame.render_widget(
        Paragraph::new(line).alignment(ratatui::layout::Alignment::Center),
        area,
    );
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = if let Some(status) = &app.status_message {
        status.clone()
    } else {
        match app.focus {
            Focus::Search => "[Enter] done  [Esc] clear  [Bksp] delete".to_string(),
            Focus::Filters => {
                let kb = &app.keybindings;
                format!(
                    "[↑↓] select  [{}/{}/{}] change  [z] reset  [Tab/Esc] close  [?] help",
                    kb.label(&kb.previous),
                    kb.label(&kb.next),
                    kb.label(&kb.select)
                )
            }
            Focus::Card if app.browser.is_empty() => {
                "[z/Enter] reset filters  [Tab] filters  [/] search  [?] help  [q] quit"
                    .to_string()
            }
            Focus::Card => "[←→] browse  [r] random  [f] favorite  [space] listened  [o] open  [Tab] filters  [?] help  [q] quit"
                .to_string(),
        }
    };

    let footer = Paragraph::new(help_text)
        .style(Style::default().fg(app.colors.muted()))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

fn draw_error_popup(frame: &mut Frame, app: &App, error: &str) {
    let area = centered_rect(60, 20, frame.area());
    frame.render_widget(Clear, area);

    let popup = Paragraph::new(error)
        .style(Style::default().fg(app.colors.error()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Fehler")
                .border_style(Style::default().fg(app.colors.error())),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(popup, area);
}

fn draw_help_modal(frame: &mut Frame, app: &App) {
    let area = centered_rect(70, 80, frame.area());
    frame.render_widget(Clear, area);

    let help_text = Paragraph::new(get_help_content(app))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Hilfe")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help_text, area);
}

fn get_help_content(app: &App) -> String {
    let kb = &app.keybindings;
    let keys = |binding: &[String]| binding.join(" / ");

    format!(
        "\
Karten
──────
  {:<14} Nächste Folge
  {:<14} Vorherige Folge
  {:<14} Erste / letzte Folge
  {:<14} Zufallsfolge
  {:<14} Favorit an/aus
  {:<14} Gehört an/aus
  {:<14} Auf Spotify hören
  Maus          Karte ziehen (ab {} Spalten blättert)
  Punkte        Klick springt zur Folge

Filter & Suche
──────────────
  {:<14} Filterleiste öffnen/schließen
  {:<14} Filterwert ändern
  {:<14} Filter zurücksetzen
  {:<14} Titel oder Nummer suchen

Allgemein
─────────
  {:<14} Hilfe ein/aus
  Ctrl+C        Beenden
  {:<14} Beenden

Press ? to close",
        keys(&kb.next),
        keys(&kb.previous),
        format!("{} | {}", keys(&kb.first), keys(&kb.last)),
        keys(&kb.random),
        keys(&kb.favorite),
        keys(&kb.listened),
        keys(&kb.open_link),
        swipe_columns(app.browser.gesture().threshold()),
        keys(&kb.filters),
        format!("{} | {} | {}", keys(&kb.previous), keys(&kb.next), keys(&kb.select)),
        keys(&kb.reset),
        keys(&kb.search),
        keys(&kb.help),
        keys(&kb.quit),
    )
}

/// Helper function to create a centered rect.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browse::Browser;
    use crate::catalogue;
    use crate::config::{ColorScheme, Keybindings};
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use ratatui::{Terminal, backend::TestBackend};

    fn render(app: &mut App) -> String {
        let backend = TestBackend::new(100, 50);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        screen_text(&terminal)
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn app() -> App {
        let browser = Browser::new(catalogue::load_bundled().unwrap());
        App::new(browser, Keybindings::default(), ColorScheme::default())
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_swipe_from_card_centre_in_80_columns() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let card = app.card_area;
        assert_eq!(card.width, 72);
        let row = card.y + card.height / 2;
        let centre = card.x + card.width / 2;

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), centre, row));
        for column in (3..centre).rev() {
            app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), column, row));
            terminal.draw(|f| draw(f, &mut app)).unwrap();
            assert!(
                app.browser.gesture().is_dragging(),
                "drag ended at column {}",
                column
            );
        }
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 3, row));
        assert_eq!(app.browser.current_index(), 1);

        terminal.draw(|f| draw(f, &mut app)).unwrap();
        assert!(screen_text(&terminal).contains("#2"));
    }

    #[test]
    fn test_short_swipe_from_centre_springs_back() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let card = app.card_area;
        let row = card.y + card.height / 2;
        let centre = card.x + card.width / 2;
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), centre, row));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), centre + 3, row));
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        assert_eq!(app.visible_card_area().x, card.x + 3);
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), centre + 3, row));
        assert_eq!(app.browser.current_index(), 0);
    }

    #[test]
    fn test_swipe_columns() {
        assert_eq!(swipe_columns(50), 7);
        assert_eq!(swipe_columns(48), 7);
        assert_eq!(swipe_columns(1), 1);
    }

    #[test]
    fn test_card_shows_first_episode() {
        let mut app = app();
        let screen = render(&mut app);
        assert!(screen.contains("#1"));
        assert!(screen.contains("Super-Papagei"));
        assert!(screen.contains("Kapitel"));
        assert!(screen.contains("+ 1 weitere Kapitel"));
        assert!(screen.contains("+ 1 weitere Sprecher"));
        assert!(app.card_area.width > 0);
        assert!(app.dots_area.width > 0);
    }

    #[test]
    fn test_empty_view_offers_reset() {
        let mut app = app();
        app.browser.update_criteria(|c| c.favorite_only = true);
        let screen = render(&mut app);
        assert!(screen.contains("Keine Episoden gefunden."));
        assert!(screen.contains("Filter zurücksetzen"));
        assert_eq!(app.card_area, Rect::default());
    }

    #[test]
    fn test_filter_badge_counts_active_filters() {
        let mut app = app();
        app.browser.update_criteria(|c| {
            c.favorite_only = true;
            c.cycle_mood(true);
        });
        let screen = render(&mut app);
        assert!(screen.contains(" 2 "));
    }

    #[test]
    fn test_help_lists_threshold() {
        let app = app();
        assert!(get_help_content(&app).contains("ab 7 Spalten"));
    }
}
