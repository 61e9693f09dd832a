// UI module for the dispatch console
// Map canvas on the left, dispatch panel on the right

pub mod map;
pub mod panel;
pub mod popup;

use crate::app::App;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const PANEL_WIDTH: u16 = 38;

pub fn ui(app: &mut App, f: &mut Frame<'_>) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Map and panel
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area());

    render_header(app, f, main_layout[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(PANEL_WIDTH)])
        .split(main_layout[1]);

    let map_area = map::render_map(app, f, body[0]);
    app.map_area = Some(map_area);
    panel::render_panel(app, f, body[1]);
    render_shortcuts(f, main_layout[2]);

    if app.show_help {
        popup::render_help_popup(f);
    }
}

fn render_header(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Smart Ambulance Dispatch ")
        .title_style(
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightRed));

    let location = match (app.console.location_text(), app.console.provenance()) {
        (Some(text), Some(provenance)) => TextLine::from(vec![
            Span::styled("Location: ", Style::default().fg(Color::Gray)),
            Span::styled(text, Style::default().fg(Color::White)),
            Span::styled(
                format!("  ({})", provenance.label()),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        _ => TextLine::from(Span::styled(
            "Locating...",
            Style::default().fg(Color::Gray),
        )),
    };

    let paragraph = Paragraph::new(location)
        .block(block)
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key = Style::default().fg(Color::Cyan);
    let text = Style::default().fg(Color::Gray);
    let line = TextLine::from(vec![
        Span::styled("Enter", key),
        Span::styled(" find hospital  ", text),
        Span::styled("Click/Space", key),
        Span::styled(" set location  ", text),
        Span::styled("Arrows", key),
        Span::styled(" pan  ", text),
        Span::styled("+/-", key),
        Span::styled(" zoom  ", text),
        Span::styled("F1", key),
        Span::styled(" help  ", text),
        Span::styled("q", key),
        Span::styled(" quit", text),
    ]);

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
