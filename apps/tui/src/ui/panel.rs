use crate::app::App;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use smart_ambulance_core::status::{Tone, SEARCHING};
use throbber_widgets_tui::{Throbber, WhichUse, BRAILLE_SIX};

pub fn render_panel(app: &mut App, f: &mut Frame<'_>, area: Rect) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Submission control
            Constraint::Length(5), // Status
            Constraint::Min(5),    // Hospital info
        ])
        .split(area);

    render_control(app, f, sections[0]);
    render_status(app, f, sections[1]);
    render_hospital(app, f, sections[2]);
}

fn render_control(app: &App, f: &mut Frame<'_>, area: Rect) {
    let enabled = app.console.presentation().control_enabled;
    let (style, border) = if enabled {
        (
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
            Color::LightRed,
        )
    } else {
        (Style::default().fg(Color::DarkGray), Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let paragraph = Paragraph::new(Span::styled(" Enter  Find Nearest Hospital ", style))
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn render_status(app: &mut App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Status ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let view = app.console.presentation();
    if view.loading {
        let throbber = Throbber::default()
            .label(SEARCHING)
            .style(Style::default().fg(Color::White))
            .throbber_style(
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            )
            .throbber_set(BRAILLE_SIX)
            .use_type(WhichUse::Spin);
        f.render_stateful_widget(throbber, inner, &mut app.throbber);
        return;
    }

    if !view.status_visible || view.status.text.is_empty() {
        return;
    }

    let paragraph = Paragraph::new(view.status.text)
        .style(Style::default().fg(tone_color(view.status.tone)))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, inner);
}

fn render_hospital(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Nearest Hospital ")
        .title_style(Style::default().fg(Color::LightGreen))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let text = app.console.panel().map_or_else(
        || {
            Text::from(TextLine::from(Span::styled(
                "No hospital requested yet",
                Style::default().fg(Color::DarkGray),
            )))
        },
        |panel| {
            Text::from(vec![
                TextLine::from(Span::styled(
                    panel.name.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )),
                TextLine::from(Span::styled(
                    panel.address.clone(),
                    Style::default().fg(Color::Gray),
                )),
                TextLine::from(""),
                TextLine::from(Span::styled(
                    panel.distance_text(),
                    Style::default().fg(Color::Cyan),
                )),
            ])
        },
    );

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

const fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Neutral => Color::White,
        Tone::Success => Color::LightGreen,
        Tone::Error => Color::LightRed,
    }
}
