use crate::app::App;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker as CanvasMarker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Map, MapResolution};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;
use smart_ambulance_core::overlay::{LineStyle, MarkerIcon};

/// Draw the map canvas. Returns the inner area, which is what the viewport
/// spans and what mouse clicks are resolved against.
pub fn render_map(app: &App, f: &mut Frame<'_>, area: Rect) -> Rect {
    let map = app.console.map();
    let scene = map.surface();
    let viewport = scene.viewport();
    let bounds = viewport.bounds();

    let block = Block::default()
        .title(format!(" Map  zoom {} ", viewport.zoom()))
        .title_style(Style::default().fg(Color::Cyan))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);

    let canvas = Canvas::default()
        .block(block)
        .marker(CanvasMarker::Braille)
        .x_bounds([bounds.west, bounds.east])
        .y_bounds([bounds.south, bounds.north])
        .paint(|ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: Color::DarkGray,
            });
            ctx.layer();

            for polyline in scene.overlays().polylines() {
                let color = route_color(polyline.style);
                for (from, to) in polyline.segments() {
                    ctx.draw(&CanvasLine {
                        x1: from.longitude(),
                        y1: from.latitude(),
                        x2: to.longitude(),
                        y2: to.latitude(),
                        color,
                    });
                }
            }
            ctx.layer();

            // Crosshair: where Space drops a pin
            let (lat, lng) = bounds.center();
            ctx.print(lng, lat, Span::styled("+", Style::default().fg(Color::Gray)));

            for marker in scene.overlays().markers() {
                ctx.print(
                    marker.position.longitude(),
                    marker.position.latitude(),
                    Span::styled(
                        format!("{} {}", marker.icon.glyph(), marker.label),
                        marker_style(marker.icon),
                    ),
                );
            }
        });

    f.render_widget(canvas, area);
    inner
}

const fn route_color(style: LineStyle) -> Color {
    let (r, g, b) = style.color;
    Color::Rgb(r, g, b)
}

fn marker_style(icon: MarkerIcon) -> Style {
    match icon {
        MarkerIcon::Ambulance => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        MarkerIcon::Hospital => Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD),
    }
}
