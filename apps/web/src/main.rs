mod animation;
mod api;
mod geolocation;

use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;

use animation::{Spinner, SpinnerMode};
use ratzilla::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker as CanvasMarker,
    text::{Line as TextLine, Span, Text},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Map, MapResolution},
        Block, Borders, Paragraph, Wrap,
    },
    Frame, Terminal,
};
use ratzilla::{DomBackend, WebRenderer};
use smart_ambulance_core::overlay::MarkerIcon;
use smart_ambulance_core::status::Tone;
use smart_ambulance_core::{CellArea, ClientConfig, EmergencyConsole, MapScene};
use wasm_bindgen_futures::spawn_local;

type Console = Rc<RefCell<EmergencyConsole<MapScene>>>;
/// Inner area of the map canvas from the last frame, for mouse picks.
type MapArea = Rc<Cell<Option<Rect>>>;

const PAN_STEP: f64 = 0.1;

fn main() -> io::Result<()> {
    let config = ClientConfig::default().with_service_url(api::service_base_url());
    let console: Console = Rc::new(RefCell::new(EmergencyConsole::new(config, MapScene::new())));
    let spinner = Rc::new(RefCell::new(Spinner::default()));
    let map_area: MapArea = Rc::new(Cell::new(None));

    console.borrow_mut().begin_location_acquisition();
    geolocation::request_position({
        let console = console.clone();
        move |outcome| {
            console.borrow_mut().apply_geolocation(outcome);
        }
    });

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let console = console.clone();
        move |event| match event.code {
            KeyCode::Enter => submit(&console),
            KeyCode::Char(' ') => pin_at_center(&console),
            KeyCode::Up => pan(&console, PAN_STEP, 0.0),
            KeyCode::Down => pan(&console, -PAN_STEP, 0.0),
            KeyCode::Left => pan(&console, 0.0, -PAN_STEP),
            KeyCode::Right => pan(&console, 0.0, PAN_STEP),
            KeyCode::Char('+' | '=') => zoom(&console, 1),
            KeyCode::Char('-') => zoom(&console, -1),
            _ => {}
        }
    })?;

    terminal.on_mouse_event({
        let console = console.clone();
        let map_area = map_area.clone();
        move |event| pin_at_click(&console, map_area.get(), &event)
    })?;

    terminal.draw_web(move |f| {
        let now = web_sys::window()
            .and_then(|window| window.performance())
            .map_or(0.0, |performance| performance.now() / 1000.0);

        let console = console.borrow();
        let mode = if console.presentation().loading {
            SpinnerMode::Spinning
        } else {
            SpinnerMode::Idle
        };
        spinner.borrow_mut().tick(now, mode);

        map_area.set(Some(render(&console, &spinner.borrow(), f)));
    });

    Ok(())
}

fn submit(console: &Console) {
    let issued = console.borrow_mut().submit();
    let Some((ticket, request)) = issued else {
        return;
    };

    let base_url = console.borrow().config().service_url.clone();
    let console = Rc::clone(console);
    spawn_local(async move {
        let outcome = api::find_nearest_hospital(&base_url, request).await;
        if let Err(error) = &outcome {
            web_sys::console::error_1(&format!("Emergency request failed: {error}").into());
        }
        console.borrow_mut().complete(ticket, outcome);
    });
}

fn pin_at_center(console: &Console) {
    let (latitude, longitude) = console.borrow().map().surface().viewport().center();
    if let Err(error) = console.borrow_mut().map_clicked(latitude, longitude) {
        web_sys::console::warn_1(&format!("Cannot pin here: {error}").into());
    }
}

fn pin_at_click(console: &Console, map_area: Option<Rect>, event: &MouseEvent) {
    if event.kind != MouseEventKind::SingleClick(MouseButton::Left) {
        return;
    }
    let Some(area) = map_area else {
        return;
    };

    let area = CellArea {
        x: area.x,
        y: area.y,
        width: area.width,
        height: area.height,
    };
    if let Err(error) = console
        .borrow_mut()
        .map_cell_clicked(area, event.col, event.row)
    {
        web_sys::console::warn_1(&format!("Cannot pin here: {error}").into());
    }
}

fn pan(console: &Console, north_fraction: f64, east_fraction: f64) {
    console
        .borrow()
        .map_mut()
        .surface_mut()
        .pan(north_fraction, east_fraction);
}

fn zoom(console: &Console, delta: i8) {
    console.borrow().map_mut().surface_mut().zoom_by(delta);
}

/// Draw one frame and return the inner area of the map canvas.
fn render(console: &EmergencyConsole<MapScene>, spinner: &Spinner, f: &mut Frame<'_>) -> Rect {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(console, f, main_layout[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(main_layout[1]);

    let map_area = render_map(console, f, body[0]);
    render_panel(console, spinner, f, body[1]);
    render_footer(f, main_layout[2]);
    map_area
}

fn render_header(console: &EmergencyConsole<MapScene>, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("Smart Ambulance")
        .title_style(
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightRed));

    let line = match (console.location_text(), console.provenance()) {
        (Some(text), Some(provenance)) => TextLine::from(vec![
            Span::styled("Location: ", Style::default().fg(Color::Gray)),
            Span::styled(text, Style::default().fg(Color::White)),
            Span::styled(
                format!("  ({})", provenance.label()),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        _ => TextLine::from(Span::styled(
            "Getting your location...",
            Style::default().fg(Color::Gray),
        )),
    };

    f.render_widget(Paragraph::new(Text::from(line)).block(block), area);
}

fn render_map(console: &EmergencyConsole<MapScene>, f: &mut Frame<'_>, area: Rect) -> Rect {
    let map = console.map();
    let scene = map.surface();
    let bounds = scene.viewport().bounds();

    let block = Block::default()
        .title(format!("Map  zoom {}", scene.viewport().zoom()))
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
                let (r, g, b) = polyline.style.color;
                for (from, to) in polyline.segments() {
                    ctx.draw(&CanvasLine {
                        x1: from.longitude(),
                        y1: from.latitude(),
                        x2: to.longitude(),
                        y2: to.latitude(),
                        color: Color::Rgb(r, g, b),
                    });
                }
            }
            ctx.layer();

            let (lat, lng) = bounds.center();
            ctx.print(lng, lat, Span::styled("+", Style::default().fg(Color::Gray)));

            for marker in scene.overlays().markers() {
                let color = match marker.icon {
                    MarkerIcon::Ambulance => Color::Yellow,
                    MarkerIcon::Hospital => Color::LightGreen,
                };
                ctx.print(
                    marker.position.longitude(),
                    marker.position.latitude(),
                    Span::styled(
                        format!("{} {}", marker.icon.glyph(), marker.label),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });

    f.render_widget(canvas, area);
    inner
}

fn render_panel(
    console: &EmergencyConsole<MapScene>,
    spinner: &Spinner,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let view = console.presentation();
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(5),
        ])
        .split(area);

    let control_style = if view.control_enabled {
        Style::default()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let control = Paragraph::new(Span::styled(" Enter  Find Nearest Hospital ", control_style))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(control, sections[0]);

    let status_line = if view.loading {
        TextLine::from(vec![
            Span::styled(
                spinner.frame(),
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::raw(smart_ambulance_core::status::SEARCHING),
        ])
    } else if view.status_visible {
        let color = match view.status.tone {
            Tone::Neutral => Color::White,
            Tone::Success => Color::LightGreen,
            Tone::Error => Color::LightRed,
        };
        TextLine::from(Span::styled(view.status.text, Style::default().fg(color)))
    } else {
        TextLine::from("")
    };
    let status = Paragraph::new(Text::from(status_line))
        .block(Block::default().title("Status").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(status, sections[1]);

    let hospital = console.panel().map_or_else(
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
    let hospital = Paragraph::new(hospital)
        .block(
            Block::default()
                .title("Nearest Hospital")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(hospital, sections[2]);
}

fn render_footer(f: &mut Frame<'_>, area: Rect) {
    let line = TextLine::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::raw(" find hospital  "),
        Span::styled("Click/Space", Style::default().fg(Color::Cyan)),
        Span::raw(" set location  "),
        Span::styled("Arrows", Style::default().fg(Color::Cyan)),
        Span::raw(" pan  "),
        Span::styled("+/-", Style::default().fg(Color::Cyan)),
        Span::raw(" zoom"),
    ]);
    f.render_widget(
        Paragraph::new(Text::from(line)).alignment(Alignment::Center),
        area,
    );
}
