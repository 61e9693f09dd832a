use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};

use crate::app::actions::PAN_STEP;
use crate::app::state::App;

pub fn handle_key(app: &mut App, key: KeyCode) {
    if handle_help_toggle(app, key) {
        return;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Enter => app.submit(),
        KeyCode::Char(' ') => app.pin_at_center(),
        KeyCode::Up => app.pan(PAN_STEP, 0.0),
        KeyCode::Down => app.pan(-PAN_STEP, 0.0),
        KeyCode::Left => app.pan(0.0, -PAN_STEP),
        KeyCode::Right => app.pan(0.0, PAN_STEP),
        KeyCode::Char('+' | '=') => app.zoom(1),
        KeyCode::Char('-') => app.zoom(-1),
        _ => {}
    }
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.show_help {
        return;
    }
    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
        app.pin_at_cell(mouse.column, mouse.row);
    }
}

fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if key == KeyCode::F(1) || key == KeyCode::Char('?') {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;
    use smart_ambulance::config::AppConfig;
    use smart_ambulance_core::{ClientConfig, LifecycleState, Provenance};

    fn app() -> App {
        App::new(AppConfig {
            client: ClientConfig::default(),
            device_fix: None,
        })
        .unwrap()
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[tokio::test]
    async fn help_swallows_keys_until_closed() {
        let mut app = app();
        handle_key(&mut app, KeyCode::F(1));
        assert!(app.show_help);

        handle_key(&mut app, KeyCode::Char('q'));
        assert!(app.running);

        handle_key(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        handle_key(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[tokio::test]
    async fn enter_without_location_keeps_idle() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Enter);
        assert_eq!(app.console.state(), LifecycleState::Idle);
        assert!(app.console.in_flight().is_none());
    }

    #[tokio::test]
    async fn space_and_click_pin_manually() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Char(' '));
        assert_eq!(app.console.provenance(), Some(Provenance::ManualPin));

        let pinned = app.console.location();
        app.map_area = Some(Rect::new(0, 0, 40, 20));
        handle_mouse(&mut app, click(2, 2));
        assert_ne!(app.console.location(), pinned);
    }
}
