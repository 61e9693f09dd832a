use ratatui::layout::Rect;
use smart_ambulance::geolocation::current_position;
use smart_ambulance_core::CellArea;
use tracing::{debug, warn};

use crate::app::state::{App, Completion};

/// Fraction of the visible span moved by one arrow key press.
pub const PAN_STEP: f64 = 0.1;

impl App {
    /// Run startup acquisition: ask the provider once and apply the result.
    pub fn acquire_location(&mut self) {
        self.console.begin_location_acquisition();
        let outcome = current_position(self.device_fix);
        self.console.apply_geolocation(outcome);
    }

    /// Press the submission control. The exchange runs on its own task and
    /// reports back through the completion channel.
    pub fn submit(&mut self) {
        let Some((ticket, request)) = self.console.submit() else {
            return;
        };

        let client = self.client.clone();
        let completions = self.completions_tx.clone();
        tokio::spawn(async move {
            let outcome = client.find_nearest_hospital(&request).await;
            if completions.send(Completion { ticket, outcome }).is_err() {
                debug!("console closed before the response arrived");
            }
        });
    }

    /// Apply every response that has arrived since the last frame.
    pub fn drain_completions(&mut self) {
        while let Ok(Completion { ticket, outcome }) = self.completions_rx.try_recv() {
            self.console.complete(ticket, outcome);
        }
    }

    /// Drop a manual pin under the crosshair in the middle of the map.
    pub fn pin_at_center(&mut self) {
        let (latitude, longitude) = self.console.map().surface().viewport().center();
        if let Err(error) = self.console.map_clicked(latitude, longitude) {
            warn!(%error, "map center is not a valid location");
        }
    }

    /// Drop a manual pin at a terminal cell, if it lies on the map.
    pub fn pin_at_cell(&mut self, column: u16, row: u16) {
        let Some(area) = self.map_area else {
            return;
        };

        if let Err(error) = self.console.map_cell_clicked(cell_area(area), column, row) {
            warn!(%error, "clicked outside the valid coordinate range");
        }
    }

    pub fn pan(&mut self, north_fraction: f64, east_fraction: f64) {
        self.console
            .map_mut()
            .surface_mut()
            .pan(north_fraction, east_fraction);
    }

    pub fn zoom(&mut self, delta: i8) {
        self.console.map_mut().surface_mut().zoom_by(delta);
    }
}

pub const fn cell_area(area: Rect) -> CellArea {
    CellArea {
        x: area.x,
        y: area.y,
        width: area.width,
        height: area.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smart_ambulance::config::AppConfig;
    use smart_ambulance_core::service::decode_response;
    use smart_ambulance_core::status::{Tone, ROUTE_READY};
    use smart_ambulance_core::{ClientConfig, Coordinate, LifecycleState, Provenance};

    fn app() -> App {
        App::new(AppConfig {
            client: ClientConfig::default(),
            device_fix: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn clicks_outside_the_map_are_ignored() {
        let mut app = app();
        app.map_area = Some(Rect::new(10, 5, 20, 10));

        app.pin_at_cell(9, 5);
        app.pin_at_cell(30, 5);

        assert!(app.console.location().is_none());
    }

    #[tokio::test]
    async fn panning_far_north_still_pins_on_the_globe() {
        let mut app = app();
        for _ in 0..500 {
            app.pan(PAN_STEP, 0.0);
        }

        app.pin_at_center();

        let pinned = app.console.location().unwrap();
        assert!(pinned.latitude() <= 90.0);
        assert_eq!(app.console.provenance(), Some(Provenance::ManualPin));
    }

    #[tokio::test]
    async fn without_a_device_fix_the_fallback_is_used() {
        let mut app = app();
        app.acquire_location();

        assert_eq!(app.console.location(), Some(Coordinate::NEW_YORK));
        assert_eq!(app.console.provenance(), Some(Provenance::DefaultFallback));
        assert_eq!(app.console.status().tone, Tone::Error);
    }

    #[tokio::test]
    async fn clicking_the_map_pins_the_location() {
        let mut app = app();
        app.map_area = Some(Rect::new(0, 0, 40, 20));

        app.pin_at_cell(20, 10);

        let pinned = app.console.location().unwrap();
        let (lat, lng) = app.console.map().surface().viewport().center();
        assert!((pinned.latitude() - lat).abs() < 0.01);
        assert!((pinned.longitude() - lng).abs() < 0.01);
        assert_eq!(app.console.provenance(), Some(Provenance::ManualPin));
    }

    #[tokio::test]
    async fn pan_and_zoom_move_the_view() {
        let mut app = app();
        let before = *app.console.map().surface().viewport();

        app.pan(PAN_STEP, 0.0);
        let (lat, _) = app.console.map().surface().viewport().center();
        assert!(lat > before.center().0);

        app.zoom(1);
        assert_eq!(
            app.console.map().surface().viewport().zoom(),
            before.zoom() + 1
        );
    }

    #[tokio::test]
    async fn completions_are_applied_on_drain() {
        let mut app = app();
        app.pin_at_center();
        let (ticket, _) = app.console.submit().unwrap();
        let body = r#"{"hospital":"St. Mary's","address":"123 Main St","hospitalLat":40.72,"hospitalLng":-74.01,"distance":1500,"route":[]}"#;
        app.completions_tx
            .send(Completion {
                ticket,
                outcome: decode_response(200, body),
            })
            .unwrap();

        app.drain_completions();

        assert_eq!(app.console.state(), LifecycleState::Succeeded);
        assert_eq!(app.console.status().text, ROUTE_READY);
    }
}
