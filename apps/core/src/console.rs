//! The client's single state holder.
//!
//! [`EmergencyConsole`] owns Location State, the request lifecycle, the status
//! line and the map adapter, and is handed to front-ends by reference. It does
//! no IO: `submit` hands back the request to send, and the front-end reports
//! the outcome through `complete` when its transport finishes.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{CoordinateError, GeolocationError, RequestError};
use crate::geo::{Coordinate, Provenance};
use crate::geolocation::{fallback_message, GeolocationFix};
use crate::lifecycle::{Effect, EmergencyLifecycle, LifecycleEvent, LifecycleState, RequestTicket};
use crate::location::LocationState;
use crate::map::MapAdapter;
use crate::renderer::{HospitalPanel, ResultRenderer};
use crate::service::{EmergencyRequest, EmergencyResult};
use crate::status::{Presentation, StatusMessage, Tone, ROUTE_READY, SEARCHING};
use crate::surface::{CellArea, MapScene, MapSurface};

#[derive(Debug)]
pub struct EmergencyConsole<S> {
    config: ClientConfig,
    location: LocationState,
    lifecycle: EmergencyLifecycle,
    renderer: ResultRenderer,
    map: Rc<RefCell<MapAdapter<S>>>,
    location_text: Rc<RefCell<Option<String>>>,
    status: StatusMessage,
    panel: Option<HospitalPanel>,
}

impl EmergencyConsole<MapScene> {
    /// A click on the cell grid the map was drawn into. Returns `Ok(None)`
    /// when the cell is not on the map.
    pub fn map_cell_clicked(
        &mut self,
        area: CellArea,
        column: u16,
        row: u16,
    ) -> Result<Option<Coordinate>, CoordinateError> {
        let Some((x, y)) = area.fraction(column, row) else {
            return Ok(None);
        };

        let coordinate = self.map.borrow().surface().viewport().unproject(x, y)?;
        self.set_location(coordinate, Provenance::ManualPin);
        Ok(Some(coordinate))
    }
}

impl<S: MapSurface + 'static> EmergencyConsole<S> {
    pub fn new(config: ClientConfig, surface: S) -> Self {
        let map = Rc::new(RefCell::new(MapAdapter::new(surface)));
        let location_text = Rc::new(RefCell::new(None));
        let mut location = LocationState::new();

        location.subscribe({
            let map = Rc::clone(&map);
            let zoom = config.default_zoom;
            move |change| {
                let mut map = map.borrow_mut();
                map.place_origin(change.coordinate);
                map.recenter(change.coordinate, zoom);
            }
        });
        location.subscribe({
            let text = Rc::clone(&location_text);
            move |change| *text.borrow_mut() = Some(change.coordinate.display_text())
        });

        Self {
            renderer: ResultRenderer::new(config.fit_padding),
            config,
            location,
            lifecycle: EmergencyLifecycle::new(),
            map,
            location_text,
            status: StatusMessage::default(),
            panel: None,
        }
    }

    /// Call once, right before asking the device for a position.
    pub fn begin_location_acquisition(&mut self) {
        self.drive(LifecycleEvent::AcquisitionStarted);
    }

    /// Apply the startup acquisition policy to the provider's single outcome.
    ///
    /// Any failure, including a fix outside the valid ranges, shows a warning
    /// and falls back to the configured default location.
    pub fn apply_geolocation(
        &mut self,
        outcome: Result<GeolocationFix, GeolocationError>,
    ) -> Provenance {
        let coordinate = outcome.and_then(|fix| {
            fix.coordinate().map_err(|error| {
                warn!(%error, "geolocation provider reported an invalid position");
                GeolocationError::PositionUnavailable
            })
        });

        match coordinate {
            Ok(coordinate) => {
                self.set_location(coordinate, Provenance::DeviceGeolocation);
                Provenance::DeviceGeolocation
            }
            Err(error) => {
                let fallback = self.config.fallback_location;
                warn!(%error, %fallback, "geolocation failed, using fallback location");
                self.status = StatusMessage::new(fallback_message(error), Tone::Error);
                self.set_location(fallback, Provenance::DefaultFallback);
                Provenance::DefaultFallback
            }
        }
    }

    pub fn set_location(&mut self, coordinate: Coordinate, provenance: Provenance) {
        self.location.set(coordinate, provenance);
        self.drive(LifecycleEvent::LocationSet);
    }

    /// A click on the map pins the location there, overriding any source.
    pub fn map_clicked(
        &mut self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Coordinate, CoordinateError> {
        let coordinate = Coordinate::new(latitude, longitude)?;
        self.set_location(coordinate, Provenance::ManualPin);
        Ok(coordinate)
    }

    /// Press the submission control.
    ///
    /// Returns the request to send, or `None` when nothing may be sent: no
    /// location yet (the status line says so) or a request already in flight.
    pub fn submit(&mut self) -> Option<(RequestTicket, EmergencyRequest)> {
        let origin = self.location.get();
        match self.lifecycle.process_event(LifecycleEvent::Submit { origin }) {
            Ok(Effect::Issue { ticket, request }) => {
                info!(
                    generation = ticket.generation(),
                    origin = %request.origin,
                    "issuing emergency request"
                );
                self.status = StatusMessage::new(SEARCHING, Tone::Neutral);
                Some((ticket, request))
            }
            Ok(effect) => {
                self.apply(effect);
                None
            }
            Err(error) => {
                debug!(%error, "submit ignored");
                None
            }
        }
    }

    /// Report how the request behind `ticket` ended.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<EmergencyResult, RequestError>,
    ) {
        self.drive(LifecycleEvent::Responded { ticket, outcome });
    }

    pub fn presentation(&self) -> Presentation {
        Presentation::project(self.lifecycle.state(), &self.status)
    }

    pub const fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub const fn in_flight(&self) -> Option<RequestTicket> {
        self.lifecycle.in_flight()
    }

    pub fn location(&self) -> Option<Coordinate> {
        self.location.get()
    }

    pub fn provenance(&self) -> Option<Provenance> {
        self.location.provenance()
    }

    /// Text of the displayed coordinate, once any location is known.
    pub fn location_text(&self) -> Option<String> {
        self.location_text.borrow().clone()
    }

    pub const fn status(&self) -> &StatusMessage {
        &self.status
    }

    pub const fn panel(&self) -> Option<&HospitalPanel> {
        self.panel.as_ref()
    }

    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn map(&self) -> Ref<'_, MapAdapter<S>> {
        self.map.borrow()
    }

    pub fn map_mut(&self) -> RefMut<'_, MapAdapter<S>> {
        self.map.borrow_mut()
    }

    fn drive(&mut self, event: LifecycleEvent) {
        match self.lifecycle.process_event(event) {
            Ok(effect) => self.apply(effect),
            Err(error) => warn!(%error, "lifecycle event ignored"),
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Rejected(error) => {
                self.status = StatusMessage::new(error.to_string(), Tone::Error);
            }
            Effect::Render(result) => {
                let panel = self.renderer.render(result, &mut self.map.borrow_mut());
                self.panel = Some(panel);
                self.status = StatusMessage::new(ROUTE_READY, Tone::Success);
            }
            Effect::Report(error) => {
                warn!(%error, "emergency request failed");
                self.status = StatusMessage::new(format!("Error: {error}"), Tone::Error);
            }
            Effect::Issue { .. } | Effect::Discarded(_) | Effect::None => {}
        }
    }
}
