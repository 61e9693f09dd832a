//! The map surface capability and the headless scene both front-ends draw.

use crate::error::CoordinateError;
use crate::geo::{Bounds, Coordinate};
use crate::overlay::{Marker, Overlay, OverlayArena, OverlayId, Polyline};

pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 19;

/// Operations the client needs from a map, whatever draws it.
pub trait MapSurface {
    fn add_marker(&mut self, marker: Marker) -> OverlayId;

    fn add_polyline(&mut self, polyline: Polyline) -> OverlayId;

    /// Returns `false` when `id` was not live on this surface.
    fn remove_overlay(&mut self, id: OverlayId) -> bool;

    fn set_view(&mut self, center: Coordinate, zoom: u8);

    /// Show exactly `bounds`. Callers pad beforehand if they want a margin.
    fn fit_bounds(&mut self, bounds: Bounds);
}

/// Visible region of the map in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    bounds: Bounds,
}

impl Viewport {
    pub fn centered(center: Coordinate, zoom: u8) -> Self {
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        let lng_span = span_for_zoom(zoom);
        Self::around(
            (center.latitude(), center.longitude()),
            lng_span / 2.0,
            lng_span,
        )
    }

    /// Viewport showing `bounds`, widened to the deepest zoom if degenerate.
    pub fn fitted(bounds: Bounds) -> Self {
        let min_span = span_for_zoom(MAX_ZOOM);
        Self::around(
            bounds.center(),
            bounds.height().max(min_span / 2.0),
            bounds.width().max(min_span),
        )
    }

    fn around(center: (f64, f64), lat_span: f64, lng_span: f64) -> Self {
        let (lat, lng) = center;
        Self {
            bounds: Bounds {
                south: lat - lat_span / 2.0,
                west: lng - lng_span / 2.0,
                north: lat + lat_span / 2.0,
                east: lng + lng_span / 2.0,
            },
        }
    }

    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Midpoint as `(latitude, longitude)`.
    pub fn center(&self) -> (f64, f64) {
        self.bounds.center()
    }

    /// Nearest whole zoom level for the current longitude span.
    pub fn zoom(&self) -> u8 {
        let level = (360.0 / self.bounds.width()).log2().round();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let level = level.clamp(f64::from(MIN_ZOOM), f64::from(MAX_ZOOM)) as u8;
        level
    }

    /// Zoom in (`delta > 0`) or out around the current center.
    pub fn zoomed(&self, delta: i8) -> Self {
        let scale = 2_f64.powi(-i32::from(delta));
        let min_span = span_for_zoom(MAX_ZOOM);
        let max_span = span_for_zoom(MIN_ZOOM);
        let lng_span = (self.bounds.width() * scale).clamp(min_span, max_span);
        let lat_span = (self.bounds.height() * scale).clamp(min_span / 2.0, max_span / 2.0);
        Self::on_globe(self.center(), lat_span, lng_span)
    }

    /// Shift by fractions of the visible span. Positive moves north/east.
    ///
    /// The view stops at the poles and the antimeridian.
    pub fn panned(&self, north_fraction: f64, east_fraction: f64) -> Self {
        let (lat, lng) = self.center();
        Self::on_globe(
            (
                lat + self.bounds.height() * north_fraction,
                lng + self.bounds.width() * east_fraction,
            ),
            self.bounds.height(),
            self.bounds.width(),
        )
    }

    /// Like `around`, with the center moved so every edge is a valid coordinate.
    fn on_globe(center: (f64, f64), lat_span: f64, lng_span: f64) -> Self {
        let (lat, lng) = center;
        Self::around(
            (
                clamp_axis(lat, lat_span / 2.0, 90.0),
                clamp_axis(lng, lng_span / 2.0, 180.0),
            ),
            lat_span,
            lng_span,
        )
    }

    /// Coordinate under a point given as fractions of the view, origin top-left.
    pub fn unproject(&self, x_fraction: f64, y_fraction: f64) -> Result<Coordinate, CoordinateError> {
        Coordinate::new(
            self.bounds.north - y_fraction * self.bounds.height(),
            self.bounds.west + x_fraction * self.bounds.width(),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::centered(Coordinate::NEW_YORK, 13)
    }
}

fn span_for_zoom(zoom: u8) -> f64 {
    360.0 / 2_f64.powi(i32::from(zoom))
}

fn clamp_axis(value: f64, half_span: f64, limit: f64) -> f64 {
    if half_span >= limit {
        0.0
    } else {
        value.clamp(half_span - limit, limit - half_span)
    }
}

/// Block of terminal cells a map is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellArea {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl CellArea {
    /// Middle of a cell as fractions of the area, origin top-left. `None`
    /// when the cell lies outside.
    pub fn fraction(self, column: u16, row: u16) -> Option<(f64, f64)> {
        let inside = column >= self.x
            && row >= self.y
            && u32::from(column) < u32::from(self.x) + u32::from(self.width)
            && u32::from(row) < u32::from(self.y) + u32::from(self.height);
        if !inside {
            return None;
        }

        let x = (f64::from(column - self.x) + 0.5) / f64::from(self.width);
        let y = (f64::from(row - self.y) + 0.5) / f64::from(self.height);
        Some((x, y))
    }
}

/// In-memory map surface: overlays in an arena plus a viewport.
///
/// Front-ends draw it each frame; tests inspect it directly.
#[derive(Debug, Default)]
pub struct MapScene {
    overlays: OverlayArena,
    viewport: Viewport,
}

impl MapScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn overlays(&self) -> &OverlayArena {
        &self.overlays
    }

    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn pan(&mut self, north_fraction: f64, east_fraction: f64) {
        self.viewport = self.viewport.panned(north_fraction, east_fraction);
    }

    pub fn zoom_by(&mut self, delta: i8) {
        self.viewport = self.viewport.zoomed(delta);
    }
}

impl MapSurface for MapScene {
    fn add_marker(&mut self, marker: Marker) -> OverlayId {
        self.overlays.insert(Overlay::Marker(marker))
    }

    fn add_polyline(&mut self, polyline: Polyline) -> OverlayId {
        self.overlays.insert(Overlay::Polyline(polyline))
    }

    fn remove_overlay(&mut self, id: OverlayId) -> bool {
        self.overlays.remove(id).is_some()
    }

    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.viewport = Viewport::centered(center, zoom);
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.viewport = Viewport::fitted(bounds);
    }
}
