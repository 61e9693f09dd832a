//! Keeps the client's [`OverlaySet`] and a [`MapSurface`] in step.
//!
//! Every replacement removes the previous handle from the surface before the
//! new overlay is added, so the surface never holds two origins, two
//! destinations, or two routes.

use crate::geo::{Bounds, Coordinate};
use crate::overlay::{Marker, MarkerHandle, OverlaySet, Polyline, PolylineHandle};
use crate::surface::MapSurface;

#[derive(Debug)]
pub struct MapAdapter<S> {
    surface: S,
    overlays: OverlaySet,
}

impl<S: MapSurface> MapAdapter<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            overlays: OverlaySet::default(),
        }
    }

    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub const fn overlays(&self) -> &OverlaySet {
        &self.overlays
    }

    pub fn place_origin(&mut self, position: Coordinate) {
        if let Some(previous) = self.overlays.origin.take() {
            self.surface.remove_overlay(previous.id);
        }
        let id = self.surface.add_marker(Marker::ambulance(position));
        self.overlays.origin = Some(MarkerHandle { id, position });
    }

    pub fn place_destination(&mut self, position: Coordinate, name: &str, address: &str) {
        if let Some(previous) = self.overlays.destination.take() {
            self.surface.remove_overlay(previous.id);
        }
        let id = self
            .surface
            .add_marker(Marker::hospital(position, name, address));
        self.overlays.destination = Some(MarkerHandle { id, position });
    }

    /// Swap the route for one through `points`. An empty slice leaves no route.
    pub fn replace_route(&mut self, points: &[Coordinate]) {
        if let Some(previous) = self.overlays.route.take() {
            self.surface.remove_overlay(previous.id);
        }
        let Some(bounds) = Bounds::around(points.iter().copied()) else {
            return;
        };
        let id = self.surface.add_polyline(Polyline::route(points.to_vec()));
        self.overlays.route = Some(PolylineHandle { id, bounds });
    }

    pub fn recenter(&mut self, center: Coordinate, zoom: u8) {
        self.surface.set_view(center, zoom);
    }

    /// Fit the view to origin, destination and route, padded by `padding`.
    ///
    /// Needs both markers; returns `false` and leaves the view alone otherwise.
    pub fn fit_to_overlays(&mut self, padding: f64) -> bool {
        let (Some(origin), Some(destination)) = (self.overlays.origin, self.overlays.destination)
        else {
            return false;
        };

        let mut bounds = Bounds::from_point(origin.position);
        bounds.extend(destination.position);
        if let Some(route) = self.overlays.route {
            bounds = bounds.union(route.bounds);
        }

        self.surface.fit_bounds(bounds.pad(padding));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MapScene;

    fn point(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn placing_the_origin_repeatedly_keeps_one_marker() {
        let mut map = MapAdapter::new(MapScene::new());
        for step in 0..5 {
            map.place_origin(point(40.0 + f64::from(step), -74.0));
        }
        assert_eq!(map.surface().overlays().markers().count(), 1);
        let origin = map.overlays().origin.unwrap();
        assert_eq!(origin.position, point(44.0, -74.0));
    }

    #[test]
    fn empty_route_removes_the_previous_polyline() {
        let mut map = MapAdapter::new(MapScene::new());
        map.replace_route(&[point(1.0, 1.0), point(2.0, 2.0)]);
        assert_eq!(map.surface().overlays().polylines().count(), 1);

        map.replace_route(&[]);
        assert_eq!(map.surface().overlays().polylines().count(), 0);
        assert!(map.overlays().route.is_none());
    }

    #[test]
    fn fit_requires_both_markers() {
        let mut map = MapAdapter::new(MapScene::new());
        map.place_origin(point(10.0, 10.0));
        let before = *map.surface().viewport();

        assert!(!map.fit_to_overlays(0.1));
        assert_eq!(*map.surface().viewport(), before);

        map.place_destination(point(11.0, 12.0), "General", "1 Road");
        assert!(map.fit_to_overlays(0.1));
        let bounds = map.surface().viewport().bounds();
        assert!(bounds.contains(point(10.0, 10.0)));
        assert!(bounds.contains(point(11.0, 12.0)));
    }

    #[test]
    fn fit_covers_route_points_outside_the_markers() {
        let mut map = MapAdapter::new(MapScene::new());
        map.place_origin(point(10.0, 10.0));
        map.place_destination(point(11.0, 11.0), "General", "1 Road");
        map.replace_route(&[point(10.0, 10.0), point(9.0, 13.0), point(11.0, 11.0)]);

        assert!(map.fit_to_overlays(0.1));
        let bounds = map.surface().viewport().bounds();
        assert!(bounds.contains(point(9.0, 13.0)));
    }
}
