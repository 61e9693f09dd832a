//! Turns a successful service response into map overlays and panel text.

use serde::Serialize;
use tracing::info;

use crate::map::MapAdapter;
use crate::service::EmergencyResult;
use crate::surface::MapSurface;

/// Hospital details revealed after a successful request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HospitalPanel {
    pub name: String,
    pub address: String,
    pub distance_meters: f64,
}

impl HospitalPanel {
    pub fn distance_text(&self) -> String {
        format!("Distance: {:.2} km", self.distance_meters / 1000.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultRenderer {
    fit_padding: f64,
}

impl ResultRenderer {
    pub const fn new(fit_padding: f64) -> Self {
        Self { fit_padding }
    }

    /// Apply `result` to the map. Rendering the same result twice leaves the
    /// map exactly as rendering it once.
    pub fn render<S: MapSurface>(
        &self,
        result: EmergencyResult,
        map: &mut MapAdapter<S>,
    ) -> HospitalPanel {
        map.place_destination(
            result.hospital_coordinate,
            &result.hospital_name,
            &result.hospital_address,
        );
        map.replace_route(&result.route_points);
        let fitted = map.fit_to_overlays(self.fit_padding);

        info!(
            hospital = %result.hospital_name,
            route_points = result.route_points.len(),
            fitted,
            "rendered emergency result"
        );

        HospitalPanel {
            name: result.hospital_name,
            address: result.hospital_address,
            distance_meters: result.distance_meters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;
    use crate::surface::MapScene;

    fn result(route: Vec<Coordinate>) -> EmergencyResult {
        EmergencyResult {
            hospital_name: "St. Mary's".to_string(),
            hospital_address: "123 Main St".to_string(),
            hospital_coordinate: Coordinate::new(40.72, -74.01).unwrap(),
            distance_meters: 1500.0,
            route_points: route,
        }
    }

    #[test]
    fn distance_is_kilometres_with_two_decimals() {
        let panel = HospitalPanel {
            name: String::new(),
            address: String::new(),
            distance_meters: 1500.0,
        };
        assert_eq!(panel.distance_text(), "Distance: 1.50 km");

        let panel = HospitalPanel {
            distance_meters: 0.0,
            ..panel
        };
        assert_eq!(panel.distance_text(), "Distance: 0.00 km");
    }

    #[test]
    fn without_an_origin_the_viewport_is_left_alone() {
        let mut map = MapAdapter::new(MapScene::new());
        let before = *map.surface().viewport();

        ResultRenderer::new(0.1).render(result(Vec::new()), &mut map);

        assert_eq!(*map.surface().viewport(), before);
        assert_eq!(map.surface().overlays().markers().count(), 1);
    }

    #[test]
    fn panel_carries_name_and_address() {
        let mut map = MapAdapter::new(MapScene::new());
        let panel = ResultRenderer::new(0.1).render(result(Vec::new()), &mut map);
        assert_eq!(panel.name, "St. Mary's");
        assert_eq!(panel.address, "123 Main St");
    }
}
