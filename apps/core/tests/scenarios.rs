use smart_ambulance_core::geolocation::{GeolocationFix, ACCESS_DENIED};
use smart_ambulance_core::map::MapAdapter;
use smart_ambulance_core::overlay::MarkerIcon;
use smart_ambulance_core::renderer::ResultRenderer;
use smart_ambulance_core::service::decode_response;
use smart_ambulance_core::status::Tone;
use smart_ambulance_core::{
    ClientConfig, Coordinate, EmergencyConsole, EmergencyResult, GeolocationError,
    LifecycleState, MapScene, Provenance,
};

const ST_MARYS: &str = r#"{
    "hospital": "St. Mary's",
    "address": "123 Main St",
    "hospitalLat": 40.72,
    "hospitalLng": -74.01,
    "distance": 1500,
    "route": [[40.71, -74.00], [40.72, -74.01]]
}"#;

fn point(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng).unwrap()
}

fn console() -> EmergencyConsole<MapScene> {
    EmergencyConsole::new(ClientConfig::default(), MapScene::new())
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn device_fix_places_origin_and_centers_view() {
    let mut console = console();
    console.begin_location_acquisition();

    let provenance = console.apply_geolocation(Ok(GeolocationFix {
        latitude: 40.7128,
        longitude: -74.0060,
    }));

    assert_eq!(provenance, Provenance::DeviceGeolocation);
    assert_eq!(console.state(), LifecycleState::Idle);
    assert_eq!(console.status().tone, Tone::Neutral);
    assert!(console.status().text.is_empty());

    let map = console.map();
    let origin: Vec<_> = map.surface().overlays().markers().collect();
    assert_eq!(origin.len(), 1);
    assert_eq!(origin[0].position, point(40.7128, -74.0060));
    let (lat, lng) = map.surface().viewport().center();
    assert_close(lat, 40.7128);
    assert_close(lng, -74.0060);
}

#[test]
fn denied_geolocation_uses_the_fallback() {
    let mut console = console();
    console.begin_location_acquisition();
    console.apply_geolocation(Err(GeolocationError::PermissionDenied));

    assert_eq!(console.location(), Some(point(40.7128, -74.0060)));
    assert_eq!(console.provenance(), Some(Provenance::DefaultFallback));
    assert_eq!(console.status().text, ACCESS_DENIED);
    assert_eq!(console.status().tone, Tone::Error);
}

#[test]
fn successful_response_draws_route_and_fits_view() {
    let mut console = console();
    console.map_clicked(40.71, -74.00).unwrap();

    let (ticket, request) = console.submit().unwrap();
    assert_eq!(request.origin, point(40.71, -74.00));
    console.complete(ticket, decode_response(200, ST_MARYS));

    assert_eq!(console.state(), LifecycleState::Succeeded);
    assert_eq!(
        console.panel().unwrap().distance_text(),
        "Distance: 1.50 km"
    );

    let map = console.map();
    let scene = map.surface();
    let hospital = scene
        .overlays()
        .markers()
        .find(|marker| marker.icon == MarkerIcon::Hospital)
        .unwrap();
    assert_eq!(hospital.position, point(40.72, -74.01));

    let routes: Vec<_> = scene.overlays().polylines().collect();
    assert_eq!(routes.len(), 1);
    assert_eq!(
        routes[0].points,
        vec![point(40.71, -74.00), point(40.72, -74.01)]
    );

    let view = scene.viewport().bounds();
    assert_close(view.south, 40.71 - 0.001);
    assert_close(view.north, 40.72 + 0.001);
    assert_close(view.west, -74.01 - 0.001);
    assert_close(view.east, -74.00 + 0.001);
}

#[test]
fn service_error_is_shown_and_control_reenabled() {
    let mut console = console();
    console.map_clicked(40.71, -74.00).unwrap();
    let (ticket, _) = console.submit().unwrap();
    assert!(!console.presentation().control_enabled);

    console.complete(
        ticket,
        decode_response(503, r#"{"error":"no hospitals in range"}"#),
    );

    let view = console.presentation();
    assert_eq!(console.state(), LifecycleState::Failed);
    assert_eq!(view.status.text, "Error: no hospitals in range");
    assert_eq!(view.status.tone, Tone::Error);
    assert!(view.control_enabled);
}

#[test]
fn repeated_location_changes_keep_one_origin_marker() {
    let mut console = console();
    for (lat, lng) in [(1.0, 2.0), (-33.86, 151.2), (89.9, -179.9), (0.0, 0.0)] {
        console.map_clicked(lat, lng).unwrap();
        assert_eq!(console.location(), Some(point(lat, lng)));
    }

    let map = console.map();
    let ambulances = map
        .surface()
        .overlays()
        .markers()
        .filter(|marker| marker.icon == MarkerIcon::Ambulance)
        .count();
    assert_eq!(ambulances, 1);
}

#[test]
fn double_submit_issues_one_request() {
    let mut console = console();
    console.map_clicked(40.71, -74.00).unwrap();

    let issued = [console.submit(), console.submit()]
        .into_iter()
        .flatten()
        .count();

    assert_eq!(issued, 1);
    assert_eq!(console.state(), LifecycleState::Submitting);
}

#[test]
fn submit_without_location_never_issues() {
    let mut console = console();
    assert!(console.submit().is_none());
    assert!(console.in_flight().is_none());
    assert_eq!(console.state(), LifecycleState::Idle);
    assert_eq!(console.status().tone, Tone::Error);
}

#[test]
fn stale_ticket_is_ignored_after_a_newer_request() {
    let mut console = console();
    console.map_clicked(40.71, -74.00).unwrap();
    let (first, _) = console.submit().unwrap();
    console.complete(first, decode_response(503, "{}"));
    let (second, _) = console.submit().unwrap();

    console.complete(first, decode_response(200, ST_MARYS));

    assert_eq!(console.state(), LifecycleState::Submitting);
    assert_eq!(console.in_flight(), Some(second));
    assert!(console.panel().is_none());
}

#[test]
fn empty_route_renders_without_a_polyline() {
    let mut map = MapAdapter::new(MapScene::new());
    map.place_origin(point(40.71, -74.00));
    let result = EmergencyResult {
        hospital_name: "St. Mary's".to_string(),
        hospital_address: "123 Main St".to_string(),
        hospital_coordinate: point(40.72, -74.01),
        distance_meters: 1500.0,
        route_points: Vec::new(),
    };

    ResultRenderer::new(0.1).render(result, &mut map);

    assert_eq!(map.surface().overlays().polylines().count(), 0);
    assert!(map.overlays().route.is_none());
}

#[test]
fn rendering_twice_leaves_one_destination_and_route() {
    let mut map = MapAdapter::new(MapScene::new());
    map.place_origin(point(40.71, -74.00));
    let result = decode_response(200, ST_MARYS).unwrap();
    let renderer = ResultRenderer::new(0.1);

    renderer.render(result.clone(), &mut map);
    let first_view = *map.surface().viewport();
    renderer.render(result, &mut map);

    let overlays = map.surface().overlays();
    let hospitals = overlays
        .markers()
        .filter(|marker| marker.icon == MarkerIcon::Hospital)
        .count();
    assert_eq!(hospitals, 1);
    assert_eq!(overlays.polylines().count(), 1);
    assert_eq!(overlays.len(), 3);
    assert_eq!(*map.surface().viewport(), first_view);
}
