use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use smart_ambulance::HttpEmergencyClient;
use smart_ambulance_core::{
    ClientConfig, Coordinate, EmergencyConsole, EmergencyRequest, LifecycleState, MapScene,
    RequestError,
};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn request() -> EmergencyRequest {
    EmergencyRequest {
        origin: Coordinate::new(40.71, -74.00).unwrap(),
    }
}

async fn echo_hospital(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "hospital": "St. Mary's",
        "address": "123 Main St",
        "hospitalLat": 40.72,
        "hospitalLng": -74.01,
        "distance": 1500,
        "route": [[body["lat"], body["lng"]], [40.72, -74.01]]
    }))
}

#[tokio::test]
async fn posts_lat_lng_and_decodes_the_hospital() {
    let base = serve(Router::new().route("/emergency", post(echo_hospital))).await;
    let client = HttpEmergencyClient::new(base).unwrap();

    let result = client.find_nearest_hospital(&request()).await.unwrap();

    assert_eq!(result.hospital_name, "St. Mary's");
    assert_eq!(result.hospital_address, "123 Main St");
    assert_eq!(
        result.route_points,
        vec![
            Coordinate::new(40.71, -74.00).unwrap(),
            Coordinate::new(40.72, -74.01).unwrap()
        ]
    );
}

#[tokio::test]
async fn trailing_slash_on_the_base_is_tolerated() {
    let base = serve(Router::new().route("/emergency", post(echo_hospital))).await;
    let client = HttpEmergencyClient::new(format!("{base}/")).unwrap();

    assert!(client.find_nearest_hospital(&request()).await.is_ok());
}

#[tokio::test]
async fn service_error_reaches_the_status_line() {
    let base = serve(Router::new().route(
        "/emergency",
        post(|| async {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": "no hospitals in range" })),
            )
        }),
    ))
    .await;
    let client = HttpEmergencyClient::new(base).unwrap();

    let mut console = EmergencyConsole::new(ClientConfig::default(), MapScene::new());
    console.map_clicked(40.71, -74.00).unwrap();
    let (ticket, request) = console.submit().unwrap();
    let outcome = client.find_nearest_hospital(&request).await;
    console.complete(ticket, outcome);

    let view = console.presentation();
    assert_eq!(console.state(), LifecycleState::Failed);
    assert_eq!(view.status.text, "Error: no hospitals in range");
    assert!(view.control_enabled);
}

#[tokio::test]
async fn error_without_a_message_uses_the_fallback_text() {
    let base = serve(Router::new().route(
        "/emergency",
        post(|| async { (StatusCode::NOT_FOUND, "not json") }),
    ))
    .await;
    let client = HttpEmergencyClient::new(base).unwrap();

    let error = client.find_nearest_hospital(&request()).await.unwrap_err();

    assert_eq!(
        error,
        RequestError::ServiceRejected {
            status: 404,
            message: "Failed to find hospital".to_string(),
        }
    );
}

#[tokio::test]
async fn unreachable_service_is_a_network_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = HttpEmergencyClient::new(format!("http://{addr}")).unwrap();

    let error = client.find_nearest_hospital(&request()).await.unwrap_err();

    assert!(matches!(error, RequestError::NetworkFailure(_)));
}

#[tokio::test]
async fn health_check_reads_status_and_message() {
    let base = serve(Router::new().route(
        "/",
        get(|| async {
            Json(json!({ "status": "ok", "message": "Smart Ambulance API is running" }))
        }),
    ))
    .await;
    let client = HttpEmergencyClient::new(base).unwrap();

    let health = client.check_health().await.unwrap();

    assert_eq!(health.status, "ok");
    assert_eq!(health.message, "Smart Ambulance API is running");
}
