//! Wire format of the hospital routing service and response decoding.
//!
//! Transport lives in the front-ends (reqwest natively, `fetch` in the
//! browser); both hand the status code and raw body to [`decode_response`].

use serde::{Deserialize, Serialize};

use crate::error::RequestError;
use crate::geo::Coordinate;

pub const EMERGENCY_PATH: &str = "/emergency";
pub const HEALTH_PATH: &str = "/";

/// Used when a rejection carries no `error` field of its own.
pub const REJECTION_FALLBACK: &str = "Failed to find hospital";

/// One emergency submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmergencyRequest {
    pub origin: Coordinate,
}

/// JSON body for `POST /emergency`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmergencyPayload {
    pub lat: f64,
    pub lng: f64,
}

impl From<&EmergencyRequest> for EmergencyPayload {
    fn from(request: &EmergencyRequest) -> Self {
        Self {
            lat: request.origin.latitude(),
            lng: request.origin.longitude(),
        }
    }
}

/// Nearest hospital and the route to it.
#[derive(Debug, Clone, PartialEq)]
pub struct EmergencyResult {
    pub hospital_name: String,
    pub hospital_address: String,
    pub hospital_coordinate: Coordinate,
    pub distance_meters: f64,
    pub route_points: Vec<Coordinate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmergencyResponse {
    hospital: String,
    address: String,
    hospital_lat: f64,
    hospital_lng: f64,
    distance: f64,
    route: Vec<[f64; 2]>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// Join a base address and a path without doubling the slash.
pub fn service_url(base: &str, path: &str) -> String {
    format!("{}{path}", base.trim_end_matches('/'))
}

/// Turn a status code and raw body into a result or a classified failure.
pub fn decode_response(status: u16, body: &str) -> Result<EmergencyResult, RequestError> {
    if !(200..300).contains(&status) {
        return Err(rejection(status, body));
    }

    let response: EmergencyResponse = serde_json::from_str(body)
        .map_err(|error| RequestError::MalformedResponse(error.to_string()))?;

    let hospital_coordinate = Coordinate::new(response.hospital_lat, response.hospital_lng)
        .map_err(|error| RequestError::MalformedResponse(error.to_string()))?;

    if !response.distance.is_finite() || response.distance < 0.0 {
        return Err(RequestError::MalformedResponse(format!(
            "distance must be a non-negative number, got {}",
            response.distance
        )));
    }

    let route_points = response
        .route
        .iter()
        .map(|[lat, lng]| Coordinate::new(*lat, *lng))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|error| RequestError::MalformedResponse(error.to_string()))?;

    Ok(EmergencyResult {
        hospital_name: response.hospital,
        hospital_address: response.address,
        hospital_coordinate,
        distance_meters: response.distance,
        route_points,
    })
}

pub fn decode_health(status: u16, body: &str) -> Result<ServiceHealth, RequestError> {
    if !(200..300).contains(&status) {
        return Err(rejection(status, body));
    }
    serde_json::from_str(body).map_err(|error| RequestError::MalformedResponse(error.to_string()))
}

fn rejection(status: u16, body: &str) -> RequestError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|payload| payload.error)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| REJECTION_FALLBACK.to_string());

    RequestError::ServiceRejected { status, message }
}
