use thiserror::Error;

use crate::lifecycle::LifecycleState;

/// Raised when a latitude/longitude pair falls outside the valid ranges.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    #[error("invalid coordinate ({latitude}, {longitude}): latitude must be within [-90, 90] and longitude within [-180, 180]")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
}

/// Failures of a single emergency submission attempt.
///
/// The `Display` text is what the dispatcher sees in the status line, so the
/// messages are written for people rather than logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Submit was attempted before any location was known. No request is sent.
    #[error("Location not available. Please allow location access or click on map.")]
    LocationUnavailable,

    /// The service could not be reached or the transport broke mid-exchange.
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// The service answered with a status outside 2xx.
    #[error("{message}")]
    ServiceRejected { status: u16, message: String },

    /// The service answered 2xx but the body was not a usable result.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Outcome of a failed device geolocation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("user denied geolocation permission")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("geolocation request timed out")]
    Timeout,
    #[error("geolocation is not supported")]
    Unsupported,
}

/// An event was delivered to the lifecycle in a state that does not accept it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition from {from} on {event}")]
pub struct TransitionError {
    pub from: LifecycleState,
    pub event: &'static str,
}
