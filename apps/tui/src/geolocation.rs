use smart_ambulance_core::geolocation::GeolocationFix;
use smart_ambulance_core::GeolocationError;

/// The terminal's position provider: the configured device fix, if any.
///
/// Answers exactly once per call and never blocks.
pub fn current_position(
    device_fix: Option<GeolocationFix>,
) -> Result<GeolocationFix, GeolocationError> {
    device_fix.ok_or(GeolocationError::Unsupported)
}
