use crate::geo::Coordinate;

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:5000";
pub const DEFAULT_ZOOM: u8 = 13;
pub const DEFAULT_FIT_PADDING: f64 = 0.1;

/// Settings shared by every front-end.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base address of the hospital routing service.
    pub service_url: String,
    /// Where the reporting party is assumed to be when the device can't say.
    pub fallback_location: Coordinate,
    /// Zoom used when re-centering on a new location.
    pub default_zoom: u8,
    /// Margin added around the route when fitting the view, as a span ratio.
    pub fit_padding: f64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            fallback_location: Coordinate::NEW_YORK,
            default_zoom: DEFAULT_ZOOM,
            fit_padding: DEFAULT_FIT_PADDING,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn with_service_url(mut self, service_url: impl Into<String>) -> Self {
        self.service_url = service_url.into();
        self
    }

    #[must_use]
    pub fn with_fallback_location(mut self, fallback_location: Coordinate) -> Self {
        self.fallback_location = fallback_location;
        self
    }
}
