use color_eyre::eyre::{eyre, Result, WrapErr};
use dotenv::dotenv;
use smart_ambulance_core::geolocation::GeolocationFix;
use smart_ambulance_core::surface::{MAX_ZOOM, MIN_ZOOM};
use smart_ambulance_core::{ClientConfig, Coordinate};
use std::env;

pub const API_URL_VAR: &str = "AMBULANCE_API_URL";
pub const FALLBACK_LAT_VAR: &str = "AMBULANCE_FALLBACK_LAT";
pub const FALLBACK_LNG_VAR: &str = "AMBULANCE_FALLBACK_LNG";
pub const DEVICE_LAT_VAR: &str = "AMBULANCE_DEVICE_LAT";
pub const DEVICE_LNG_VAR: &str = "AMBULANCE_DEVICE_LNG";
pub const ZOOM_VAR: &str = "AMBULANCE_ZOOM";

/// Everything the terminal client reads from its environment.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub client: ClientConfig,
    /// Position reported as the device fix. A terminal has no positioning
    /// hardware, so without this the client behaves as if geolocation were
    /// unsupported.
    pub device_fix: Option<GeolocationFix>,
}

/// Load `.env`, then read the configuration from the process environment.
pub fn init_app_config() -> Result<AppConfig> {
    dotenv().ok();
    AppConfig::from_lookup(|key| env::var(key).ok())
}

impl AppConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut client = ClientConfig::default();

        if let Some(url) = lookup(API_URL_VAR).filter(|url| !url.trim().is_empty()) {
            client = client.with_service_url(url.trim());
        }

        if let Some((latitude, longitude)) = read_pair(&lookup, FALLBACK_LAT_VAR, FALLBACK_LNG_VAR)? {
            let fallback = Coordinate::new(latitude, longitude)
                .wrap_err("fallback location is out of range")?;
            client = client.with_fallback_location(fallback);
        }

        if let Some(zoom) = lookup(ZOOM_VAR) {
            let zoom: u8 = zoom
                .trim()
                .parse()
                .wrap_err_with(|| format!("{ZOOM_VAR} must be a whole number, got {zoom:?}"))?;
            if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
                return Err(eyre!(
                    "{ZOOM_VAR} must be between {MIN_ZOOM} and {MAX_ZOOM}, got {zoom}"
                ));
            }
            client.default_zoom = zoom;
        }

        let device_fix = read_pair(&lookup, DEVICE_LAT_VAR, DEVICE_LNG_VAR)?
            .map(|(latitude, longitude)| GeolocationFix {
                latitude,
                longitude,
            });

        Ok(Self { client, device_fix })
    }
}

fn read_pair<F>(lookup: &F, lat_key: &str, lng_key: &str) -> Result<Option<(f64, f64)>>
where
    F: Fn(&str) -> Option<String>,
{
    match (lookup(lat_key), lookup(lng_key)) {
        (None, None) => Ok(None),
        (Some(lat), Some(lng)) => Ok(Some((
            parse_degrees(lat_key, &lat)?,
            parse_degrees(lng_key, &lng)?,
        ))),
        _ => Err(eyre!("{lat_key} and {lng_key} must be set together")),
    }
}

fn parse_degrees(key: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse()
        .wrap_err_with(|| format!("{key} must be a number, got {value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.client, ClientConfig::default());
        assert!(config.device_fix.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let config = config(&[
            (API_URL_VAR, " http://dispatch.local:8080 "),
            (FALLBACK_LAT_VAR, "51.5074"),
            (FALLBACK_LNG_VAR, "-0.1278"),
            (ZOOM_VAR, "15"),
            (DEVICE_LAT_VAR, "48.8566"),
            (DEVICE_LNG_VAR, "2.3522"),
        ])
        .unwrap();

        assert_eq!(config.client.service_url, "http://dispatch.local:8080");
        assert_eq!(
            config.client.fallback_location,
            Coordinate::new(51.5074, -0.1278).unwrap()
        );
        assert_eq!(config.client.default_zoom, 15);
        assert_eq!(
            config.device_fix,
            Some(GeolocationFix {
                latitude: 48.8566,
                longitude: 2.3522,
            })
        );
    }

    #[test]
    fn half_a_coordinate_is_an_error() {
        assert!(config(&[(FALLBACK_LAT_VAR, "51.5")]).is_err());
        assert!(config(&[(DEVICE_LNG_VAR, "2.35")]).is_err());
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(config(&[(FALLBACK_LAT_VAR, "91"), (FALLBACK_LNG_VAR, "0")]).is_err());
        assert!(config(&[(ZOOM_VAR, "0")]).is_err());
        assert!(config(&[(ZOOM_VAR, "street")]).is_err());
    }

    #[test]
    fn device_fix_is_not_range_checked_here() {
        let config = config(&[(DEVICE_LAT_VAR, "120"), (DEVICE_LNG_VAR, "0")]).unwrap();
        assert!(config.device_fix.is_some());
    }
}
