use clap::Parser;
use std::path::PathBuf;

use crate::config::{API_URL_VAR, DEVICE_LAT_VAR, DEVICE_LNG_VAR, FALLBACK_LAT_VAR, FALLBACK_LNG_VAR};

#[derive(Debug, Parser)]
#[command(name = "smart-ambulance", version, about = "Smart ambulance dispatch console")]
pub struct CliArgs {
    /// Run one dispatch without the terminal UI and print a report
    #[arg(long)]
    pub headless: bool,

    /// Print the headless report as JSON
    #[arg(long)]
    pub json: bool,

    /// Probe the hospital routing service and exit
    #[arg(long)]
    pub check: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the hospital routing service address
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Report this position as the device fix, as LAT,LNG
    #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true)]
    pub location: Option<String>,

    /// Override the fallback location, as LAT,LNG
    #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true)]
    pub fallback: Option<String>,

    /// Where logs go while the terminal UI is running
    #[arg(long = "log-file", value_name = "PATH", default_value = "smart-ambulance.log")]
    pub log_file: PathBuf,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var(API_URL_VAR, url);
        }
        if let Some(location) = &self.location {
            set_pair(location, DEVICE_LAT_VAR, DEVICE_LNG_VAR);
        }
        if let Some(fallback) = &self.fallback {
            set_pair(fallback, FALLBACK_LAT_VAR, FALLBACK_LNG_VAR);
        }
        if self.debug {
            std::env::set_var("RUST_LOG", "debug");
        }
    }

    pub const fn is_interactive(&self) -> bool {
        !(self.headless || self.json || self.check)
    }
}

// A value without a comma only sets the latitude, which config loading reports.
fn set_pair(value: &str, lat_key: &str, lng_key: &str) {
    let (lat, lng) = split_pair(value);
    std::env::set_var(lat_key, lat);
    if let Some(lng) = lng {
        std::env::set_var(lng_key, lng);
    }
}

fn split_pair(value: &str) -> (&str, Option<&str>) {
    match value.split_once(',') {
        Some((lat, lng)) => (lat.trim(), Some(lng.trim())),
        None => (value.trim(), None),
    }
}
