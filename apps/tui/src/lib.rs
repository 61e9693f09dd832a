// Export our modules for use in binaries and tests
pub mod cli;
pub mod client;
pub mod config;
pub mod geolocation;
pub mod logging;

pub use client::HttpEmergencyClient;
