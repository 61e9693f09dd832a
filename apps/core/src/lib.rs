// Shared client core for the terminal and browser front-ends
pub mod config;
pub mod console;
pub mod error;
pub mod geo;
pub mod geolocation;
pub mod lifecycle;
pub mod location;
pub mod map;
pub mod overlay;
pub mod renderer;
pub mod service;
pub mod status;
pub mod surface;

pub use config::ClientConfig;
pub use console::EmergencyConsole;
pub use error::{CoordinateError, GeolocationError, RequestError, TransitionError};
pub use geo::{Bounds, Coordinate, Provenance};
pub use lifecycle::{Effect, EmergencyLifecycle, LifecycleEvent, LifecycleState, RequestTicket};
pub use service::{EmergencyRequest, EmergencyResult};
pub use surface::{CellArea, MapScene, MapSurface, Viewport};
