use color_eyre::Result;
use ratatui::layout::Rect;
use smart_ambulance::client::HttpEmergencyClient;
use smart_ambulance::config::AppConfig;
use smart_ambulance_core::geolocation::GeolocationFix;
use smart_ambulance_core::{EmergencyConsole, EmergencyResult, MapScene, RequestError, RequestTicket};
use std::time::{Duration, Instant};
use throbber_widgets_tui::ThrobberState;
use tokio::sync::mpsc;

const THROBBER_TICK: Duration = Duration::from_millis(100);

/// A finished service exchange, sent back from the request task.
#[derive(Debug)]
pub struct Completion {
    pub ticket: RequestTicket,
    pub outcome: Result<EmergencyResult, RequestError>,
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub console: EmergencyConsole<MapScene>,
    pub client: HttpEmergencyClient,
    pub device_fix: Option<GeolocationFix>,
    /// Inner area of the map canvas from the last draw, for mouse picks.
    pub map_area: Option<Rect>,
    pub throbber: ThrobberState,
    pub last_frame: Instant,
    pub(super) completions_tx: mpsc::UnboundedSender<Completion>,
    pub(super) completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = HttpEmergencyClient::new(config.client.service_url.clone())?;
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        Ok(Self {
            running: true,
            show_help: false,
            console: EmergencyConsole::new(config.client, MapScene::new()),
            client,
            device_fix: config.device_fix,
            map_area: None,
            throbber: ThrobberState::default(),
            last_frame: Instant::now(),
            completions_tx,
            completions_rx,
        })
    }

    /// Advance the loading indicator while a request is in flight.
    pub fn update(&mut self) {
        if !self.console.presentation().loading {
            return;
        }

        let now = Instant::now();
        if now.duration_since(self.last_frame) >= THROBBER_TICK {
            self.throbber.calc_next();
            self.last_frame = now;
        }
    }
}
