//! The reporting party's current location and its change notifications.

use std::fmt;

use tracing::info;

use crate::geo::{Coordinate, Provenance};

/// Published to every subscriber after the location is replaced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationChange {
    pub coordinate: Coordinate,
    pub provenance: Provenance,
    pub previous: Option<Coordinate>,
}

type Subscriber = Box<dyn FnMut(&LocationChange)>;

/// Holds zero or one coordinate. Once set it is only ever replaced.
#[derive(Default)]
pub struct LocationState {
    current: Option<(Coordinate, Provenance)>,
    subscribers: Vec<Subscriber>,
}

impl LocationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback run, in registration order, on every change.
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&LocationChange) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Replace the current location (last write wins) and notify subscribers.
    pub fn set(&mut self, coordinate: Coordinate, provenance: Provenance) -> LocationChange {
        let previous = self.current.replace((coordinate, provenance)).map(|(c, _)| c);
        let change = LocationChange {
            coordinate,
            provenance,
            previous,
        };
        info!(%coordinate, %provenance, "location set");

        for subscriber in &mut self.subscribers {
            subscriber(&change);
        }
        change
    }

    pub fn get(&self) -> Option<Coordinate> {
        self.current.map(|(coordinate, _)| coordinate)
    }

    pub fn provenance(&self) -> Option<Provenance> {
        self.current.map(|(_, provenance)| provenance)
    }
}

impl fmt::Debug for LocationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationState")
            .field("current", &self.current)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
