//! State machine for one emergency submission at a time.
//!
//! The machine is pure: [`EmergencyLifecycle::process_event`] returns an
//! [`Effect`] describing what the caller must do (send a request, render a
//! result, show an error) and never performs IO itself.

use std::convert::TryFrom;
use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{RequestError, TransitionError};
use crate::geo::Coordinate;
use crate::service::{EmergencyRequest, EmergencyResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LifecycleState {
    #[default]
    Idle,
    AwaitingLocation,
    Submitting,
    Succeeded,
    Failed,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::AwaitingLocation => write!(f, "AwaitingLocation"),
            Self::Submitting => write!(f, "Submitting"),
            Self::Succeeded => write!(f, "Succeeded"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// Identifies one issued request. Responses must present the ticket of the
/// request currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    generation: u64,
}

impl RequestTicket {
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug)]
pub enum LifecycleEvent {
    /// Startup geolocation has been requested.
    AcquisitionStarted,
    /// Location State now holds a coordinate.
    LocationSet,
    /// The user pressed the submission control.
    Submit { origin: Option<Coordinate> },
    /// The service exchange for `ticket` finished.
    Responded {
        ticket: RequestTicket,
        outcome: Result<EmergencyResult, RequestError>,
    },
}

impl LifecycleEvent {
    const fn name(&self) -> &'static str {
        match self {
            Self::AcquisitionStarted => "AcquisitionStarted",
            Self::LocationSet => "LocationSet",
            Self::Submit { .. } => "Submit",
            Self::Responded { .. } => "Responded",
        }
    }
}

/// Work the caller owes the machine after a transition.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    /// Send exactly one request and report back with this ticket.
    Issue {
        ticket: RequestTicket,
        request: EmergencyRequest,
    },
    /// Submit was refused before anything was sent.
    Rejected(RequestError),
    Render(EmergencyResult),
    Report(RequestError),
    /// A response for a request that is no longer in flight; dropped.
    Discarded(RequestTicket),
}

#[derive(Debug, Default)]
pub struct EmergencyLifecycle {
    state: LifecycleState,
    issued: u64,
    in_flight: Option<RequestTicket>,
    /// Startup acquisition runs at most once.
    acquired: bool,
    located: bool,
}

impl EmergencyLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn state(&self) -> LifecycleState {
        self.state
    }

    pub const fn in_flight(&self) -> Option<RequestTicket> {
        self.in_flight
    }

    pub fn process_event(&mut self, event: LifecycleEvent) -> Result<Effect, TransitionError> {
        let from = self.state;
        let acquisition = matches!(event, LifecycleEvent::AcquisitionStarted);
        let location = matches!(event, LifecycleEvent::LocationSet);
        let Transition { next, effect } = Transition::try_from((&*self, event))?;

        self.acquired |= acquisition;
        self.located |= location;

        match &effect {
            Effect::Issue { ticket, .. } => {
                self.issued = ticket.generation;
                self.in_flight = Some(*ticket);
            }
            Effect::Render(_) | Effect::Report(_) => self.in_flight = None,
            Effect::Discarded(ticket) => {
                warn!(
                    stale = ticket.generation,
                    "discarding response for a request no longer in flight"
                );
            }
            Effect::None | Effect::Rejected(_) => {}
        }

        if from != next {
            debug!(%from, to = %next, "lifecycle transition");
        }
        self.state = next;
        Ok(effect)
    }
}

struct Transition {
    next: LifecycleState,
    effect: Effect,
}

impl Transition {
    fn to(next: LifecycleState, effect: Effect) -> Self {
        Self { next, effect }
    }
}

impl TryFrom<(&EmergencyLifecycle, LifecycleEvent)> for Transition {
    type Error = TransitionError;

    fn try_from(value: (&EmergencyLifecycle, LifecycleEvent)) -> Result<Self, Self::Error> {
        use LifecycleState::{AwaitingLocation, Failed, Idle, Submitting, Succeeded};

        let (machine, event) = value;
        let current = machine.state;
        let name = event.name();

        match (current, event) {
            (Idle, LifecycleEvent::AcquisitionStarted) if !machine.acquired => {
                let next = if machine.located { Idle } else { AwaitingLocation };
                Ok(Self::to(next, Effect::None))
            }
            (AwaitingLocation, LifecycleEvent::LocationSet) => Ok(Self::to(Idle, Effect::None)),
            (state, LifecycleEvent::LocationSet) => Ok(Self::to(state, Effect::None)),
            (
                state @ (Idle | AwaitingLocation | Succeeded | Failed),
                LifecycleEvent::Submit { origin: None },
            ) => Ok(Self::to(
                state,
                Effect::Rejected(RequestError::LocationUnavailable),
            )),
            (
                Idle | AwaitingLocation | Succeeded | Failed,
                LifecycleEvent::Submit {
                    origin: Some(origin),
                },
            ) => Ok(Self::to(
                Submitting,
                Effect::Issue {
                    ticket: RequestTicket {
                        generation: machine.issued + 1,
                    },
                    request: EmergencyRequest { origin },
                },
            )),
            (Submitting, LifecycleEvent::Responded { ticket, outcome }) => {
                if machine.in_flight != Some(ticket) {
                    return Ok(Self::to(Submitting, Effect::Discarded(ticket)));
                }
                Ok(match outcome {
                    Ok(result) => Self::to(Succeeded, Effect::Render(result)),
                    Err(error) => Self::to(Failed, Effect::Report(error)),
                })
            }
            _ => Err(TransitionError {
                from: current,
                event: name,
            }),
        }
    }
}
