use serde::Serialize;

use crate::lifecycle::LifecycleState;

pub const SEARCHING: &str = "Searching for nearest hospital...";
pub const ROUTE_READY: &str = "Route calculated successfully!";

/// Style class of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusMessage {
    pub text: String,
    pub tone: Tone,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// Everything the status area shows, derived from lifecycle state and the
/// last message. Holds nothing that isn't recomputable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub status: StatusMessage,
    pub status_visible: bool,
    pub loading: bool,
    pub control_enabled: bool,
}

impl Presentation {
    pub fn project(state: LifecycleState, last: &StatusMessage) -> Self {
        let loading = state == LifecycleState::Submitting;
        Self {
            status: last.clone(),
            status_visible: !loading,
            loading,
            control_enabled: !loading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submitting_shows_loading_and_disables_the_control() {
        let view = Presentation::project(
            LifecycleState::Submitting,
            &StatusMessage::new(SEARCHING, Tone::Neutral),
        );
        assert!(view.loading);
        assert!(!view.control_enabled);
        assert!(!view.status_visible);
    }

    #[test]
    fn settled_states_enable_the_control() {
        for state in [
            LifecycleState::Idle,
            LifecycleState::AwaitingLocation,
            LifecycleState::Succeeded,
            LifecycleState::Failed,
        ] {
            let view = Presentation::project(state, &StatusMessage::default());
            assert!(view.control_enabled, "{state}");
            assert!(!view.loading, "{state}");
            assert!(view.status_visible, "{state}");
        }
    }
}
