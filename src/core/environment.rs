//! Platform connectivity signals
//!
//! The browser fires `online`/`offline` on `window`; the CLI accepts the
//! same words on stdin. Both end up here.

use tracing::debug;

use super::state::ConnectionState;
use super::store::ConnectionStateStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvironmentEvent {
    Online,
    Offline,
}

impl EnvironmentEvent {
    pub const ALL: &'static [EnvironmentEvent] = &[EnvironmentEvent::Online, EnvironmentEvent::Offline];

    /// DOM event name
    pub fn event_type(self) -> &'static str {
        match self {
            EnvironmentEvent::Online => "online",
            EnvironmentEvent::Offline => "offline",
        }
    }

    pub fn from_event_type(event_type: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.event_type() == event_type)
    }

    /// State the event forces, regardless of the current one
    pub fn target_state(self) -> ConnectionState {
        match self {
            EnvironmentEvent::Online => ConnectionState::Connected,
            EnvironmentEvent::Offline => ConnectionState::ConnectionLost,
        }
    }

    pub fn apply(self, store: &ConnectionStateStore) {
        debug!(event = self.event_type(), "Environment connectivity changed");
        store.set_state(self.target_state());
    }
}
