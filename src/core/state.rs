//! Connection state shared by the store, the browser binding and the CLI
//!
//! The string forms are what crosses the JS boundary and what the CLI
//! prints, so they are fixed: `connected`, `loading`, `reconnecting`,
//! `connection-lost`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// What the client currently believes about server reachability
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionState {
    /// Last transaction over the wire succeeded.
    Connected,
    /// Connected, with at least one request in flight.
    Loading,
    /// Last transaction failed with a network error; a retry is underway.
    Reconnecting,
    /// Browser went offline, or the server could not be reached after retrying.
    ConnectionLost,
}

impl ConnectionState {
    pub const ALL: &'static [ConnectionState] = &[
        ConnectionState::Connected,
        ConnectionState::Loading,
        ConnectionState::Reconnecting,
        ConnectionState::ConnectionLost,
    ];

    /// Initial state for a client whose platform reports `online`
    pub fn from_online(online: bool) -> Self {
        if online {
            ConnectionState::Connected
        } else {
            ConnectionState::ConnectionLost
        }
    }

    /// `Reconnecting` is offline: the last transaction already failed.
    pub fn is_online(self) -> bool {
        matches!(self, ConnectionState::Connected | ConnectionState::Loading)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionState::Connected => "connected",
            ConnectionState::Loading => "loading",
            ConnectionState::Reconnecting => "reconnecting",
            ConnectionState::ConnectionLost => "connection-lost",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown connection state: {0:?}")]
pub struct ParseConnectionStateError(pub String);

impl FromStr for ConnectionState {
    type Err = ParseConnectionStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConnectionState::ALL
            .iter()
            .copied()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| ParseConnectionStateError(s.to_string()))
    }
}
