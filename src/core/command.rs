//! Line commands understood by the console driver
//!
//! ```text
//! online | offline
//! start  | loading-started
//! done   | loading-succeeded
//! set <state>
//! status
//! ```

use std::str::FromStr;
use thiserror::Error;

use super::environment::EnvironmentEvent;
use super::state::{ConnectionState, ParseConnectionStateError};
use super::store::{ConnectionStateStore, StoreSnapshot};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Environment(EnvironmentEvent),
    LoadingStarted,
    LoadingSucceeded,
    Set(ConnectionState),
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0:?}")]
    Unknown(String),
    #[error("`set` needs a state")]
    MissingState,
    #[error(transparent)]
    State(#[from] ParseConnectionStateError),
    #[error("unexpected argument: {0:?}")]
    TrailingArgument(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;

        let command = match name {
            "start" | "loading-started" => Command::LoadingStarted,
            "done" | "loading-succeeded" => Command::LoadingSucceeded,
            "status" => Command::Status,
            "set" => {
                let state = words.next().ok_or(CommandError::MissingState)?;
                Command::Set(state.parse()?)
            }
            other => match EnvironmentEvent::from_event_type(other) {
                Some(event) => Command::Environment(event),
                None => return Err(CommandError::Unknown(other.to_string())),
            },
        };

        match words.next() {
            Some(extra) => Err(CommandError::TrailingArgument(extra.to_string())),
            None => Ok(command),
        }
    }
}

/// Starting state for the console driver; unset means connected.
pub fn initial_state(value: Option<&str>) -> Result<ConnectionState, ParseConnectionStateError> {
    match value {
        Some(value) => value.trim().parse(),
        None => Ok(ConnectionState::Connected),
    }
}

impl Command {
    /// Run against the store. Only `status` produces output of its own;
    /// transitions are reported by the store's listeners.
    pub fn apply(self, store: &ConnectionStateStore) -> Option<StoreSnapshot> {
        match self {
            Command::Environment(event) => event.apply(store),
            Command::LoadingStarted => store.loading_started(),
            Command::LoadingSucceeded => store.loading_succeeded(),
            Command::Set(state) => store.set_state(state),
            Command::Status => return Some(store.snapshot()),
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("online".parse::<Command>(), Ok(Command::Environment(EnvironmentEvent::Online)));
        assert_eq!(" offline ".parse::<Command>(), Ok(Command::Environment(EnvironmentEvent::Offline)));
        assert_eq!("start".parse::<Command>(), Ok(Command::LoadingStarted));
        assert_eq!("loading-succeeded".parse::<Command>(), Ok(Command::LoadingSucceeded));
        assert_eq!(
            "set connection-lost".parse::<Command>(),
            Ok(Command::Set(ConnectionState::ConnectionLost))
        );
        assert_eq!("status".parse::<Command>(), Ok(Command::Status));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!("set".parse::<Command>(), Err(CommandError::MissingState));
        assert_eq!(
            "reconnect".parse::<Command>(),
            Err(CommandError::Unknown("reconnect".to_string()))
        );
        assert!(matches!("set busy".parse::<Command>(), Err(CommandError::State(_))));
        assert_eq!(
            "done twice".parse::<Command>(),
            Err(CommandError::TrailingArgument("twice".to_string()))
        );
    }

    #[test]
    fn test_initial_state() {
        assert_eq!(initial_state(None), Ok(ConnectionState::Connected));
        assert_eq!(initial_state(Some("reconnecting")), Ok(ConnectionState::Reconnecting));
        assert_eq!(initial_state(Some(" connection-lost\n")), Ok(ConnectionState::ConnectionLost));
        assert!(initial_state(Some("offline")).is_err());
    }

    #[test]
    fn test_apply_sequence() {
        let store = ConnectionStateStore::new(ConnectionState::Connected);
        for line in ["start", "start", "done"] {
            let command: Command = line.parse().unwrap();
            assert_eq!(command.apply(&store), None);
        }

        let status = Command::Status.apply(&store).unwrap();
        assert_eq!(status.state, ConnectionState::Loading);
        assert_eq!(status.loading_count, 1);
        assert!(status.online);

        Command::Environment(EnvironmentEvent::Offline).apply(&store);
        let status = Command::Status.apply(&store).unwrap();
        assert_eq!(status.state, ConnectionState::ConnectionLost);
        assert_eq!(status.loading_count, 0);
        assert!(!status.online);
    }
}
