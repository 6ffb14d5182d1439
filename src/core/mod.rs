//! Platform-agnostic core - shared between the WASM build and the CLI

pub mod callbacks;
pub mod command;
pub mod environment;
pub mod slot;
pub mod state;
pub mod store;

pub use callbacks::CallbackRegistry;
pub use command::{initial_state, Command, CommandError};
pub use environment::EnvironmentEvent;
pub use slot::GlobalSlot;
pub use state::{ConnectionState, ParseConnectionStateError};
pub use store::{ConnectionStateStore, StateChangeListener, StateTransition, StoreSnapshot};
