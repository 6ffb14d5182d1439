//! Client-side connection status tracking
//!
//! Tracks whether the client believes it can reach the server:
//! - `ConnectionState`: connected / loading / reconnecting / connection-lost
//! - `ConnectionStateStore`: current state, overlapping-load counter, listeners
//!
//! With the `wasm` feature the store is bound to the browser's
//! `online`/`offline` events and exported to JavaScript.

pub mod core;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod bindings;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub mod browser;

pub use crate::core::{
    ConnectionState, ConnectionStateStore, EnvironmentEvent, ParseConnectionStateError,
    StateChangeListener, StateTransition, StoreSnapshot,
};

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub use bindings::{connection_state, JsConnectionStateStore};

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // Initialize tracing for browser console
    tracing_wasm::set_as_global_default();

    // Bind once at bootstrap; later lookups reuse this instance
    let store = browser::global_store();
    tracing::info!(state = %store.state(), "Connection state tracking started");
}
