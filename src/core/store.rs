//! Connection state store
//!
//! Holds the current state, a counter of overlapping loads and the
//! state-change listeners. Single-threaded: everything lives behind `Rc`
//! and interior mutability so listeners can call back into the store.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Serialize;
use tracing::{debug, trace};

use super::state::ConnectionState;

/// Called with `(previous, current)` after every actual state change
pub type StateChangeListener = Rc<dyn Fn(ConnectionState, ConnectionState)>;

/// One state change, as printed by the CLI
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StateTransition {
    pub previous: ConnectionState,
    pub current: ConnectionState,
}

/// Point-in-time view of a store
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StoreSnapshot {
    pub state: ConnectionState,
    pub loading_count: u32,
    pub online: bool,
}

pub struct ConnectionStateStore {
    state: Cell<ConnectionState>,
    loading_count: Cell<u32>,
    /// Unique by `Rc` identity
    listeners: RefCell<Vec<StateChangeListener>>,
}

impl ConnectionStateStore {
    pub fn new(initial: ConnectionState) -> Self {
        Self {
            state: Cell::new(initial),
            loading_count: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Store seeded from the platform's online flag
    pub fn from_online(online: bool) -> Self {
        Self::new(ConnectionState::from_online(online))
    }

    /// Register a listener. Registering the same `Rc` twice is a no-op.
    pub fn add_state_change_listener(&self, listener: &StateChangeListener) {
        let mut listeners = self.listeners.borrow_mut();
        if listeners.iter().any(|l| Rc::ptr_eq(l, listener)) {
            trace!("Listener already registered");
            return;
        }
        listeners.push(listener.clone());
    }

    /// Unregister a listener; unknown listeners are ignored.
    pub fn remove_state_change_listener(&self, listener: &StateChangeListener) {
        self.listeners.borrow_mut().retain(|l| !Rc::ptr_eq(l, listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Enter `Loading` and count one more in-flight operation.
    ///
    /// The transition resets the counter when the state actually changes,
    /// so the first load after any other state always leaves it at 1.
    pub fn loading_started(&self) {
        self.set_state(ConnectionState::Loading);
        let count = self.loading_count.get().saturating_add(1);
        self.loading_count.set(count);
        trace!(loading_count = count, "Loading started");
    }

    /// Finish one in-flight operation; the last one moves back to `Connected`.
    pub fn loading_succeeded(&self) {
        let count = self.loading_count.get();
        if count == 0 {
            trace!("Loading succeeded with no load in flight, ignoring");
            return;
        }

        self.loading_count.set(count - 1);
        trace!(loading_count = count - 1, "Loading succeeded");
        if count == 1 {
            self.set_state(ConnectionState::Connected);
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state.get()
    }

    /// Assign a new state and notify listeners.
    ///
    /// Assigning the current state does nothing at all: the loading counter
    /// is kept and no listener runs.
    pub fn set_state(&self, state: ConnectionState) {
        let previous = self.state.get();
        if previous == state {
            trace!(%state, "State unchanged");
            return;
        }

        self.state.set(state);
        self.loading_count.set(0);

        // Listeners may add or remove listeners, so iterate a copy and skip
        // entries removed since the copy was taken.
        let snapshot: Vec<StateChangeListener> = self.listeners.borrow().clone();
        debug!(%previous, current = %state, listeners = snapshot.len(), "Connection state changed");

        for listener in &snapshot {
            if self.is_registered(listener) {
                listener(previous, state);
            }
        }
    }

    pub fn loading_count(&self) -> u32 {
        self.loading_count.get()
    }

    pub fn is_online(&self) -> bool {
        self.state.get().is_online()
    }

    pub fn is_offline(&self) -> bool {
        !self.is_online()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            state: self.state(),
            loading_count: self.loading_count(),
            online: self.is_online(),
        }
    }

    fn is_registered(&self, listener: &StateChangeListener) -> bool {
        self.listeners.borrow().iter().any(|l| Rc::ptr_eq(l, listener))
    }
}
