//! Listeners owned by a foreign runtime
//!
//! JS hands us callbacks as opaque values compared with `===`, and they
//! can throw. The registry keys each one by that value so it can be found
//! again on removal, and logs failures instead of letting one callback
//! stop the rest.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{error, trace};

use super::state::ConnectionState;
use super::store::{ConnectionStateStore, StateChangeListener};

pub struct CallbackRegistry<K> {
    entries: RefCell<Vec<(K, StateChangeListener)>>,
}

impl<K> Default for CallbackRegistry<K> {
    fn default() -> Self {
        Self { entries: RefCell::new(Vec::new()) }
    }
}

impl<K: PartialEq> CallbackRegistry<K> {
    /// Register `callback` under `key`. Returns false if `key` is already there.
    pub fn add<F, E>(&self, store: &ConnectionStateStore, key: K, callback: F) -> bool
    where
        F: Fn(ConnectionState, ConnectionState) -> Result<(), E> + 'static,
        E: fmt::Debug,
    {
        if self.entries.borrow().iter().any(|(k, _)| *k == key) {
            trace!("Callback already registered");
            return false;
        }

        let listener: StateChangeListener = Rc::new(move |previous: ConnectionState, current: ConnectionState| {
            if let Err(e) = callback(previous, current) {
                error!(?e, %previous, %current, "State change listener threw");
            }
        });
        store.add_state_change_listener(&listener);
        self.entries.borrow_mut().push((key, listener));
        true
    }

    /// Unregister the callback stored under `key`; unknown keys are ignored.
    pub fn remove(&self, store: &ConnectionStateStore, key: &K) -> bool {
        let removed = {
            let mut entries = self.entries.borrow_mut();
            entries
                .iter()
                .position(|(k, _)| k == key)
                .map(|idx| entries.remove(idx))
        };
        match removed {
            Some((_, listener)) => {
                store.remove_state_change_listener(&listener);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
