//! Create-once slot for the page-wide store
//!
//! Lives in a `thread_local!`; the first `get_or_init` builds the value,
//! every later call hands back a clone of it.

use std::cell::RefCell;

pub struct GlobalSlot<T>(RefCell<Option<T>>);

impl<T: Clone> GlobalSlot<T> {
    pub const fn new() -> Self {
        Self(RefCell::new(None))
    }

    pub fn get(&self) -> Option<T> {
        self.0.borrow().clone()
    }

    /// `init` runs only while the slot is empty and must not touch the slot.
    pub fn get_or_init(&self, init: impl FnOnce() -> T) -> T {
        if let Some(existing) = self.get() {
            return existing;
        }

        let value = init();
        *self.0.borrow_mut() = Some(value.clone());
        value
    }
}

impl<T: Clone> Default for GlobalSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConnectionState, ConnectionStateStore};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_factory_runs_once() {
        let slot: GlobalSlot<Rc<ConnectionStateStore>> = GlobalSlot::new();
        let created = Cell::new(0);
        let make = || {
            created.set(created.get() + 1);
            Rc::new(ConnectionStateStore::from_online(false))
        };

        assert!(slot.get().is_none());
        let first = slot.get_or_init(make);
        let second = slot.get_or_init(make);

        assert_eq!(created.get(), 1);
        assert!(Rc::ptr_eq(&first, &second));
        assert!(Rc::ptr_eq(&first, &slot.get().unwrap()));
    }

    #[test]
    fn test_later_calls_see_mutations() {
        let slot: GlobalSlot<Rc<ConnectionStateStore>> = GlobalSlot::new();
        slot.get_or_init(|| Rc::new(ConnectionStateStore::new(ConnectionState::Connected)))
            .loading_started();

        let again = slot.get_or_init(|| Rc::new(ConnectionStateStore::new(ConnectionState::ConnectionLost)));
        assert_eq!(again.state(), ConnectionState::Loading);
        assert_eq!(again.loading_count(), 1);
    }
}
