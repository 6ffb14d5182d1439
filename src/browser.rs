//! Browser wiring: `window` online/offline events and the page-wide store

use std::rc::Rc;

use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, Window};

use crate::bindings::JsListeners;
use crate::core::{ConnectionStateStore, EnvironmentEvent, GlobalSlot};

/// Keeps a store in sync with the window's connectivity events.
///
/// Dropping the binding unregisters its event listeners.
pub struct BrowserBinding {
    window: Window,
    handlers: Vec<(EnvironmentEvent, Closure<dyn Fn(Event)>)>,
}

impl BrowserBinding {
    pub fn attach(store: Rc<ConnectionStateStore>, window: &Window) -> Result<Self, JsValue> {
        let mut binding = Self {
            window: window.clone(),
            handlers: Vec::with_capacity(EnvironmentEvent::ALL.len()),
        };

        for &event in EnvironmentEvent::ALL {
            let store = store.clone();
            let handler = Closure::wrap(Box::new(move |_: Event| {
                event.apply(&store);
            }) as Box<dyn Fn(Event)>);
            // On error the partial binding drops and unregisters what it added
            window.add_event_listener_with_callback(event.event_type(), handler.as_ref().unchecked_ref())?;
            binding.handlers.push((event, handler));
        }

        debug!("Connectivity listeners attached to window");
        Ok(binding)
    }
}

impl Drop for BrowserBinding {
    fn drop(&mut self) {
        for (event, handler) in self.handlers.drain(..) {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback(event.event_type(), handler.as_ref().unchecked_ref())
            {
                warn!(?e, event = event.event_type(), "Failed to remove connectivity listener");
            }
        }
    }
}

/// The page-wide store together with what keeps it wired up
#[derive(Clone)]
pub(crate) struct GlobalConnection {
    pub store: Rc<ConnectionStateStore>,
    pub js_listeners: Rc<JsListeners>,
    _binding: Option<Rc<BrowserBinding>>,
}

thread_local! {
    static GLOBAL: GlobalSlot<GlobalConnection> = const { GlobalSlot::new() };
}

/// Page-wide store, created and bound to `window` on first use
pub fn global_store() -> Rc<ConnectionStateStore> {
    global_connection().store
}

pub(crate) fn global_connection() -> GlobalConnection {
    GLOBAL.with(|slot| slot.get_or_init(create_global))
}

fn create_global() -> GlobalConnection {
    let window = web_sys::window();
    let online = window.as_ref().map(|w| w.navigator().on_line()).unwrap_or(true);
    let store = Rc::new(ConnectionStateStore::from_online(online));
    info!(state = %store.state(), "Connection state store created");

    let binding = match window {
        Some(window) => match BrowserBinding::attach(store.clone(), &window) {
            Ok(binding) => Some(Rc::new(binding)),
            Err(e) => {
                warn!(?e, "Failed to bind connectivity events, state will only change through the API");
                None
            }
        },
        None => {
            warn!("No window, connectivity events unavailable");
            None
        }
    };

    GlobalConnection {
        store,
        js_listeners: Rc::new(JsListeners::default()),
        _binding: binding,
    }
}
