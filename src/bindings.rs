//! JavaScript API for framework code that is not written in Rust
//!
//! ```js
//! const store = connectionState();
//! store.addStateChangeListener((prev, cur) => console.log(prev, '->', cur));
//! store.loadingStarted();
//! ```

use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::prelude::*;

use crate::browser::global_connection;
use crate::core::{CallbackRegistry, ConnectionState, ConnectionStateStore, ParseConnectionStateError};

/// JS callbacks registered on one store, keyed by `===` identity
pub(crate) type JsListeners = CallbackRegistry<JsValue>;

fn parse_state(state: &str) -> Result<ConnectionState, JsValue> {
    state
        .parse()
        .map_err(|e: ParseConnectionStateError| js_sys::Error::new(&e.to_string()).into())
}

#[wasm_bindgen(js_name = ConnectionStateStore)]
pub struct JsConnectionStateStore {
    store: Rc<ConnectionStateStore>,
    listeners: Rc<JsListeners>,
}

#[wasm_bindgen(js_class = ConnectionStateStore)]
impl JsConnectionStateStore {
    /// Standalone store, not bound to window events
    #[wasm_bindgen(constructor)]
    pub fn new(initial: &str) -> Result<JsConnectionStateStore, JsValue> {
        Ok(Self {
            store: Rc::new(ConnectionStateStore::new(parse_state(initial)?)),
            listeners: Rc::new(JsListeners::default()),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.store.state().as_str().to_string()
    }

    #[wasm_bindgen(js_name = setState)]
    pub fn set_state(&self, state: &str) -> Result<(), JsValue> {
        self.store.set_state(parse_state(state)?);
        Ok(())
    }

    #[wasm_bindgen(getter, js_name = loadingCount)]
    pub fn loading_count(&self) -> u32 {
        self.store.loading_count()
    }

    #[wasm_bindgen(js_name = loadingStarted)]
    pub fn loading_started(&self) {
        self.store.loading_started();
    }

    #[wasm_bindgen(js_name = loadingSucceeded)]
    pub fn loading_succeeded(&self) {
        self.store.loading_succeeded();
    }

    #[wasm_bindgen(getter)]
    pub fn online(&self) -> bool {
        self.store.is_online()
    }

    #[wasm_bindgen(getter)]
    pub fn offline(&self) -> bool {
        self.store.is_offline()
    }

    #[wasm_bindgen(js_name = addStateChangeListener)]
    pub fn add_state_change_listener(&self, listener: Function) {
        let key = JsValue::from(listener.clone());
        self.listeners.add(&self.store, key, move |previous, current| {
            let previous = JsValue::from_str(previous.as_str());
            let current = JsValue::from_str(current.as_str());
            listener.call2(&JsValue::NULL, &previous, &current).map(drop)
        });
    }

    #[wasm_bindgen(js_name = removeStateChangeListener)]
    pub fn remove_state_change_listener(&self, listener: &Function) {
        self.listeners.remove(&self.store, &JsValue::from(listener.clone()));
    }
}

/// Handle to the page-wide store; every handle shares one listener set.
#[wasm_bindgen(js_name = connectionState)]
pub fn connection_state() -> JsConnectionStateStore {
    let global = global_connection();
    JsConnectionStateStore {
        store: global.store,
        listeners: global.js_listeners,
    }
}
