//! DOM event subscriptions tied to Rust ownership

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

/// `addEventListener` handle; the listener is removed when this is dropped
pub struct EventListener {
    target: EventTarget,
    event_type: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new<F>(target: &EventTarget, event_type: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event_type,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let removed = self
            .target
            .remove_event_listener_with_callback(self.event_type, self.callback.as_ref().unchecked_ref());
        if removed.is_err() {
            tracing::warn!(event = self.event_type, "Failed to remove event listener");
        }
    }
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn element() -> web_sys::Element {
        let document = web_sys::window().unwrap().document().unwrap();
        document.create_element("div").unwrap()
    }

    #[wasm_bindgen_test]
    fn test_listener_receives_events() {
        let target = element();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let _listener = EventListener::new(&target, "ping", move |_| counter.set(counter.get() + 1)).unwrap();

        target.dispatch_event(&Event::new("ping").unwrap()).unwrap();
        assert_eq!(hits.get(), 1);
    }

    #[wasm_bindgen_test]
    fn test_drop_unsubscribes() {
        let target = element();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let listener = EventListener::new(&target, "ping", move |_| counter.set(counter.get() + 1)).unwrap();
        drop(listener);

        target.dispatch_event(&Event::new("ping").unwrap()).unwrap();
        assert_eq!(hits.get(), 0);
    }
}
