//! Toast banners drawn into the page body

use crate::dispatch::Dispatcher;
use crate::dom_err;
use crate::events::EventListener;
use hospitality_form_core::{FormError, FormEvent, Severity, Toast, ToastId, ToastRenderer};
use std::collections::HashMap;
use std::time::Duration;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

pub const TOAST_CLASS: &str = "toast-notification";
const STYLE_ELEMENT_ID: &str = "hospitality-toast-style";

const TOAST_KEYFRAMES: &str = r#"
@keyframes slideInRight {
    from { transform: translateX(100%); opacity: 0; }
    to { transform: translateX(0); opacity: 1; }
}

@keyframes slideOutRight {
    from { transform: translateX(0); opacity: 1; }
    to { transform: translateX(100%); opacity: 0; }
}

.toast-notification {
    box-shadow: 0 8px 25px rgba(0, 0, 0, 0.15);
    border-radius: 10px;
}
"#;

/// Class list of a banner
pub fn toast_class(severity: Severity) -> String {
    format!("alert {} {}", severity.alert_class(), TOAST_CLASS)
}

/// Inline placement and enter animation
pub fn toast_css(animation: Duration) -> String {
    format!(
        "position: fixed; top: 20px; right: 20px; z-index: 9999; min-width: 300px; \
         max-width: 500px; animation: slideInRight {}ms ease-out;",
        animation.as_millis()
    )
}

pub fn exit_animation(animation: Duration) -> String {
    format!("slideOutRight {}ms ease-out", animation.as_millis())
}

struct MountedToast {
    element: HtmlElement,
    _close: EventListener,
}

pub struct DomToastRenderer {
    document: Document,
    dispatcher: Dispatcher,
    animation: Duration,
    style_injected: bool,
    mounted: HashMap<ToastId, MountedToast>,
}

impl DomToastRenderer {
    pub fn new(document: Document, dispatcher: Dispatcher, animation: Duration) -> Self {
        Self {
            document,
            dispatcher,
            animation,
            style_injected: false,
            mounted: HashMap::new(),
        }
    }

    pub fn mounted_count(&self) -> usize {
        self.mounted.len()
    }

    fn inject_style(&mut self) -> Result<(), FormError> {
        if self.style_injected {
            return Ok(());
        }
        if self.document.get_element_by_id(STYLE_ELEMENT_ID).is_none() {
            let head = self
                .document
                .head()
                .ok_or_else(|| FormError::MissingElement("head".into()))?;
            let style = self.document.create_element("style").map_err(dom_err)?;
            style.set_id(STYLE_ELEMENT_ID);
            style.set_text_content(Some(TOAST_KEYFRAMES));
            head.append_child(&style).map_err(dom_err)?;
        }
        self.style_injected = true;
        Ok(())
    }

    fn build(&self, toast: &Toast) -> Result<(HtmlElement, EventListener), FormError> {
        let element: HtmlElement = self
            .document
            .create_element("div")
            .map_err(dom_err)?
            .unchecked_into();
        element.set_class_name(&toast_class(toast.severity));
        element
            .style()
            .set_css_text(&toast_css(self.animation));
        element
            .set_attribute("role", "alert")
            .map_err(dom_err)?;

        let icon = self.document.create_element("i").map_err(dom_err)?;
        icon.set_class_name(&format!("fas fa-{} me-2", toast.severity.icon()));
        element.append_child(&icon).map_err(dom_err)?;

        // text node, never markup
        let text = self.document.create_text_node(&toast.message);
        element.append_child(&text).map_err(dom_err)?;

        let close = self.document.create_element("button").map_err(dom_err)?;
        close.set_attribute("type", "button").map_err(dom_err)?;
        close.set_class_name("btn-close float-end");
        element.append_child(&close).map_err(dom_err)?;

        let dispatcher = self.dispatcher.clone();
        let id = toast.id;
        let listener = EventListener::new(&close, "click", move |_| {
            dispatcher.event(FormEvent::DismissToast(id));
        })
        .map_err(dom_err)?;

        Ok((element, listener))
    }
}

impl ToastRenderer for DomToastRenderer {
    fn mount(&mut self, toast: &Toast) -> Result<(), FormError> {
        self.inject_style()?;
        let (element, close) = self.build(toast)?;
        let body = self
            .document
            .body()
            .ok_or_else(|| FormError::MissingElement("body".into()))?;
        body.append_child(&element).map_err(dom_err)?;
        self.mounted.insert(
            toast.id,
            MountedToast {
                element,
                _close: close,
            },
        );
        Ok(())
    }

    fn begin_exit(&mut self, id: ToastId) -> Result<(), FormError> {
        if let Some(toast) = self.mounted.get(&id) {
            toast
                .element
                .style()
                .set_property("animation", &exit_animation(self.animation))
                .map_err(dom_err)?;
        }
        Ok(())
    }

    fn unmount(&mut self, id: ToastId) -> Result<(), FormError> {
        if let Some(toast) = self.mounted.remove(&id) {
            toast.element.remove();
        }
        Ok(())
    }
}

impl Drop for DomToastRenderer {
    fn drop(&mut self) {
        for toast in self.mounted.values() {
            toast.element.remove();
        }
    }
}
