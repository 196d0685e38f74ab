//! The page-level `HospitalityForm` handle exported to JavaScript

use crate::dispatch::{Dispatcher, WebController};
use crate::dom::{self, DomForm, ADD_ROW_ACTION, REMOVE_ROW_ACTION};
use crate::events::EventListener;
use crate::scheduler::BrowserScheduler;
use crate::storage::LocalStorageStore;
use crate::toast::DomToastRenderer;
use crate::to_js;
use chrono::NaiveDate;
use hospitality_form_core::{FieldRef, FormConfig, FormController, FormEvent, GroupKind, Severity};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlFormElement};

/// One enhanced request form
///
/// Built once per page from the form's element id. Dropping it (or calling
/// `dispose`) removes every listener and cancels pending timers.
#[wasm_bindgen]
pub struct HospitalityForm {
    controller: Rc<RefCell<WebController>>,
    dispatcher: Dispatcher,
    listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl HospitalityForm {
    /// Attach to `<form id=form_id>`; `config_json` overrides defaults
    #[wasm_bindgen(constructor)]
    pub fn new(form_id: &str, config_json: Option<String>) -> Result<HospitalityForm, JsValue> {
        let config = match config_json {
            Some(json) => FormConfig::from_json_str(&json).map_err(to_js)?,
            None => FormConfig::default(),
        };

        let window = web_sys::window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;
        let form: HtmlFormElement = document
            .get_element_by_id(form_id)
            .ok_or_else(|| JsValue::from_str(&format!("Form not found: {}", form_id)))?
            .dyn_into()
            .map_err(|_| JsValue::from_str(&format!("Element is not a form: {}", form_id)))?;

        let dispatcher = Dispatcher::new();
        let scheduler = BrowserScheduler::new(window.clone(), dispatcher.clone());
        let renderer =
            DomToastRenderer::new(document.clone(), dispatcher.clone(), config.timing.toast_exit());
        let store = LocalStorageStore::new(&window);
        let storage = store.is_available();
        let surface = DomForm::new(document, form.clone());

        let controller = Rc::new(RefCell::new(FormController::new(
            config,
            surface,
            scheduler,
            renderer,
            store,
            local_today()?,
        )));
        dispatcher.bind(&controller);
        // the page stays usable without date minimums
        if let Err(e) = controller.borrow_mut().initialize() {
            tracing::error!(error = %e, "Form initialization incomplete");
        }

        let listeners = wire_events(&form, &dispatcher)?;
        tracing::info!(form_id, listeners = listeners.len(), storage, "Hospitality form ready");

        Ok(Self {
            controller,
            dispatcher,
            listeners,
        })
    }

    /// Append a row to `"booking"` or `"guest"` and focus it
    #[wasm_bindgen(js_name = addRow)]
    pub fn add_row(&self, kind: &str) -> Result<(), JsValue> {
        let group = parse_group(kind)?;
        self.with_controller(|ctl| ctl.add_row(group).map(|_| ()).map_err(to_js))
    }

    /// Remove row `index`; the last remaining row is cleared instead
    #[wasm_bindgen(js_name = removeRow)]
    pub fn remove_row(&self, kind: &str, index: usize) -> Result<(), JsValue> {
        let group = parse_group(kind)?;
        self.with_controller(|ctl| ctl.remove_row(group, index).map(|_| ()).map_err(to_js))
    }

    /// Show a toast; severity is `"success"`, `"warning"`, `"error"` or `"info"`
    pub fn notify(&self, message: &str, severity: &str) -> Result<(), JsValue> {
        let severity = Severity::parse(severity);
        self.with_controller(|ctl| {
            ctl.notify(message, severity);
            Ok(())
        })
    }

    #[wasm_bindgen(js_name = saveNow)]
    pub fn save_now(&self) -> Result<(), JsValue> {
        self.with_controller(|ctl| ctl.save_now().map_err(to_js))
    }

    #[wasm_bindgen(js_name = clearSavedData)]
    pub fn clear_saved_data(&self) -> Result<(), JsValue> {
        self.with_controller(|ctl| ctl.clear_saved_data().map_err(to_js))
    }

    /// Detach listeners, cancel timers and drop toasts
    pub fn dispose(&mut self) {
        self.listeners.clear();
        match self.controller.try_borrow_mut() {
            Ok(mut ctl) => ctl.teardown(),
            Err(_) => tracing::warn!("Dispose while the form is busy"),
        }
    }
}

impl HospitalityForm {
    fn with_controller<T>(
        &self,
        f: impl FnOnce(&mut WebController) -> Result<T, JsValue>,
    ) -> Result<T, JsValue> {
        let mut ctl = self
            .controller
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("Form is busy"))?;
        let result = f(&mut ctl);
        self.dispatcher.drain(&mut ctl);
        result
    }
}

fn parse_group(kind: &str) -> Result<GroupKind, JsValue> {
    GroupKind::parse(kind).ok_or_else(|| JsValue::from_str(&format!("Unknown row group: {}", kind)))
}

/// Today's date on the visitor's clock
fn local_today() -> Result<NaiveDate, JsValue> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .ok_or_else(|| JsValue::from_str("Invalid local date"))
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn field_listener(
    form: &HtmlFormElement,
    dispatcher: &Dispatcher,
    event_type: &'static str,
    to_event: fn(FieldRef) -> FormEvent,
) -> Result<EventListener, JsValue> {
    let root = form.clone();
    let dispatcher = dispatcher.clone();
    EventListener::new(form, event_type, move |event| {
        let field = event_element(&event).and_then(|el| dom::field_ref_for(&root, &el));
        if let Some(field) = field {
            dispatcher.event(to_event(field));
        }
    })
}

/// Delegated listeners on the form root
fn wire_events(
    form: &HtmlFormElement,
    dispatcher: &Dispatcher,
) -> Result<Vec<EventListener>, JsValue> {
    let mut listeners = vec![
        field_listener(form, dispatcher, "input", FormEvent::Input)?,
        field_listener(form, dispatcher, "change", FormEvent::Change)?,
        // blur does not bubble
        field_listener(form, dispatcher, "focusout", FormEvent::Blur)?,
    ];

    let submit_dispatcher = dispatcher.clone();
    listeners.push(EventListener::new(form, "submit", move |event| {
        event.prevent_default();
        submit_dispatcher.event(FormEvent::Submit);
    })?);

    let root = form.clone();
    let click_dispatcher = dispatcher.clone();
    listeners.push(EventListener::new(form, "click", move |event| {
        if let Some(row_event) = row_action(&root, &event) {
            click_dispatcher.event(row_event);
        }
    })?);

    Ok(listeners)
}

/// `data-action` buttons for adding and removing rows
fn row_action(form: &HtmlFormElement, event: &Event) -> Option<FormEvent> {
    let button = event_element(event)?.closest("[data-action]").ok().flatten()?;
    let group = GroupKind::parse(&button.get_attribute("data-group")?)?;
    match button.get_attribute("data-action")?.as_str() {
        ADD_ROW_ACTION => Some(FormEvent::AddRow(group)),
        REMOVE_ROW_ACTION => {
            let row = dom::row_for_button(form, &button, group)?;
            Some(FormEvent::RemoveRow(group, row.index))
        }
        other => {
            tracing::debug!(action = other, "Unknown data-action");
            None
        }
    }
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use hospitality_form_core::FormSurface;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const PAGE: &str = r#"
        <input name="owner" required>
        <input name="membership" required>
        <div id="bookingContainer">
            <div class="input-group mb-2">
                <input name="booking">
                <button type="button" data-action="remove-row" data-group="booking">-</button>
            </div>
        </div>
        <button type="button" id="addBooking" data-action="add-row" data-group="booking">+</button>
        <div id="guestContainer">
            <div class="input-group mb-2"><input name="guest"></div>
        </div>
        <input name="fromDate" type="date" required>
        <input name="toDate" type="date" required>
        <input name="telegram" type="tel" required>
        <input name="file" type="file">
        <button type="submit">send</button>
    "#;

    fn mount(id: &str) -> HtmlFormElement {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(old) = document.get_element_by_id(id) {
            old.remove();
        }
        let form: HtmlFormElement = document.create_element("form").unwrap().unchecked_into();
        form.set_id(id);
        form.set_inner_html(PAGE);
        document.body().unwrap().append_child(&form).unwrap();
        form
    }

    #[wasm_bindgen_test]
    fn test_construct_sets_date_minimums() {
        mount("hospitalityForm");
        let _page = HospitalityForm::new("hospitalityForm", None).unwrap();
        let min = local_today().unwrap().format("%Y-%m-%d").to_string();

        let document = web_sys::window().unwrap().document().unwrap();
        let input: web_sys::HtmlInputElement = document
            .query_selector("#hospitalityForm [name=\"fromDate\"]")
            .unwrap()
            .unwrap()
            .unchecked_into();
        assert_eq!(input.min(), min);
    }

    #[wasm_bindgen_test]
    fn test_unknown_form_is_an_error() {
        assert!(HospitalityForm::new("noSuchForm", None).is_err());
        assert!(HospitalityForm::new("noSuchForm", Some("{not json".into())).is_err());
    }

    #[wasm_bindgen_test]
    fn test_row_buttons_are_wired() {
        let form = mount("rowsForm");
        let page = HospitalityForm::new("rowsForm", None).unwrap();

        let add: web_sys::HtmlElement = form
            .query_selector("[data-action=\"add-row\"]")
            .unwrap()
            .unwrap()
            .unchecked_into();
        add.click();
        assert_eq!(page.controller.borrow().form().count("booking"), 2);

        let remove: web_sys::HtmlElement = form
            .query_selector("[data-action=\"remove-row\"]")
            .unwrap()
            .unwrap()
            .unchecked_into();
        remove.click();
        assert_eq!(page.controller.borrow().form().count("booking"), 1);
    }

    #[wasm_bindgen_test]
    fn test_dispose_detaches_listeners() {
        let form = mount("disposeForm");
        let mut page = HospitalityForm::new("disposeForm", None).unwrap();
        page.dispose();

        let add: web_sys::HtmlElement = form
            .query_selector("[data-action=\"add-row\"]")
            .unwrap()
            .unwrap()
            .unchecked_into();
        add.click();
        assert_eq!(page.controller.borrow().form().count("booking"), 1);
    }

    #[wasm_bindgen_test]
    fn test_events_during_a_busy_controller_are_queued() {
        mount("queueForm");
        let page = HospitalityForm::new("queueForm", None).unwrap();

        {
            let _busy = page.controller.borrow_mut();
            page.dispatcher.event(FormEvent::AddRow(GroupKind::Guest));
            assert_eq!(page.dispatcher.pending_count(), 1);
        }

        // the next callback runs the queued one first
        page.dispatcher.event(FormEvent::AddRow(GroupKind::Guest));
        assert_eq!(page.dispatcher.pending_count(), 0);
        assert_eq!(page.controller.borrow().form().count("guest"), 3);

        // API calls drain the queue once they release the controller
        {
            let _busy = page.controller.borrow_mut();
            page.dispatcher.event(FormEvent::RemoveRow(GroupKind::Guest, 0));
        }
        page.add_row("booking").unwrap();
        assert_eq!(page.dispatcher.pending_count(), 0);
        assert_eq!(page.controller.borrow().form().count("guest"), 2);
    }

    #[wasm_bindgen_test]
    fn test_api_row_methods() {
        mount("apiForm");
        let page = HospitalityForm::new("apiForm", None).unwrap();
        page.add_row("guest").unwrap();
        assert_eq!(page.controller.borrow().form().count("guest"), 2);
        assert!(page.add_row("room").is_err());
        page.remove_row("guest", 0).unwrap();
        assert_eq!(page.controller.borrow().form().count("guest"), 1);
    }
}
