//! [`FormSurface`] over the live document
//!
//! Inputs are found by `name` inside the form element; a [`FieldRef`] index is
//! the position among same-named controls in document order, so it follows
//! rows as they are added and removed.

use crate::dom_err;
use hospitality_form_core::{FieldRef, FileMeta, FormError, FormSurface, GroupKind, Validity};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement,
};

/// Selector for controls carrying `name`
pub fn name_selector(name: &str) -> String {
    format!("[name=\"{}\"]", name.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Input types whose value never goes into a snapshot
pub fn is_snapshot_excluded(input_type: &str) -> bool {
    matches!(
        input_type,
        "file" | "submit" | "button" | "reset" | "image" | "password"
    )
}

/// The first match marks the form busy while a submission is pending
const SUBMIT_CONTROL_SELECTOR: &str = "button[type=\"submit\"], input[type=\"submit\"]";

/// The `data-action` values the form's buttons carry
pub const ADD_ROW_ACTION: &str = "add-row";
pub const REMOVE_ROW_ACTION: &str = "remove-row";

fn named_elements(form: &HtmlFormElement, name: &str) -> Vec<Element> {
    let Ok(list) = form.query_selector_all(&name_selector(name)) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Address of the control an event came from
pub fn field_ref_for(form: &HtmlFormElement, target: &Element) -> Option<FieldRef> {
    let name = target.get_attribute("name")?;
    let index = named_elements(form, &name)
        .iter()
        .position(|el| el.is_same_node(Some(target.as_ref())))?;
    Some(FieldRef::new(name, index))
}

/// Row addressed by a remove button: the control sharing its `.input-group`
pub fn row_for_button(form: &HtmlFormElement, button: &Element, group: GroupKind) -> Option<FieldRef> {
    let row = button.closest(".input-group").ok().flatten()?;
    let input = row
        .query_selector(&name_selector(group.field_name()))
        .ok()
        .flatten()?;
    field_ref_for(form, &input)
}

enum Control {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
    Select(HtmlSelectElement),
}

impl Control {
    fn from_element(element: Element) -> Option<Self> {
        let element = match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => return Some(Control::Input(input)),
            Err(element) => element,
        };
        let element = match element.dyn_into::<HtmlTextAreaElement>() {
            Ok(area) => return Some(Control::TextArea(area)),
            Err(element) => element,
        };
        element.dyn_into::<HtmlSelectElement>().ok().map(Control::Select)
    }

    fn element(&self) -> &HtmlElement {
        match self {
            Control::Input(input) => input.as_ref(),
            Control::TextArea(area) => area.as_ref(),
            Control::Select(select) => select.as_ref(),
        }
    }

    fn value(&self) -> String {
        match self {
            Control::Input(input) => input.value(),
            Control::TextArea(area) => area.value(),
            Control::Select(select) => select.value(),
        }
    }

    fn set_value(&self, value: &str) {
        match self {
            Control::Input(input) => input.set_value(value),
            Control::TextArea(area) => area.set_value(value),
            Control::Select(select) => select.set_value(value),
        }
    }

    fn set_custom_validity(&self, message: &str) {
        match self {
            Control::Input(input) => input.set_custom_validity(message),
            Control::TextArea(area) => area.set_custom_validity(message),
            Control::Select(select) => select.set_custom_validity(message),
        }
    }

    /// Whether a saved value may be written back into the control
    ///
    /// Checkboxes and radios are captured by value but restoring would
    /// overwrite their `value` attribute, so they are left alone.
    fn is_restorable(&self) -> bool {
        match self {
            Control::Input(input) => {
                let kind = input.type_();
                !is_snapshot_excluded(&kind) && kind != "checkbox" && kind != "radio"
            }
            Control::TextArea(_) | Control::Select(_) => true,
        }
    }

    /// Whether the control contributes to a snapshot
    fn is_snapshotted(&self) -> bool {
        match self {
            Control::Input(input) => {
                let kind = input.type_();
                if is_snapshot_excluded(&kind) {
                    false
                } else if kind == "checkbox" || kind == "radio" {
                    input.checked()
                } else {
                    true
                }
            }
            Control::TextArea(_) | Control::Select(_) => true,
        }
    }
}

pub struct DomForm {
    document: Document,
    form: HtmlFormElement,
}

impl DomForm {
    pub fn new(document: Document, form: HtmlFormElement) -> Self {
        Self { document, form }
    }

    fn control(&self, field: &FieldRef) -> Option<Control> {
        named_elements(&self.form, &field.name)
            .into_iter()
            .nth(field.index)
            .and_then(Control::from_element)
    }

    fn require(&self, field: &FieldRef) -> Result<Control, FormError> {
        self.control(field)
            .ok_or_else(|| FormError::MissingElement(field.to_string()))
    }

    fn build_row(&self, group: GroupKind) -> Result<Element, FormError> {
        let row = self.document.create_element("div").map_err(dom_err)?;
        row.set_class_name("input-group mb-2");

        let input = self.document.create_element("input").map_err(dom_err)?;
        input.set_attribute("type", "text").map_err(dom_err)?;
        input.set_class_name("form-control");
        input
            .set_attribute("name", group.field_name())
            .map_err(dom_err)?;
        input
            .set_attribute("placeholder", group.placeholder())
            .map_err(dom_err)?;

        let remove = self.document.create_element("button").map_err(dom_err)?;
        remove.set_attribute("type", "button").map_err(dom_err)?;
        remove.set_class_name("btn btn-outline-danger");
        remove
            .set_attribute("data-action", REMOVE_ROW_ACTION)
            .map_err(dom_err)?;
        remove
            .set_attribute("data-group", group.field_name())
            .map_err(dom_err)?;
        let icon = self.document.create_element("i").map_err(dom_err)?;
        icon.set_class_name("fas fa-minus");
        remove.append_child(&icon).map_err(dom_err)?;

        row.append_child(&input).map_err(dom_err)?;
        row.append_child(&remove).map_err(dom_err)?;
        Ok(row)
    }

    fn submit_control(&self) -> Option<Element> {
        self.form
            .query_selector(SUBMIT_CONTROL_SELECTOR)
            .ok()
            .flatten()
    }

    fn show_busy_button(&self, button: &HtmlButtonElement, label: &str) -> Result<(), FormError> {
        button.set_disabled(true);
        button.class_list().add_1("btn-loading").map_err(dom_err)?;
        button.set_text_content(None);
        let spinner = self.document.create_element("i").map_err(dom_err)?;
        spinner.set_class_name("fas fa-spinner fa-spin me-2");
        button.append_child(&spinner).map_err(dom_err)?;
        button
            .append_child(&self.document.create_text_node(label))
            .map_err(dom_err)?;
        Ok(())
    }
}

impl FormSurface for DomForm {
    fn value(&self, field: &FieldRef) -> Option<String> {
        self.control(field).map(|c| c.value())
    }

    fn set_value(&mut self, field: &FieldRef, value: &str) -> Result<(), FormError> {
        self.require(field)?.set_value(value);
        Ok(())
    }

    fn set_min(&mut self, field: &FieldRef, min: &str) -> Result<(), FormError> {
        match self.require(field)? {
            Control::Input(input) => input.set_min(min),
            _ => tracing::warn!(%field, "min on a non-input control"),
        }
        Ok(())
    }

    fn validity(&self, field: &FieldRef) -> Validity {
        let Some(control) = self.control(field) else {
            return Validity::Neutral;
        };
        let classes = control.element().class_list();
        if classes.contains(Validity::INVALID_CLASS) {
            Validity::Invalid
        } else if classes.contains(Validity::VALID_CLASS) {
            Validity::Valid
        } else {
            Validity::Neutral
        }
    }

    fn set_validity(&mut self, field: &FieldRef, validity: Validity) -> Result<(), FormError> {
        let control = self.require(field)?;
        let classes = control.element().class_list();
        classes
            .remove_2(Validity::VALID_CLASS, Validity::INVALID_CLASS)
            .map_err(dom_err)?;
        if let Some(class) = validity.class() {
            classes.add_1(class).map_err(dom_err)?;
        }
        Ok(())
    }

    fn set_custom_validity(&mut self, field: &FieldRef, message: &str) -> Result<(), FormError> {
        self.require(field)?.set_custom_validity(message);
        Ok(())
    }

    fn count(&self, name: &str) -> usize {
        named_elements(&self.form, name).len()
    }

    fn required_fields(&self) -> Vec<FieldRef> {
        let Ok(list) = self.form.query_selector_all("[required][name]") else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .filter_map(|el| field_ref_for(&self.form, &el))
            .collect()
    }

    fn entries(&self) -> Vec<(String, String)> {
        let Ok(list) = self
            .form
            .query_selector_all("input[name], textarea[name], select[name]")
        else {
            return Vec::new();
        };

        let mut entries = Vec::new();
        for i in 0..list.length() {
            let Some(element) = list.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(name) = element.get_attribute("name") else {
                continue;
            };
            if let Some(control) = Control::from_element(element) {
                if control.is_snapshotted() {
                    entries.push((name, control.value()));
                }
            }
        }
        entries
    }

    fn is_restorable(&self, field: &FieldRef) -> bool {
        self.control(field).is_some_and(|c| c.is_restorable())
    }

    fn append_row(&mut self, group: GroupKind) -> Result<FieldRef, FormError> {
        let container = self
            .document
            .get_element_by_id(group.container_id())
            .ok_or_else(|| FormError::MissingElement(group.container_id().to_string()))?;
        let index = self.count(group.field_name());
        let row = self.build_row(group)?;
        container.append_child(&row).map_err(dom_err)?;
        Ok(FieldRef::new(group.field_name(), index))
    }

    fn remove_row(&mut self, group: GroupKind, index: usize) -> Result<(), FormError> {
        let field = FieldRef::new(group.field_name(), index);
        let control = self.require(&field)?;
        let element = control.element();
        match element.closest(".input-group").map_err(dom_err)? {
            Some(row) => row.remove(),
            None => element.remove(),
        }
        Ok(())
    }

    fn focus(&mut self, field: &FieldRef) -> Result<(), FormError> {
        self.require(field)?.element().focus().map_err(dom_err)
    }

    fn selected_file(&self, field: &FieldRef) -> Option<FileMeta> {
        let Control::Input(input) = self.control(field)? else {
            return None;
        };
        let file = input.files()?.get(0)?;
        Some(FileMeta::new(file.name(), file.size() as u64, file.type_()))
    }

    fn clear_file(&mut self, field: &FieldRef) -> Result<(), FormError> {
        match self.require(field)? {
            Control::Input(input) => input.set_value(""),
            _ => tracing::warn!(%field, "clear_file on a non-input control"),
        }
        Ok(())
    }

    fn show_busy(&mut self, label: &str) -> Result<(), FormError> {
        let control = self
            .submit_control()
            .ok_or_else(|| FormError::MissingElement(SUBMIT_CONTROL_SELECTOR.into()))?;

        let control = match control.dyn_into::<HtmlButtonElement>() {
            Ok(button) => return self.show_busy_button(&button, label),
            Err(control) => control,
        };
        // <input type="submit"> has no children, only a value
        let input: HtmlInputElement = control
            .dyn_into()
            .map_err(|_| FormError::Dom("submit control is neither button nor input".into()))?;
        input.set_disabled(true);
        input.set_value(label);
        Ok(())
    }

    fn submit(&mut self) -> Result<(), FormError> {
        self.form.submit().map_err(dom_err)
    }
}
