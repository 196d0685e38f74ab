//! The form as the controller sees it
//!
//! [`FormSurface`] is the port onto the document: the wasm crate implements it
//! over real DOM elements, [`MemoryForm`] implements it in memory for tests
//! and headless use.

use crate::error::FormError;
use crate::model::{FieldRef, FileMeta, GroupKind, Validity};

pub trait FormSurface {
    /// Current value, `None` when the input does not exist
    fn value(&self, field: &FieldRef) -> Option<String>;

    fn set_value(&mut self, field: &FieldRef, value: &str) -> Result<(), FormError>;

    /// Set the `min` attribute (date inputs)
    fn set_min(&mut self, field: &FieldRef, min: &str) -> Result<(), FormError>;

    fn validity(&self, field: &FieldRef) -> Validity;

    fn set_validity(&mut self, field: &FieldRef, validity: Validity) -> Result<(), FormError>;

    /// Native constraint message; empty clears it
    fn set_custom_validity(&mut self, field: &FieldRef, message: &str) -> Result<(), FormError>;

    /// Number of inputs carrying `name`
    fn count(&self, name: &str) -> usize;

    /// Inputs with the `required` attribute, in document order
    fn required_fields(&self) -> Vec<FieldRef>;

    /// `(name, value)` pairs of every non-file input, in document order
    fn entries(&self) -> Vec<(String, String)>;

    /// Whether a saved value may be written back; false for missing inputs
    /// and for every input [`entries`](Self::entries) leaves out
    fn is_restorable(&self, field: &FieldRef) -> bool;

    /// Append an empty row to a repeatable group and return it
    fn append_row(&mut self, group: GroupKind) -> Result<FieldRef, FormError>;

    fn remove_row(&mut self, group: GroupKind, index: usize) -> Result<(), FormError>;

    fn focus(&mut self, field: &FieldRef) -> Result<(), FormError>;

    /// First file selected in a file input
    fn selected_file(&self, field: &FieldRef) -> Option<FileMeta>;

    fn clear_file(&mut self, field: &FieldRef) -> Result<(), FormError>;

    /// Disable the submit control and show `label`; `MissingElement` when
    /// the form has no submit control
    fn show_busy(&mut self, label: &str) -> Result<(), FormError>;

    /// Hand the form to the backend (native submit, no further interception)
    fn submit(&mut self) -> Result<(), FormError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum InputKind {
    Text,
    File(Option<FileMeta>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MemoryInput {
    name: String,
    kind: InputKind,
    value: String,
    required: bool,
    min: Option<String>,
    validity: Validity,
    custom_validity: String,
}

impl MemoryInput {
    fn text(name: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            kind: InputKind::Text,
            value: String::new(),
            required,
            min: None,
            validity: Validity::Neutral,
            custom_validity: String::new(),
        }
    }
}

/// In-memory form with the same addressing rules as the DOM adapter
#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
    inputs: Vec<MemoryInput>,
    focused: Option<FieldRef>,
    busy_label: Option<String>,
    no_submit_control: bool,
    submissions: usize,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// The hospitality request form: owner, membership, one booking row,
    /// stay dates, one guest row, notes, phone and an attachment
    pub fn hospitality() -> Self {
        Self::new()
            .with_text("owner", true)
            .with_text("membership", true)
            .with_text("booking", false)
            .with_text("fromDate", true)
            .with_text("toDate", true)
            .with_text("guest", false)
            .with_text("notes", false)
            .with_text("telegram", true)
            .with_file("file")
    }

    pub fn with_text(mut self, name: &str, required: bool) -> Self {
        self.inputs.push(MemoryInput::text(name, required));
        self
    }

    pub fn with_file(mut self, name: &str) -> Self {
        let mut input = MemoryInput::text(name, false);
        input.kind = InputKind::File(None);
        self.inputs.push(input);
        self
    }

    /// A form without a submit control, so `show_busy` fails
    pub fn without_submit_control(mut self) -> Self {
        self.no_submit_control = true;
        self
    }

    /// Simulate the user picking a file
    pub fn select_file(&mut self, field: &FieldRef, file: FileMeta) -> Result<(), FormError> {
        let input = self.input_mut(field)?;
        input.value = file.name.clone();
        input.kind = InputKind::File(Some(file));
        Ok(())
    }

    pub fn min(&self, field: &FieldRef) -> Option<String> {
        self.input(field).and_then(|i| i.min.clone())
    }

    pub fn custom_validity(&self, field: &FieldRef) -> Option<String> {
        self.input(field).map(|i| i.custom_validity.clone())
    }

    pub fn focused(&self) -> Option<&FieldRef> {
        self.focused.as_ref()
    }

    /// Submit control label while disabled, `None` while idle
    pub fn busy_label(&self) -> Option<&str> {
        self.busy_label.as_deref()
    }

    /// How many times the form reached the backend
    pub fn submissions(&self) -> usize {
        self.submissions
    }

    /// Values of every input named `name`, in order
    pub fn values(&self, name: &str) -> Vec<String> {
        self.inputs
            .iter()
            .filter(|i| i.name == name)
            .map(|i| i.value.clone())
            .collect()
    }

    fn position(&self, field: &FieldRef) -> Option<usize> {
        self.inputs
            .iter()
            .enumerate()
            .filter(|(_, i)| i.name == field.name)
            .nth(field.index)
            .map(|(pos, _)| pos)
    }

    fn input(&self, field: &FieldRef) -> Option<&MemoryInput> {
        self.position(field).map(|pos| &self.inputs[pos])
    }

    fn input_mut(&mut self, field: &FieldRef) -> Result<&mut MemoryInput, FormError> {
        let pos = self
            .position(field)
            .ok_or_else(|| FormError::MissingElement(field.to_string()))?;
        Ok(&mut self.inputs[pos])
    }
}

impl FormSurface for MemoryForm {
    fn value(&self, field: &FieldRef) -> Option<String> {
        self.input(field).map(|i| i.value.clone())
    }

    fn set_value(&mut self, field: &FieldRef, value: &str) -> Result<(), FormError> {
        self.input_mut(field)?.value = value.to_string();
        Ok(())
    }

    fn set_min(&mut self, field: &FieldRef, min: &str) -> Result<(), FormError> {
        self.input_mut(field)?.min = Some(min.to_string());
        Ok(())
    }

    fn validity(&self, field: &FieldRef) -> Validity {
        self.input(field).map(|i| i.validity).unwrap_or_default()
    }

    fn set_validity(&mut self, field: &FieldRef, validity: Validity) -> Result<(), FormError> {
        self.input_mut(field)?.validity = validity;
        Ok(())
    }

    fn set_custom_validity(&mut self, field: &FieldRef, message: &str) -> Result<(), FormError> {
        self.input_mut(field)?.custom_validity = message.to_string();
        Ok(())
    }

    fn count(&self, name: &str) -> usize {
        self.inputs.iter().filter(|i| i.name == name).count()
    }

    fn required_fields(&self) -> Vec<FieldRef> {
        let mut refs = Vec::new();
        for (pos, input) in self.inputs.iter().enumerate() {
            if input.required {
                let index = self.inputs[..pos]
                    .iter()
                    .filter(|i| i.name == input.name)
                    .count();
                refs.push(FieldRef::new(input.name.clone(), index));
            }
        }
        refs
    }

    fn entries(&self) -> Vec<(String, String)> {
        self.inputs
            .iter()
            .filter(|i| i.kind == InputKind::Text)
            .map(|i| (i.name.clone(), i.value.clone()))
            .collect()
    }

    fn is_restorable(&self, field: &FieldRef) -> bool {
        self.input(field).is_some_and(|i| i.kind == InputKind::Text)
    }

    fn append_row(&mut self, group: GroupKind) -> Result<FieldRef, FormError> {
        let name = group.field_name();
        let index = self.count(name);
        let insert_at = self
            .inputs
            .iter()
            .rposition(|i| i.name == name)
            .map(|pos| pos + 1)
            .ok_or_else(|| FormError::MissingElement(group.container_id().to_string()))?;
        self.inputs.insert(insert_at, MemoryInput::text(name, false));
        Ok(FieldRef::new(name, index))
    }

    fn remove_row(&mut self, group: GroupKind, index: usize) -> Result<(), FormError> {
        let field = FieldRef::new(group.field_name(), index);
        let pos = self
            .position(&field)
            .ok_or_else(|| FormError::MissingElement(field.to_string()))?;
        self.inputs.remove(pos);
        if self.focused.as_ref() == Some(&field) {
            self.focused = None;
        }
        Ok(())
    }

    fn focus(&mut self, field: &FieldRef) -> Result<(), FormError> {
        self.position(field)
            .ok_or_else(|| FormError::MissingElement(field.to_string()))?;
        self.focused = Some(field.clone());
        Ok(())
    }

    fn selected_file(&self, field: &FieldRef) -> Option<FileMeta> {
        match &self.input(field)?.kind {
            InputKind::File(file) => file.clone(),
            InputKind::Text => None,
        }
    }

    fn clear_file(&mut self, field: &FieldRef) -> Result<(), FormError> {
        let input = self.input_mut(field)?;
        input.value.clear();
        if let InputKind::File(file) = &mut input.kind {
            *file = None;
        }
        Ok(())
    }

    fn show_busy(&mut self, label: &str) -> Result<(), FormError> {
        if self.no_submit_control {
            return Err(FormError::MissingElement("submit control".to_string()));
        }
        self.busy_label = Some(label.to_string());
        Ok(())
    }

    fn submit(&mut self) -> Result<(), FormError> {
        self.submissions += 1;
        Ok(())
    }
}
