//! Local persistence of in-progress form data
//!
//! A snapshot is a JSON object mapping field name to a string, or to an
//! ordered list of strings when several inputs share the name:
//!
//! ```json
//! {"owner": "Mona", "guest": ["Ali", "Sara"]}
//! ```

use crate::error::FormError;
use crate::model::FieldRef;
use crate::surface::FormSurface;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotValue {
    One(String),
    Many(Vec<String>),
}

/// Serialized copy of the form's text inputs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    values: BTreeMap<String, SnapshotValue>,
}

impl Snapshot {
    /// Collect `(name, value)` pairs; a repeated name becomes a list
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut values: BTreeMap<String, SnapshotValue> = BTreeMap::new();
        for (name, value) in entries {
            match values.remove(&name) {
                None => {
                    values.insert(name, SnapshotValue::One(value));
                }
                Some(SnapshotValue::One(first)) => {
                    values.insert(name, SnapshotValue::Many(vec![first, value]));
                }
                Some(SnapshotValue::Many(mut list)) => {
                    list.push(value);
                    values.insert(name, SnapshotValue::Many(list));
                }
            }
        }
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&SnapshotValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_json(&self) -> Result<String, FormError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, FormError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn capture<F: FormSurface>(form: &F) -> Self {
        Self::from_entries(form.entries())
    }

    /// Write values back into inputs that already exist
    ///
    /// Lists fill same-named inputs in order; extra list items are dropped
    /// rather than creating rows, and empty items leave their input alone.
    /// Inputs that capture never reads (file pickers, buttons) are skipped.
    /// Returns how many inputs were written.
    pub fn apply<F: FormSurface>(&self, form: &mut F) -> Result<usize, FormError> {
        let mut written = 0;
        for (name, value) in &self.values {
            let available = form.count(name);
            if available == 0 {
                continue;
            }
            match value {
                SnapshotValue::One(v) => {
                    let field = FieldRef::first(name.as_str());
                    if !form.is_restorable(&field) {
                        debug!(%field, "Skipping non-restorable input");
                        continue;
                    }
                    form.set_value(&field, v)?;
                    written += 1;
                }
                SnapshotValue::Many(list) => {
                    for (index, v) in list.iter().enumerate().take(available) {
                        let field = FieldRef::new(name.as_str(), index);
                        if v.is_empty() || !form.is_restorable(&field) {
                            continue;
                        }
                        form.set_value(&field, v)?;
                        written += 1;
                    }
                }
            }
        }
        Ok(written)
    }
}

/// Port onto local persistent storage
pub trait SnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>, FormError>;

    fn save(&mut self, key: &str, json: &str) -> Result<(), FormError>;

    fn remove(&mut self, key: &str) -> Result<(), FormError>;
}

/// Store backed by a map, for tests and headless use
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed raw content, e.g. a snapshot left by an earlier visit
    pub fn with_item(mut self, key: &str, json: &str) -> Self {
        self.items.insert(key.to_string(), json.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// Number of successful `save` calls
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, FormError> {
        Ok(self.items.get(key).cloned())
    }

    fn save(&mut self, key: &str, json: &str) -> Result<(), FormError> {
        self.items.insert(key.to_string(), json.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), FormError> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GroupKind;
    use crate::surface::MemoryForm;
    use pretty_assertions::assert_eq;

    fn entries(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_repeated_names_become_lists() {
        let snapshot = Snapshot::from_entries(entries(&[
            ("owner", "Mona"),
            ("guest", "Ali"),
            ("guest", "Sara"),
            ("guest", "Omar"),
        ]));
        assert_eq!(snapshot.get("owner"), Some(&SnapshotValue::One("Mona".to_string())));
        assert_eq!(
            snapshot.get("guest"),
            Some(&SnapshotValue::Many(vec![
                "Ali".to_string(),
                "Sara".to_string(),
                "Omar".to_string()
            ]))
        );
    }

    #[test]
    fn test_json_shape() {
        let snapshot =
            Snapshot::from_entries(entries(&[("guest", "Ali"), ("guest", "Sara"), ("owner", "Mona")]));
        assert_eq!(
            snapshot.to_json().unwrap(),
            r#"{"guest":["Ali","Sara"],"owner":"Mona"}"#
        );
    }

    #[test]
    fn test_restore_fills_existing_rows_only() {
        let mut form = MemoryForm::hospitality();
        form.append_row(GroupKind::Guest).unwrap();

        let snapshot = Snapshot::from_json(r#"{"guest": ["Ali", "Sara"]}"#).unwrap();
        let written = snapshot.apply(&mut form).unwrap();

        assert_eq!(written, 2);
        assert_eq!(form.values("guest"), vec!["Ali", "Sara"]);
    }

    #[test]
    fn test_restore_never_creates_rows() {
        let mut form = MemoryForm::hospitality();
        let snapshot = Snapshot::from_json(r#"{"guest": ["Ali", "Sara", "Omar"]}"#).unwrap();
        snapshot.apply(&mut form).unwrap();
        assert_eq!(form.values("guest"), vec!["Ali"]);
    }

    #[test]
    fn test_restore_skips_unknown_and_empty() {
        let mut form = MemoryForm::hospitality();
        form.append_row(GroupKind::Booking).unwrap();
        form.set_value(&FieldRef::new("booking", 0), "B-1").unwrap();

        let snapshot =
            Snapshot::from_json(r#"{"booking": ["", "B-2"], "legacyField": "x"}"#).unwrap();
        let written = snapshot.apply(&mut form).unwrap();

        assert_eq!(written, 1);
        assert_eq!(form.values("booking"), vec!["B-1", "B-2"]);
    }

    #[test]
    fn test_restore_leaves_file_inputs_alone() {
        let mut form = MemoryForm::hospitality();
        let snapshot =
            Snapshot::from_json(r#"{"file": "C:\\fakepath\\x.pdf", "notes": "late"}"#).unwrap();

        let written = snapshot.apply(&mut form).unwrap();

        assert_eq!(written, 1);
        assert_eq!(form.values("file"), vec![""]);
        assert_eq!(form.values("notes"), vec!["late"]);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            Snapshot::from_json("{\"guest\": 5}"),
            Err(FormError::Snapshot(_))
        ));
        assert!(Snapshot::from_json("not json").is_err());
    }

    #[test]
    fn test_memory_store_counts_writes() {
        let mut store = MemoryStore::new();
        store.save("k", "{}").unwrap();
        store.save("k", "{\"a\":\"b\"}").unwrap();
        assert_eq!(store.writes(), 2);
        assert_eq!(store.load("k").unwrap().as_deref(), Some("{\"a\":\"b\"}"));
        store.remove("k").unwrap();
        assert_eq!(store.load("k").unwrap(), None);
    }
}
