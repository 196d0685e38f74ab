//! Value types shared by the controller and its ports

use serde::{Deserialize, Serialize};
use std::fmt;

/// One input, addressed by its `name` attribute and its position among
/// inputs sharing that name (document order)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldRef {
    pub name: String,
    pub index: usize,
}

impl FieldRef {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }

    /// First (usually only) input with the given name
    pub fn first(name: impl Into<String>) -> Self {
        Self::new(name, 0)
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.index)
    }
}

/// Repeatable input groups on the request form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    Booking,
    Guest,
}

impl GroupKind {
    /// `name` attribute shared by every row of the group
    pub fn field_name(&self) -> &'static str {
        match self {
            GroupKind::Booking => "booking",
            GroupKind::Guest => "guest",
        }
    }

    /// Placeholder text for a freshly added row
    pub fn placeholder(&self) -> &'static str {
        match self {
            GroupKind::Booking => "رقم الحجز",
            GroupKind::Guest => "اسم الضيف",
        }
    }

    /// Element id of the container holding the rows
    pub fn container_id(&self) -> &'static str {
        match self {
            GroupKind::Booking => "bookingContainer",
            GroupKind::Guest => "guestContainer",
        }
    }

    /// Parse group kind from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "booking" => Some(GroupKind::Booking),
            "guest" => Some(GroupKind::Guest),
            _ => None,
        }
    }
}

/// Visual validity state of an input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Validity {
    /// Neither `is-valid` nor `is-invalid`
    #[default]
    Neutral,
    Valid,
    Invalid,
}

impl Validity {
    pub const VALID_CLASS: &'static str = "is-valid";
    pub const INVALID_CLASS: &'static str = "is-invalid";

    /// CSS class carried by the input in this state
    pub fn class(&self) -> Option<&'static str> {
        match self {
            Validity::Neutral => None,
            Validity::Valid => Some(Self::VALID_CLASS),
            Validity::Invalid => Some(Self::INVALID_CLASS),
        }
    }
}

/// Per-field validation outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub field: FieldRef,
    pub validity: Validity,
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn valid(field: FieldRef) -> Self {
        Self {
            field,
            validity: Validity::Valid,
            message: None,
        }
    }

    /// Nothing to judge yet, e.g. an empty optional input
    pub fn neutral(field: FieldRef) -> Self {
        Self {
            field,
            validity: Validity::Neutral,
            message: None,
        }
    }

    /// Required input left blank
    pub fn missing(field: FieldRef) -> Self {
        Self {
            field,
            validity: Validity::Invalid,
            message: None,
        }
    }

    /// Invalid with a native constraint message
    pub fn invalid(field: FieldRef, message: impl Into<String>) -> Self {
        Self {
            field,
            validity: Validity::Invalid,
            message: Some(message.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validity != Validity::Invalid
    }
}

/// Metadata of a selected upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    pub size: u64,
    pub mime: String,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, size: u64, mime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime: mime.into(),
        }
    }
}

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Parse severity from string; unknown values fall back to `Info`
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "success" => Severity::Success,
            "warning" => Severity::Warning,
            "error" | "danger" => Severity::Error,
            _ => Severity::Info,
        }
    }

    /// Bootstrap alert modifier
    pub fn alert_class(&self) -> &'static str {
        match self {
            Severity::Error => "alert-danger",
            Severity::Success => "alert-success",
            Severity::Info | Severity::Warning => "alert-warning",
        }
    }

    /// Font Awesome icon name
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Error => "exclamation-triangle",
            Severity::Success => "check-circle",
            Severity::Info | Severity::Warning => "info-circle",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_kind_names() {
        assert_eq!(GroupKind::Booking.field_name(), "booking");
        assert_eq!(GroupKind::Guest.field_name(), "guest");
        assert_eq!(GroupKind::parse("Guest"), Some(GroupKind::Guest));
        assert_eq!(GroupKind::parse("room"), None);
    }

    #[test]
    fn test_severity_classes() {
        assert_eq!(Severity::Error.alert_class(), "alert-danger");
        assert_eq!(Severity::Success.alert_class(), "alert-success");
        assert_eq!(Severity::Info.alert_class(), "alert-warning");
        assert_eq!(Severity::Warning.icon(), "info-circle");
        assert_eq!(Severity::parse("ERROR"), Severity::Error);
        assert_eq!(Severity::parse("whatever"), Severity::Info);
    }

    #[test]
    fn test_validity_classes() {
        assert_eq!(Validity::Neutral.class(), None);
        assert_eq!(Validity::Invalid.class(), Some("is-invalid"));
    }

    #[test]
    fn test_invalid_result_carries_message() {
        let field = FieldRef::first("telegram");
        let result = ValidationResult::invalid(field.clone(), "bad number");
        assert!(!result.is_valid());
        assert_eq!(result.message.as_deref(), Some("bad number"));
        assert!(ValidationResult::neutral(field.clone()).is_valid());
        assert_eq!(ValidationResult::missing(field).message, None);
    }

    #[test]
    fn test_field_ref_display() {
        assert_eq!(FieldRef::new("guest", 2).to_string(), "guest[2]");
    }
}
