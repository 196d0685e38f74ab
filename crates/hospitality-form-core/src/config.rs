//! Form controller configuration
//!
//! Every field has a default matching the hospitality request page, so an
//! empty TOML or JSON document yields a working configuration.

use crate::error::FormError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Names of the special-purpose inputs
    pub fields: FieldNames,
    /// Timer settings in milliseconds
    pub timing: TimingConfig,
    /// Upload constraints
    pub upload: UploadConfig,
    /// Longest allowed stay in nights (default: 30)
    pub max_stay_nights: i64,
    /// Local persistence settings
    pub autosave: AutosaveConfig,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            fields: FieldNames::default(),
            timing: TimingConfig::default(),
            upload: UploadConfig::default(),
            max_stay_nights: 30,
            autosave: AutosaveConfig::default(),
        }
    }
}

impl FormConfig {
    /// Parse configuration from a TOML string
    ///
    /// ```
    /// use hospitality_form_core::FormConfig;
    ///
    /// let config = FormConfig::from_toml_str(r#"
    ///     max_stay_nights = 14
    ///
    ///     [autosave]
    ///     enabled = true
    /// "#).unwrap();
    /// assert_eq!(config.max_stay_nights, 14);
    /// assert!(config.autosave.enabled);
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, FormError> {
        let config: Self = toml::from_str(s).map_err(|e| FormError::Config(e.to_string()))?;
        config.validate()
    }

    /// Parse configuration from a JSON string (the shape handed over by the page script)
    pub fn from_json_str(s: &str) -> Result<Self, FormError> {
        let config: Self = serde_json::from_str(s).map_err(|e| FormError::Config(e.to_string()))?;
        config.validate()
    }

    fn validate(self) -> Result<Self, FormError> {
        if self.max_stay_nights < 1 {
            return Err(FormError::Config(format!(
                "max_stay_nights must be at least 1, got {}",
                self.max_stay_nights
            )));
        }
        if self.upload.allowed_types.is_empty() {
            return Err(FormError::Config(
                "upload.allowed_types must not be empty".to_string(),
            ));
        }
        if self.autosave.storage_key.trim().is_empty() {
            return Err(FormError::Config(
                "autosave.storage_key must not be empty".to_string(),
            ));
        }
        Ok(self)
    }
}

/// `name` attributes of the inputs the controller treats specially
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub arrival: String,
    pub departure: String,
    pub phone: String,
    pub file: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            arrival: "fromDate".to_string(),
            departure: "toDate".to_string(),
            phone: "telegram".to_string(),
            file: "file".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Quiet period before an autosave write (default: 1000)
    pub autosave_debounce_ms: u64,
    /// Delay between showing the busy state and submitting (default: 500)
    pub submit_delay_ms: u64,
    /// Toast lifetime before its exit animation starts (default: 5000)
    pub toast_lifetime_ms: u64,
    /// Length of the toast exit animation (default: 300)
    pub toast_exit_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            autosave_debounce_ms: 1000,
            submit_delay_ms: 500,
            toast_lifetime_ms: 5000,
            toast_exit_ms: 300,
        }
    }
}

impl TimingConfig {
    pub fn autosave_debounce(&self) -> Duration {
        Duration::from_millis(self.autosave_debounce_ms)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn toast_lifetime(&self) -> Duration {
        Duration::from_millis(self.toast_lifetime_ms)
    }

    pub fn toast_exit(&self) -> Duration {
        Duration::from_millis(self.toast_exit_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Largest accepted file in bytes (default: 10 MiB)
    pub max_size_bytes: u64,
    /// Accepted MIME types
    pub allowed_types: Vec<String>,
}

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

pub const DEFAULT_ALLOWED_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "image/jpeg",
    "image/jpg",
    "image/png",
];

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_types: DEFAULT_ALLOWED_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutosaveConfig {
    /// Off unless the page opts in
    pub enabled: bool,
    /// Local storage key holding the snapshot
    pub storage_key: String,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            storage_key: "hospitalityFormData".to_string(),
        }
    }
}
