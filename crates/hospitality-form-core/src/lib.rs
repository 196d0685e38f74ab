//! Hospitality request form controller
//!
//! Validation, phone normalization, upload checks, repeatable rows, the
//! submission gate, toasts and optional autosave for the hospitality
//! booking request page, with no browser dependency.
//!
//! The browser is reached through three ports:
//! - [`FormSurface`]: the form's inputs and submit control
//! - [`ToastRenderer`]: banners on screen
//! - [`SnapshotStore`]: local storage
//!
//! Timers go through a [`Scheduler`]. Every port has an in-memory
//! implementation so the whole controller runs in plain `cargo test`.

pub mod autosave;
pub mod config;
pub mod controller;
pub mod dates;
pub mod error;
pub mod files;
pub mod groups;
pub mod messages;
pub mod model;
pub mod notify;
pub mod phone;
pub mod scheduler;
pub mod submit;
pub mod surface;

pub use autosave::{MemoryStore, Snapshot, SnapshotStore, SnapshotValue};
pub use config::FormConfig;
pub use controller::{FormController, FormEvent};
pub use dates::{check_date_range, DateRangeCheck};
pub use error::FormError;
pub use files::{check_file, FileCheck};
pub use groups::RowRemoval;
pub use model::{FieldRef, FileMeta, GroupKind, Severity, ValidationResult, Validity};
pub use notify::{MemoryToasts, Notifications, Toast, ToastId, ToastRenderer};
pub use phone::{is_valid_phone, normalize_phone, PhoneCheck};
pub use scheduler::{ManualScheduler, Scheduler, TimerId, TimerTask};
pub use submit::{SubmitOutcome, SubmitState};
pub use surface::{FormSurface, MemoryForm};
