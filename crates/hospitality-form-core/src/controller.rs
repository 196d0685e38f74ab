//! The form controller
//!
//! One [`FormController`] is built per page. It owns its collaborators (the
//! form surface, a scheduler, the toast renderer and the snapshot store) and
//! reacts to [`FormEvent`]s and fired [`TimerTask`]s. Nothing here touches a
//! global.

use crate::autosave::{Snapshot, SnapshotStore};
use crate::config::FormConfig;
use crate::dates::{check_date_range, format_date, DateRangeCheck};
use crate::error::FormError;
use crate::files::{check_file, format_bytes, FileCheck};
use crate::groups::{self, RowRemoval};
use crate::messages;
use crate::model::{FieldRef, GroupKind, Severity, ValidationResult, Validity};
use crate::notify::{Notifications, ToastId, ToastRenderer};
use crate::phone::{check_phone, is_valid_phone, normalize_phone, PhoneCheck};
use crate::scheduler::{ManualScheduler, Scheduler, TimerId, TimerTask};
use crate::submit::{SubmitOutcome, SubmitState};
use crate::surface::FormSurface;
use chrono::NaiveDate;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Something the user did to the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Input(FieldRef),
    Change(FieldRef),
    Blur(FieldRef),
    Submit,
    AddRow(GroupKind),
    RemoveRow(GroupKind, usize),
    DismissToast(ToastId),
}

pub struct FormController<F, S, R, P> {
    config: FormConfig,
    form: F,
    scheduler: S,
    notifications: Notifications<R>,
    store: P,
    today: NaiveDate,
    state: SubmitState,
    autosave_timer: Option<TimerId>,
    submit_timer: Option<TimerId>,
}

impl<F, S, R, P> FormController<F, S, R, P>
where
    F: FormSurface,
    S: Scheduler,
    R: ToastRenderer,
    P: SnapshotStore,
{
    pub fn new(
        config: FormConfig,
        form: F,
        scheduler: S,
        renderer: R,
        store: P,
        today: NaiveDate,
    ) -> Self {
        let notifications = Notifications::new(renderer, config.timing.clone());
        Self {
            config,
            form,
            scheduler,
            notifications,
            store,
            today,
            state: SubmitState::Idle,
            autosave_timer: None,
            submit_timer: None,
        }
    }

    /// Page-load setup: date minimums, then restore if autosave is on
    ///
    /// Restore failures are logged; only a missing date input is an error.
    pub fn initialize(&mut self) -> Result<(), FormError> {
        let today = format_date(self.today);
        let (arrival, departure) = (self.arrival(), self.departure());
        self.form.set_min(&arrival, &today)?;
        self.form.set_min(&departure, &today)?;

        if self.config.autosave.enabled {
            match self.restore() {
                Ok(restored) => debug!(restored, "Autosave enabled"),
                Err(e) => error!(error = %e, "Failed to restore saved form data"),
            }
        }
        Ok(())
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn notifications(&self) -> &Notifications<R> {
        &self.notifications
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    /// Route a DOM event; failures are logged, never propagated
    pub fn handle(&mut self, event: FormEvent) {
        debug!(?event, "Form event");
        let result = match event {
            FormEvent::Input(field) => self.on_input(&field),
            FormEvent::Change(field) => self.on_change(&field),
            FormEvent::Blur(field) => self.on_blur(&field),
            FormEvent::Submit => {
                self.submit();
                Ok(())
            }
            FormEvent::AddRow(group) => self.add_row(group).map(|_| ()),
            FormEvent::RemoveRow(group, index) => self.remove_row(group, index).map(|_| ()),
            FormEvent::DismissToast(id) => {
                self.notifications.dismiss(&mut self.scheduler, id);
                Ok(())
            }
        };

        if let Err(e) = result {
            error!(error = %e, "Form event handling failed");
        }
    }

    /// Run a task the scheduler handed back
    pub fn fire(&mut self, task: TimerTask) {
        match task {
            TimerTask::Autosave => {
                self.autosave_timer = None;
                if let Err(e) = self.save_now() {
                    error!(error = %e, "Autosave failed");
                }
            }
            TimerTask::Submit => {
                self.submit_timer = None;
                match self.form.submit() {
                    Ok(()) => info!("Form handed to backend"),
                    Err(e) => error!(error = %e, "Native submission failed"),
                }
            }
            TimerTask::ToastExpire(id) => self.notifications.expire(&mut self.scheduler, id),
            TimerTask::ToastRemove(id) => self.notifications.remove(id),
        }
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> ToastId {
        self.notifications
            .notify(&mut self.scheduler, message, severity)
    }

    pub fn add_row(&mut self, group: GroupKind) -> Result<FieldRef, FormError> {
        groups::add_row(&mut self.form, group)
    }

    pub fn remove_row(&mut self, group: GroupKind, index: usize) -> Result<RowRemoval, FormError> {
        groups::remove_row(&mut self.form, group, index)
    }

    /// Arrival changed: departure may not start before it
    pub fn arrival_changed(&mut self) -> Result<(), FormError> {
        let arrival = self.value(&self.arrival());
        if arrival.is_empty() {
            return Ok(());
        }

        let departure_field = self.departure();
        self.form.set_min(&departure_field, &arrival)?;

        let departure = self.value(&departure_field);
        if check_date_range(&arrival, &departure, self.config.max_stay_nights)
            == DateRangeCheck::NotAfterArrival
        {
            self.form.set_value(&departure_field, "")?;
            self.notify(messages::DEPARTURE_BEFORE_ARRIVAL, Severity::Warning);
        }
        Ok(())
    }

    /// Check the stay dates, clearing a departure that is not after arrival
    pub fn validate_dates(&mut self) -> Result<bool, FormError> {
        let departure_field = self.departure();
        let arrival = self.value(&self.arrival());
        let departure = self.value(&departure_field);

        match check_date_range(&arrival, &departure, self.config.max_stay_nights) {
            DateRangeCheck::Incomplete | DateRangeCheck::Valid { .. } => Ok(true),
            DateRangeCheck::NotAfterArrival => {
                self.form.set_value(&departure_field, "")?;
                self.notify(messages::DEPARTURE_BEFORE_ARRIVAL, Severity::Warning);
                Ok(false)
            }
            DateRangeCheck::TooLong { nights } => {
                warn!(nights, "Stay too long");
                let message = messages::stay_too_long(self.config.max_stay_nights);
                self.notify(message, Severity::Warning);
                Ok(false)
            }
            DateRangeCheck::Unparseable => {
                warn!(%arrival, %departure, "Unparseable stay dates");
                self.form.set_validity(&departure_field, Validity::Invalid)?;
                Ok(false)
            }
        }
    }

    /// Keystroke in the phone input
    pub fn phone_input(&mut self) -> Result<String, FormError> {
        let phone = self.phone();
        let raw = self.value(&phone);
        let normalized = normalize_phone(&raw);
        if normalized != raw {
            self.form.set_value(&phone, &normalized)?;
        }
        Ok(normalized)
    }

    /// Phone input lost focus
    pub fn phone_blur(&mut self) -> Result<PhoneCheck, FormError> {
        let phone = self.phone();
        let check = check_phone(&self.value(&phone));
        let result = match check {
            PhoneCheck::Invalid => ValidationResult::invalid(phone, messages::PHONE_INVALID_DETAIL),
            PhoneCheck::Valid => ValidationResult::valid(phone),
            PhoneCheck::Empty => ValidationResult::neutral(phone),
        };
        self.show_result(&result)?;
        if !result.is_valid() {
            self.notify(messages::PHONE_INVALID, Severity::Error);
        }
        Ok(check)
    }

    /// File picked; rejected files are cleared from the input
    pub fn file_selected(&mut self, field: &FieldRef) -> Result<Option<FileCheck>, FormError> {
        let Some(file) = self.form.selected_file(field) else {
            return Ok(None);
        };

        let check = check_file(&file, &self.config.upload);
        match &check {
            FileCheck::Accepted => {
                info!(name = %file.name, size = %format_bytes(file.size), "File accepted");
                self.notify(messages::file_selected(&file.name), Severity::Success);
            }
            FileCheck::TooLarge { size, max } => {
                warn!(
                    name = %file.name,
                    size = %format_bytes(*size),
                    max = %format_bytes(*max),
                    "File too large"
                );
                self.form.clear_file(field)?;
                self.notify(messages::file_too_large(*max), Severity::Error);
            }
            FileCheck::UnsupportedType { mime } => {
                warn!(name = %file.name, %mime, "Unsupported file type");
                self.form.clear_file(field)?;
                self.notify(messages::FILE_TYPE_UNSUPPORTED, Severity::Error);
            }
        }
        Ok(Some(check))
    }

    /// Required input lost focus
    pub fn validate_required(&mut self, field: &FieldRef) -> Result<ValidationResult, FormError> {
        let result = if self.value(field).trim().is_empty() {
            ValidationResult::missing(field.clone())
        } else {
            ValidationResult::valid(field.clone())
        };
        self.show_result(&result)?;
        Ok(result)
    }

    /// Intercepted submit: validate everything, then submit after a delay
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.state == SubmitState::Submitting {
            debug!("Submit ignored, submission already pending");
            return SubmitOutcome::AlreadySubmitting;
        }

        self.state = SubmitState::Validating;
        match self.run_checks() {
            Ok(invalid) if invalid.is_empty() => {
                self.begin_submission();
                SubmitOutcome::Scheduled
            }
            Ok(invalid) => {
                warn!(count = invalid.len(), "Submission blocked by invalid fields");
                self.notify(messages::FORM_INCOMPLETE, Severity::Error);
                self.state = SubmitState::Idle;
                SubmitOutcome::Rejected { invalid }
            }
            Err(e) => {
                error!(error = %e, "Validation failed");
                self.notify(messages::FORM_INCOMPLETE, Severity::Error);
                self.state = SubmitState::Idle;
                SubmitOutcome::Rejected {
                    invalid: Vec::new(),
                }
            }
        }
    }

    /// Write the current form to storage immediately
    pub fn save_now(&mut self) -> Result<(), FormError> {
        let json = Snapshot::capture(&self.form).to_json()?;
        self.store.save(&self.config.autosave.storage_key, &json)?;
        debug!(bytes = json.len(), "Form snapshot saved");
        Ok(())
    }

    /// Fill the form from the stored snapshot, returning inputs written
    ///
    /// A malformed snapshot is logged and ignored.
    pub fn restore(&mut self) -> Result<usize, FormError> {
        let Some(json) = self.store.load(&self.config.autosave.storage_key)? else {
            return Ok(0);
        };

        let snapshot = match Snapshot::from_json(&json) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!(error = %e, "Error loading form data");
                return Ok(0);
            }
        };

        let written = snapshot.apply(&mut self.form)?;
        info!(written, keys = snapshot.len(), "Form restored from snapshot");
        Ok(written)
    }

    pub fn clear_saved_data(&mut self) -> Result<(), FormError> {
        if let Some(id) = self.autosave_timer.take() {
            self.scheduler.cancel(id);
        }
        self.store.remove(&self.config.autosave.storage_key)
    }

    /// Cancel every pending timer and drop all toasts
    pub fn teardown(&mut self) {
        if let Some(id) = self.autosave_timer.take() {
            self.scheduler.cancel(id);
        }
        if let Some(id) = self.submit_timer.take() {
            self.scheduler.cancel(id);
        }
        self.notifications.clear(&mut self.scheduler);
    }

    fn on_input(&mut self, field: &FieldRef) -> Result<(), FormError> {
        if field.name == self.config.fields.phone {
            self.phone_input()?;
        }

        if self.form.validity(field) == Validity::Invalid && self.is_required(field) {
            self.form.set_validity(field, Validity::Neutral)?;
        }

        if self.config.autosave.enabled {
            self.schedule_autosave();
        }
        Ok(())
    }

    fn on_change(&mut self, field: &FieldRef) -> Result<(), FormError> {
        let names = &self.config.fields;
        let (is_arrival, is_departure, is_file) = (
            field.name == names.arrival,
            field.name == names.departure,
            field.name == names.file,
        );

        if is_arrival {
            self.arrival_changed()
        } else if is_departure {
            self.validate_dates().map(|_| ())
        } else if is_file {
            self.file_selected(field).map(|_| ())
        } else {
            Ok(())
        }
    }

    fn on_blur(&mut self, field: &FieldRef) -> Result<(), FormError> {
        if field.name == self.config.fields.phone {
            self.phone_blur().map(|_| ())
        } else if self.is_required(field) {
            self.validate_required(field).map(|_| ())
        } else {
            Ok(())
        }
    }

    fn run_checks(&mut self) -> Result<Vec<FieldRef>, FormError> {
        let mut invalid = Vec::new();

        for field in self.form.required_fields() {
            if self.value(&field).trim().is_empty() {
                self.form.set_validity(&field, Validity::Invalid)?;
                invalid.push(field);
            }
        }

        if !self.validate_dates()? {
            let departure = self.departure();
            self.form.set_validity(&departure, Validity::Invalid)?;
            if !invalid.contains(&departure) {
                invalid.push(departure);
            }
        }

        let phone = self.phone();
        if !is_valid_phone(&self.value(&phone)) {
            self.form.set_validity(&phone, Validity::Invalid)?;
            if !invalid.contains(&phone) {
                invalid.push(phone);
            }
        }

        Ok(invalid)
    }

    fn begin_submission(&mut self) {
        if let Err(e) = self.form.show_busy(messages::SUBMITTING) {
            warn!(error = %e, "Busy indicator unavailable");
        }
        self.state = SubmitState::Submitting;
        let delay = self.config.timing.submit_delay();
        self.submit_timer = Some(self.scheduler.schedule(delay, TimerTask::Submit));
        info!(delay_ms = delay.as_millis() as u64, "Submission scheduled");
    }

    /// Validity class plus native constraint message
    fn show_result(&mut self, result: &ValidationResult) -> Result<(), FormError> {
        let message = result.message.as_deref().unwrap_or("");
        self.form.set_custom_validity(&result.field, message)?;
        self.form.set_validity(&result.field, result.validity)
    }

    fn schedule_autosave(&mut self) {
        if let Some(id) = self.autosave_timer.take() {
            self.scheduler.cancel(id);
        }
        let delay = self.config.timing.autosave_debounce();
        self.autosave_timer = Some(self.scheduler.schedule(delay, TimerTask::Autosave));
    }

    fn is_required(&self, field: &FieldRef) -> bool {
        self.form.required_fields().contains(field)
    }

    fn value(&self, field: &FieldRef) -> String {
        self.form.value(field).unwrap_or_default()
    }

    fn arrival(&self) -> FieldRef {
        FieldRef::first(self.config.fields.arrival.as_str())
    }

    fn departure(&self) -> FieldRef {
        FieldRef::first(self.config.fields.departure.as_str())
    }

    fn phone(&self) -> FieldRef {
        FieldRef::first(self.config.fields.phone.as_str())
    }
}

impl<F, R, P> FormController<F, ManualScheduler, R, P>
where
    F: FormSurface,
    R: ToastRenderer,
    P: SnapshotStore,
{
    /// Move simulated time forward, firing every task that falls due
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now() + by;
        while let Some(task) = self.scheduler.pop_due(until) {
            self.fire(task);
        }
        self.scheduler.settle(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autosave::MemoryStore;
    use crate::model::FileMeta;
    use crate::notify::MemoryToasts;
    use crate::surface::MemoryForm;
    use pretty_assertions::assert_eq;

    type TestController = FormController<MemoryForm, ManualScheduler, MemoryToasts, MemoryStore>;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn controller() -> TestController {
        let mut ctl = FormController::new(
            FormConfig::default(),
            MemoryForm::hospitality(),
            ManualScheduler::new(),
            MemoryToasts::new(),
            MemoryStore::new(),
            today(),
        );
        ctl.initialize().unwrap();
        ctl
    }

    fn set(ctl: &mut TestController, name: &str, value: &str) {
        ctl.form_mut().set_value(&FieldRef::first(name), value).unwrap();
    }

    fn fill_valid(ctl: &mut TestController) {
        set(ctl, "owner", "Mona");
        set(ctl, "membership", "M-42");
        set(ctl, "fromDate", "2026-11-01");
        set(ctl, "toDate", "2026-11-05");
        set(ctl, "telegram", "01012345678");
    }

    #[test]
    fn test_initialize_sets_date_minimums() {
        let ctl = controller();
        assert_eq!(ctl.form().min(&FieldRef::first("fromDate")).as_deref(), Some("2026-10-19"));
        assert_eq!(ctl.form().min(&FieldRef::first("toDate")).as_deref(), Some("2026-10-19"));
    }

    #[test]
    fn test_arrival_change_tracks_departure_min() {
        let mut ctl = controller();
        set(&mut ctl, "fromDate", "2026-11-03");
        ctl.handle(FormEvent::Change(FieldRef::first("fromDate")));
        assert_eq!(ctl.form().min(&FieldRef::first("toDate")).as_deref(), Some("2026-11-03"));
    }

    #[test]
    fn test_arrival_change_clears_earlier_departure() {
        let mut ctl = controller();
        set(&mut ctl, "toDate", "2026-11-02");
        set(&mut ctl, "fromDate", "2026-11-03");
        ctl.handle(FormEvent::Change(FieldRef::first("fromDate")));
        assert_eq!(ctl.form().value(&FieldRef::first("toDate")).as_deref(), Some(""));
        assert_eq!(
            ctl.notifications().renderer().messages(),
            vec![messages::DEPARTURE_BEFORE_ARRIVAL]
        );
    }

    #[test]
    fn test_departure_change_rejects_long_stay() {
        let mut ctl = controller();
        set(&mut ctl, "fromDate", "2026-11-01");
        set(&mut ctl, "toDate", "2026-12-15");
        assert!(!ctl.validate_dates().unwrap());
        // long stays are flagged, not cleared
        assert_eq!(ctl.form().value(&FieldRef::first("toDate")).as_deref(), Some("2026-12-15"));
        let shown = ctl.notifications().renderer().shown();
        assert_eq!(shown[0].severity, Severity::Warning);
    }

    #[test]
    fn test_phone_input_normalizes_in_place() {
        let mut ctl = controller();
        set(&mut ctl, "telegram", "1 012-345");
        ctl.handle(FormEvent::Input(FieldRef::first("telegram")));
        assert_eq!(ctl.form().value(&FieldRef::first("telegram")).as_deref(), Some("01012345"));
    }

    #[test]
    fn test_phone_blur_states() {
        let mut ctl = controller();
        let phone = FieldRef::first("telegram");

        ctl.handle(FormEvent::Blur(phone.clone()));
        assert_eq!(ctl.form().validity(&phone), Validity::Neutral);
        assert!(ctl.notifications().renderer().shown().is_empty());

        set(&mut ctl, "telegram", "0101");
        ctl.handle(FormEvent::Blur(phone.clone()));
        assert_eq!(ctl.form().validity(&phone), Validity::Invalid);
        assert_eq!(
            ctl.form().custom_validity(&phone).as_deref(),
            Some(messages::PHONE_INVALID_DETAIL)
        );
        assert_eq!(ctl.notifications().renderer().messages(), vec![messages::PHONE_INVALID]);

        set(&mut ctl, "telegram", "0101234567");
        ctl.handle(FormEvent::Blur(phone.clone()));
        assert_eq!(ctl.form().validity(&phone), Validity::Valid);
        assert_eq!(ctl.form().custom_validity(&phone).as_deref(), Some(""));
    }

    #[test]
    fn test_required_blur_and_input_clear() {
        let mut ctl = controller();
        let owner = FieldRef::first("owner");
        set(&mut ctl, "owner", "   ");
        ctl.handle(FormEvent::Blur(owner.clone()));
        assert_eq!(ctl.form().validity(&owner), Validity::Invalid);

        set(&mut ctl, "owner", "M");
        ctl.handle(FormEvent::Input(owner.clone()));
        assert_eq!(ctl.form().validity(&owner), Validity::Neutral);

        let result = ctl.validate_required(&owner).unwrap();
        assert!(result.is_valid());
        assert_eq!(ctl.form().validity(&owner), Validity::Valid);
    }

    #[test]
    fn test_optional_blur_leaves_field_alone() {
        let mut ctl = controller();
        let notes = FieldRef::first("notes");
        ctl.handle(FormEvent::Blur(notes.clone()));
        assert_eq!(ctl.form().validity(&notes), Validity::Neutral);
    }

    #[test]
    fn test_file_rejections_clear_input() {
        let mut ctl = controller();
        let file = FieldRef::first("file");
        ctl.form_mut()
            .select_file(&file, FileMeta::new("big.pdf", 10 * 1024 * 1024 + 1, "application/pdf"))
            .unwrap();
        ctl.handle(FormEvent::Change(file.clone()));
        assert_eq!(ctl.form().selected_file(&file), None);
        assert_eq!(
            ctl.notifications().renderer().shown()[0].severity,
            Severity::Error
        );
    }

    #[test]
    fn test_file_accepted_names_file() {
        let mut ctl = controller();
        let file = FieldRef::first("file");
        let meta = FileMeta::new("passport.png", 2048, "image/png");
        ctl.form_mut().select_file(&file, meta.clone()).unwrap();
        let check = ctl.file_selected(&file).unwrap();
        assert_eq!(check, Some(FileCheck::Accepted));
        assert_eq!(ctl.form().selected_file(&file), Some(meta));
        assert_eq!(
            ctl.notifications().renderer().messages(),
            vec!["تم اختيار الملف: passport.png"]
        );
    }

    #[test]
    fn test_no_file_selected_is_a_no_op() {
        let mut ctl = controller();
        assert_eq!(ctl.file_selected(&FieldRef::first("file")).unwrap(), None);
        assert!(ctl.notifications().renderer().history().is_empty());
    }

    #[test]
    fn test_empty_submit_marks_all_required_fields() {
        let mut ctl = controller();
        let outcome = ctl.submit();

        let required = ctl.form().required_fields();
        for field in &required {
            assert_eq!(ctl.form().validity(field), Validity::Invalid, "{}", field);
        }
        assert_eq!(outcome, SubmitOutcome::Rejected { invalid: required });
        assert_eq!(ctl.state(), SubmitState::Idle);

        ctl.advance(Duration::from_secs(10));
        assert_eq!(ctl.form().submissions(), 0);
    }

    #[test]
    fn test_valid_submit_waits_for_delay() {
        let mut ctl = controller();
        fill_valid(&mut ctl);

        assert_eq!(ctl.submit(), SubmitOutcome::Scheduled);
        assert_eq!(ctl.state(), SubmitState::Submitting);
        assert_eq!(ctl.form().busy_label(), Some(messages::SUBMITTING));

        ctl.advance(Duration::from_millis(499));
        assert_eq!(ctl.form().submissions(), 0);
        ctl.advance(Duration::from_millis(1));
        assert_eq!(ctl.form().submissions(), 1);
    }

    #[test]
    fn test_submit_without_submit_control_still_goes_through() {
        let mut ctl = FormController::new(
            FormConfig::default(),
            MemoryForm::hospitality().without_submit_control(),
            ManualScheduler::new(),
            MemoryToasts::new(),
            MemoryStore::new(),
            today(),
        );
        ctl.initialize().unwrap();
        fill_valid(&mut ctl);

        assert_eq!(ctl.submit(), SubmitOutcome::Scheduled);
        assert_eq!(ctl.state(), SubmitState::Submitting);
        assert_eq!(ctl.form().busy_label(), None);
        assert!(ctl.notifications().renderer().history().is_empty());

        ctl.advance(Duration::from_millis(500));
        assert_eq!(ctl.form().submissions(), 1);
    }

    #[test]
    fn test_double_submit_is_ignored() {
        let mut ctl = controller();
        fill_valid(&mut ctl);

        assert!(ctl.submit().is_scheduled());
        ctl.advance(Duration::from_millis(200));
        assert_eq!(ctl.submit(), SubmitOutcome::AlreadySubmitting);

        ctl.advance(Duration::from_secs(2));
        assert_eq!(ctl.form().submissions(), 1);
    }

    #[test]
    fn test_teardown_cancels_pending_submission() {
        let mut ctl = controller();
        fill_valid(&mut ctl);
        ctl.submit();
        ctl.teardown();
        ctl.advance(Duration::from_secs(2));
        assert_eq!(ctl.form().submissions(), 0);
        assert_eq!(ctl.scheduler().pending_count(), 0);
    }

    #[test]
    fn test_submit_with_bad_phone_only() {
        let mut ctl = controller();
        fill_valid(&mut ctl);
        set(&mut ctl, "telegram", "0201234567");

        let outcome = ctl.submit();
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                invalid: vec![FieldRef::first("telegram")]
            }
        );
        assert_eq!(
            ctl.notifications().renderer().messages(),
            vec![messages::FORM_INCOMPLETE]
        );
    }

    #[test]
    fn test_submit_with_same_day_departure() {
        let mut ctl = controller();
        fill_valid(&mut ctl);
        set(&mut ctl, "toDate", "2026-11-01");

        let outcome = ctl.submit();
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                invalid: vec![FieldRef::first("toDate")]
            }
        );
        assert_eq!(ctl.form().value(&FieldRef::first("toDate")).as_deref(), Some(""));
        assert_eq!(
            ctl.notifications().renderer().messages(),
            vec![messages::DEPARTURE_BEFORE_ARRIVAL, messages::FORM_INCOMPLETE]
        );
    }

    #[test]
    fn test_rows_via_events() {
        let mut ctl = controller();
        ctl.handle(FormEvent::AddRow(GroupKind::Guest));
        ctl.handle(FormEvent::AddRow(GroupKind::Guest));
        assert_eq!(ctl.form().count("guest"), 3);
        ctl.handle(FormEvent::RemoveRow(GroupKind::Guest, 0));
        assert_eq!(ctl.form().count("guest"), 2);
        assert_eq!(ctl.remove_row(GroupKind::Booking, 0).unwrap(), RowRemoval::Cleared);
    }

    #[test]
    fn test_dismiss_toast_event() {
        let mut ctl = controller();
        let id = ctl.notify("hi", Severity::Info);
        ctl.handle(FormEvent::DismissToast(id));
        assert!(ctl.notifications().renderer().shown().is_empty());
        assert_eq!(ctl.scheduler().pending_count(), 0);
    }

    #[test]
    fn test_input_does_not_autosave_when_disabled() {
        let mut ctl = controller();
        set(&mut ctl, "owner", "Mona");
        ctl.handle(FormEvent::Input(FieldRef::first("owner")));
        ctl.advance(Duration::from_secs(5));
        assert_eq!(ctl.store().writes(), 0);
    }
}
