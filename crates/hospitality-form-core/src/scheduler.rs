//! Timer abstraction
//!
//! The controller never owns a clock. It asks a [`Scheduler`] to deliver a
//! [`TimerTask`] after a delay, and the host hands due tasks back through
//! `FormController::fire`. In the browser that is `setTimeout`; in tests it is
//! [`ManualScheduler`], which only moves when told to.

use crate::notify::ToastId;
use std::time::Duration;

/// Handle for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Work the controller defers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Debounced snapshot write
    Autosave,
    /// Delayed native form submission
    Submit,
    /// Toast lifetime ended; start exit animation
    ToastExpire(ToastId),
    /// Exit animation finished; drop the banner
    ToastRemove(ToastId),
}

pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, task: TimerTask) -> TimerId;

    /// Cancelling an id that already fired is a no-op
    fn cancel(&mut self, id: TimerId);
}

#[derive(Debug, Clone)]
struct Pending {
    id: TimerId,
    due: Duration,
    task: TimerTask,
}

/// Deterministic scheduler driven by explicit time advances
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether a task of this kind is waiting
    pub fn is_pending(&self, task: TimerTask) -> bool {
        self.pending.iter().any(|p| p.task == task)
    }

    /// Pop the earliest task due at or before `until`, moving the clock to it
    ///
    /// Ties fire in scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerTask> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.id))
            .map(|(i, _)| i)?;
        let pending = self.pending.remove(idx);
        self.now = pending.due;
        Some(pending.task)
    }

    /// Move the clock to `until` without firing anything
    pub fn settle(&mut self, until: Duration) {
        if until > self.now {
            self.now = until;
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, task: TimerTask) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.push(Pending {
            id,
            due: self.now + delay,
            task,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.retain(|p| p.id != id);
    }
}
