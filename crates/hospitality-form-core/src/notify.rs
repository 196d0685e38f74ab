//! Transient toast notifications
//!
//! Each toast lives for the configured lifetime, then plays an exit
//! animation and is removed. Toasts stack independently and are never
//! deduplicated.

use crate::config::TimingConfig;
use crate::error::FormError;
use crate::model::Severity;
use crate::scheduler::{Scheduler, TimerId, TimerTask};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ToastId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
}

/// Port onto whatever draws the banners
pub trait ToastRenderer {
    /// Show a banner with its enter animation
    fn mount(&mut self, toast: &Toast) -> Result<(), FormError>;

    /// Start the exit animation
    fn begin_exit(&mut self, id: ToastId) -> Result<(), FormError>;

    fn unmount(&mut self, id: ToastId) -> Result<(), FormError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Shown,
    Leaving,
}

#[derive(Debug)]
struct Active {
    toast: Toast,
    phase: Phase,
    timer: TimerId,
}

/// Tracks live toasts and their timers
#[derive(Debug)]
pub struct Notifications<R> {
    renderer: R,
    timing: TimingConfig,
    next_id: u64,
    active: Vec<Active>,
}

impl<R: ToastRenderer> Notifications<R> {
    pub fn new(renderer: R, timing: TimingConfig) -> Self {
        Self {
            renderer,
            timing,
            next_id: 0,
            active: Vec::new(),
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Toasts currently on screen, oldest first
    pub fn active(&self) -> impl Iterator<Item = &Toast> {
        self.active.iter().map(|a| &a.toast)
    }

    pub fn notify<S: Scheduler>(
        &mut self,
        scheduler: &mut S,
        message: impl Into<String>,
        severity: Severity,
    ) -> ToastId {
        self.next_id += 1;
        let toast = Toast {
            id: ToastId(self.next_id),
            message: message.into(),
            severity,
        };

        if let Err(e) = self.renderer.mount(&toast) {
            tracing::error!(error = %e, "Failed to mount toast");
        }

        let timer = scheduler.schedule(self.timing.toast_lifetime(), TimerTask::ToastExpire(toast.id));
        let id = toast.id;
        self.active.push(Active {
            toast,
            phase: Phase::Shown,
            timer,
        });
        id
    }

    /// Lifetime over: animate out, then remove
    pub fn expire<S: Scheduler>(&mut self, scheduler: &mut S, id: ToastId) {
        let Some(active) = self
            .active
            .iter_mut()
            .find(|a| a.toast.id == id && a.phase == Phase::Shown)
        else {
            // dismissed by hand before the timer fired
            return;
        };

        if let Err(e) = self.renderer.begin_exit(id) {
            tracing::warn!(error = %e, toast = id.0, "Failed to animate toast out");
        }
        active.phase = Phase::Leaving;
        active.timer = scheduler.schedule(self.timing.toast_exit(), TimerTask::ToastRemove(id));
    }

    /// Exit animation finished
    pub fn remove(&mut self, id: ToastId) {
        if let Some(pos) = self.active.iter().position(|a| a.toast.id == id) {
            self.active.remove(pos);
            if let Err(e) = self.renderer.unmount(id) {
                tracing::warn!(error = %e, toast = id.0, "Failed to remove toast");
            }
        }
    }

    /// Close button clicked
    pub fn dismiss<S: Scheduler>(&mut self, scheduler: &mut S, id: ToastId) {
        let timer = self
            .active
            .iter()
            .find(|a| a.toast.id == id)
            .map(|a| a.timer);
        if let Some(timer) = timer {
            scheduler.cancel(timer);
            self.remove(id);
        }
    }

    /// Drop every toast and its timer
    pub fn clear<S: Scheduler>(&mut self, scheduler: &mut S) {
        let ids: Vec<_> = self.active.iter().map(|a| a.toast.id).collect();
        for id in ids {
            self.dismiss(scheduler, id);
        }
    }
}

/// Renderer that records what is on screen
#[derive(Debug, Default, Clone)]
pub struct MemoryToasts {
    shown: Vec<Toast>,
    leaving: Vec<ToastId>,
    history: Vec<Toast>,
}

impl MemoryToasts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Banners currently mounted
    pub fn shown(&self) -> &[Toast] {
        &self.shown
    }

    /// Every banner ever mounted
    pub fn history(&self) -> &[Toast] {
        &self.history
    }

    pub fn is_leaving(&self, id: ToastId) -> bool {
        self.leaving.contains(&id)
    }

    pub fn messages(&self) -> Vec<&str> {
        self.history.iter().map(|t| t.message.as_str()).collect()
    }
}

impl ToastRenderer for MemoryToasts {
    fn mount(&mut self, toast: &Toast) -> Result<(), FormError> {
        self.shown.push(toast.clone());
        self.history.push(toast.clone());
        Ok(())
    }

    fn begin_exit(&mut self, id: ToastId) -> Result<(), FormError> {
        self.leaving.push(id);
        Ok(())
    }

    fn unmount(&mut self, id: ToastId) -> Result<(), FormError> {
        self.shown.retain(|t| t.id != id);
        self.leaving.retain(|l| *l != id);
        Ok(())
    }
}
