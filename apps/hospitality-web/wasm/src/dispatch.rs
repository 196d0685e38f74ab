//! Routes browser callbacks back into the page's controller
//!
//! Timers and toast close buttons are created by the controller's own
//! collaborators, before the controller exists behind its `Rc`. They hold a
//! [`Dispatcher`], which is bound to the controller once it is built.
//!
//! Some DOM calls raise events synchronously: `focus()` on a new row fires
//! `focusout` on the previous input while the controller is still borrowed.
//! Such callbacks are queued and run as soon as the borrow ends.

use crate::dom::DomForm;
use crate::scheduler::BrowserScheduler;
use crate::storage::LocalStorageStore;
use crate::toast::DomToastRenderer;
use hospitality_form_core::{FormController, FormEvent, TimerTask};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

pub type WebController =
    FormController<DomForm, BrowserScheduler, DomToastRenderer, LocalStorageStore>;

/// A callback that arrived while the controller was busy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
    Event(FormEvent),
    Task(TimerTask),
}

impl Deferred {
    fn run(self, ctl: &mut WebController) {
        match self {
            Deferred::Event(event) => ctl.handle(event),
            Deferred::Task(task) => ctl.fire(task),
        }
    }
}

#[derive(Clone, Default)]
pub struct Dispatcher {
    target: Rc<RefCell<Weak<RefCell<WebController>>>>,
    pending: Rc<RefCell<VecDeque<Deferred>>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&self, controller: &Rc<RefCell<WebController>>) {
        *self.target.borrow_mut() = Rc::downgrade(controller);
    }

    pub fn event(&self, event: FormEvent) {
        self.dispatch(Deferred::Event(event));
    }

    pub fn fire(&self, task: TimerTask) {
        self.dispatch(Deferred::Task(task));
    }

    /// Callbacks waiting for the controller
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Run queued callbacks against a controller the caller already holds
    ///
    /// Anything queued by the callbacks themselves runs too, in order.
    pub fn drain(&self, ctl: &mut WebController) {
        loop {
            // the queue borrow ends before the callback can queue more
            let next = self.pending.borrow_mut().pop_front();
            match next {
                Some(deferred) => deferred.run(ctl),
                None => break,
            }
        }
    }

    fn dispatch(&self, deferred: Deferred) {
        let Some(controller) = self.target.borrow().upgrade() else {
            tracing::debug!("Callback after controller was dropped");
            return;
        };

        match controller.try_borrow_mut() {
            Ok(mut ctl) => {
                self.drain(&mut ctl);
                deferred.run(&mut ctl);
                self.drain(&mut ctl);
            }
            Err(_) => {
                tracing::debug!(?deferred, "Controller busy, callback queued");
                self.pending.borrow_mut().push_back(deferred);
            }
        };
    }
}
