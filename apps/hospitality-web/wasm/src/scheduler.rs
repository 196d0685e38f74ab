//! `setTimeout`-backed [`Scheduler`]

use crate::dispatch::Dispatcher;
use hospitality_form_core::{Scheduler, TimerId, TimerTask};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

struct PendingTimer {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

pub struct BrowserScheduler {
    window: Window,
    dispatcher: Dispatcher,
    next_id: u64,
    pending: HashMap<TimerId, PendingTimer>,
    /// Timers whose callback has returned; their closures are freed on the
    /// next schedule or cancel, never from inside the callback
    fired: Rc<RefCell<Vec<TimerId>>>,
}

impl BrowserScheduler {
    pub fn new(window: Window, dispatcher: Dispatcher) -> Self {
        Self {
            window,
            dispatcher,
            next_id: 0,
            pending: HashMap::new(),
            fired: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Timers still waiting to fire
    pub fn pending_count(&self) -> usize {
        let fired = self.fired.borrow();
        self.pending.keys().filter(|id| !fired.contains(id)).count()
    }

    fn purge_fired(&mut self) {
        let fired: Vec<TimerId> = self.fired.borrow_mut().drain(..).collect();
        for id in fired {
            self.pending.remove(&id);
        }
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule(&mut self, delay: Duration, task: TimerTask) -> TimerId {
        self.purge_fired();
        self.next_id += 1;
        let id = TimerId(self.next_id);

        let dispatcher = self.dispatcher.clone();
        let fired = Rc::clone(&self.fired);
        let callback = Closure::<dyn FnMut()>::new(move || {
            dispatcher.fire(task);
            fired.borrow_mut().push(id);
        });

        let delay_ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.as_ref().unchecked_ref(), delay_ms)
        {
            Ok(handle) => {
                self.pending.insert(
                    id,
                    PendingTimer {
                        handle,
                        _callback: callback,
                    },
                );
            }
            Err(e) => tracing::error!(?e, ?task, "setTimeout failed"),
        }
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.purge_fired();
        if let Some(timer) = self.pending.remove(&id) {
            self.window.clear_timeout_with_handle(timer.handle);
        }
    }
}

impl Drop for BrowserScheduler {
    fn drop(&mut self) {
        for timer in self.pending.values() {
            self.window.clear_timeout_with_handle(timer.handle);
        }
    }
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn scheduler() -> BrowserScheduler {
        BrowserScheduler::new(web_sys::window().unwrap(), Dispatcher::new())
    }

    #[wasm_bindgen_test]
    fn test_schedule_and_cancel() {
        let mut sched = scheduler();
        let a = sched.schedule(Duration::from_secs(60), TimerTask::Autosave);
        let b = sched.schedule(Duration::from_secs(60), TimerTask::Submit);
        assert_ne!(a, b);
        assert_eq!(sched.pending_count(), 2);

        sched.cancel(a);
        assert_eq!(sched.pending_count(), 1);
        // already gone
        sched.cancel(a);
        assert_eq!(sched.pending_count(), 1);
    }
}
