//! Trailing-edge debounce.
//!
//! Every call replaces the pending timer, so a burst of calls produces a
//! single invocation `wait_ms` after the last one. Timers come from a
//! [`Scheduler`] whose handles cancel on drop, which is how
//! `gloo_timers::callback::Timeout` behaves.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

pub trait Scheduler {
    /// Dropping the handle cancels the task if it hasn't run yet.
    type Handle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// `setTimeout` through gloo-timers.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}

pub struct Debounced<S: Scheduler, A> {
    scheduler: S,
    wait_ms: u32,
    handler: Rc<RefCell<dyn FnMut(A)>>,
    pending: RefCell<Option<S::Handle>>,
}

impl<S: Scheduler, A: 'static> Debounced<S, A> {
    pub fn new<F>(scheduler: S, wait_ms: u32, handler: F) -> Self
    where
        F: FnMut(A) + 'static,
    {
        Self {
            scheduler,
            wait_ms,
            handler: Rc::new(RefCell::new(handler)),
            pending: RefCell::new(None),
        }
    }

    pub fn wait_ms(&self) -> u32 {
        self.wait_ms
    }

    /// Restarts the quiet period; `arg` is what the handler gets if no other
    /// call arrives before it expires.
    pub fn call(&self, arg: A) {
        let handler = self.handler.clone();
        let handle = self.scheduler.schedule(
            self.wait_ms,
            Box::new(move || (&mut *handler.borrow_mut())(arg)),
        );
        // Replacing drops, and so cancels, the previous timer.
        drop(self.pending.replace(Some(handle)));
    }

    /// Drops the pending invocation, if any.
    pub fn cancel(&self) {
        drop(self.pending.take());
    }
}

pub fn debounce<A: 'static, F>(wait_ms: u32, handler: F) -> Debounced<BrowserScheduler, A>
where
    F: FnMut(A) + 'static,
{
    Debounced::new(BrowserScheduler, wait_ms, handler)
}
