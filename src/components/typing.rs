//! Typing animation driver for the hero headline.
//!
//! Each tick renders one [`TypingFrame`] into the target element and
//! schedules the next tick. The pending timer handle is kept so
//! [`TypingAnimator::stop`] can cancel it on page unload.

#[cfg(test)]
#[path = "typing_test.rs"]
mod typing_test;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::{SetupError, require_id};
use crate::config::TypingConfig;
use crate::dom::Dom;
use crate::state::typing::{TypingCursor, TypingFrame, TypingTimings};
use crate::util::scheduler::Scheduler;

struct Inner<D: Dom, S: Scheduler> {
    dom: D,
    scheduler: S,
    target: D::Element,
    phrases: Vec<String>,
    timings: TypingTimings,
    cursor: Cell<TypingCursor>,
    pending: RefCell<Option<S::Handle>>,
    stopped: Cell<bool>,
}

pub struct TypingAnimator<D: Dom, S: Scheduler> {
    inner: Rc<Inner<D, S>>,
}

impl<D: Dom, S: Scheduler> Clone for TypingAnimator<D, S> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<D: Dom, S: Scheduler> TypingAnimator<D, S> {
    /// Find the target element and build a stopped animator.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::MissingElement`] if the target id is absent.
    pub fn new(dom: &D, scheduler: &S, config: &TypingConfig) -> Result<Self, SetupError> {
        let target = require_id(dom, &config.target_id)?;
        Ok(Self {
            inner: Rc::new(Inner {
                dom: dom.clone(),
                scheduler: scheduler.clone(),
                target,
                phrases: config.phrases.clone(),
                timings: TypingTimings::from(config),
                cursor: Cell::new(TypingCursor::default()),
                pending: RefCell::new(None),
                stopped: Cell::new(true),
            }),
        })
    }

    /// Render the first frame now and keep ticking until stopped.
    pub fn start(&self) {
        if !self.inner.stopped.replace(false) {
            return;
        }
        step(&self.inner);
    }

    /// Cancel the pending tick. The displayed text is left as is.
    pub fn stop(&self) {
        self.inner.stopped.set(true);
        if let Some(handle) = self.inner.pending.borrow_mut().take() {
            self.inner.scheduler.cancel(handle);
            log::debug!("typing animation stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        !self.inner.stopped.get()
    }

    pub fn cursor(&self) -> TypingCursor {
        self.inner.cursor.get()
    }
}

fn step<D: Dom, S: Scheduler>(inner: &Rc<Inner<D, S>>) {
    if inner.stopped.get() {
        return;
    }
    let (next, TypingFrame { text, next_delay_ms }) = inner.cursor.get().tick(&inner.phrases, inner.timings);
    inner.cursor.set(next);
    inner.dom.set_text(&inner.target, &text);

    let weak: Weak<Inner<D, S>> = Rc::downgrade(inner);
    let handle = inner.scheduler.schedule(
        next_delay_ms,
        Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                step(&inner);
            }
        }),
    );
    *inner.pending.borrow_mut() = Some(handle);
}
