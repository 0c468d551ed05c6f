//! Timers and local task spawning.
//!
//! SYSTEM CONTEXT
//! ==============
//! Behaviors that reschedule themselves (typing) or clean up later (contact
//! status) take a [`Scheduler`] so they can run on `gloo-timers` in the
//! browser and on a virtual clock in native tests.

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Waker};

/// A `!Send` future run on the UI thread.
pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

pub trait Scheduler: Clone + 'static {
    /// Dropping or cancelling the handle stops the timer.
    type Handle: 'static;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
    fn cancel(&self, handle: Self::Handle);
    fn spawn(&self, task: LocalTask);
}

/// Browser scheduler backed by `setTimeout` and `spawn_local`.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooScheduler;

#[cfg(feature = "hydrate")]
impl Scheduler for GlooScheduler {
    type Handle = gloo_timers::callback::Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle {
        gloo_timers::callback::Timeout::new(delay_ms, task)
    }

    fn cancel(&self, handle: Self::Handle) {
        drop(handle);
    }

    fn spawn(&self, task: LocalTask) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

struct PendingTimer {
    id: u64,
    due_ms: u64,
    delay_ms: u32,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct ManualInner {
    now_ms: u64,
    next_id: u64,
    timers: Vec<PendingTimer>,
    tasks: Vec<LocalTask>,
}

/// Virtual-clock scheduler. Nothing runs until the caller advances it.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<ManualInner>>,
}

/// Handle returned by [`ManualScheduler::schedule`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ManualHandle(u64);

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Number of timers waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Fire the earliest timer, moving the clock to its due time.
    ///
    /// Returns the delay it was scheduled with.
    pub fn run_next(&self) -> Option<u32> {
        let timer = self.take_earliest(u64::MAX)?;
        self.inner.borrow_mut().now_ms = timer.due_ms;
        (timer.task)();
        Some(timer.delay_ms)
    }

    /// Move the clock forward by `ms`, firing every timer that falls due.
    pub fn advance(&self, ms: u64) {
        let target = self.now_ms() + ms;
        while let Some(timer) = self.take_earliest(target) {
            self.inner.borrow_mut().now_ms = timer.due_ms;
            (timer.task)();
        }
        self.inner.borrow_mut().now_ms = target;
    }

    /// Poll every spawned task once. Returns how many are still pending.
    pub fn poll_tasks(&self) -> usize {
        let tasks = std::mem::take(&mut self.inner.borrow_mut().tasks);
        let mut cx = Context::from_waker(Waker::noop());
        let mut still_pending = Vec::new();
        for mut task in tasks {
            if task.as_mut().poll(&mut cx).is_pending() {
                still_pending.push(task);
            }
        }
        let mut inner = self.inner.borrow_mut();
        let count = still_pending.len();
        inner.tasks.extend(still_pending);
        count
    }

    fn take_earliest(&self, limit_ms: u64) -> Option<PendingTimer> {
        let mut inner = self.inner.borrow_mut();
        let idx = inner
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= limit_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.id))
            .map(|(idx, _)| idx)?;
        Some(inner.timers.remove(idx))
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ManualHandle {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let due_ms = inner.now_ms + u64::from(delay_ms);
        inner.timers.push(PendingTimer { id, due_ms, delay_ms, task });
        ManualHandle(id)
    }

    fn cancel(&self, handle: ManualHandle) {
        self.inner.borrow_mut().timers.retain(|t| t.id != handle.0);
    }

    fn spawn(&self, task: LocalTask) {
        self.inner.borrow_mut().tasks.push(task);
    }
}
