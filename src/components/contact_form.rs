//! Async contact form submission with a transient status line.

#[cfg(test)]
#[path = "contact_form_test.rs"]
mod contact_form_test;

use std::cell::RefCell;
use std::rc::Rc;

use super::{SetupError, require_id};
use crate::config::ContactConfig;
use crate::dom::Dom;
use crate::net::contact::{ContactSubmission, ContactTransport, deliver};
use crate::util::scheduler::Scheduler;

/// Result shown to the visitor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Failed,
}

pub struct ContactForm<D: Dom, S: Scheduler, T: ContactTransport> {
    dom: D,
    scheduler: S,
    transport: Rc<T>,
    config: Rc<ContactConfig>,
    form: D::Element,
    status: D::Element,
    /// Status clear timer from the previous submission.
    pending_clear: Rc<RefCell<Option<S::Handle>>>,
}

impl<D: Dom, S: Scheduler, T: ContactTransport> Clone for ContactForm<D, S, T> {
    fn clone(&self) -> Self {
        Self {
            dom: self.dom.clone(),
            scheduler: self.scheduler.clone(),
            transport: Rc::clone(&self.transport),
            config: Rc::clone(&self.config),
            form: self.form.clone(),
            status: self.status.clone(),
            pending_clear: Rc::clone(&self.pending_clear),
        }
    }
}

impl<D: Dom, S: Scheduler, T: ContactTransport> ContactForm<D, S, T> {
    /// Intercept submissions of the contact form.
    ///
    /// Returns `Ok(None)` when the page has no contact form.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::MissingElement`] if the form exists but its
    /// status region does not.
    pub fn install(dom: &D, scheduler: &S, transport: T, config: &ContactConfig) -> Result<Option<Self>, SetupError> {
        let Some(form) = dom.by_id(&config.form_id) else {
            log::debug!("no #{} on this page; contact handler skipped", config.form_id);
            return Ok(None);
        };
        let status = require_id(dom, &config.status_id)?;
        let this = Self {
            dom: dom.clone(),
            scheduler: scheduler.clone(),
            transport: Rc::new(transport),
            config: Rc::new(config.clone()),
            form,
            status,
            pending_clear: Rc::new(RefCell::new(None)),
        };

        let handler = this.clone();
        dom.intercept(
            &this.form,
            "submit",
            Box::new(move || {
                let form = handler.clone();
                handler.scheduler.spawn(Box::pin(async move {
                    form.submit().await;
                }));
            }),
        );
        Ok(Some(this))
    }

    /// Send the current field values once and report the outcome.
    ///
    /// The status line is cleared after `status_clear_ms` either way. A clear
    /// still pending from an earlier submission is cancelled first so it
    /// cannot wipe this one's status.
    pub async fn submit(&self) -> SubmitOutcome {
        let stale = self.pending_clear.borrow_mut().take();
        if let Some(handle) = stale {
            self.scheduler.cancel(handle);
        }
        clear_status(&self.dom, &self.status, &self.config.error_class);
        self.dom.set_text(&self.status, &self.config.sending_message);
        let submission =
            ContactSubmission { action: self.dom.form_action(&self.form), fields: self.dom.form_fields(&self.form) };

        let outcome = match deliver(self.transport.as_ref(), &submission).await {
            Ok(()) => {
                self.dom.set_text(&self.status, &self.config.success_message);
                self.dom.reset_form(&self.form);
                SubmitOutcome::Sent
            }
            Err(err) => {
                log::warn!("contact submission failed: {err}");
                self.dom.set_text(&self.status, &self.config.failure_message);
                self.dom.add_class(&self.status, &self.config.error_class);
                SubmitOutcome::Failed
            }
        };

        let dom = self.dom.clone();
        let status = self.status.clone();
        let config = Rc::clone(&self.config);
        let handle = self.scheduler.schedule(
            self.config.status_clear_ms,
            Box::new(move || clear_status(&dom, &status, &config.error_class)),
        );
        if let Some(previous) = self.pending_clear.borrow_mut().replace(handle) {
            self.scheduler.cancel(previous);
        }
        outcome
    }
}

/// Empty the status line and drop its error styling.
pub fn clear_status<D: Dom>(dom: &D, status: &D::Element, error_class: &str) {
    dom.set_text(status, "");
    dom.remove_class(status, error_class);
}
