use std::cell::RefCell;

use futures::executor::block_on;

use super::*;
use crate::config::{DEFAULT_FAILURE_MESSAGE, DEFAULT_SENDING_MESSAGE, DEFAULT_SUCCESS_MESSAGE};
use crate::dom::{MemoryDom, MemoryElement};
use crate::net::contact::ContactError;
use crate::util::scheduler::ManualScheduler;

#[derive(Default)]
struct StubTransport {
    reply: Option<Result<u16, ContactError>>,
    sent: Sent,
}

impl ContactTransport for StubTransport {
    async fn post(&self, submission: &ContactSubmission) -> Result<u16, ContactError> {
        self.sent.borrow_mut().push(submission.clone());
        self.reply.clone().unwrap_or(Ok(200))
    }
}

struct Page {
    dom: MemoryDom,
    form: MemoryElement,
    status: MemoryElement,
    scheduler: ManualScheduler,
}

fn page() -> Page {
    let dom = MemoryDom::new();
    let body = dom.body_element();
    let form = dom.append(&body, "form", Some("contactForm"), &[]);
    dom.set_attribute(&form, "action", "https://forms.example/f/xyz");
    dom.set_field(&form, "name", "Ada");
    dom.set_field(&form, "message", "Ciao!");
    let status = dom.append(&body, "p", Some("formStatus"), &[]);
    Page { dom, form, status, scheduler: ManualScheduler::new() }
}

type TestForm = ContactForm<MemoryDom, ManualScheduler, StubTransport>;
type Sent = Rc<RefCell<Vec<ContactSubmission>>>;

fn install(page: &Page, reply: Result<u16, ContactError>) -> (TestForm, Sent) {
    let transport = StubTransport { reply: Some(reply), ..StubTransport::default() };
    let sent = Rc::clone(&transport.sent);
    let form = ContactForm::install(&page.dom, &page.scheduler, transport, &ContactConfig::default())
        .unwrap()
        .unwrap();
    (form, sent)
}

// =============================================================
// Setup
// =============================================================

#[test]
fn page_without_form_is_skipped() {
    let dom = MemoryDom::new();
    let installed = ContactForm::install(&dom, &ManualScheduler::new(), StubTransport::default(), &ContactConfig::default());
    assert!(matches!(installed, Ok(None)));
    assert_eq!(dom.listener_count("submit"), 0);
}

#[test]
fn form_without_status_is_setup_error() {
    let dom = MemoryDom::new();
    dom.append(&dom.body_element(), "form", Some("contactForm"), &[]);
    let installed = ContactForm::install(&dom, &ManualScheduler::new(), StubTransport::default(), &ContactConfig::default());
    assert!(matches!(installed, Err(SetupError::MissingElement(id)) if id == "formStatus"));
}

// =============================================================
// Submission
// =============================================================

#[test]
fn ok_response_resets_fields_and_thanks() {
    let page = page();
    let (form, sent) = install(&page, Ok(200));

    assert_eq!(block_on(form.submit()), SubmitOutcome::Sent);
    assert_eq!(page.dom.text(&page.status), DEFAULT_SUCCESS_MESSAGE);
    assert!(!page.dom.has_class(&page.status, "text-danger"));
    assert!(page.dom.form_fields(&page.form).iter().all(|(_, v)| v.is_empty()));

    let sent = sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].action, "https://forms.example/f/xyz");
    assert_eq!(
        sent[0].fields,
        vec![("name".to_owned(), "Ada".to_owned()), ("message".to_owned(), "Ciao!".to_owned())]
    );
}

#[test]
fn non_ok_response_shows_fallback_then_clears_after_five_seconds() {
    let page = page();
    let (form, _) = install(&page, Ok(500));

    assert_eq!(block_on(form.submit()), SubmitOutcome::Failed);
    assert_eq!(page.dom.text(&page.status), DEFAULT_FAILURE_MESSAGE);
    assert!(page.dom.has_class(&page.status, "text-danger"));
    assert_eq!(page.dom.form_fields(&page.form)[0].1, "Ada");

    page.scheduler.advance(4_999);
    assert_eq!(page.dom.text(&page.status), DEFAULT_FAILURE_MESSAGE);

    page.scheduler.advance(1);
    assert_eq!(page.dom.text(&page.status), "");
    assert!(!page.dom.has_class(&page.status, "text-danger"));
}

#[test]
fn network_error_shows_same_fallback() {
    let page = page();
    let (form, _) = install(&page, Err(ContactError::Network("offline".to_owned())));
    assert_eq!(block_on(form.submit()), SubmitOutcome::Failed);
    assert_eq!(page.dom.text(&page.status), DEFAULT_FAILURE_MESSAGE);
}

#[test]
fn resubmitting_cancels_previous_clear() {
    let page = page();
    let transport = StubTransport { reply: Some(Ok(500)), ..StubTransport::default() };
    let failing = ContactForm::install(&page.dom, &page.scheduler, transport, &ContactConfig::default())
        .unwrap()
        .unwrap();
    block_on(failing.submit());
    page.scheduler.advance(3_000);

    let retry = ContactForm { transport: Rc::new(StubTransport::default()), ..failing.clone() };
    assert_eq!(block_on(retry.submit()), SubmitOutcome::Sent);
    assert!(!page.dom.has_class(&page.status, "text-danger"));
    assert_eq!(page.scheduler.pending_timers(), 1);

    page.scheduler.advance(2_500);
    assert_eq!(page.dom.text(&page.status), DEFAULT_SUCCESS_MESSAGE);

    page.scheduler.advance(2_500);
    assert_eq!(page.dom.text(&page.status), "");
}

#[test]
fn blank_action_posts_to_page_url() {
    let page = page();
    page.dom.set_attribute(&page.form, "action", "");
    page.dom.set_location("https://me.example/");
    let (form, sent) = install(&page, Ok(200));

    assert_eq!(block_on(form.submit()), SubmitOutcome::Sent);
    assert_eq!(sent.borrow()[0].action, "https://me.example/");
}

#[test]
fn success_message_also_clears() {
    let page = page();
    let (form, _) = install(&page, Ok(200));
    block_on(form.submit());
    assert_eq!(page.scheduler.run_next(), Some(5_000));
    assert_eq!(page.dom.text(&page.status), "");
}

// =============================================================
// Submit event
// =============================================================

#[test]
fn submit_event_is_intercepted_and_sent_once() {
    let page = page();
    let (_form, sent) = install(&page, Ok(200));

    let prevented = page.dom.dispatch(&page.form, "submit");
    assert!(prevented);
    assert_eq!(page.dom.text(&page.status), "");

    assert_eq!(page.scheduler.poll_tasks(), 0);
    assert_eq!(sent.borrow().len(), 1);
    assert_eq!(page.dom.text(&page.status), DEFAULT_SUCCESS_MESSAGE);
}

#[test]
fn sending_message_shown_while_in_flight() {
    struct Hanging;
    impl ContactTransport for Hanging {
        async fn post(&self, _submission: &ContactSubmission) -> Result<u16, ContactError> {
            std::future::pending().await
        }
    }

    let page = page();
    ContactForm::install(&page.dom, &page.scheduler, Hanging, &ContactConfig::default()).unwrap();
    page.dom.dispatch(&page.form, "submit");

    assert_eq!(page.scheduler.poll_tasks(), 1);
    assert_eq!(page.dom.text(&page.status), DEFAULT_SENDING_MESSAGE);
}
