//! Document access behind a small binding trait.
//!
//! SYSTEM CONTEXT
//! ==============
//! Page behaviors never touch `web-sys` directly. They go through [`Dom`],
//! which `WebDom` implements over the live document (hydrate builds) and
//! [`MemoryDom`] implements over an in-memory element tree (native tests).


pub mod memory;
#[cfg(feature = "hydrate")]
pub mod web;

pub use memory::{MemoryDom, MemoryElement};
#[cfg(feature = "hydrate")]
pub use web::WebDom;

/// Callback invoked for a plain event (click, scroll, submit, unload).
pub type EventHandler = Box<dyn FnMut()>;

/// Callback invoked with one batch of intersection reports.
///
/// Returns the targets the observer should stop watching.
pub type IntersectionHandler<E> = Box<dyn FnMut(&[Intersection<E>]) -> Vec<E>>;

/// One intersection report for an observed element.
#[derive(Clone, Debug, PartialEq)]
pub struct Intersection<E> {
    pub target: E,
    pub is_intersecting: bool,
}

/// Viewport-relative observer settings.
#[derive(Clone, Debug, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of the target that must be visible, `0.0..=1.0`.
    pub threshold: f64,
    /// CSS margin applied to the viewport, e.g. `"0px 0px -80px 0px"`.
    pub root_margin: Option<String>,
}

/// Binding between page behaviors and a document.
///
/// Handles are cheap clones; listeners and observers live as long as the
/// document does.
pub trait Dom: Clone + 'static {
    type Element: Clone + PartialEq + 'static;

    fn by_id(&self, id: &str) -> Option<Self::Element>;
    /// All elements matching a CSS selector list, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;
    /// First descendant of `parent` matching `selector`.
    fn query_within(&self, parent: &Self::Element, selector: &str) -> Option<Self::Element>;
    /// The `<html>` element.
    fn root(&self) -> Option<Self::Element>;
    fn body(&self) -> Option<Self::Element>;

    fn attribute(&self, el: &Self::Element, name: &str) -> Option<String>;
    fn set_attribute(&self, el: &Self::Element, name: &str, value: &str);
    fn has_class(&self, el: &Self::Element, class: &str) -> bool;
    fn add_class(&self, el: &Self::Element, class: &str);
    fn remove_class(&self, el: &Self::Element, class: &str);
    fn text(&self, el: &Self::Element) -> String;
    fn set_text(&self, el: &Self::Element, text: &str);

    fn listen(&self, el: &Self::Element, event: &str, handler: EventHandler);
    /// Like [`Dom::listen`], but the event's default action is prevented.
    fn intercept(&self, el: &Self::Element, event: &str, handler: EventHandler);
    fn listen_window(&self, event: &str, handler: EventHandler);
    fn observe_intersections(
        &self,
        targets: &[Self::Element],
        options: &ObserverOptions,
        handler: IntersectionHandler<Self::Element>,
    );

    /// Current vertical scroll offset in CSS pixels.
    fn scroll_y(&self) -> f64;
    /// Whether the user agent reports `prefers-color-scheme: dark`.
    fn prefers_dark_scheme(&self) -> bool;

    /// Submission target of a `<form>`. A blank `action` resolves to the
    /// document URL.
    fn form_action(&self, form: &Self::Element) -> String;
    /// Name/value pairs a `<form>` would submit.
    fn form_fields(&self, form: &Self::Element) -> Vec<(String, String)>;
    fn reset_form(&self, form: &Self::Element);
}

/// Toggle `class` on `el` according to `on`.
pub fn set_class<D: Dom>(dom: &D, el: &D::Element, class: &str, on: bool) {
    if on {
        dom.add_class(el, class);
    } else {
        dom.remove_class(el, class);
    }
}

/// Whether a `document.readyState` value means parsing is still underway.
pub fn is_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

/// Keep the text-valued form entries. Non-text values (file inputs) have no
/// string form and are dropped with a warning.
pub fn text_entries(entries: impl IntoIterator<Item = (String, Option<String>)>) -> Vec<(String, String)> {
    entries
        .into_iter()
        .filter_map(|(name, value)| match value {
            Some(value) => Some((name, value)),
            None => {
                log::warn!("form field {name:?} is not text; not sent");
                None
            }
        })
        .collect()
}
