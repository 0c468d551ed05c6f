//! [`Dom`] over the live browser document via `web-sys`.
//!
//! Listener and observer closures are leaked with `Closure::forget`; they
//! stay registered until the page goes away.

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{
    Document, Element, Event, FormData, HtmlFormElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MediaQueryList, Window,
};

use super::{Dom, EventHandler, Intersection, IntersectionHandler, ObserverOptions, is_loading, text_entries};

#[derive(Clone)]
pub struct WebDom {
    window: Window,
    document: Document,
}

fn warn_on_err(context: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        log::warn!("{context} failed: {err:?}");
    }
}

impl WebDom {
    /// Bind to the current window, if running in a browser.
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    /// Run `f` once the document has been parsed.
    pub fn when_ready(&self, f: impl FnOnce() + 'static) {
        if !is_loading(&self.document.ready_state()) {
            f();
            return;
        }
        let cb = Closure::once(f);
        warn_on_err(
            "DOMContentLoaded listener",
            self.document
                .add_event_listener_with_callback("DOMContentLoaded", cb.as_ref().unchecked_ref()),
        );
        cb.forget();
    }

    fn add_listener(target: &web_sys::EventTarget, event: &str, prevent_default: bool, mut handler: EventHandler) {
        let cb = Closure::wrap(Box::new(move |ev: Event| {
            if prevent_default {
                ev.prevent_default();
            }
            handler();
        }) as Box<dyn FnMut(Event)>);
        warn_on_err(
            &format!("{event} listener"),
            target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref()),
        );
        cb.forget();
    }
}

impl Dom for WebDom {
    type Element = Element;

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(err) => {
                log::warn!("invalid selector {selector:?}: {err:?}");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .map(|node| node.unchecked_into::<Element>())
            .collect()
    }

    fn query_within(&self, parent: &Element, selector: &str) -> Option<Element> {
        parent.query_selector(selector).unwrap_or_default()
    }

    fn root(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Into::into)
    }

    fn attribute(&self, el: &Element, name: &str) -> Option<String> {
        el.get_attribute(name)
    }

    fn set_attribute(&self, el: &Element, name: &str, value: &str) {
        warn_on_err("set_attribute", el.set_attribute(name, value));
    }

    fn has_class(&self, el: &Element, class: &str) -> bool {
        el.class_list().contains(class)
    }

    fn add_class(&self, el: &Element, class: &str) {
        warn_on_err("classList.add", el.class_list().add_1(class));
    }

    fn remove_class(&self, el: &Element, class: &str) {
        warn_on_err("classList.remove", el.class_list().remove_1(class));
    }

    fn text(&self, el: &Element) -> String {
        el.text_content().unwrap_or_default()
    }

    fn set_text(&self, el: &Element, text: &str) {
        el.set_text_content(Some(text));
    }

    fn listen(&self, el: &Element, event: &str, handler: EventHandler) {
        Self::add_listener(el, event, false, handler);
    }

    fn intercept(&self, el: &Element, event: &str, handler: EventHandler) {
        Self::add_listener(el, event, true, handler);
    }

    fn listen_window(&self, event: &str, handler: EventHandler) {
        Self::add_listener(&self.window, event, false, handler);
    }

    fn observe_intersections(
        &self,
        targets: &[Element],
        options: &ObserverOptions,
        mut handler: IntersectionHandler<Element>,
    ) {
        let cb = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            let batch = entries
                .iter()
                .map(|entry| entry.unchecked_into::<IntersectionObserverEntry>())
                .map(|entry| Intersection { target: entry.target(), is_intersecting: entry.is_intersecting() })
                .collect::<Vec<_>>();
            for el in handler(&batch) {
                observer.unobserve(&el);
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        if let Some(margin) = options.root_margin.as_deref() {
            init.set_root_margin(margin);
        }

        match IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                for el in targets {
                    observer.observe(el);
                }
                cb.forget();
            }
            Err(err) => log::warn!("IntersectionObserver unavailable: {err:?}"),
        }
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn prefers_dark_scheme(&self) -> bool {
        self.window
            .match_media("(prefers-color-scheme: dark)")
            .unwrap_or_default()
            .as_ref()
            .is_some_and(MediaQueryList::matches)
    }

    fn form_action(&self, form: &Element) -> String {
        form.dyn_ref::<HtmlFormElement>()
            .map_or_else(String::new, HtmlFormElement::action)
    }

    fn form_fields(&self, form: &Element) -> Vec<(String, String)> {
        let Some(form) = form.dyn_ref::<HtmlFormElement>() else {
            return Vec::new();
        };
        let data = match FormData::new_with_form(form) {
            Ok(data) => data,
            Err(err) => {
                log::warn!("FormData construction failed: {err:?}");
                return Vec::new();
            }
        };
        let Ok(Some(entries)) = js_sys::try_iter(&data) else {
            return Vec::new();
        };
        let pairs = entries.filter_map(|entry| match entry {
            Ok(entry) => {
                let pair = Array::from(&entry);
                Some((pair.get(0).as_string().unwrap_or_default(), pair.get(1).as_string()))
            }
            Err(err) => {
                log::warn!("form entry unreadable: {err:?}");
                None
            }
        });
        text_entries(pairs)
    }

    fn reset_form(&self, form: &Element) {
        if let Some(form) = form.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }
}
