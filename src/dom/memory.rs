//! In-memory document used by native builds and tests.
//!
//! Supports the selector subset the page uses (`tag`, `#id`, `.class`,
//! compounds like `a.nav-link`, and comma-separated lists). Events and
//! intersection reports are delivered only when a test calls
//! [`MemoryDom::dispatch`], [`MemoryDom::dispatch_window`] or
//! [`MemoryDom::intersect`].

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::{Dom, EventHandler, Intersection, IntersectionHandler, ObserverOptions};

const ROOT: usize = 0;
const BODY: usize = 1;

/// Handle to a node inside a [`MemoryDom`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MemoryElement(usize);

#[derive(Debug, Default)]
struct Node {
    tag: String,
    parent: Option<usize>,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    text: String,
    fields: Vec<(String, String)>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ListenerTarget {
    Element(usize),
    Window,
}

struct Listener {
    target: ListenerTarget,
    event: String,
    prevent_default: bool,
    handler: Rc<RefCell<EventHandler>>,
}

struct Observer {
    options: ObserverOptions,
    targets: Vec<MemoryElement>,
    handler: Rc<RefCell<IntersectionHandler<MemoryElement>>>,
}

struct Inner {
    nodes: Vec<Node>,
    listeners: Vec<Listener>,
    observers: Vec<Observer>,
    scroll_y: f64,
    prefers_dark: bool,
    location: String,
}

/// Shared in-memory document; clones refer to the same tree.
#[derive(Clone)]
pub struct MemoryDom {
    inner: Rc<RefCell<Inner>>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Empty document containing only `<html>` and `<body>`.
    pub fn new() -> Self {
        let root = Node { tag: "html".to_owned(), ..Node::default() };
        let body = Node { tag: "body".to_owned(), parent: Some(ROOT), ..Node::default() };
        Self {
            inner: Rc::new(RefCell::new(Inner {
                nodes: vec![root, body],
                listeners: Vec::new(),
                observers: Vec::new(),
                scroll_y: 0.0,
                prefers_dark: false,
                location: String::new(),
            })),
        }
    }

    /// Append a new element under `parent`.
    pub fn append(&self, parent: &MemoryElement, tag: &str, id: Option<&str>, classes: &[&str]) -> MemoryElement {
        let mut node = Node {
            tag: tag.to_owned(),
            parent: Some(parent.0),
            classes: classes.iter().copied().map(str::to_owned).collect(),
            ..Node::default()
        };
        if let Some(id) = id {
            node.attributes.insert("id".to_owned(), id.to_owned());
        }
        let mut inner = self.inner.borrow_mut();
        inner.nodes.push(node);
        MemoryElement(inner.nodes.len() - 1)
    }

    /// Handle to `<body>`.
    pub fn body_element(&self) -> MemoryElement {
        MemoryElement(BODY)
    }

    /// Document URL; a form with a blank `action` submits here.
    pub fn set_location(&self, url: &str) {
        url.clone_into(&mut self.inner.borrow_mut().location);
    }

    pub fn set_scroll_y(&self, y: f64) {
        self.inner.borrow_mut().scroll_y = y;
    }

    pub fn set_prefers_dark(&self, dark: bool) {
        self.inner.borrow_mut().prefers_dark = dark;
    }

    /// Set (or add) a named field value on a form element.
    pub fn set_field(&self, form: &MemoryElement, name: &str, value: &str) {
        let mut inner = self.inner.borrow_mut();
        let Some(node) = inner.nodes.get_mut(form.0) else {
            return;
        };
        match node.fields.iter_mut().find(|(n, _)| n == name) {
            Some(field) => value.clone_into(&mut field.1),
            None => node.fields.push((name.to_owned(), value.to_owned())),
        }
    }

    /// Fire `event` on `el`. Returns `true` if a listener prevented the default action.
    pub fn dispatch(&self, el: &MemoryElement, event: &str) -> bool {
        self.fire(ListenerTarget::Element(el.0), event)
    }

    /// Fire `event` on the window.
    pub fn dispatch_window(&self, event: &str) -> bool {
        self.fire(ListenerTarget::Window, event)
    }

    /// Deliver intersection reports to every observer watching the given targets.
    ///
    /// Each observer receives only the entries for its own targets, in the
    /// order given, as one batch.
    pub fn intersect(&self, entries: &[(MemoryElement, bool)]) {
        let count = self.inner.borrow().observers.len();
        for idx in 0..count {
            let (batch, handler) = {
                let inner = self.inner.borrow();
                let Some(observer) = inner.observers.get(idx) else {
                    continue;
                };
                let batch = entries
                    .iter()
                    .filter(|(el, _)| observer.targets.contains(el))
                    .map(|(el, hit)| Intersection { target: *el, is_intersecting: *hit })
                    .collect::<Vec<_>>();
                (batch, Rc::clone(&observer.handler))
            };
            if batch.is_empty() {
                continue;
            }
            let retired = (handler.borrow_mut())(&batch);
            if let Some(observer) = self.inner.borrow_mut().observers.get_mut(idx) {
                observer.targets.retain(|t| !retired.contains(t));
            }
        }
    }

    /// Whether any observer is still watching `el`.
    pub fn is_observed(&self, el: &MemoryElement) -> bool {
        self.inner
            .borrow()
            .observers
            .iter()
            .any(|o| o.targets.contains(el))
    }

    /// Options of every registered observer, in registration order.
    pub fn observer_options(&self) -> Vec<ObserverOptions> {
        self.inner
            .borrow()
            .observers
            .iter()
            .map(|o| o.options.clone())
            .collect()
    }

    /// Number of listeners registered for `event` on any target.
    pub fn listener_count(&self, event: &str) -> usize {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.event == event)
            .count()
    }

    fn fire(&self, target: ListenerTarget, event: &str) -> bool {
        let (handlers, prevented) = {
            let inner = self.inner.borrow();
            let matching = inner
                .listeners
                .iter()
                .filter(|l| l.target == target && l.event == event)
                .collect::<Vec<_>>();
            let prevented = matching.iter().any(|l| l.prevent_default);
            (matching.iter().map(|l| Rc::clone(&l.handler)).collect::<Vec<_>>(), prevented)
        };
        for handler in handlers {
            (handler.borrow_mut())();
        }
        prevented
    }

    fn add_listener(&self, target: ListenerTarget, event: &str, prevent_default: bool, handler: EventHandler) {
        self.inner.borrow_mut().listeners.push(Listener {
            target,
            event: event.to_owned(),
            prevent_default,
            handler: Rc::new(RefCell::new(handler)),
        });
    }

    fn is_descendant(&self, el: usize, ancestor: usize) -> bool {
        let inner = self.inner.borrow();
        let mut cursor = inner.nodes.get(el).and_then(|n| n.parent);
        while let Some(idx) = cursor {
            if idx == ancestor {
                return true;
            }
            cursor = inner.nodes.get(idx).and_then(|n| n.parent);
        }
        false
    }

    fn matching(&self, selector: &str) -> Vec<MemoryElement> {
        let inner = self.inner.borrow();
        let parts = selector
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();
        inner
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| parts.iter().any(|part| node_matches(node, part)))
            .map(|(idx, _)| MemoryElement(idx))
            .collect()
    }
}

/// Match one compound selector such as `a.nav-link` or `#about`.
fn node_matches(node: &Node, selector: &str) -> bool {
    let tag_end = selector.find(['.', '#']).unwrap_or(selector.len());
    let (tag, mut rest) = selector.split_at(tag_end);
    if !tag.is_empty() && tag != node.tag {
        return false;
    }
    while let Some(kind) = rest.chars().next() {
        let tail = &rest[kind.len_utf8()..];
        let end = tail.find(['.', '#']).unwrap_or(tail.len());
        let (name, next) = tail.split_at(end);
        let ok = match kind {
            '.' => node.classes.iter().any(|c| c == name),
            '#' => node.attributes.get("id").is_some_and(|id| id == name),
            _ => false,
        };
        if !ok {
            return false;
        }
        rest = next;
    }
    true
}

impl Dom for MemoryDom {
    type Element = MemoryElement;

    fn by_id(&self, id: &str) -> Option<MemoryElement> {
        self.inner
            .borrow()
            .nodes
            .iter()
            .position(|n| n.attributes.get("id").is_some_and(|v| v == id))
            .map(MemoryElement)
    }

    fn query_all(&self, selector: &str) -> Vec<MemoryElement> {
        self.matching(selector)
    }

    fn query_within(&self, parent: &MemoryElement, selector: &str) -> Option<MemoryElement> {
        self.matching(selector)
            .into_iter()
            .find(|el| self.is_descendant(el.0, parent.0))
    }

    fn root(&self) -> Option<MemoryElement> {
        Some(MemoryElement(ROOT))
    }

    fn body(&self) -> Option<MemoryElement> {
        Some(MemoryElement(BODY))
    }

    fn attribute(&self, el: &MemoryElement, name: &str) -> Option<String> {
        self.inner
            .borrow()
            .nodes
            .get(el.0)
            .and_then(|n| n.attributes.get(name).cloned())
    }

    fn set_attribute(&self, el: &MemoryElement, name: &str, value: &str) {
        if let Some(node) = self.inner.borrow_mut().nodes.get_mut(el.0) {
            node.attributes.insert(name.to_owned(), value.to_owned());
        }
    }

    fn has_class(&self, el: &MemoryElement, class: &str) -> bool {
        self.inner
            .borrow()
            .nodes
            .get(el.0)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn add_class(&self, el: &MemoryElement, class: &str) {
        if let Some(node) = self.inner.borrow_mut().nodes.get_mut(el.0) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_owned());
            }
        }
    }

    fn remove_class(&self, el: &MemoryElement, class: &str) {
        if let Some(node) = self.inner.borrow_mut().nodes.get_mut(el.0) {
            node.classes.retain(|c| c != class);
        }
    }

    fn text(&self, el: &MemoryElement) -> String {
        self.inner
            .borrow()
            .nodes
            .get(el.0)
            .map(|n| n.text.clone())
            .unwrap_or_default()
    }

    fn set_text(&self, el: &MemoryElement, text: &str) {
        if let Some(node) = self.inner.borrow_mut().nodes.get_mut(el.0) {
            text.clone_into(&mut node.text);
        }
    }

    fn listen(&self, el: &MemoryElement, event: &str, handler: EventHandler) {
        self.add_listener(ListenerTarget::Element(el.0), event, false, handler);
    }

    fn intercept(&self, el: &MemoryElement, event: &str, handler: EventHandler) {
        self.add_listener(ListenerTarget::Element(el.0), event, true, handler);
    }

    fn listen_window(&self, event: &str, handler: EventHandler) {
        self.add_listener(ListenerTarget::Window, event, false, handler);
    }

    fn observe_intersections(
        &self,
        targets: &[MemoryElement],
        options: &ObserverOptions,
        handler: IntersectionHandler<MemoryElement>,
    ) {
        self.inner.borrow_mut().observers.push(Observer {
            options: options.clone(),
            targets: targets.to_vec(),
            handler: Rc::new(RefCell::new(handler)),
        });
    }

    fn scroll_y(&self) -> f64 {
        self.inner.borrow().scroll_y
    }

    fn prefers_dark_scheme(&self) -> bool {
        self.inner.borrow().prefers_dark
    }

    fn form_action(&self, form: &MemoryElement) -> String {
        match self.attribute(form, "action") {
            Some(action) if !action.trim().is_empty() => action,
            _ => self.inner.borrow().location.clone(),
        }
    }

    fn form_fields(&self, form: &MemoryElement) -> Vec<(String, String)> {
        self.inner
            .borrow()
            .nodes
            .get(form.0)
            .map(|n| n.fields.clone())
            .unwrap_or_default()
    }

    fn reset_form(&self, form: &MemoryElement) {
        if let Some(node) = self.inner.borrow_mut().nodes.get_mut(form.0) {
            for (_, value) in &mut node.fields {
                value.clear();
            }
        }
    }
}
