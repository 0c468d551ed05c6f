//! Sticky navbar: scrolled style and active-section highlighting.

#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;

use super::{SetupError, require_id};
use crate::config::NavbarConfig;
use crate::dom::{Dom, ObserverOptions, set_class};
use crate::state::nav::{active_section, fragment_target, is_scrolled, section_ids};

/// Attach the scroll listener and section observer.
///
/// Returns the number of sections observed.
///
/// # Errors
///
/// Returns [`SetupError::MissingElement`] if the navbar is absent.
pub fn install_navbar<D: Dom>(dom: &D, config: &NavbarConfig) -> Result<usize, SetupError> {
    let nav = require_id(dom, &config.nav_id)?;

    apply_scrolled(dom, &nav, dom.scroll_y(), config);
    let scroll_dom = dom.clone();
    let scroll_config = config.clone();
    dom.listen_window(
        "scroll",
        Box::new(move || apply_scrolled(&scroll_dom, &nav, scroll_dom.scroll_y(), &scroll_config)),
    );

    let links = dom.query_all(&config.link_selector);
    let hrefs = links.iter().map(|l| dom.attribute(l, "href")).collect::<Vec<_>>();
    let sections = section_ids(hrefs.iter().map(Option::as_deref))
        .iter()
        .filter_map(|id| dom.by_id(id))
        .collect::<Vec<_>>();
    if sections.is_empty() {
        return Ok(0);
    }

    let options = ObserverOptions { threshold: config.section_threshold, root_margin: None };
    let handler_dom = dom.clone();
    let active_class = config.active_class.clone();
    dom.observe_intersections(
        &sections,
        &options,
        Box::new(move |batch| {
            let entries = batch
                .iter()
                .map(|e| (handler_dom.attribute(&e.target, "id"), e.is_intersecting))
                .collect::<Vec<_>>();
            if let Some(id) = active_section(entries.iter().map(|(id, hit)| (id.as_deref(), *hit))) {
                highlight_link(&handler_dom, &links, id, &active_class);
            }
            Vec::new()
        }),
    );
    Ok(sections.len())
}

/// Toggle the scrolled class for the given offset.
pub fn apply_scrolled<D: Dom>(dom: &D, nav: &D::Element, scroll_y: f64, config: &NavbarConfig) {
    set_class(dom, nav, &config.scrolled_class, is_scrolled(scroll_y, config.scroll_threshold_px));
}

/// Make the link pointing at `#section_id` the only active one.
pub fn highlight_link<D: Dom>(dom: &D, links: &[D::Element], section_id: &str, class: &str) {
    for link in links {
        let href = dom.attribute(link, "href");
        let matches = href.as_deref().and_then(fragment_target) == Some(section_id);
        set_class(dom, link, class, matches);
    }
}
