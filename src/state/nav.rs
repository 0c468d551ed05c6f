//! Navbar derivations: scrolled state and active section.
//!
//! Nothing here is stored. Both values are recomputed from the latest
//! scroll offset or intersection batch.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

/// Whether the navbar should render its compact "scrolled" style.
pub fn is_scrolled(scroll_y: f64, threshold_px: f64) -> bool {
    scroll_y > threshold_px
}

/// Target id of an in-page link (`#about` → `about`).
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// In-page section ids referenced by nav links, in link order.
pub fn section_ids<'a>(hrefs: impl IntoIterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut ids = Vec::new();
    for id in hrefs.into_iter().flatten().filter_map(fragment_target) {
        if !ids.iter().any(|seen| seen == id) {
            ids.push(id.to_owned());
        }
    }
    ids
}

/// Section to highlight for one observation batch.
///
/// Entries are `(section id, is_intersecting)` in report order; the last
/// intersecting entry wins. `None` leaves the current highlight alone.
pub fn active_section<'a>(entries: impl IntoIterator<Item = (Option<&'a str>, bool)>) -> Option<&'a str> {
    entries
        .into_iter()
        .filter(|(_, hit)| *hit)
        .filter_map(|(id, _)| id)
        .last()
}
