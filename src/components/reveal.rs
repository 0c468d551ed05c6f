//! Fade-in reveal on first scroll into view.

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

use crate::config::RevealConfig;
use crate::dom::{Dom, Intersection, ObserverOptions};

/// Observe every reveal-marked element. Returns how many are watched.
pub fn install_reveal<D: Dom>(dom: &D, config: &RevealConfig) -> usize {
    let targets = dom.query_all(&config.selector);
    if targets.is_empty() {
        log::debug!("no elements match {:?}", config.selector);
        return 0;
    }
    let options = ObserverOptions { threshold: config.threshold, root_margin: Some(config.root_margin.clone()) };
    let handler_dom = dom.clone();
    let class = config.appeared_class.clone();
    dom.observe_intersections(&targets, &options, Box::new(move |batch| reveal_batch(&handler_dom, batch, &class)));
    targets.len()
}

/// Mark intersecting targets as appeared and return them so the observer
/// drops them.
pub fn reveal_batch<D: Dom>(dom: &D, batch: &[Intersection<D::Element>], class: &str) -> Vec<D::Element> {
    batch
        .iter()
        .filter(|entry| entry.is_intersecting)
        .map(|entry| {
            dom.add_class(&entry.target, class);
            entry.target.clone()
        })
        .collect()
}
