//! Footer copyright year.

#[cfg(test)]
#[path = "year_test.rs"]
mod year_test;

use crate::config::FooterConfig;
use crate::dom::Dom;

/// Write `year` into the footer element. Returns `false` if it is absent.
pub fn install_year<D: Dom>(dom: &D, config: &FooterConfig, year: u32) -> bool {
    let Some(el) = dom.by_id(&config.year_id) else {
        return false;
    };
    dom.set_text(&el, &year.to_string());
    true
}

/// Current calendar year from the browser clock.
#[cfg(feature = "hydrate")]
pub fn current_year() -> u32 {
    js_sys::Date::new_0().get_full_year()
}
