//! Page boot: load config and install every behavior.
//!
//! ARCHITECTURE
//! ============
//! Behaviors are independent. A missing element disables only the behavior
//! that needs it; the failure is logged and boot continues.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use crate::components::contact_form::ContactForm;
use crate::components::navbar::install_navbar;
use crate::components::reveal::install_reveal;
use crate::components::theme_toggle::install_theme_toggle;
use crate::components::typing::TypingAnimator;
use crate::components::year::install_year;
use crate::config::{CONFIG_ELEMENT_ID, PortfolioConfig};
use crate::dom::Dom;
use crate::net::contact::ContactTransport;
use crate::state::theme::Theme;
use crate::util::scheduler::Scheduler;
use crate::util::storage::PreferenceStore;

/// What boot managed to install.
pub struct PageHandles<D: Dom, S: Scheduler, T: ContactTransport> {
    pub typing: Option<TypingAnimator<D, S>>,
    pub theme: Option<Theme>,
    pub reveal_targets: usize,
    pub nav_sections: Option<usize>,
    pub contact: Option<ContactForm<D, S, T>>,
    pub year_set: bool,
}

/// Read the page's JSON override, falling back to defaults.
pub fn load_config<D: Dom>(dom: &D) -> PortfolioConfig {
    let Some(el) = dom.by_id(CONFIG_ELEMENT_ID) else {
        return PortfolioConfig::default();
    };
    match PortfolioConfig::from_json(&dom.text(&el)) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {err}");
            PortfolioConfig::default()
        }
    }
}

/// Install all behaviors against `dom`.
///
/// The typing animation is stopped on `beforeunload`.
pub fn boot<D, S, P, T>(
    dom: &D,
    scheduler: &S,
    store: &P,
    transport: T,
    config: &PortfolioConfig,
    year: Option<u32>,
) -> PageHandles<D, S, T>
where
    D: Dom,
    S: Scheduler,
    P: PreferenceStore,
    T: ContactTransport,
{
    let typing = installed("typing", TypingAnimator::new(dom, scheduler, &config.typing));
    if let Some(animator) = &typing {
        animator.start();
        let on_unload = animator.clone();
        dom.listen_window("beforeunload", Box::new(move || on_unload.stop()));
    }

    let reveal_targets = install_reveal(dom, &config.reveal);
    let nav_sections = installed("navbar", install_navbar(dom, &config.navbar));
    let theme = installed("theme toggle", install_theme_toggle(dom, store, &config.theme));
    let contact = installed("contact form", ContactForm::install(dom, scheduler, transport, &config.contact)).flatten();
    let year_set = year.is_some_and(|y| install_year(dom, &config.footer, y));

    log::debug!(
        "page ready: typing={} reveal={reveal_targets} sections={nav_sections:?} theme={theme:?} contact={}",
        typing.is_some(),
        contact.is_some()
    );
    PageHandles { typing, theme, reveal_targets, nav_sections, contact, year_set }
}

fn installed<V, E: std::fmt::Display>(name: &str, result: Result<V, E>) -> Option<V> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("{name} not installed: {err}");
            None
        }
    }
}
