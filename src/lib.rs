//! # portfolio-ui
//!
//! Rust + WASM behavior layer for a static personal portfolio page: typing
//! headline, scroll reveals, sticky navbar, persisted light/dark theme, and
//! an async contact form.
//!
//! The page markup is served as plain HTML. This crate attaches to it on
//! load through the [`dom::Dom`] binding; with the `hydrate` feature it runs
//! against the live document, without it the same logic runs against
//! [`dom::MemoryDom`] for native tests.

pub mod components;
pub mod config;
pub mod dom;
pub mod net;
pub mod page;
pub mod state;
pub mod util;

/// WASM entry point: install every behavior once the DOM is parsed.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use crate::dom::WebDom;
    use crate::net::contact::FetchTransport;
    use crate::util::scheduler::GlooScheduler;
    use crate::util::storage::LocalStorage;

    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("console logger not installed: {err}").into());
    }

    let Some(dom) = WebDom::new() else {
        return;
    };
    let ready = dom.clone();
    dom.when_ready(move || {
        let config = page::load_config(&ready);
        let year = components::year::current_year();
        // Listeners hold their own clones of the handles for the page lifetime.
        page::boot(&ready, &GlooScheduler, &LocalStorage, FetchTransport, &config, Some(year));
    });
}
