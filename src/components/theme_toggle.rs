//! Dark mode initialization and toggle.
//!
//! Reads the visitor's preference from storage (falling back to the system
//! color-scheme hint) and applies a `data-theme` attribute to the `<html>`
//! element. Clicking the toggle flips the theme and writes it back.
//!
//! TRADE-OFFS
//! ==========
//! Preference persistence is best-effort: when storage is unavailable the
//! theme still applies for the current visit and the failure is logged.

#[cfg(test)]
#[path = "theme_toggle_test.rs"]
mod theme_toggle_test;

use super::{SetupError, require_id};
use crate::config::ThemeConfig;
use crate::dom::{Dom, set_class};
use crate::state::theme::{Theme, resolve_initial};
use crate::util::storage::PreferenceStore;

/// Elements the theme touches.
#[derive(Clone, Debug)]
pub struct ThemeParts<E> {
    pub root: E,
    pub body: Option<E>,
    pub toggle: E,
    pub light_icon: E,
    pub dark_icon: E,
}

impl<E: Clone> ThemeParts<E> {
    /// Locate the root, body, toggle control and both icons.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] naming the first missing element.
    pub fn find<D: Dom<Element = E>>(dom: &D, config: &ThemeConfig) -> Result<Self, SetupError> {
        let root = dom.root().ok_or(SetupError::NoRoot)?;
        let toggle = require_id(dom, &config.toggle_id)?;
        let child = |selector: &str| {
            dom.query_within(&toggle, selector).ok_or_else(|| SetupError::MissingChild {
                parent: config.toggle_id.clone(),
                selector: selector.to_owned(),
            })
        };
        let light_icon = child(&config.light_icon_selector)?;
        let dark_icon = child(&config.dark_icon_selector)?;
        Ok(Self { root, body: dom.body(), toggle, light_icon, dark_icon })
    }
}

/// Apply the initial theme and wire the toggle click.
///
/// # Errors
///
/// Returns [`SetupError`] if a required element is missing.
pub fn install_theme_toggle<D: Dom, P: PreferenceStore>(
    dom: &D,
    store: &P,
    config: &ThemeConfig,
) -> Result<Theme, SetupError> {
    let parts = ThemeParts::find(dom, config)?;
    let stored = read_preference(store, &config.storage_key);
    let theme = resolve_initial(stored.as_deref(), dom.prefers_dark_scheme());
    apply_theme(dom, &parts, theme, config);

    let click_dom = dom.clone();
    let click_store = store.clone();
    let click_config = config.clone();
    let toggle = parts.toggle.clone();
    dom.listen(
        &toggle,
        "click",
        Box::new(move || {
            toggle_theme(&click_dom, &parts, &click_store, &click_config);
        }),
    );
    Ok(theme)
}

/// Stored preference, or `None` if absent or unreadable.
pub fn read_preference<P: PreferenceStore>(store: &P, key: &str) -> Option<String> {
    match store.load(key) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("reading theme preference failed: {err}");
            None
        }
    }
}

/// Theme currently marked on the root element.
pub fn current_theme<D: Dom>(dom: &D, parts: &ThemeParts<D::Element>, config: &ThemeConfig) -> Theme {
    dom.attribute(&parts.root, &config.marker_attribute)
        .as_deref()
        .and_then(Theme::parse)
        .unwrap_or_default()
}

/// Flip the theme, apply it, and persist the new choice.
pub fn toggle_theme<D: Dom, P: PreferenceStore>(
    dom: &D,
    parts: &ThemeParts<D::Element>,
    store: &P,
    config: &ThemeConfig,
) -> Theme {
    let next = current_theme(dom, parts, config).toggled();
    apply_theme(dom, parts, next, config);
    if let Err(err) = store.save(&config.storage_key, next.as_str()) {
        log::warn!("persisting theme preference failed: {err}");
    }
    next
}

/// Set the marker attribute, dark classes, and icon visibility.
pub fn apply_theme<D: Dom>(dom: &D, parts: &ThemeParts<D::Element>, theme: Theme, config: &ThemeConfig) {
    let dark = theme.is_dark();
    dom.set_attribute(&parts.root, &config.marker_attribute, theme.as_str());
    set_class(dom, &parts.root, &config.root_dark_class, dark);
    set_class(dom, &parts.light_icon, &config.hidden_class, dark);
    set_class(dom, &parts.dark_icon, &config.hidden_class, !dark);
    if let Some(body) = &parts.body {
        set_class(dom, body, &config.body_dark_class, dark);
    }
}
