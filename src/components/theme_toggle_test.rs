use super::*;
use crate::dom::{MemoryDom, MemoryElement};
use crate::util::storage::MemoryStore;

struct Page {
    dom: MemoryDom,
    toggle: MemoryElement,
    light: MemoryElement,
    dark: MemoryElement,
}

fn page() -> Page {
    let dom = MemoryDom::new();
    let toggle = dom.append(&dom.body_element(), "button", Some("themeToggle"), &[]);
    let light = dom.append(&toggle, "i", None, &["icon-light"]);
    let dark = dom.append(&toggle, "i", None, &["icon-dark", "d-none"]);
    Page { dom, toggle, light, dark }
}

fn marker(page: &Page) -> Option<String> {
    let root = page.dom.root().unwrap();
    page.dom.attribute(&root, "data-theme")
}

fn visible_icons(page: &Page) -> (bool, bool) {
    (!page.dom.has_class(&page.light, "d-none"), !page.dom.has_class(&page.dark, "d-none"))
}

// =============================================================
// Setup
// =============================================================

#[test]
fn missing_toggle_is_setup_error() {
    let dom = MemoryDom::new();
    let err = install_theme_toggle(&dom, &MemoryStore::new(), &ThemeConfig::default()).unwrap_err();
    assert_eq!(err, SetupError::MissingElement("themeToggle".to_owned()));
}

#[test]
fn missing_icon_is_setup_error() {
    let dom = MemoryDom::new();
    let toggle = dom.append(&dom.body_element(), "button", Some("themeToggle"), &[]);
    dom.append(&toggle, "i", None, &["icon-light"]);
    let err = install_theme_toggle(&dom, &MemoryStore::new(), &ThemeConfig::default()).unwrap_err();
    assert_eq!(
        err,
        SetupError::MissingChild { parent: "themeToggle".to_owned(), selector: ".icon-dark".to_owned() }
    );
}

// =============================================================
// Initial theme
// =============================================================

#[test]
fn stored_dark_renders_dark() {
    let page = page();
    let store = MemoryStore::with("preferred-theme", "dark");
    let theme = install_theme_toggle(&page.dom, &store, &ThemeConfig::default()).unwrap();

    assert_eq!(theme, Theme::Dark);
    assert_eq!(marker(&page).as_deref(), Some("dark"));
    assert_eq!(visible_icons(&page), (false, true));
    assert!(page.dom.has_class(&page.dom.root().unwrap(), "dark"));
    assert!(page.dom.has_class(&page.dom.body_element(), "dark-mode"));
}

#[test]
fn system_hint_used_when_nothing_stored() {
    let page = page();
    page.dom.set_prefers_dark(true);
    let theme = install_theme_toggle(&page.dom, &MemoryStore::new(), &ThemeConfig::default()).unwrap();
    assert_eq!(theme, Theme::Dark);
}

#[test]
fn stored_light_beats_system_hint() {
    let page = page();
    page.dom.set_prefers_dark(true);
    let store = MemoryStore::with("preferred-theme", "light");
    let theme = install_theme_toggle(&page.dom, &store, &ThemeConfig::default()).unwrap();
    assert_eq!(theme, Theme::Light);
    assert_eq!(visible_icons(&page), (true, false));
    assert!(!page.dom.has_class(&page.dom.body_element(), "dark-mode"));
}

#[test]
fn startup_does_not_write_storage() {
    let page = page();
    let store = MemoryStore::new();
    install_theme_toggle(&page.dom, &store, &ThemeConfig::default()).unwrap();
    assert_eq!(store.get("preferred-theme"), None);
}

// =============================================================
// Toggle
// =============================================================

#[test]
fn click_flips_and_persists() {
    let page = page();
    let store = MemoryStore::new();
    install_theme_toggle(&page.dom, &store, &ThemeConfig::default()).unwrap();

    page.dom.dispatch(&page.toggle, "click");
    assert_eq!(marker(&page).as_deref(), Some("dark"));
    assert_eq!(store.get("preferred-theme").as_deref(), Some("dark"));
    assert_eq!(visible_icons(&page), (false, true));

    page.dom.dispatch(&page.toggle, "click");
    assert_eq!(marker(&page).as_deref(), Some("light"));
    assert_eq!(store.get("preferred-theme").as_deref(), Some("light"));
    assert_eq!(visible_icons(&page), (true, false));
}

#[test]
fn exactly_one_icon_visible_through_toggles() {
    let page = page();
    install_theme_toggle(&page.dom, &MemoryStore::new(), &ThemeConfig::default()).unwrap();
    for _ in 0..5 {
        let (light, dark) = visible_icons(&page);
        assert!(light ^ dark);
        page.dom.dispatch(&page.toggle, "click");
    }
}

#[test]
fn unavailable_storage_still_toggles() {
    let page = page();
    let store = MemoryStore::unavailable();
    let theme = install_theme_toggle(&page.dom, &store, &ThemeConfig::default()).unwrap();
    assert_eq!(theme, Theme::Light);

    page.dom.dispatch(&page.toggle, "click");
    assert_eq!(marker(&page).as_deref(), Some("dark"));
}

#[test]
fn unknown_marker_toggles_to_dark() {
    let page = page();
    let config = ThemeConfig::default();
    let parts = ThemeParts::find(&page.dom, &config).unwrap();
    page.dom.set_attribute(&parts.root, "data-theme", "sepia");
    assert_eq!(toggle_theme(&page.dom, &parts, &MemoryStore::new(), &config), Theme::Dark);
}
