use super::*;
use crate::dom::MemoryDom;

#[test]
fn writes_year_into_footer() {
    let dom = MemoryDom::new();
    let el = dom.append(&dom.body_element(), "span", Some("year"), &[]);
    assert!(install_year(&dom, &FooterConfig::default(), 2026));
    assert_eq!(dom.text(&el), "2026");
}

#[test]
fn missing_footer_is_skipped() {
    let dom = MemoryDom::new();
    assert!(!install_year(&dom, &FooterConfig::default(), 2026));
}
