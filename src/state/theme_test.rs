use super::*;

#[test]
fn default_is_light() {
    assert_eq!(Theme::default(), Theme::Light);
}

#[test]
fn parse_accepts_only_known_values() {
    assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
    assert_eq!(Theme::parse(" light "), Some(Theme::Light));
    assert_eq!(Theme::parse("Dark"), None);
    assert_eq!(Theme::parse(""), None);
}

#[test]
fn toggled_flips_between_two_states() {
    assert_eq!(Theme::Light.toggled(), Theme::Dark);
    assert_eq!(Theme::Dark.toggled(), Theme::Light);
    assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
}

#[test]
fn as_str_round_trips_through_parse() {
    for theme in [Theme::Light, Theme::Dark] {
        assert_eq!(Theme::parse(theme.as_str()), Some(theme));
    }
}

// =============================================================
// resolve_initial
// =============================================================

#[test]
fn stored_preference_wins_over_system_hint() {
    assert_eq!(resolve_initial(Some("light"), true), Theme::Light);
    assert_eq!(resolve_initial(Some("dark"), false), Theme::Dark);
}

#[test]
fn system_hint_used_without_stored_value() {
    assert_eq!(resolve_initial(None, true), Theme::Dark);
    assert_eq!(resolve_initial(None, false), Theme::Light);
}

#[test]
fn garbage_stored_value_falls_through() {
    assert_eq!(resolve_initial(Some("sepia"), true), Theme::Dark);
    assert_eq!(resolve_initial(Some("sepia"), false), Theme::Light);
}

#[test]
fn resolution_is_idempotent() {
    for stored in [None, Some("dark"), Some("light"), Some("x")] {
        for prefers_dark in [false, true] {
            assert_eq!(resolve_initial(stored, prefers_dark), resolve_initial(stored, prefers_dark));
        }
    }
}
