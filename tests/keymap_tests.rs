// Host-side tests for keyboard and button mapping.
// The main crate is wasm-only, so we include the pure-Rust module directly.

mod keymap {
    include!("../src/events/keymap.rs");
}

use keymap::*;

#[test]
fn arrows_map_to_navigation() {
    assert_eq!(nav_for_key("ArrowLeft"), Some(NavCommand::Previous));
    assert_eq!(nav_for_key("ArrowRight"), Some(NavCommand::Next));
}

#[test]
fn other_keys_are_ignored() {
    for key in ["ArrowUp", "ArrowDown", " ", "Enter", "arrowleft", "a", ""] {
        assert_eq!(nav_for_key(key), None, "{key:?}");
    }
}

#[test]
fn buttons_have_distinct_ids() {
    assert_eq!(button_id(NavCommand::Previous), "carousel-prev");
    assert_eq!(button_id(NavCommand::Next), "carousel-next");
}
