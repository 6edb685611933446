//! End-to-end tests for the navigation bar and section scrolling

use std::time::Duration;

use crossterm::event::KeyCode;

use crate::common::harness::PageTestHarness;
use termfolio::page::SectionId;

#[test]
fn test_nav_bar_lists_sections_with_hero_active() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();
    harness.render().unwrap();

    for title in ["Home", "About", "Skills", "Projects", "Contact"] {
        harness.assert_screen_contains(title);
    }
    assert_eq!(harness.app().active_section(), SectionId::Hero);
}

#[test]
fn test_tab_glides_to_the_next_section() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();

    harness.press(KeyCode::Tab);
    // The scroll is animated, not a jump: partway through we are gliding
    assert_ne!(harness.app().active_section(), SectionId::About);

    harness.advance(Duration::from_millis(1000));
    harness.render().unwrap();
    assert_eq!(harness.app().active_section(), SectionId::About);
}

#[test]
fn test_clicking_a_nav_entry_scrolls_to_its_section() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();
    // First render populates the click targets
    harness.render().unwrap();

    // " ~ " sigil, then " Home " (cols 3-8), then " About " (cols 9-15)
    harness.click(10, 0);
    harness.advance(Duration::from_millis(1000));
    harness.render().unwrap();

    assert_eq!(harness.app().active_section(), SectionId::About);
}

#[test]
fn test_number_key_jumps_to_section() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();

    harness.press(KeyCode::Char('7'));
    harness.advance(Duration::from_millis(2000));
    harness.render().unwrap();

    assert_eq!(harness.app().active_section(), SectionId::Contact);
    harness.assert_screen_contains("Send message");
}

#[test]
fn test_active_section_follows_manual_scrolling() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();

    for _ in 0..14 {
        harness.press(KeyCode::Down);
    }
    assert_eq!(harness.app().active_section(), SectionId::About);

    harness.press(KeyCode::Home);
    assert_eq!(harness.app().active_section(), SectionId::Hero);
}

#[test]
fn test_narrow_terminal_collapses_into_a_menu() {
    let mut harness = PageTestHarness::new(60, 24).unwrap();
    harness.render().unwrap();
    harness.assert_screen_contains("Menu");
    harness.assert_screen_not_contains("Achievements");

    harness.press(KeyCode::Char('m'));
    harness.render().unwrap();
    harness.assert_screen_contains("1. Home");
    harness.assert_screen_contains("3. Skills");

    // Selecting an entry closes the menu and glides there
    harness.press(KeyCode::Char('3'));
    harness.advance(Duration::from_millis(1000));
    harness.render().unwrap();
    assert_eq!(harness.app().active_section(), SectionId::Skills);
    harness.assert_screen_not_contains("1. Home");
}

#[test]
fn test_quit_closes_the_menu_first() {
    let mut harness = PageTestHarness::new(60, 24).unwrap();

    harness.press(KeyCode::Char('m'));
    harness.press(KeyCode::Char('q'));
    assert!(!harness.app().should_quit());

    harness.press(KeyCode::Char('q'));
    assert!(harness.app().should_quit());
}
