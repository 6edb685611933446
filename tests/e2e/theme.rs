//! End-to-end tests for theme switching

use crossterm::event::KeyCode;

use crate::common::harness::PageTestHarness;
use termfolio::theme::ThemeMode;

/// With nothing stored and no system hint, the page starts dark
#[test]
fn test_starts_dark_by_default() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();
    harness.render().unwrap();

    assert_eq!(harness.app().theme_mode(), ThemeMode::Dark);
    harness.assert_screen_contains("dark theme");
}

/// Pressing `t` flips the theme and announces it with a toast
#[test]
fn test_toggle_shows_toast_and_switches() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();
    harness.render().unwrap();

    harness.press(KeyCode::Char('t'));
    harness.render().unwrap();

    assert_eq!(harness.app().theme_mode(), ThemeMode::Light);
    harness.assert_screen_contains("Theme: light");
    harness.assert_screen_contains("light theme");

    // And back again
    harness.press(KeyCode::Char('t'));
    harness.render().unwrap();
    assert_eq!(harness.app().theme_mode(), ThemeMode::Dark);
}

/// A system preference change is ignored once the user has toggled
#[test]
fn test_system_change_ignored_after_user_toggle() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();

    // Still following the system: the change applies
    harness.app_mut().system_theme_changed(ThemeMode::Light);
    assert_eq!(harness.app().theme_mode(), ThemeMode::Light);

    // User takes over
    harness.press(KeyCode::Char('t'));
    assert_eq!(harness.app().theme_mode(), ThemeMode::Dark);

    harness.app_mut().system_theme_changed(ThemeMode::Light);
    assert_eq!(harness.app().theme_mode(), ThemeMode::Dark);
}

/// The toggle toast fades out on its own
#[test]
fn test_toggle_toast_auto_dismisses() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();

    harness.press(KeyCode::Char('t'));
    harness.render().unwrap();
    harness.assert_screen_contains("Theme: light");

    harness.advance(std::time::Duration::from_millis(5400));
    harness.render().unwrap();
    harness.assert_screen_not_contains("Theme: light");
}
