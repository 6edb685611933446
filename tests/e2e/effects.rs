//! End-to-end tests for the timed visual effects

use std::time::Duration;

use crossterm::event::KeyCode;

use crate::common::harness::PageTestHarness;
use termfolio::config::Config;

/// The hero line types itself out character by character
#[test]
fn test_typing_effect_progresses_over_time() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();

    harness.render().unwrap();
    harness.assert_screen_not_contains("I build fast");

    // 5 ticks at 100ms each: the first five characters are out
    harness.advance(Duration::from_millis(500));
    harness.render().unwrap();
    harness.assert_screen_contains("I bui");
    harness.assert_screen_not_contains("I build fast, reliable software.");

    // Enough time for the whole first entry
    harness.advance(Duration::from_millis(2800));
    harness.render().unwrap();
    harness.assert_screen_contains("I build fast, reliable software.");
}

/// With reduced motion the typed line renders complete from the first frame
#[test]
fn test_reduced_motion_skips_the_animation() {
    let mut config = Config::default();
    config.effects.reduced_motion = true;
    let mut harness = PageTestHarness::with_config(80, 24, config).unwrap();

    harness.render().unwrap();
    harness.assert_screen_contains("I build fast, reliable software.");
}

/// Stat counters start at zero on first visibility and land on the authored
/// values in their authored formats
#[test]
fn test_stat_counters_run_on_first_visibility() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();
    harness.render().unwrap();
    // Stats are far below the fold; the counters have not started
    harness.assert_screen_not_contains("Projects shipped");

    harness.press(KeyCode::End);
    harness.render().unwrap();
    harness.assert_screen_contains("Projects shipped");
    harness.assert_screen_contains("0+");

    harness.advance(Duration::from_millis(2100));
    harness.render().unwrap();
    harness.assert_screen_contains("42+");
    harness.assert_screen_contains("12");
    harness.assert_screen_contains("1.50");
}

/// A stat whose text is not numeric is left untouched
#[test]
fn test_non_numeric_stat_is_left_as_is() {
    let mut config = Config::default();
    config.stats[0].value = "N/A".to_string();
    let mut harness = PageTestHarness::with_config(80, 24, config).unwrap();

    harness.press(KeyCode::End);
    harness.advance(Duration::from_millis(2100));
    harness.render().unwrap();
    harness.assert_screen_contains("N/A");
}

/// The rain backdrop paints glyphs into the otherwise-empty hero rows
#[test]
fn test_rain_paints_the_hero_backdrop() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();

    harness.advance(Duration::from_millis(300));
    harness.render().unwrap();

    // Hero page rows 0..12 sit on screen rows 1..13; rows 3, 4 and 6 hold
    // the name, tagline and typed line, the rest belong to the rain
    let screen = harness.screen_text();
    let lines: Vec<&str> = screen.lines().collect();
    let painted = [1usize, 2, 5, 7, 8, 9, 10, 11, 12]
        .iter()
        .any(|&row| lines[row].trim_end_matches([' ', '│', '█']).trim() != "");
    assert!(painted, "no rain glyphs on screen:\n{}", screen);
}

/// Resizing rebuilds the rain after the debounce and keeps rendering
#[test]
fn test_resize_is_debounced_and_survives() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();
    harness.advance(Duration::from_millis(100));

    harness.resize(100, 30);
    // Before the debounce expires nothing has broken
    harness.render().unwrap();

    harness.advance(Duration::from_millis(300));
    harness.render().unwrap();
    harness.assert_screen_contains("Rae Calloway");
}
