//! End-to-end tests for the contact form

use std::time::Duration;

use crossterm::event::KeyCode;

use crate::common::harness::PageTestHarness;

/// Scroll to the bottom and put focus into the form
fn engage_form(harness: &mut PageTestHarness) {
    harness.press(KeyCode::End);
    harness.render().unwrap();
    harness.press(KeyCode::Enter);
}

#[test]
fn test_submit_empty_form_shows_errors() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();
    engage_form(&mut harness);

    // Enter submits while a field is focused
    harness.press(KeyCode::Enter);
    harness.render().unwrap();

    harness.assert_screen_contains("Please fix the errors in the form");
    harness.assert_screen_contains("This field is required");
    assert!(harness.sent_mail().is_empty());
}

#[test]
fn test_email_without_tld_is_rejected_on_blur() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();
    engage_form(&mut harness);

    harness.type_text("Ada");
    harness.press(KeyCode::Tab);
    harness.type_text("a@b");
    // Leaving the field validates it
    harness.press(KeyCode::Tab);
    harness.render().unwrap();

    harness.assert_screen_contains("Please enter a valid email address");
}

#[test]
fn test_valid_submission_hands_off_to_mail_sink() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();
    engage_form(&mut harness);

    harness.type_text("Ada");
    harness.press(KeyCode::Tab);
    harness.type_text("ada@example.com");
    harness.press(KeyCode::Tab);
    harness.type_text("Hello from the terminal");
    harness.press(KeyCode::Enter);

    // Pending state: control disabled with swapped label, nothing sent yet
    harness.render().unwrap();
    harness.assert_screen_contains("[ Sending... ]");
    harness.advance(Duration::from_millis(1000));
    assert!(harness.sent_mail().is_empty());

    // The simulated latency elapses: handoff plus success toast
    harness.advance(Duration::from_millis(1100));
    harness.render().unwrap();

    let sent = harness.sent_mail();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].starts_with("mailto:rae@example.dev?subject="));
    assert!(sent[0].contains("Name%3A%20Ada"));
    assert!(sent[0].contains("ada%40example.com"));

    harness.assert_screen_contains("Message sent!");
    // Fields are cleared for the next message
    harness.assert_screen_not_contains("ada@example.com");
    harness.assert_screen_contains("[ Send message ]");
}

#[test]
fn test_escape_leaves_the_form() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();
    engage_form(&mut harness);

    harness.type_text("q");
    harness.press(KeyCode::Esc);
    harness.render().unwrap();

    // Back in page context: q would now quit, and the blur validated the
    // field it left (name is non-empty, so no error)
    harness.assert_screen_not_contains("This field is required");
    harness.assert_screen_contains("t theme");
}

#[test]
fn test_typed_letters_go_into_the_field_not_the_page() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();
    engage_form(&mut harness);

    // 't' must not toggle the theme while the form is focused
    harness.type_text("tq");
    harness.render().unwrap();

    assert_eq!(harness.app().theme_mode(), termfolio::theme::ThemeMode::Dark);
    assert!(!harness.app().should_quit());
    harness.assert_screen_contains("tq");
}
