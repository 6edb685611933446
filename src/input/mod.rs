//! Input pipeline
//!
//! Translates crossterm events into high-level actions. Translation is a
//! pure function of the event and the current focus context, so keymaps are
//! testable without a live terminal.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Where keystrokes are routed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// Browsing the page
    Page,
    /// Editing a contact form field
    Form,
}

/// High-level user intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleTheme,
    ToggleMenu,
    NextSection,
    PrevSection,
    /// 1-based nav index
    JumpSection(usize),
    ScrollUp(usize),
    ScrollDown(usize),
    PageUp,
    PageDown,
    Home,
    End,
    /// Enter on the page: engage the contact form when it is active
    Activate,
    FocusNextField,
    FocusPrevField,
    InsertChar(char),
    Backspace,
    Submit,
    LeaveForm,
    Click { x: u16, y: u16 },
}

/// Map an event to an action, or `None` for events we ignore
pub fn translate(event: &Event, context: InputContext) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match context {
            InputContext::Page => translate_page_key(key),
            InputContext::Form => translate_form_key(key),
        },
        Event::Mouse(mouse) => translate_mouse(mouse),
        _ => None,
    }
}

fn translate_page_key(key: &KeyEvent) -> Option<Action> {
    // Ctrl+C quits from anywhere
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('t') => Some(Action::ToggleTheme),
        KeyCode::Char('m') => Some(Action::ToggleMenu),
        KeyCode::Tab => Some(Action::NextSection),
        KeyCode::BackTab => Some(Action::PrevSection),
        KeyCode::Char(c @ '1'..='9') => {
            Some(Action::JumpSection(c.to_digit(10).unwrap_or(1) as usize))
        }
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp(1)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown(1)),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Home | KeyCode::Char('g') => Some(Action::Home),
        KeyCode::End | KeyCode::Char('G') => Some(Action::End),
        KeyCode::Enter => Some(Action::Activate),
        _ => None,
    }
}

fn translate_form_key(key: &KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Esc => Some(Action::LeaveForm),
        KeyCode::Tab | KeyCode::Down => Some(Action::FocusNextField),
        KeyCode::BackTab | KeyCode::Up => Some(Action::FocusPrevField),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char(c) => Some(Action::InsertChar(c)),
        _ => None,
    }
}

fn translate_mouse(mouse: &MouseEvent) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Action::Click {
            x: mouse.column,
            y: mouse.row,
        }),
        MouseEventKind::ScrollUp => Some(Action::ScrollUp(3)),
        MouseEventKind::ScrollDown => Some(Action::ScrollDown(3)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn key_with(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_page_keys() {
        assert_eq!(
            translate(&key(KeyCode::Char('t')), InputContext::Page),
            Some(Action::ToggleTheme)
        );
        assert_eq!(
            translate(&key(KeyCode::Char('3')), InputContext::Page),
            Some(Action::JumpSection(3))
        );
        assert_eq!(
            translate(&key(KeyCode::Char('q')), InputContext::Page),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_form_swallows_letter_keys() {
        // 'q' types into the field instead of quitting
        assert_eq!(
            translate(&key(KeyCode::Char('q')), InputContext::Form),
            Some(Action::InsertChar('q'))
        );
        // Ctrl+C still quits
        assert_eq!(
            translate(
                &key_with(KeyCode::Char('c'), KeyModifiers::CONTROL),
                InputContext::Form
            ),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_key_release_is_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(translate(&release, InputContext::Page), None);
    }

    #[test]
    fn test_mouse_click_and_wheel() {
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 5,
            row: 7,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            translate(&click, InputContext::Page),
            Some(Action::Click { x: 5, y: 7 })
        );

        let wheel = Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            translate(&wheel, InputContext::Form),
            Some(Action::ScrollDown(3))
        );
    }
}
