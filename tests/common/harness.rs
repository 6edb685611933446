//! Test harness driving the full app against a ratatui `TestBackend`
//!
//! Time is simulated: the harness owns a fake "now" and advances it in small
//! steps, ticking the app the way the main loop would. Mail handoffs are
//! captured by a recording sink instead of spawning the platform opener.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::backend::TestBackend;
use ratatui::layout::Position;
use ratatui::Terminal;

use termfolio::app::App;
use termfolio::config::Config;
use termfolio::mailer::MailSink;
use termfolio::prefs::MemoryPreferences;
use termfolio::theme::{SystemTheme, ThemeMode};

/// Mail sink that records every composed URL
struct RecordingMailer {
    urls: Rc<RefCell<Vec<String>>>,
}

impl MailSink for RecordingMailer {
    fn deliver(&mut self, url: &str) {
        self.urls.borrow_mut().push(url.to_string());
    }
}

/// System theme hint fixed to one answer
struct FixedSystem(Option<ThemeMode>);

impl SystemTheme for FixedSystem {
    fn preferred_mode(&self) -> Option<ThemeMode> {
        self.0
    }
}

pub struct PageTestHarness {
    terminal: Terminal<TestBackend>,
    app: App,
    now: Instant,
    mails: Rc<RefCell<Vec<String>>>,
}

impl PageTestHarness {
    pub fn new(width: u16, height: u16) -> Result<Self> {
        Self::with_config(width, height, Config::default())
    }

    pub fn with_config(width: u16, height: u16, config: Config) -> Result<Self> {
        super::tracing::init_tracing_from_env();

        let mails = Rc::new(RefCell::new(Vec::new()));
        let now = Instant::now();
        let app = App::new(
            config,
            Box::new(MemoryPreferences::default()),
            &FixedSystem(None),
            Box::new(RecordingMailer {
                urls: Rc::clone(&mails),
            }),
            width,
            height,
            now,
        );
        let terminal = Terminal::new(TestBackend::new(width, height))?;

        Ok(Self {
            terminal,
            app,
            now,
            mails,
        })
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    /// Every mail URL handed to the sink so far
    pub fn sent_mail(&self) -> Vec<String> {
        self.mails.borrow().clone()
    }

    pub fn render(&mut self) -> Result<()> {
        let app = &mut self.app;
        self.terminal.draw(|frame| app.render(frame))?;
        Ok(())
    }

    /// Advance simulated time, ticking the app every 10ms of it so deadlines
    /// fire in order just as they would under the real loop
    pub fn advance(&mut self, duration: Duration) {
        let end = self.now + duration;
        while self.now < end {
            self.now = (self.now + Duration::from_millis(10)).min(end);
            self.app.advance(self.now);
        }
    }

    pub fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let event = Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        });
        self.app.handle_event(&event, self.now);
    }

    pub fn press(&mut self, code: KeyCode) {
        self.send_key(code, KeyModifiers::NONE);
    }

    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.press(KeyCode::Char(ch));
        }
    }

    pub fn click(&mut self, x: u16, y: u16) {
        let event = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        });
        self.app.handle_event(&event, self.now);
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal.backend_mut().resize(width, height);
        self.app
            .handle_event(&Event::Resize(width, height), self.now);
    }

    /// The rendered screen as text, one line per terminal row
    pub fn screen_text(&self) -> String {
        let buffer = self.terminal.backend().buffer();
        let area = *buffer.area();
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                match buffer.cell(Position::new(x, y)) {
                    Some(cell) => out.push_str(cell.symbol()),
                    None => out.push(' '),
                }
            }
            out.push('\n');
        }
        out
    }

    pub fn assert_screen_contains(&self, needle: &str) {
        let screen = self.screen_text();
        assert!(
            screen.contains(needle),
            "expected screen to contain {:?}\nscreen:\n{}",
            needle,
            screen
        );
    }

    pub fn assert_screen_not_contains(&self, needle: &str) {
        let screen = self.screen_text();
        assert!(
            !screen.contains(needle),
            "expected screen to NOT contain {:?}\nscreen:\n{}",
            needle,
            screen
        );
    }
}
