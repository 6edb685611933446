//! The hero typing effect
//!
//! Types and deletes each playlist entry in turn, forever. A state machine
//! with four phases; every tick mutates once and re-arms its own timer with
//! the delay the next phase wants, so typing, deleting and the two pauses
//! all run at their own cadence.

use std::time::{Duration, Instant};

use super::timer::Ticker;

/// Delay between typed characters
const TYPE_DELAY: Duration = Duration::from_millis(100);
/// Delay between deleted characters (deleting reads faster than typing)
const DELETE_DELAY: Duration = Duration::from_millis(50);
/// Hold the completed text before deleting
const PAUSE_AT_FULL: Duration = Duration::from_millis(2000);
/// Hold the empty line before typing the next entry
const PAUSE_AT_EMPTY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingPhase {
    Typing,
    PauseAtFull,
    Deleting,
    PauseAtEmpty,
}

#[derive(Debug)]
pub struct TypingEffect {
    playlist: Vec<String>,
    text_index: usize,
    /// Characters (not bytes) of the current entry shown
    char_index: usize,
    phase: TypingPhase,
    rendered: String,
    running: bool,
    ticker: Ticker,
}

impl TypingEffect {
    pub fn new(playlist: Vec<String>) -> Self {
        Self {
            playlist,
            text_index: 0,
            char_index: 0,
            phase: TypingPhase::Typing,
            rendered: String::new(),
            running: false,
            ticker: Ticker::new(),
        }
    }

    /// Begin the loop. Idempotent: a second call while running is a no-op,
    /// since a duplicate timer would corrupt the shared char index.
    pub fn start(&mut self, now: Instant) {
        if self.running || self.playlist.is_empty() {
            return;
        }
        self.running = true;
        self.ticker.arm(now, TYPE_DELAY);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The text currently shown
    pub fn display(&self) -> &str {
        &self.rendered
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.ticker.deadline()
    }

    fn current_text(&self) -> &str {
        &self.playlist[self.text_index]
    }

    fn current_len(&self) -> usize {
        self.current_text().chars().count()
    }

    fn render(&mut self) {
        let text: String = self.current_text().chars().take(self.char_index).collect();
        self.rendered = text;
    }

    fn type_one(&mut self) {
        self.char_index = (self.char_index + 1).min(self.current_len());
        self.render();
    }

    fn delete_one(&mut self) {
        self.char_index = self.char_index.saturating_sub(1);
        self.render();
    }

    /// Advance if the pending delay has elapsed
    pub fn tick(&mut self, now: Instant) {
        if !self.running || !self.ticker.fire(now) {
            return;
        }

        match self.phase {
            TypingPhase::Typing => {
                self.type_one();
                if self.char_index == self.current_len() {
                    self.phase = TypingPhase::PauseAtFull;
                    self.ticker.arm(now, PAUSE_AT_FULL);
                } else {
                    self.ticker.arm(now, TYPE_DELAY);
                }
            }
            TypingPhase::PauseAtFull => {
                // The pause ends with the first deletion
                self.phase = TypingPhase::Deleting;
                self.delete_one();
                self.after_delete(now);
            }
            TypingPhase::Deleting => {
                self.delete_one();
                self.after_delete(now);
            }
            TypingPhase::PauseAtEmpty => {
                self.phase = TypingPhase::Typing;
                self.type_one();
                self.ticker.arm(now, TYPE_DELAY);
            }
        }
    }

    fn after_delete(&mut self, now: Instant) {
        if self.char_index == 0 {
            self.text_index = (self.text_index + 1) % self.playlist.len();
            self.phase = TypingPhase::PauseAtEmpty;
            self.ticker.arm(now, PAUSE_AT_EMPTY);
        } else {
            self.ticker.arm(now, DELETE_DELAY);
        }
    }
}
