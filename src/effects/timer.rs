//! Shared deadline plumbing for the effect state machines

use std::time::{Duration, Instant};

/// A single re-armable deadline.
///
/// `fire` consumes the deadline when it has passed; the owner re-arms with
/// whatever delay its state machine wants next. This is the self-rescheduling
/// timer shape: the post-tick delay can differ every time.
#[derive(Debug, Clone, Default)]
pub struct Ticker {
    next: Option<Instant>,
}

impl Ticker {
    pub fn new() -> Self {
        Self { next: None }
    }

    /// Arm (or re-arm) the deadline at `now + delay`
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.next = Some(now + delay);
    }

    pub fn disarm(&mut self) {
        self.next = None;
    }

    /// True while a deadline is pending
    pub fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    /// The pending deadline, used by the app loop to bound its sleep
    pub fn deadline(&self) -> Option<Instant> {
        self.next
    }

    /// Consume the deadline if it has passed. Returns false when not armed
    /// or not yet due.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.next {
            Some(deadline) if now >= deadline => {
                self.next = None;
                true
            }
            _ => false,
        }
    }
}

/// The earliest of any number of optional deadlines
pub fn earliest_deadline(deadlines: impl IntoIterator<Item = Option<Instant>>) -> Option<Instant> {
    deadlines.into_iter().flatten().min()
}
