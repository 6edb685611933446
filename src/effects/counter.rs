//! Stat counter animation
//!
//! A stat card shows its final value as authored text ("42+", "12", "1.50").
//! On first viewport entry the magnitude is parsed back out and counted up
//! from zero in fixed steps, re-rendered in the authored format each step.
//! Text that doesn't parse as a number is left alone - no timer, no change.

use std::time::{Duration, Instant};

use super::timer::Ticker;

/// Total animation duration
const DURATION: Duration = Duration::from_millis(2000);
/// Number of equal steps
const STEPS: u32 = 50;

/// How the authored value renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterFormat {
    Integer,
    /// Integer with a trailing `+`
    PlusSuffixed,
    /// Two decimal places
    Decimal2,
}

impl CounterFormat {
    fn render(&self, value: f64) -> String {
        match self {
            CounterFormat::Integer => format!("{}", value.floor() as i64),
            CounterFormat::PlusSuffixed => format!("{}+", value.floor() as i64),
            CounterFormat::Decimal2 => format!("{:.2}", value),
        }
    }
}

#[derive(Debug)]
pub struct CounterAnimation {
    target: f64,
    format: CounterFormat,
    step: u32,
    value: f64,
    rendered: String,
    ticker: Ticker,
}

impl CounterAnimation {
    /// Parse the authored text. `None` means "skip the animation entirely":
    /// the caller leaves the element as-is and creates no timer.
    pub fn parse(text: &str) -> Option<(f64, CounterFormat)> {
        let trimmed = text.trim();
        let (digits, format) = if let Some(stripped) = trimmed.strip_suffix('+') {
            (stripped, CounterFormat::PlusSuffixed)
        } else if trimmed.contains('.') {
            (trimmed, CounterFormat::Decimal2)
        } else {
            (trimmed, CounterFormat::Integer)
        };
        let value: f64 = digits.parse().ok()?;
        Some((value, format))
    }

    /// Build and start a counter for the authored text, or `None` when the
    /// text is not numeric.
    pub fn start(text: &str, now: Instant) -> Option<Self> {
        let (target, format) = Self::parse(text)?;
        let mut ticker = Ticker::new();
        ticker.arm(now, DURATION / STEPS);
        Some(Self {
            target,
            format,
            step: 0,
            value: 0.0,
            rendered: format.render(0.0),
            ticker,
        })
    }

    /// The text to show right now
    pub fn display(&self) -> &str {
        &self.rendered
    }

    /// Current numeric magnitude (the gauge animations read this)
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_done(&self) -> bool {
        self.step >= STEPS
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.ticker.deadline()
    }

    /// Advance one step if due. The final step renders the exact target and
    /// cancels the timer for good.
    pub fn tick(&mut self, now: Instant) {
        if self.is_done() || !self.ticker.fire(now) {
            return;
        }

        self.step += 1;
        self.value = self.target * f64::from(self.step) / f64::from(STEPS);
        self.rendered = self.format.render(self.value);

        if self.is_done() {
            self.ticker.disarm();
        } else {
            self.ticker.arm(now, DURATION / STEPS);
        }
    }
}
