//! Falling-glyph background rain
//!
//! One drop per column, advancing a row per tick. A drop keeps falling past
//! the bottom edge and only resets to the top with a small per-tick
//! probability, which staggers the columns into an organic pattern instead
//! of a synchronized curtain. Resizes rebuild every column from scratch,
//! debounced so a drag-resize doesn't thrash the rebuild.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use rand::Rng;

use super::timer::Ticker;

/// Glyph alphabet the rain draws from
const GLYPHS: &[char] = &[
    'ｱ', 'ｲ', 'ｳ', 'ｴ', 'ｵ', 'ｶ', 'ｷ', 'ｸ', 'ｹ', 'ｺ', 'ﾊ', 'ﾋ', 'ﾌ', 'ﾍ', 'ﾎ', '0', '1', '2',
    '3', '4', '5', '6', '7', '8', '9', 'Z', 'X', '*', '+', '=',
];

/// Terminal cells per rain column (glyphs above are full-width)
pub const COLUMN_WIDTH: u16 = 2;

/// Glyphs kept behind the head for the fading trail
const TRAIL_LEN: usize = 8;

/// One falling drop and the glyphs it recently painted
#[derive(Debug, Clone)]
pub struct RainColumn {
    /// Current head row; keeps growing past the bottom until reset
    pub row: u16,
    /// Most recent glyphs, head first
    pub trail: VecDeque<char>,
}

#[derive(Debug)]
pub struct MatrixRain {
    columns: Vec<RainColumn>,
    width: u16,
    height: u16,
    interval: Duration,
    reset_probability: f64,
    ticker: Ticker,
    running: bool,
}

impl MatrixRain {
    pub fn new(interval_ms: u64, reset_probability: f64) -> Self {
        Self {
            columns: Vec::new(),
            width: 0,
            height: 0,
            interval: Duration::from_millis(interval_ms),
            // random_bool rejects probabilities outside [0, 1]
            reset_probability: reset_probability.clamp(0.0, 1.0),
            ticker: Ticker::new(),
            running: false,
        }
    }

    /// Size the surface and build the columns. Column count follows from the
    /// width; existing drop positions are discarded.
    pub fn resize<R: Rng>(&mut self, width: u16, height: u16, rng: &mut R) {
        self.width = width;
        self.height = height;
        let count = (width / COLUMN_WIDTH) as usize;
        self.columns = (0..count)
            .map(|_| RainColumn {
                // Stagger the initial fall so the first frames aren't a bar
                row: rng.random_range(0..height.max(1)),
                trail: VecDeque::with_capacity(TRAIL_LEN),
            })
            .collect();
    }

    pub fn start(&mut self, now: Instant) {
        if self.running {
            return;
        }
        self.running = true;
        self.ticker.arm(now, self.interval);
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.ticker.disarm();
    }

    pub fn columns(&self) -> &[RainColumn] {
        &self.columns
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.ticker.deadline()
    }

    /// Advance every column one row if the tick is due. Late ticks advance
    /// once and re-arm from now - missed frames are dropped, never replayed.
    pub fn tick<R: Rng>(&mut self, now: Instant, rng: &mut R) {
        if !self.running || !self.ticker.fire(now) {
            return;
        }

        for column in &mut self.columns {
            column.row = column.row.saturating_add(1);
            if column.trail.len() == TRAIL_LEN {
                column.trail.pop_back();
            }
            column.trail.push_front(GLYPHS[rng.random_range(0..GLYPHS.len())]);

            if column.row > self.height && rng.random_bool(self.reset_probability) {
                column.row = 0;
                column.trail.clear();
            }
        }

        self.ticker.arm(now, self.interval);
    }
}
