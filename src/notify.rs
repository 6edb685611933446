//! Transient toast notifications
//!
//! Every `show` produces an independent toast - no cap, no dedup. A toast
//! auto-dismisses after a fixed delay unless clicked first; dismissal runs in
//! two phases so the fade-out can render before the entry disappears.

use std::time::{Duration, Instant};

use crate::effects::timer::earliest_deadline;

/// Visible lifetime before auto-dismiss begins
const SHOW_FOR: Duration = Duration::from_millis(5000);
/// Fade-out phase before the toast is removed outright
const HIDE_FOR: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Slid in, fully shown
    Visible,
    /// Fading out; removed when the phase deadline passes
    Hiding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ToastId(u64);

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub kind: ToastKind,
    pub created_at: Instant,
    pub phase: ToastPhase,
    /// When the current phase ends
    deadline: Instant,
}

#[derive(Debug, Default)]
pub struct Notifications {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a toast and schedule its auto-dismiss
    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind, now: Instant) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        let message = message.into();
        tracing::debug!(?kind, %message, "toast");
        self.toasts.push(Toast {
            id,
            message,
            kind,
            created_at: now,
            phase: ToastPhase::Visible,
            deadline: now + SHOW_FOR,
        });
        id
    }

    /// Dismiss on user click: skips straight to the fade-out
    pub fn dismiss(&mut self, id: ToastId, now: Instant) {
        if let Some(toast) = self.toasts.iter_mut().find(|t| t.id == id) {
            if toast.phase == ToastPhase::Visible {
                toast.phase = ToastPhase::Hiding;
                toast.deadline = now + HIDE_FOR;
            }
        }
    }

    /// Advance phase transitions whose deadlines have passed
    pub fn tick(&mut self, now: Instant) {
        for toast in &mut self.toasts {
            if toast.phase == ToastPhase::Visible && now >= toast.deadline {
                toast.phase = ToastPhase::Hiding;
                toast.deadline = now + HIDE_FOR;
            }
        }
        self.toasts
            .retain(|t| !(t.phase == ToastPhase::Hiding && now >= t.deadline));
    }

    /// Toasts to render, oldest first
    pub fn visible(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Soonest pending phase transition, for the app loop's sleep bound
    pub fn next_deadline(&self) -> Option<Instant> {
        earliest_deadline(self.toasts.iter().map(|t| Some(t.deadline)))
    }
}
