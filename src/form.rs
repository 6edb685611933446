//! Contact form state and validation
//!
//! Field-level validation runs when focus leaves a field; submission
//! re-validates everything, then simulates the latency of a real send before
//! handing the composed message to the mail sink. The pending state (submit
//! disabled, label swapped) is the contract; the fixed delay below stands in
//! for a real request's completion signal.

use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::effects::timer::Ticker;
use crate::mailer::MailMessage;

/// Simulated network latency of a submission
pub const SEND_DELAY: Duration = Duration::from_millis(2000);

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

/// The form's fields, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Name,
    Email,
    Message,
}

impl FieldId {
    pub const ALL: [FieldId; 3] = [FieldId::Name, FieldId::Email, FieldId::Message];

    pub fn label(&self) -> &'static str {
        match self {
            FieldId::Name => "Name",
            FieldId::Email => "Email",
            FieldId::Message => "Message",
        }
    }

    fn is_email(&self) -> bool {
        matches!(self, FieldId::Email)
    }
}

/// Per-field value plus the inline error attached to it
#[derive(Debug, Clone, Default)]
pub struct FieldState {
    pub value: String,
    pub error: Option<ValidationError>,
}

/// Submission progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    /// Submit disabled, label swapped, waiting out the simulated latency
    Sending,
}

/// Result of a `submit` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; inline errors updated
    Invalid,
    /// Entered the pending state
    Started,
    /// Ignored: a submission is already in flight
    Busy,
}

#[derive(Debug)]
pub struct ContactForm {
    name: FieldState,
    email: FieldState,
    message: FieldState,
    state: SubmitState,
    ticker: Ticker,
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            name: FieldState::default(),
            email: FieldState::default(),
            message: FieldState::default(),
            state: SubmitState::Idle,
            ticker: Ticker::new(),
        }
    }

    pub fn field(&self, id: FieldId) -> &FieldState {
        match id {
            FieldId::Name => &self.name,
            FieldId::Email => &self.email,
            FieldId::Message => &self.message,
        }
    }

    fn field_mut(&mut self, id: FieldId) -> &mut FieldState {
        match id {
            FieldId::Name => &mut self.name,
            FieldId::Email => &mut self.email,
            FieldId::Message => &mut self.message,
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn is_sending(&self) -> bool {
        self.state == SubmitState::Sending
    }

    /// Edit the field value; editing clears the field's inline error until
    /// the next validation pass.
    pub fn push_char(&mut self, id: FieldId, ch: char) {
        if self.is_sending() {
            return;
        }
        let field = self.field_mut(id);
        field.value.push(ch);
        field.error = None;
    }

    pub fn pop_char(&mut self, id: FieldId) {
        if self.is_sending() {
            return;
        }
        let field = self.field_mut(id);
        field.value.pop();
        field.error = None;
    }

    /// Validate a single field and attach/clear its inline error.
    /// Required runs first; the email shape check only applies to a
    /// non-empty email field.
    pub fn validate_field(&mut self, id: FieldId) -> Result<(), ValidationError> {
        let field = self.field_mut(id);
        let trimmed = field.value.trim();

        let result = if trimmed.is_empty() {
            Err(ValidationError::Required)
        } else if id.is_email() && !EMAIL_RE.is_match(trimmed) {
            Err(ValidationError::InvalidEmail)
        } else {
            Ok(())
        };

        field.error = result.clone().err();
        result
    }

    /// Validate everything; true when the form is submittable
    pub fn validate_all(&mut self) -> bool {
        let mut ok = true;
        for id in FieldId::ALL {
            ok &= self.validate_field(id).is_ok();
        }
        ok
    }

    /// Submit: validate, then enter the pending state
    pub fn submit(&mut self, now: Instant) -> SubmitOutcome {
        if self.is_sending() {
            return SubmitOutcome::Busy;
        }
        if !self.validate_all() {
            return SubmitOutcome::Invalid;
        }
        self.state = SubmitState::Sending;
        self.ticker.arm(now, SEND_DELAY);
        tracing::info!("contact form submission started");
        SubmitOutcome::Started
    }

    /// Complete the pending submission once its delay has elapsed, yielding
    /// the composed message for the mail handoff. Fields reset on success.
    pub fn tick(&mut self, now: Instant) -> Option<MailMessage> {
        if !self.is_sending() || !self.ticker.fire(now) {
            return None;
        }

        let mail = MailMessage {
            name: self.name.value.trim().to_string(),
            email: self.email.value.trim().to_string(),
            body: self.message.value.trim().to_string(),
        };

        self.name = FieldState::default();
        self.email = FieldState::default();
        self.message = FieldState::default();
        self.state = SubmitState::Idle;

        Some(mail)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.ticker.deadline()
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}
