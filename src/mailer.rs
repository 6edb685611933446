//! Mail-client handoff
//!
//! The contact form has no backend: a validated submission is composed into
//! a `mailto:` URL and handed to the platform's default mail handler via the
//! system opener. Fire-and-forget - the opener is spawned detached and no
//! delivery confirmation exists.

use std::process::Command;

use crate::config::ContactConfig;

/// A composed contact message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub name: String,
    pub email: String,
    pub body: String,
}

/// Build the `mailto:` URL with recipient, subject and a structured body
pub fn compose_mailto(contact: &ContactConfig, mail: &MailMessage) -> String {
    let body = format!(
        "Name: {}\nEmail: {}\n\n{}",
        mail.name, mail.email, mail.body
    );
    format!(
        "mailto:{}?subject={}&body={}",
        contact.recipient,
        urlencoding::encode(&contact.subject),
        urlencoding::encode(&body)
    )
}

/// Destination of composed mail URLs. The production sink shells out to the
/// platform opener; tests substitute a recorder.
pub trait MailSink {
    fn deliver(&mut self, url: &str);
}

/// Hands URLs to the platform's default opener, fire-and-forget. Failures
/// are logged and swallowed; there is no recovery path for a missing opener.
pub struct SystemMailer;

impl MailSink for SystemMailer {
    fn deliver(&mut self, url: &str) {
        match opener_command(url).spawn() {
            Ok(_) => tracing::info!("mail handoff dispatched"),
            Err(err) => tracing::warn!("mail handoff failed: {}", err),
        }
    }
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "windows")]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", url]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}
