//! Digest delivery over SMTP
//!
//! One authenticated STARTTLS session per call, opened immediately before
//! the send and released immediately after. A single message is addressed
//! to all recipients: it succeeds or fails atomically, with no retry and
//! no partial-send semantics.

use anyhow::{Context, Result};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::config::SmtpSettings;

/// An ordered, deduplicated set of recipient addresses.
///
/// Input may be a single address or a comma-separated list; the shape is
/// normalized here, at the boundary, so nothing downstream branches on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipients(Vec<String>);

impl Recipients {
    /// Parse a single address or comma-separated list. Whitespace around
    /// each address is trimmed, empty segments are dropped, and duplicates
    /// keep their first-seen position.
    pub fn parse(input: &str) -> Self {
        let mut seen = std::collections::HashSet::new();
        let mut addresses = Vec::new();
        for part in input.split(',') {
            let address = part.trim();
            if address.is_empty() {
                continue;
            }
            if seen.insert(address.to_string()) {
                addresses.push(address.to_string());
            }
        }
        Recipients(addresses)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Build the HTML digest message addressed to every recipient.
pub fn build_message(
    from: &str,
    recipients: &Recipients,
    subject: &str,
    html: &str,
) -> Result<Message> {
    let mut builder = Message::builder()
        .from(
            from.parse::<Mailbox>()
                .with_context(|| format!("invalid sender address: {from}"))?,
        )
        .subject(subject);

    for address in recipients.iter() {
        builder = builder.to(address
            .parse::<Mailbox>()
            .with_context(|| format!("invalid recipient address: {address}"))?);
    }

    builder
        .header(ContentType::TEXT_HTML)
        .body(html.to_string())
        .context("failed to build digest message")
}

/// Deliver the rendered digest once.
///
/// Establishes one authenticated session scoped to this call. Transport
/// failures (authentication rejected, connection refused, protocol
/// errors) surface as `Err`; the caller logs and does not escalate.
pub fn send_report(
    smtp: &SmtpSettings,
    recipients: &Recipients,
    subject: &str,
    html: &str,
) -> Result<()> {
    if recipients.is_empty() {
        anyhow::bail!("no recipients to notify");
    }

    let message = build_message(&smtp.from_email, recipients, subject, html)?;

    let mailer = SmtpTransport::starttls_relay(&smtp.server)
        .with_context(|| format!("failed to configure mail relay {}", smtp.server))?
        .port(smtp.port)
        .credentials(Credentials::new(
            smtp.username.clone(),
            smtp.password.clone(),
        ))
        .build();

    mailer
        .send(&message)
        .with_context(|| format!("failed to send mail via {}:{}", smtp.server, smtp.port))?;

    Ok(())
}
