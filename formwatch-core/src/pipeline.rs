//! Run orchestration
//!
//! One pass through four linear states: compute window, fetch, render,
//! notify. An empty batch stops the run before rendering; nothing loops
//! back and nothing persists between runs, so each invocation is an
//! independent batch check. Overlapping invocations may both observe the
//! same window and double-notify: the rolling lookback carries no cursor
//! and no lock.

use chrono::{DateTime, Utc};

use crate::config::Settings;
use crate::window::CheckWindow;
use crate::{fetch, notify, render};

/// Terminal state of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The window held no new submissions; render and notify were skipped.
    NoNewContacts { window: CheckWindow },
    /// The digest was delivered.
    Sent { count: usize },
    /// The digest was rendered but delivery failed; the failure is logged
    /// and not escalated.
    SendFailed { count: usize, error: String },
}

/// Subject line for a digest of `count` submissions.
pub fn subject_for(count: usize) -> String {
    format!("New Contact Form Submissions - {count} New Contact(s)")
}

/// Execute one check: fetch submissions newer than the lookback window
/// and mail the digest when the batch is non-empty.
///
/// `now` is injected by the caller; the pipeline derives nothing else
/// from ambient state. Emits one status line per phase.
pub fn run_check(settings: &Settings, now: DateTime<Utc>) -> RunOutcome {
    let window = CheckWindow::compute(now, settings.check_interval_hours);
    println!("Checking for contacts since: {}", window.sql_bound());

    let contacts = fetch::fetch_new_contacts(&settings.database_url, &window);
    if contacts.is_empty() {
        println!("No new contacts found.");
        return RunOutcome::NoNewContacts { window };
    }
    println!("Found {} new contact(s)", contacts.len());

    let report = match render::render_html_report(&contacts) {
        Some(report) => report,
        // Unreachable with a non-empty batch; kept as the explicit
        // no-document signal rather than an assertion.
        None => return RunOutcome::NoNewContacts { window },
    };

    let subject = subject_for(report.count);
    match notify::send_report(&settings.smtp, &settings.recipients, &subject, &report.html) {
        Ok(()) => {
            println!(
                "Email sent successfully to {} recipient(s)",
                settings.recipients.len()
            );
            RunOutcome::Sent {
                count: report.count,
            }
        }
        Err(e) => {
            eprintln!("Failed to send email: {e:#}");
            RunOutcome::SendFailed {
                count: report.count,
                error: format!("{e:#}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_names_the_count() {
        assert_eq!(
            subject_for(3),
            "New Contact Form Submissions - 3 New Contact(s)"
        );
    }
}
