//! Incremental contact fetch
//!
//! Issues one bounded range query per run and normalizes each row into a
//! canonical [`ContactRecord`].
//!
//! Invariants enforced:
//! - The batch is ordered by (submission time descending, id descending),
//!   independent of how the store represents the time column
//! - The query is restartable: no cursor state survives a call
//! - The connection is scoped to the call and released on every exit path
//! - Store failures never propagate: they are logged and become an empty
//!   batch, so an unattended run sends nothing rather than crashing

use anyhow::{Context, Result};
use chrono::DateTime;
use rusqlite::types::ValueRef;
use rusqlite::Connection;

use crate::record::{ContactRecord, SubmittedAt};
use crate::window::CheckWindow;

/// Day-normalized view of the submission-time column, usable on either
/// side of a text-date comparison. Numeric values are Unix seconds and
/// must be rendered as datetime text before comparing against the
/// `YYYY-MM-DD` bound; raw text is compared as stored.
const SUBMISSION_TIME: &str = "CASE typeof(dateofcontact) \
     WHEN 'integer' THEN datetime(dateofcontact, 'unixepoch') \
     WHEN 'real' THEN datetime(dateofcontact, 'unixepoch') \
     ELSE dateofcontact END";

/// Fetch contacts submitted inside the window from the store at `database`.
///
/// Opens a fresh connection for the call. Any connectivity or query
/// failure is logged to stderr and converted into an empty batch.
pub fn fetch_new_contacts(database: &str, window: &CheckWindow) -> Vec<ContactRecord> {
    match open_and_fetch(database, window) {
        Ok(batch) => batch,
        Err(e) => {
            eprintln!("Database error: {e:#}");
            Vec::new()
        }
    }
}

fn open_and_fetch(database: &str, window: &CheckWindow) -> Result<Vec<ContactRecord>> {
    let conn = Connection::open(database)
        .with_context(|| format!("failed to open database: {database}"))?;
    fetch_since(&conn, window)
}

/// Run the bounded range query on an existing connection.
///
/// Separated from [`fetch_new_contacts`] so tests can drive an in-memory
/// store; the wrapper owns connection lifecycle and error recovery.
pub fn fetch_since(conn: &Connection, window: &CheckWindow) -> Result<Vec<ContactRecord>> {
    let sql = format!(
        "SELECT id, username, email, phone, message, dateofcontact \
         FROM contact_form_submissions \
         WHERE {time} >= ?1 \
         ORDER BY {time} DESC, id DESC",
        time = SUBMISSION_TIME,
    );

    let mut stmt = conn
        .prepare(&sql)
        .context("failed to prepare contact query")?;

    let rows = stmt
        .query_map(rusqlite::params![window.sql_bound()], |row| {
            let submitted = submitted_at(row.get_ref(5)?);
            Ok(ContactRecord::new(
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                submitted,
            ))
        })
        .context("failed to execute contact query")?;

    let mut batch = Vec::new();
    for row in rows {
        batch.push(row.context("failed to read contact row")?);
    }
    Ok(batch)
}

/// Tag the raw column value at the store boundary.
///
/// Text is preserved verbatim; integer and real values are Unix seconds.
/// NULL (and any unconvertible value) yields `None`; the row is still
/// included with an empty date.
fn submitted_at(value: ValueRef<'_>) -> Option<SubmittedAt> {
    match value {
        ValueRef::Null => None,
        ValueRef::Text(raw) => Some(SubmittedAt::Text(
            String::from_utf8_lossy(raw).into_owned(),
        )),
        ValueRef::Integer(secs) => DateTime::from_timestamp(secs, 0).map(SubmittedAt::Temporal),
        ValueRef::Real(secs) => DateTime::from_timestamp(secs as i64, 0).map(SubmittedAt::Temporal),
        ValueRef::Blob(_) => None,
    }
}
