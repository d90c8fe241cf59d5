//! Canonical contact record and timestamp normalization
//!
//! The store's submission-time column may arrive as text, as a date, or as
//! a full timestamp. The tagged [`SubmittedAt`] value captures that shape
//! exactly once, at the store boundary, and every downstream component
//! sees only the normalized record.
//!
//! Normalization policy:
//! - textual values are used verbatim as the display value (whatever
//!   format the store emits is preserved)
//! - temporal values are formatted to `YYYY-MM-DD`
//! - an absent value yields an absent display value; the row itself is
//!   still carried through the pipeline

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Raw submission-time value as the store yielded it.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmittedAt {
    /// Pre-formatted text, displayed verbatim.
    Text(String),
    /// A real point in time, displayed as `YYYY-MM-DD`.
    Temporal(DateTime<Utc>),
}

impl SubmittedAt {
    /// Normalized display form of this value.
    pub fn display(&self) -> String {
        match self {
            SubmittedAt::Text(raw) => raw.clone(),
            SubmittedAt::Temporal(instant) => instant.format("%Y-%m-%d").to_string(),
        }
    }

    /// The original instant, when this value carried one.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            SubmittedAt::Text(_) => None,
            SubmittedAt::Temporal(instant) => Some(*instant),
        }
    }
}

/// A contact-form submission after normalization.
///
/// Records within one batch are unique by `id`; the batch is ordered by
/// (`submitted_at` descending, `id` descending).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ContactRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    /// Normalized display date, absent when the store value was NULL.
    pub submitted_at: Option<String>,
    /// Original instant for ordering, present only for temporal values.
    #[serde(skip)]
    pub submitted_instant: Option<DateTime<Utc>>,
}

impl ContactRecord {
    /// Build a canonical record from raw fields and the tagged time value.
    pub fn new(
        id: i64,
        username: String,
        email: String,
        phone: String,
        message: String,
        submitted: Option<SubmittedAt>,
    ) -> Self {
        ContactRecord {
            id,
            username,
            email,
            phone,
            message,
            submitted_at: submitted.as_ref().map(SubmittedAt::display),
            submitted_instant: submitted.as_ref().and_then(SubmittedAt::instant),
        }
    }
}
