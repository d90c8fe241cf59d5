//! Formwatch core library - windowed contact fetch, digest rendering, and delivery

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Each run is one pass: compute window, fetch, render, notify
// - No state persists between runs; every run is restartable
// - Connections and mail sessions are scoped to a single call
// - Recovered failures (store, transport) never unwind past the pipeline
// - Identical batch input yields byte-for-byte identical rendered output

pub mod config;
pub mod fetch;
pub mod notify;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod window;

pub use config::{Settings, SmtpSettings};
pub use notify::Recipients;
pub use pipeline::{run_check, subject_for, RunOutcome};
pub use record::ContactRecord;
pub use render::{render_html_report, render_json, render_text, RenderedReport};
pub use window::CheckWindow;
