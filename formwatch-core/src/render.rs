//! Digest rendering
//!
//! Produces the self-contained HTML email body (inline CSS, no external
//! resources) plus the text and JSON views used by the CLI preview.
//!
//! Invariants enforced:
//! - Rendering the same batch twice yields byte-identical output
//! - Free-text fields are escaped before embedding; no unescaped `&`,
//!   `<`, or `>` from record content reaches the document
//! - An empty batch yields no document at all, never an empty document

use crate::record::ContactRecord;

/// A rendered digest document. Immutable once produced; owned by the
/// orchestrator for the duration of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub html: String,
    pub count: usize,
}

/// Render a batch as a self-contained HTML document.
///
/// Returns `None` for an empty batch so the caller can short-circuit
/// without dispatching.
pub fn render_html_report(contacts: &[ContactRecord]) -> Option<RenderedReport> {
    if contacts.is_empty() {
        return None;
    }

    let count = contacts.len();
    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<style>{css}</style>
</head>
<body>
<div class="container">
{header}
{summary}
{table}
{cards}
{footer}
</div>
</body>
</html>
"#,
        css = inline_css(),
        header = render_header(),
        summary = render_summary(count),
        table = render_table(contacts),
        cards = render_cards(contacts),
        footer = render_footer(),
    );

    Some(RenderedReport { html, count })
}

/// Inline CSS. The table view targets wide viewports; the card view
/// replaces it under the media query.
fn inline_css() -> &'static str {
    r#"
* { box-sizing: border-box; }
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif;
    background-color: #f4f7f9;
    margin: 0;
    padding: 0;
}
.container {
    max-width: 900px;
    margin: 20px auto;
    background-color: #ffffff;
    border-radius: 12px;
    box-shadow: 0 4px 16px rgba(0,0,0,0.08);
    overflow: hidden;
}
.header {
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    color: white;
    padding: 40px 30px;
    text-align: center;
}
.header h1 { margin: 0 0 8px 0; font-size: 32px; font-weight: 700; }
.header p { margin: 0; opacity: 0.95; font-size: 16px; }
.summary {
    padding: 24px 30px;
    background: #f8f9fa;
    border-left: 5px solid #667eea;
    margin: 25px 30px;
    border-radius: 8px;
}
.summary p { margin: 0; font-size: 17px; color: #2c3e50; font-weight: 500; }
.badge {
    display: inline-block;
    padding: 6px 14px;
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    color: white;
    border-radius: 20px;
    font-size: 15px;
    font-weight: 700;
    margin: 0 4px;
}
.table-container { padding: 0 30px 30px 30px; overflow-x: auto; }
table {
    width: 100%;
    border-collapse: separate;
    border-spacing: 0;
    background-color: white;
    border-radius: 10px;
    overflow: hidden;
    box-shadow: 0 2px 12px rgba(0,0,0,0.06);
}
thead {
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    color: white;
}
th {
    padding: 18px 16px;
    text-align: left;
    font-weight: 600;
    font-size: 13px;
    text-transform: uppercase;
    letter-spacing: 1px;
    white-space: nowrap;
}
td {
    padding: 18px 16px;
    border-bottom: 1px solid #f0f0f0;
    font-size: 14px;
    color: #2c3e50;
    vertical-align: top;
}
tr:last-child td { border-bottom: none; }
tbody tr:nth-child(even) { background-color: #fafbfc; }
.name-column { font-weight: 600; color: #1a202c; font-size: 15px; }
.email-column { color: #0066cc; word-break: break-word; }
.phone-column { font-family: 'SF Mono', 'Monaco', 'Courier New', monospace; white-space: nowrap; }
.date-column { color: #64748b; font-size: 13px; white-space: nowrap; }
.message-column { max-width: 320px; line-height: 1.7; word-wrap: break-word; color: #475569; }
.mobile-cards { display: none; }
.contact-card {
    background: white;
    border-radius: 12px;
    padding: 20px;
    margin: 15px;
    box-shadow: 0 2px 12px rgba(0,0,0,0.08);
    border-left: 4px solid #667eea;
}
.card-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 16px;
    padding-bottom: 12px;
    border-bottom: 2px solid #f0f0f0;
}
.card-name { font-size: 18px; font-weight: 700; color: #1a202c; margin: 0; }
.card-date {
    font-size: 12px;
    color: #94a3b8;
    background: #f1f5f9;
    padding: 4px 10px;
    border-radius: 12px;
}
.card-field { margin: 12px 0; display: flex; align-items: flex-start; }
.card-label {
    font-size: 12px;
    font-weight: 600;
    color: #64748b;
    text-transform: uppercase;
    min-width: 70px;
    margin-right: 12px;
}
.card-value { font-size: 14px; color: #2c3e50; flex: 1; word-break: break-word; }
.card-value.email { color: #0066cc; }
.card-value.phone { font-family: 'SF Mono', 'Monaco', 'Courier New', monospace; }
.card-value.message {
    line-height: 1.7;
    color: #475569;
    background: #f8fafc;
    padding: 12px;
    border-radius: 8px;
    margin-top: 4px;
}
.footer {
    margin-top: 30px;
    padding: 25px 30px;
    background: #f8f9fa;
    text-align: center;
    color: #64748b;
    font-size: 13px;
    border-top: 1px solid #e2e8f0;
}
.footer p { margin: 6px 0; }
@media only screen and (max-width: 768px) {
    .container { margin: 0; border-radius: 0; }
    .table-container { display: none; }
    .mobile-cards { display: block; padding: 0; }
}
"#
}

fn render_header() -> &'static str {
    r#"<div class="header">
<h1>&#128236; Contact Form Submissions</h1>
<p>New inquiries from your website</p>
</div>"#
}

fn render_summary(count: usize) -> String {
    format!(
        r#"<div class="summary">
<p>You have received <span class="badge">{count}</span> new contact form submission(s)</p>
</div>"#
    )
}

/// Desktop table view: one row per record.
fn render_table(contacts: &[ContactRecord]) -> String {
    let rows: String = contacts
        .iter()
        .map(|contact| {
            format!(
                r#"<tr>
<td class="name-column">{username}</td>
<td class="email-column">{email}</td>
<td class="phone-column">{phone}</td>
<td class="date-column">{date}</td>
<td class="message-column">{message}</td>
</tr>
"#,
                username = escape_html(&contact.username),
                email = escape_html(&contact.email),
                phone = escape_html(&contact.phone),
                date = contact.submitted_at.as_deref().unwrap_or_default(),
                message = escape_multiline(&contact.message),
            )
        })
        .collect();

    format!(
        r#"<div class="table-container">
<table>
<thead>
<tr><th>Name</th><th>Email</th><th>Phone</th><th>Date</th><th>Message</th></tr>
</thead>
<tbody>
{rows}</tbody>
</table>
</div>"#
    )
}

/// Mobile card view: structurally parallel to the table, same escaped
/// field set.
fn render_cards(contacts: &[ContactRecord]) -> String {
    let cards: String = contacts
        .iter()
        .map(|contact| {
            format!(
                r#"<div class="contact-card">
<div class="card-header">
<h3 class="card-name">{username}</h3>
<span class="card-date">{date}</span>
</div>
<div class="card-field">
<span class="card-label">Email</span>
<span class="card-value email">{email}</span>
</div>
<div class="card-field">
<span class="card-label">Phone</span>
<span class="card-value phone">{phone}</span>
</div>
<div class="card-field">
<span class="card-label">Message</span>
<div class="card-value message">{message}</div>
</div>
</div>
"#,
                username = escape_html(&contact.username),
                email = escape_html(&contact.email),
                phone = escape_html(&contact.phone),
                date = contact.submitted_at.as_deref().unwrap_or_default(),
                message = escape_multiline(&contact.message),
            )
        })
        .collect();

    format!(
        r#"<div class="mobile-cards">
{cards}</div>"#
    )
}

fn render_footer() -> &'static str {
    r#"<div class="footer">
<p><strong>&#128231; Automated Contact Form Notification</strong></p>
<p>This email was automatically generated by your contact form monitoring system.</p>
</div>"#
}

/// Render a batch as fixed-width text for terminal preview.
pub fn render_text(contacts: &[ContactRecord]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<6} {:<12} {:<20} {:<26} {:<14} {}\n",
        "ID", "DATE", "NAME", "EMAIL", "PHONE", "MESSAGE"
    ));

    for contact in contacts {
        let first_line = contact.message.lines().next().unwrap_or_default();
        output.push_str(&format!(
            "{:<6} {:<12} {:<20} {:<26} {:<14} {}\n",
            contact.id,
            contact.submitted_at.as_deref().unwrap_or("-"),
            truncate_or_pad(&contact.username, 20),
            truncate_or_pad(&contact.email, 26),
            truncate_or_pad(&contact.phone, 14),
            first_line,
        ));
    }

    output
}

/// Render a batch as JSON for machine-readable preview.
pub fn render_json(contacts: &[ContactRecord]) -> String {
    serde_json::to_string_pretty(contacts).unwrap_or_else(|_| "[]".to_string())
}

/// Escape the markup-significant characters in record content.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape, then convert embedded line breaks to the document's convention.
fn escape_multiline(s: &str) -> String {
    escape_html(s).replace('\n', "<br>")
}

/// Truncate or pad string to fixed width
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.len() > width {
        format!("{}...", &s[..width.saturating_sub(3)])
    } else {
        format!("{:<width$}", s, width = width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, username: &str, message: &str, date: Option<&str>) -> ContactRecord {
        ContactRecord {
            id,
            username: username.to_string(),
            email: "a@x.com".to_string(),
            phone: "555-0100".to_string(),
            message: message.to_string(),
            submitted_at: date.map(str::to_string),
            submitted_instant: None,
        }
    }

    #[test]
    fn test_empty_batch_yields_no_document() {
        assert_eq!(render_html_report(&[]), None);
    }

    #[test]
    fn test_report_carries_record_count() {
        let batch = vec![
            record(1, "Alice", "hi", Some("2024-01-02")),
            record(2, "Bob", "hey", Some("2024-01-02")),
        ];
        let report = render_html_report(&batch).unwrap();
        assert_eq!(report.count, 2);
        assert!(report
            .html
            .contains(r#"<span class="badge">2</span>"#));
    }

    #[test]
    fn test_message_line_breaks_become_br() {
        let batch = vec![record(1, "Alice", "Hi\nthere", Some("2024-01-02"))];
        let report = render_html_report(&batch).unwrap();
        assert!(report.html.contains("Hi<br>there"));
        assert!(report.html.contains(r#"<span class="badge">1</span>"#));
    }

    #[test]
    fn test_markup_characters_are_escaped() {
        let batch = vec![record(
            1,
            "<script>alert(1)</script>",
            "a & b < c > d",
            Some("2024-01-02"),
        )];
        let report = render_html_report(&batch).unwrap();
        assert!(!report.html.contains("<script>"));
        assert!(report.html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(report.html.contains("a &amp; b &lt; c &gt; d"));
    }

    #[test]
    fn test_quotes_survive_verbatim() {
        let batch = vec![record(1, "Alice", r#"say "hi" to 'Bob'"#, Some("2024-01-02"))];
        let report = render_html_report(&batch).unwrap();
        assert!(report.html.contains(r#"say "hi" to 'Bob'"#));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let batch = vec![
            record(2, "Bob", "hey\nthere", Some("2024-01-03")),
            record(1, "Alice", "hi", None),
        ];
        let first = render_html_report(&batch).unwrap();
        let second = render_html_report(&batch).unwrap();
        assert_eq!(first.html, second.html);
    }

    #[test]
    fn test_absent_date_renders_empty_cell() {
        let batch = vec![record(1, "Alice", "hi", None)];
        let report = render_html_report(&batch).unwrap();
        assert!(report.html.contains(r#"<td class="date-column"></td>"#));
    }

    #[test]
    fn test_both_views_render_every_record() {
        let batch = vec![
            record(1, "Alice", "hi", Some("2024-01-02")),
            record(2, "Bob", "hey", Some("2024-01-03")),
        ];
        let report = render_html_report(&batch).unwrap();
        // One table row and one card per record.
        assert_eq!(report.html.matches(r#"<td class="name-column">"#).count(), 2);
        assert_eq!(report.html.matches(r#"<div class="contact-card">"#).count(), 2);
    }

    #[test]
    fn test_text_rendering_lists_records() {
        let batch = vec![record(1, "Alice", "hi\nsecond line", Some("2024-01-02"))];
        let text = render_text(&batch);
        assert!(text.contains("Alice"));
        assert!(text.contains("2024-01-02"));
        assert!(text.contains("hi"));
        assert!(!text.contains("second line"));
    }

    #[test]
    fn test_json_rendering_round_trips() {
        let batch = vec![record(1, "Alice", "hi", Some("2024-01-02"))];
        let json = render_json(&batch);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["id"], 1);
        assert_eq!(parsed[0]["username"], "Alice");
        assert_eq!(parsed[0]["submitted_at"], "2024-01-02");
    }
}
