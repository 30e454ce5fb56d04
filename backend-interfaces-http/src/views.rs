//! Server-rendered pages. Every value that came from a request or the store
//! goes through `escape_html` before it is interpolated.

use axum::http::StatusCode;

use backend_domain::{format_timestamp, AdminSummary};

use crate::csv_export::EXPORT_FILENAME;
use crate::middleware::FlashNotice;

const STYLE: &str = r#"
:root {
  --bg: #f8fafc;
  --card: #ffffff;
  --ink: #0f172a;
  --muted: #64748b;
  --border: #e2e8f0;
  --accent: #2563eb;
  --success: #16a34a;
  --danger: #dc2626;
}
* { box-sizing: border-box; }
body { margin: 0; font-family: "IBM Plex Sans", "Source Sans 3", sans-serif; background: var(--bg); color: var(--ink); }
header { background: var(--ink); padding: 14px 24px; }
header a { color: #e2e8f0; margin-right: 18px; text-decoration: none; font-weight: 600; }
main { max-width: 960px; margin: 0 auto; padding: 28px 20px 48px; }
.card { background: var(--card); border: 1px solid var(--border); border-radius: 14px; padding: 20px; margin-bottom: 18px; }
.flash { border-radius: 10px; padding: 12px 16px; margin-bottom: 18px; color: #fff; }
.flash.success { background: var(--success); }
.flash.danger { background: var(--danger); }
.summary { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 12px; }
.summary .value { font-size: 28px; font-weight: 700; }
.summary .label { color: var(--muted); font-size: 13px; }
label { display: block; margin: 10px 0 4px; font-size: 14px; }
input, textarea { width: 100%; padding: 8px 10px; border: 1px solid var(--border); border-radius: 8px; font: inherit; }
button { margin-top: 14px; background: var(--accent); color: #fff; border: 0; border-radius: 8px; padding: 9px 16px; font: inherit; cursor: pointer; }
table { width: 100%; border-collapse: collapse; font-size: 14px; }
th, td { text-align: left; padding: 8px; border-bottom: 1px solid var(--border); vertical-align: top; }
th { color: var(--muted); font-weight: 600; }
.muted { color: var(--muted); }
"#;

pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

fn layout(title: &str, flash: Option<FlashNotice>, body: &str) -> String {
    let flash_html = flash
        .map(|notice| {
            format!(
                "<div class=\"flash {}\">{}</div>",
                notice.level().css_class(),
                escape_html(notice.message())
            )
        })
        .unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<header><a href="/">Home</a><a href="/training">Training</a><a href="/report">Report phishing</a><a href="/admin">Admin</a></header>
<main>
{flash_html}
{body}
</main>
</body>
</html>
"#,
        title = escape_html(title),
    )
}

pub fn index_page(flash: Option<FlashNotice>) -> String {
    layout(
        "Phishing Awareness Training",
        flash,
        r#"<section class="card">
<h1>Phishing Awareness Training</h1>
<p>Learn to spot phishing messages, take the short quiz, and report anything suspicious you receive.</p>
<p><a href="/training">Start the training</a> &middot; <a href="/report">Report a suspicious message</a></p>
</section>"#,
    )
}

pub fn training_page(flash: Option<FlashNotice>) -> String {
    layout(
        "Training",
        flash,
        r#"<section class="card">
<h1>Spotting phishing</h1>
<ul>
<li>Check the sender address, not just the display name.</li>
<li>Hover over links before clicking and compare the real destination.</li>
<li>Be wary of urgency, threats, or requests for credentials and payments.</li>
<li>Unexpected attachments are a common delivery method for malware.</li>
<li>When in doubt, report the message instead of replying to it.</li>
</ul>
</section>
<section class="card">
<h2>Finish the quiz</h2>
<form method="post" action="/training/complete">
<label for="email">Your email</label>
<input id="email" name="email" type="email" required />
<button type="submit">Mark training complete</button>
</form>
</section>"#,
    )
}

pub fn report_page(flash: Option<FlashNotice>) -> String {
    layout(
        "Report phishing",
        flash,
        r#"<section class="card">
<h1>Report a suspicious message</h1>
<form method="post" action="/report">
<label for="email">Your email (optional)</label>
<input id="email" name="email" type="email" />
<label for="details">What did you notice?</label>
<textarea id="details" name="details" rows="5"></textarea>
<button type="submit">Send report</button>
</form>
</section>"#,
    )
}

pub fn simulated_result_page(token: &str, participant: Option<&str>) -> String {
    let who = match participant {
        Some(email) => format!(
            "This click was recorded for <strong>{}</strong>.",
            escape_html(email)
        ),
        None => "This click was recorded without an identified participant.".to_string(),
    };
    let body = format!(
        r#"<section class="card">
<h1>This was a simulated phishing link</h1>
<p>No harm done, but a real attacker could have used this link to steal your credentials.</p>
<p>{who}</p>
<p class="muted">Campaign token: <code>{token}</code></p>
<p><a href="/training">Review the training</a></p>
</section>"#,
        token = escape_html(token),
    );
    layout("Simulated phishing", None, &body)
}

pub fn admin_page(summary: &AdminSummary, flash: Option<FlashNotice>) -> String {
    let mut rows = String::new();
    for event in &summary.recent_events {
        rows.push_str(&format!(
            "<tr><td>{id}</td><td>{time}</td><td>{email}</td><td>{kind}</td><td>{meta}</td></tr>",
            id = event.id,
            time = format_timestamp(&event.created_at),
            email = escape_html(event.participant_email.as_deref().unwrap_or("")),
            kind = event.event_type,
            meta = escape_html(&event.meta),
        ));
    }
    if rows.is_empty() {
        rows.push_str("<tr><td colspan=\"5\" class=\"muted\">No events yet.</td></tr>");
    }
    let body = format!(
        r#"<section class="card">
<h1>Admin dashboard</h1>
<div class="summary">
<div><div class="value" id="total">{total}</div><div class="label">Participants</div></div>
<div><div class="value" id="training_completed">{training}</div><div class="label">Training completed</div></div>
<div><div class="value" id="clicks">{clicks}</div><div class="label">Simulated clicks</div></div>
<div><div class="value" id="reports">{reports}</div><div class="label">Reports</div></div>
</div>
<p><a href="/admin/export" download="{filename}">Export all events (CSV)</a></p>
</section>
<section class="card">
<h2>Add participant</h2>
<form method="post" action="/admin/add_participant">
<label for="email">Email</label>
<input id="email" name="email" type="email" required />
<label for="name">Name</label>
<input id="name" name="name" />
<label for="department">Department</label>
<input id="department" name="department" />
<button type="submit">Add</button>
</form>
</section>
<section class="card">
<h2>Recent events</h2>
<table>
<thead><tr><th>ID</th><th>Time (UTC)</th><th>Participant</th><th>Type</th><th>Details</th></tr></thead>
<tbody>{rows}</tbody>
</table>
</section>"#,
        total = summary.total_participants,
        training = summary.tally.training_completed,
        clicks = summary.tally.clicks,
        reports = summary.tally.reports,
        filename = EXPORT_FILENAME,
    );
    layout("Admin", flash, &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<section class=\"card\"><h1>{}</h1><p>{}</p><p><a href=\"/\">Back to home</a></p></section>",
        status.as_u16(),
        escape_html(message)
    );
    layout("Error", None, &body)
}
