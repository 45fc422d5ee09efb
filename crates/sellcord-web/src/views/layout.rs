//! Page chrome shared by every view

use chrono::{DateTime, Utc};
use std::fmt::Write as _;

/// Escape text for use in HTML content and attribute values
#[must_use]
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Timestamp as shown in tables and detail pages
#[must_use]
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y %H:%M UTC").to_string()
}

/// Sidebar entries of the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// `/dashboard`
    Dashboard,
    /// `/users` and its sub-pages
    Users,
}

impl Section {
    const ALL: [Self; 2] = [Self::Dashboard, Self::Users];

    const fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Users => "/users",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Users => "Users",
        }
    }
}

/// Tone of a flash banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Confirmation
    Success,
    /// Failure
    Error,
}

/// One-line banner shown above page content
#[must_use]
pub fn banner(tone: Tone, message: &str) -> String {
    let class = match tone {
        Tone::Success => "banner banner-success",
        Tone::Error => "banner banner-error",
    };
    format!(
        r#"<div class="{class}" role="status">{}</div>"#,
        escape(message)
    )
}

const STYLE: &str = "\
body{margin:0;font-family:system-ui,sans-serif;background:#f5f6f8;color:#1f2430}\
.shell{display:flex;min-height:100vh}\
.sidebar{width:220px;background:#1f2430;color:#fff;padding:24px 16px;display:flex;flex-direction:column;gap:8px}\
.sidebar a{color:#c9cedb;text-decoration:none;padding:8px 12px;border-radius:6px}\
.sidebar a.active,.sidebar a:hover{background:#343b4d;color:#fff}\
.sidebar form{margin-top:auto}\
main{flex:1;padding:32px}\
.card{background:#fff;border-radius:8px;padding:20px;box-shadow:0 1px 2px rgba(0,0,0,.08)}\
.grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(220px,1fr));gap:16px}\
.banner{padding:12px 16px;border-radius:6px;margin-bottom:16px}\
.banner-success{background:#e3f6e8;color:#1d6b35}\
.banner-error{background:#fde8e8;color:#9b1c1c}\
.field-error{color:#9b1c1c;font-size:.85em}\
table{width:100%;border-collapse:collapse}\
th,td{text-align:left;padding:8px;border-bottom:1px solid #e5e7eb}\
.badge{padding:2px 8px;border-radius:10px;font-size:.8em;background:#e5e7eb}\
.badge-on{background:#e3f6e8;color:#1d6b35}\
.badge-off{background:#fde8e8;color:#9b1c1c}";

fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{} · SellCord Admin</title>
<style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>"#,
        escape(title)
    )
}

/// Page without the console sidebar, used for login and error pages
#[must_use]
pub fn public_page(title: &str, content: &str) -> String {
    document(title, &format!(r#"<main class="public">{content}</main>"#))
}

/// Console page with the sidebar, `active` highlighted
#[must_use]
pub fn console_page(title: &str, active: Section, content: &str) -> String {
    let mut nav = String::new();
    for section in Section::ALL {
        let class = if section == active { r#" class="active""# } else { "" };
        let _ = write!(
            nav,
            r#"<a href="{}"{class}>{}</a>"#,
            section.path(),
            section.label()
        );
    }

    document(
        title,
        &format!(
            r#"<div class="shell">
<nav class="sidebar">
<strong>SellCord Admin</strong>
{nav}
<form method="post" action="/logout"><button type="submit">Logout</button></form>
</nav>
<main>
<h1>{}</h1>
{content}
</main>
</div>"#,
            escape(title)
        ),
    )
}

/// 404 page
#[must_use]
pub fn not_found_page(path: &str) -> String {
    public_page(
        "Page not found",
        &format!(
            r#"<div class="card"><h1>404</h1><p>No page at <code>{}</code>.</p><p><a href="/dashboard">Back to dashboard</a></p></div>"#,
            escape(path)
        ),
    )
}
