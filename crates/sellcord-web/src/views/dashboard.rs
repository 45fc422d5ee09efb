//! Dashboard page: summary cards, revenue chart, announcements and notes

use super::layout::{Section, console_page, escape};
use sellcord_core::{Note, NotesController};

/// One summary card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryCard {
    /// Card title
    pub title: &'static str,
    /// Headline value
    pub value: &'static str,
    /// Change relative to last month
    pub change: &'static str,
}

/// One point of the revenue series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevenuePoint {
    /// Time of day label
    pub time: &'static str,
    /// Revenue in thousands
    pub revenue: f64,
    /// Orders in hundreds
    pub orders: f64,
}

/// One platform announcement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Announcement {
    /// Announcement category
    pub kind: &'static str,
    /// Summary line
    pub description: &'static str,
    /// Relative age label
    pub time_ago: &'static str,
}

/// Summary cards shown across the top of the dashboard
pub const SUMMARY_CARDS: [SummaryCard; 3] = [
    SummaryCard {
        title: "Total Revenue",
        value: "$12,345.67",
        change: "↑ 12.5% from last month",
    },
    SummaryCard {
        title: "Total Orders",
        value: "156",
        change: "↑ 8.3% from last month",
    },
    SummaryCard {
        title: "New Customers",
        value: "32",
        change: "↑ 5.2% from last month",
    },
];

const fn point(time: &'static str, revenue: f64, orders: f64) -> RevenuePoint {
    RevenuePoint {
        time,
        revenue,
        orders,
    }
}

/// Revenue and orders over the day, every two hours
pub const REVENUE_SERIES: [RevenuePoint; 12] = [
    point("00:00", 0.0, 0.0),
    point("02:00", 0.2, 0.3),
    point("04:00", 0.4, 0.5),
    point("06:00", 0.6, 0.7),
    point("08:00", 0.8, 0.9),
    point("10:00", 1.0, 1.1),
    point("12:00", 1.2, 1.3),
    point("14:00", 1.4, 1.4),
    point("16:00", 1.3, 1.2),
    point("18:00", 1.2, 1.1),
    point("20:00", 1.0, 0.9),
    point("22:00", 0.8, 0.7),
];

/// Latest platform announcements, newest first
pub const ANNOUNCEMENTS: [Announcement; 5] = [
    Announcement {
        kind: "Platform Update",
        description: "Tax System, Invoice PDFs, Coupon Rework",
        time_ago: "2 weeks ago",
    },
    Announcement {
        kind: "New Update",
        description: "Shopping Cart and Fresh Checkout Page",
        time_ago: "1 month ago",
    },
    Announcement {
        kind: "Platform Update",
        description: "New Payment Processors, Product Customization, and more",
        time_ago: "2 months ago",
    },
    Announcement {
        kind: "Platform Update",
        description: "Business Plan Improvements, Stock Management, Theme ...",
        time_ago: "3 months ago",
    },
    Announcement {
        kind: "New Update",
        description: "Mollie Payment Integration, Status Page, Bulk Updates & M...",
        time_ago: "5 months ago",
    },
];

const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 200.0;
const CHART_MAX: f64 = 1.5;

fn polyline(values: impl Iterator<Item = f64>, class: &str) -> String {
    let step = CHART_WIDTH / 11.0;
    let points = (0_u32..)
        .zip(values)
        .map(|(i, v)| {
            let x = f64::from(i) * step;
            let y = CHART_HEIGHT - (v / CHART_MAX) * CHART_HEIGHT;
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!(r#"<polyline class="{class}" fill="none" stroke-width="2" points="{points}"/>"#)
}

fn summary_cards() -> String {
    SUMMARY_CARDS
        .iter()
        .map(|card| {
            format!(
                r#"<div class="card"><h3>{}</h3><p class="value">{}</p><p class="change">{}</p></div>"#,
                card.title, card.value, card.change
            )
        })
        .collect()
}

fn revenue_chart() -> String {
    let labels: String = REVENUE_SERIES
        .iter()
        .map(|p| format!("<span>{}</span>", p.time))
        .collect();

    format!(
        r#"<div class="card"><h2>Revenue</h2>
<svg viewBox="0 0 {CHART_WIDTH} {CHART_HEIGHT}" role="img" aria-label="Revenue and orders today">
{}
{}
</svg>
<div class="axis">{labels}</div></div>"#,
        polyline(REVENUE_SERIES.iter().map(|p| p.revenue), "revenue"),
        polyline(REVENUE_SERIES.iter().map(|p| p.orders), "orders"),
    )
}

fn announcements() -> String {
    let items: String = ANNOUNCEMENTS
        .iter()
        .map(|a| {
            format!(
                r#"<li><span class="badge">{}</span> {} <small>{}</small></li>"#,
                a.kind,
                escape(a.description),
                a.time_ago
            )
        })
        .collect();
    format!(r#"<div class="card"><h2>Announcements</h2><ul>{items}</ul></div>"#)
}

fn note_row(note: &Note, editing: bool) -> String {
    let marker = if editing { r#" class="editing""# } else { "" };
    format!(
        r#"<li{marker}><strong>{title}</strong><p>{description}</p>
<form method="post" action="/dashboard/notes/{id}/edit"><button type="submit">Edit</button></form>
<form method="post" action="/dashboard/notes/{id}/delete"><button type="submit">Delete</button></form></li>"#,
        id = note.id,
        title = escape(&note.title),
        description = escape(&note.description),
    )
}

fn notes_widget(notes: &NotesController) -> String {
    let editing = notes.editing_note();
    let (title, description) = editing.map_or(("", ""), |n| (n.title.as_str(), n.description.as_str()));
    let submit_label = if editing.is_some() { "Update Note" } else { "Add Note" };
    let cancel = if editing.is_some() {
        r#"<form method="post" action="/dashboard/notes/cancel"><button type="submit">Cancel</button></form>"#
    } else {
        ""
    };

    let mut list = String::new();
    for note in notes.store().notes() {
        list.push_str(&note_row(note, notes.editing() == Some(note.id)));
    }
    if list.is_empty() {
        list.push_str("<li class=\"empty\">No notes yet.</li>");
    }

    format!(
        r#"<div class="card notes"><h2>Notes</h2>
<form method="post" action="/dashboard/notes">
<input name="title" type="text" placeholder="Title" value="{}">
<textarea name="description" placeholder="Description">{}</textarea>
<button type="submit">{submit_label}</button>
</form>
{cancel}
<ul>{list}</ul></div>"#,
        escape(title),
        escape(description),
    )
}

/// Render the dashboard
#[must_use]
pub fn dashboard_page(notes: &NotesController) -> String {
    let content = format!(
        r#"<section class="grid">{}</section>
<section class="grid">{}{}</section>
<section>{}</section>"#,
        summary_cards(),
        revenue_chart(),
        announcements(),
        notes_widget(notes),
    );
    console_page("Dashboard", Section::Dashboard, &content)
}
