//! User list, user detail and status confirmation pages

use super::layout::{Section, Tone, banner, console_page, escape, format_timestamp};
use sellcord_core::{StoreConfig, TriState, User, UserFilter, UserStatusAction};
use std::fmt::Write as _;

/// Path of a user's detail page, with the id encoded as one path segment
#[must_use]
pub fn user_path(user_id: &str) -> String {
    format!("/users/{}", urlencoding::encode(user_id))
}

const fn yes_no(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

fn status_select(name: &str, label: &str, on: &str, off: &str, selected: TriState) -> String {
    let mut options = String::new();
    for (state, text) in [
        (TriState::All, label),
        (TriState::True, on),
        (TriState::False, off),
    ] {
        let marker = if state == selected { " selected" } else { "" };
        let _ = write!(
            options,
            r#"<option value="{}"{marker}>{text}</option>"#,
            state.as_str()
        );
    }
    format!(r#"<select name="{name}">{options}</select>"#)
}

fn filter_form(filter: &UserFilter) -> String {
    format!(
        r#"<form method="get" action="/users" class="filters">
<input name="search" type="search" placeholder="Search by name or email" value="{}">
{}
{}
<button type="submit">Filter</button>
</form>"#,
        escape(&filter.search),
        status_select("verified", "Verified Status", "Verified", "Not Verified", filter.verified),
        status_select(
            "terminated",
            "Terminated Status",
            "Terminated",
            "Not Terminated",
            filter.terminated
        ),
    )
}

fn user_card(user: &User) -> String {
    let id = escape(&user.id);
    format!(
        r#"<li class="card"><a href="{path}">
<p><strong>ID:</strong> {id}</p>
<p><strong>Name:</strong> {}</p>
<p><strong>Email:</strong> {}</p>
</a></li>"#,
        escape(&user.name),
        escape(&user.email),
        path = user_path(&user.id),
    )
}

/// Render the user list
///
/// `users` is the filtered list, or the message of a failed fetch.
#[must_use]
pub fn users_page(filter: &UserFilter, users: Result<&[&User], &str>) -> String {
    let body = match users {
        Err(message) => banner(Tone::Error, &format!("Error: {message}")),
        Ok([]) => "<p>No users found.</p>".to_string(),
        Ok(users) => {
            let cards: String = users.iter().map(|u| user_card(u)).collect();
            format!(r#"<ul class="users">{cards}</ul>"#)
        }
    };

    let content = format!("{}\n<h2>All Users:</h2>\n{body}", filter_form(filter));
    console_page("Users", Section::Users, &content)
}

fn store_details(store: Option<&StoreConfig>) -> String {
    let Some(store) = store else {
        return "<p>No store configuration available for this user.</p>".to_string();
    };

    format!(
        r#"<div class="card store"><h2>Store Details :</h2>
<p><strong>Store Name:</strong> {}</p>
<p><strong>Store Description:</strong> {}</p>
<p><strong>Store Terminated:</strong> {}</p>
<p><strong>Store Created At:</strong> {}</p>
<p><strong>Store Updated At:</strong> {}</p>
</div>"#,
        escape(&store.name),
        escape(store.display_description()),
        yes_no(store.terminated),
        format_timestamp(&store.created_at),
        format_timestamp(&store.updated_at),
    )
}

/// Action offered for a user in their current state
#[must_use]
pub const fn available_action(user: &User) -> UserStatusAction {
    if user.terminated {
        UserStatusAction::Reinstate
    } else {
        UserStatusAction::Terminate
    }
}

/// Render a user's detail page
///
/// `flash` carries the outcome of a status change that redirected here.
#[must_use]
pub fn user_detail_page(user: &User, flash: Option<(Tone, &str)>) -> String {
    let id = escape(&user.id);
    let flash = flash.map_or_else(String::new, |(tone, message)| banner(tone, message));
    let avatar = user.avatar_url.as_deref().map_or_else(
        || "None".to_string(),
        |url| {
            format!(
                r#"<img src="{}" alt="{} avatar" width="64" height="64">"#,
                escape(url),
                escape(&user.name)
            )
        },
    );
    let last_login = user
        .last_login
        .as_ref()
        .map_or_else(|| "Never".to_string(), format_timestamp);
    let action = available_action(user);
    let action_label = match action {
        UserStatusAction::Terminate => "Terminate User",
        UserStatusAction::Reinstate => "Reinstate User",
    };

    let content = format!(
        r#"{flash}<div class="card user">
<h2>{name} User Details :</h2>
<p><strong>ID : </strong> {id}</p>
<p><strong>Name : </strong> {name}</p>
<p><strong>Email : </strong> {email}</p>
<p><strong>Terminated : </strong> {terminated}</p>
<p><strong>Verified : </strong> {verified}</p>
<p><strong>User Avatar : </strong> {avatar}</p>
<p><strong>Store ID : </strong> {store_id}</p>
<p><strong>Last Login : </strong> {last_login}</p>
<p><strong>Created At : </strong> {created_at}</p>
<p><strong>Updated At : </strong> {updated_at}</p>
</div>
{store}
<p><a class="button" href="{path}/confirm/{action}">{action_label}</a> <a href="/users">Go Back</a></p>"#,
        path = user_path(&user.id),
        name = escape(&user.name),
        email = escape(&user.email),
        terminated = yes_no(user.terminated),
        verified = yes_no(user.verified),
        store_id = escape(user.store_id.as_deref().unwrap_or("None")),
        created_at = format_timestamp(&user.created_at),
        updated_at = format_timestamp(&user.updated_at),
        store = store_details(user.store.as_ref()),
    );

    console_page("User Details", Section::Users, &content)
}

/// Render the page shown when a user cannot be displayed
#[must_use]
pub fn user_unavailable_page(message: &str) -> String {
    let content = format!(
        r#"{}<p><a href="/users">Go Back</a></p>"#,
        banner(Tone::Error, message)
    );
    console_page("User Details", Section::Users, &content)
}

/// Render the confirmation step of a status change
#[must_use]
pub fn confirm_page(user_id: &str, action: UserStatusAction) -> String {
    let path = user_path(user_id);
    let question = match action {
        UserStatusAction::Terminate => "Are you sure you want to terminate this user?",
        UserStatusAction::Reinstate => "Are you sure you want to reinstate this user?",
    };

    let content = format!(
        r#"<div class="card confirm">
<p>{question}</p>
<form method="post" action="{path}/{action}"><button type="submit">Confirm</button></form>
<a href="{path}">Cancel</a>
</div>"#
    );
    console_page(action.confirm_title(), Section::Users, &content)
}
