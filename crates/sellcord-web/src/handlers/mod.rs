//! Request handlers for the console pages

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod users;

use crate::{state::AppState, views};
use axum::{
    http::{StatusCode, Uri},
    response::{Html, Redirect, Response},
};
use sellcord_core::{Destination, SessionToken};
use tracing::info;

/// `GET /` sends everyone to the login page; its guard forwards signed-in
/// admins to the dashboard
pub async fn root() -> Redirect {
    Redirect::to(Destination::Login.path())
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_FOUND,
        Html(views::not_found_page(uri.path())),
    )
}

/// The admin API no longer accepts the session: forget it and sign out
pub(crate) fn session_expired(state: &AppState, token: &SessionToken) -> Response {
    info!("admin API rejected session, signing out");
    state.end_session(token);
    auth::signed_out(state)
}
