//! Route definitions for the admin console

use crate::{
    handlers::{self, auth, dashboard, health, users},
    middleware::{require_no_session, require_session},
    state::AppState,
};
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;

/// Pages that need a session
pub fn protected_routes(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(dashboard::show))
        .route("/dashboard/notes", post(dashboard::submit_note))
        .route("/dashboard/notes/cancel", post(dashboard::cancel_edit))
        .route("/dashboard/notes/:id/edit", post(dashboard::edit_note))
        .route("/dashboard/notes/:id/delete", post(dashboard::delete_note))
        .route("/users", get(users::list_users))
        .route("/users/:id", get(users::user_detail))
        .route(
            "/users/:id/confirm/:action",
            get(users::confirm_status_change),
        )
        .route("/users/:id/:action", post(users::change_status))
        .route_layer(from_fn_with_state(Arc::clone(state), require_session))
}

/// Pages only shown without a session
pub fn public_only_routes(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route_layer(from_fn_with_state(Arc::clone(state), require_no_session))
}

/// Routes with no guard
pub fn open_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::root))
        .route("/logout", get(auth::logout).post(auth::logout))
        .route("/health", get(health::health_check))
}

/// Build the complete router, unknown paths included
pub fn build_routes(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .merge(open_routes())
        .merge(public_only_routes(state))
        .merge(protected_routes(state))
        .fallback(handlers::not_found)
}
