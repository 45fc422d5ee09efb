//! User list, detail and status changes

use super::session_expired;
use crate::{
    state::AppState,
    views::{
        Tone, not_found_page,
        users::{confirm_page, user_detail_page, user_path, user_unavailable_page, users_page},
    },
};
use axum::{
    Extension,
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};
use sellcord_core::{Error, SessionToken, UserFilter, UserStatusAction};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Outcome of a status change, carried to the detail page in its query string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFlash {
    /// Action the API accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<UserStatusAction>,
    /// Message of a failed action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusFlash {
    fn banner(&self) -> Option<(Tone, &str)> {
        if let Some(message) = self.error.as_deref() {
            return Some((Tone::Error, message));
        }
        self.done
            .map(|action| (Tone::Success, action.success_message()))
    }

    fn location(&self, user_id: &str) -> String {
        let detail = user_path(user_id);
        match serde_urlencoded::to_string(self) {
            Ok(query) if !query.is_empty() => format!("{detail}?{query}"),
            _ => detail,
        }
    }
}

/// `GET /users`
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<SessionToken>,
    Query(filter): Query<UserFilter>,
) -> Response {
    match state.api_client.list_users(&token).await {
        Ok(users) => {
            let visible = filter.apply(&users);
            Html(users_page(&filter, Ok(&visible))).into_response()
        }
        Err(e) if e.is_unauthorized() => session_expired(&state, &token),
        Err(e) => {
            error!(error = %e, "failed to fetch users");
            let message = e.user_message();
            (
                StatusCode::BAD_GATEWAY,
                Html(users_page(&filter, Err(&message))),
            )
                .into_response()
        }
    }
}

/// `GET /users/:id`
pub async fn user_detail(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<SessionToken>,
    Path(user_id): Path<String>,
    Query(flash): Query<StatusFlash>,
) -> Response {
    match state.api_client.get_user(&token, &user_id).await {
        Ok(user) => Html(user_detail_page(&user, flash.banner())).into_response(),
        Err(e) if e.is_unauthorized() => session_expired(&state, &token),
        Err(Error::NotFound { .. }) => (
            StatusCode::NOT_FOUND,
            Html(user_unavailable_page("No user found.")),
        )
            .into_response(),
        Err(e) => {
            error!(user_id = %user_id, error = %e, "failed to fetch user");
            (
                StatusCode::BAD_GATEWAY,
                Html(user_unavailable_page(&format!("Error: {}", e.user_message()))),
            )
                .into_response()
        }
    }
}

/// `GET /users/:id/confirm/:action`
pub async fn confirm_status_change(
    Path((user_id, action)): Path<(String, String)>,
    uri: Uri,
) -> Response {
    match action.parse::<UserStatusAction>() {
        Ok(action) => Html(confirm_page(&user_id, action)).into_response(),
        Err(_) => unknown_action(&uri),
    }
}

/// `POST /users/:id/:action`
///
/// Applies the change through the admin API and redirects back to the
/// detail page with the outcome.
pub async fn change_status(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<SessionToken>,
    Path((user_id, action)): Path<(String, String)>,
    uri: Uri,
) -> Response {
    let Ok(action) = action.parse::<UserStatusAction>() else {
        return unknown_action(&uri);
    };

    let flash = match state.api_client.set_user_status(&token, &user_id, action).await {
        Ok(()) => {
            info!(user_id = %user_id, %action, "user status changed");
            StatusFlash {
                done: Some(action),
                error: None,
            }
        }
        Err(e) if e.is_unauthorized() => return session_expired(&state, &token),
        Err(e) => {
            warn!(user_id = %user_id, %action, error = %e, "user status change failed");
            let message = match e {
                Error::Status { message, .. } => message,
                other => other.user_message(),
            };
            StatusFlash {
                done: None,
                error: Some(message),
            }
        }
    };

    Redirect::to(&flash.location(&user_id)).into_response()
}

fn unknown_action(uri: &Uri) -> Response {
    (StatusCode::NOT_FOUND, Html(not_found_page(uri.path()))).into_response()
}
