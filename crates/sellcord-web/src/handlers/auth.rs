//! Login and logout

use crate::{
    middleware::session_token,
    state::AppState,
    views::login::{LoginForm, login_page as render_login},
};
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::{Html, IntoResponse, Redirect, Response},
};
use sellcord_core::{
    Destination, Error,
    session::{clear_session_cookie, session_cookie},
    types::{LoginFormErrors, LoginRequest},
};
use std::sync::Arc;
use tracing::{info, warn};

/// `GET /login`
pub async fn login_page() -> Html<String> {
    Html(render_login(&LoginForm::default()))
}

/// `POST /login`
///
/// Validates the form, exchanges the credentials for a session token and
/// stores it in the session cookie. Failures re-render the form.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Form(credentials): Form<LoginRequest>,
) -> Response {
    let errors = credentials.field_errors();
    if !errors.is_empty() {
        let form = LoginForm {
            username: &credentials.username,
            errors,
            failure: None,
        };
        return (StatusCode::UNPROCESSABLE_ENTITY, Html(render_login(&form))).into_response();
    }

    match state.api_client.login(&credentials).await {
        Ok(token) => {
            info!(username = %credentials.username, "admin logged in");
            let cookie = session_cookie(
                state.cookie_name(),
                &token,
                state.config.session.secure_cookie,
            );
            (
                [(SET_COOKIE, cookie)],
                Redirect::to(Destination::Dashboard.path()),
            )
                .into_response()
        }
        Err(e) => {
            warn!(username = %credentials.username, error = %e, "login failed");
            let status = match e {
                Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
                _ => StatusCode::BAD_GATEWAY,
            };
            let form = LoginForm {
                username: &credentials.username,
                errors: LoginFormErrors::default(),
                failure: Some(e.user_message()),
            };
            (status, Html(render_login(&form))).into_response()
        }
    }
}

/// `GET /logout` and `POST /logout`
pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers, state.cookie_name()) {
        state.end_session(&token);
        info!("admin logged out");
    }
    signed_out(&state)
}

/// Clear the session cookie and go to the login page
pub(crate) fn signed_out(state: &AppState) -> Response {
    let cookie = clear_session_cookie(state.cookie_name(), state.config.session.secure_cookie);
    (
        [(SET_COOKIE, cookie)],
        Redirect::to(Destination::Login.path()),
    )
        .into_response()
}
