//! Page guards run once per page request
//!
//! Each guarded route group mounts a [`MountHook`] before its handler runs.
//! A navigation requested by the hook becomes a `303 See Other`; otherwise the
//! session token, if any, is handed to the handler as a request extension.

use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::COOKIE},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use sellcord_core::{Destination, MountHook, Navigator, SessionToken, session::token_from_cookie_header};
use std::sync::Arc;
use tracing::debug;

/// Navigator that keeps the first requested destination
#[derive(Debug, Default)]
pub struct RedirectNavigator {
    target: Option<Destination>,
}

impl RedirectNavigator {
    /// Create a navigator with no pending redirect
    #[must_use]
    pub const fn new() -> Self {
        Self { target: None }
    }

    /// Pending destination, if a guard asked for one
    #[must_use]
    pub const fn target(&self) -> Option<Destination> {
        self.target
    }

    /// Turn the pending destination into a redirect response
    #[must_use]
    pub fn into_redirect(self) -> Option<Response> {
        self.target
            .map(|destination| Redirect::to(destination.path()).into_response())
    }
}

impl Navigator for RedirectNavigator {
    fn go_to(&mut self, destination: Destination) {
        self.target.get_or_insert(destination);
    }
}

/// Read the session token from the request's `Cookie` header
#[must_use]
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<SessionToken> {
    let header = headers.get(COOKIE).and_then(|value| value.to_str().ok());
    token_from_cookie_header(header, cookie_name)
}

/// Guard for protected pages: no session redirects to `/login`
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    run_guard(MountHook::authenticated(), &state, request, next).await
}

/// Guard for public-only pages: an existing session redirects to `/dashboard`
pub async fn require_no_session(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    run_guard(MountHook::anonymous(), &state, request, next).await
}

async fn run_guard(hook: MountHook, state: &AppState, mut request: Request, next: Next) -> Response {
    let token = session_token(request.headers(), state.cookie_name());

    let mut navigator = RedirectNavigator::new();
    let cleanup = hook.mount(token.as_ref(), &mut navigator);

    if let Some(redirect) = navigator.into_redirect() {
        debug!(guard = ?hook.kind(), path = %request.uri().path(), "guard redirected");
        cleanup.run();
        return redirect;
    }

    if let Some(token) = token {
        request.extensions_mut().insert(token);
    }

    let response = next.run(request).await;
    cleanup.run();
    response
}
