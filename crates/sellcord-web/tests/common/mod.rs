//! Common test utilities and fixtures for integration tests

#![allow(dead_code, clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use sellcord_core::{Config, SessionToken};
use sellcord_web::{AppState, build_router};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::MockServer;

/// Token every authenticated test request carries
pub const TEST_TOKEN: &str = "test-token-123";

/// Router wired to a mock admin API, plus its state for inspection
pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
}

impl TestApp {
    /// Build the console against `api`
    pub fn new(api: &MockServer) -> Self {
        let mut config = Config::default();
        config.admin_api.base_url = api.uri();
        config.admin_api.timeout_seconds = 5;

        let state = Arc::new(AppState::new(config).unwrap());
        let router = build_router(Arc::clone(&state));
        Self { router, state }
    }

    /// Send one request through the router
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Note titles stored for the test session
    pub fn note_titles(&self) -> Vec<String> {
        self.state.read_notes(&token(), |notes| {
            notes
                .store()
                .notes()
                .iter()
                .map(|n| n.title.clone())
                .collect()
        })
    }

    /// Id of the first stored note of the test session
    pub fn first_note_id(&self) -> i64 {
        self.state
            .read_notes(&token(), |notes| notes.store().notes().first().map(|n| n.id))
            .unwrap()
    }
}

/// The test session token
pub fn token() -> SessionToken {
    SessionToken::new(TEST_TOKEN).unwrap()
}

/// `GET` without a session cookie
pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// `GET` with the test session cookie
pub fn get_authed(uri: &str) -> Request<Body> {
    get_with_cookie(uri, &format!("accessToken={TEST_TOKEN}"))
}

/// `GET` carrying an arbitrary `Cookie` header
pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

/// Form `POST`, optionally with the test session cookie
pub fn post_form(uri: &str, form: &str, authed: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if authed {
        builder = builder.header(header::COOKIE, format!("accessToken={TEST_TOKEN}"));
    }
    builder.body(Body::from(form.to_string())).unwrap()
}

/// Collect a response body as text
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// `Location` header of a redirect
pub fn location(response: &Response<Body>) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

/// `Set-Cookie` header, if any
pub fn set_cookie(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap())
}

/// A user record as the admin API sends it
pub fn user_json(id: &str, name: &str, email: &str, verified: bool, terminated: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": email,
        "password": "$2b$10$hash",
        "terminated": terminated,
        "verified": verified,
        "avatar_url": null,
        "storeId": format!("store-{id}"),
        "lastLogin": "2024-03-15T14:25:30Z",
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-03-01T12:00:00Z"
    })
}

/// Store record attached to the detail response
pub fn store_json(name: &str, description: Option<&str>) -> Value {
    json!({
        "id": "store-1",
        "name": name,
        "description": description,
        "secret_key": "sk_live_never_rendered",
        "icon": null,
        "banner": null,
        "background_image": null,
        "terminated": false,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-02-01T00:00:00Z"
    })
}

/// Wrap a payload in the success envelope
pub fn success(data: Value) -> Value {
    json!({ "message": "success", "data": data })
}
