//! Integration tests for the session guard, login/logout and the dashboard

#![allow(clippy::unwrap_used)]

mod common;

use axum::http::StatusCode;
use common::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_root_redirects_to_login() {
    let api = MockServer::start().await;
    let app = TestApp::new(&api);

    let response = app.send(get("/")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[rstest]
#[case("/dashboard")]
#[case("/users")]
#[case("/users/u-1")]
#[case("/users/u-1/confirm/terminate")]
#[tokio::test]
async fn test_protected_pages_redirect_without_session(#[case] uri: &str) {
    let api = MockServer::start().await;
    let app = TestApp::new(&api);

    let response = app.send(get(uri)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_protected_post_redirects_without_session() {
    let api = MockServer::start().await;
    let app = TestApp::new(&api);

    let response = app
        .send(post_form("/dashboard/notes", "title=a&description=b", false))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert_eq!(app.state.session_count(), 0);
}

#[tokio::test]
async fn test_login_page_redirects_with_session() {
    let api = MockServer::start().await;
    let app = TestApp::new(&api);

    let response = app.send(get_authed("/login")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_login_page_renders_without_session() {
    let api = MockServer::start().await;
    let app = TestApp::new(&api);

    let response = app.send(get("/login")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Admin Login"));
    assert!(html.contains(r#"name="password""#));
}

#[tokio::test]
async fn test_login_validation_messages() {
    let api = MockServer::start().await;
    let app = TestApp::new(&api);

    let response = app
        .send(post_form("/login", "username=&password=", false))
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("Username is required"));
    assert!(html.contains("Password is required"));
}

#[tokio::test]
async fn test_login_success_sets_cookie() {
    let api = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/admin/login"))
        .and(body_json(json!({"username": "admin", "password": "s3cret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accesstoken": "fresh-token"})))
        .expect(1)
        .mount(&api)
        .await;
    let app = TestApp::new(&api);

    let response = app
        .send(post_form("/login", "username=admin&password=s3cret", false))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    let cookie = set_cookie(&response).unwrap();
    assert!(cookie.starts_with("accessToken=fresh-token;"));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_login_wrong_credentials() {
    let api = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/admin/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid"})))
        .mount(&api)
        .await;
    let app = TestApp::new(&api);

    let response = app
        .send(post_form("/login", "username=admin&password=nope", false))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&response).is_none());
    let html = body_text(response).await;
    assert!(html.contains("Wrong username or password"));
    assert!(html.contains(r#"value="admin""#));
}

#[tokio::test]
async fn test_logout_clears_cookie_and_notes() {
    let api = MockServer::start().await;
    let app = TestApp::new(&api);

    app.send(post_form("/dashboard/notes", "title=Keep&description=", true))
        .await;
    assert_eq!(app.state.session_count(), 1);

    let response = app.send(post_form("/logout", "", true)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(set_cookie(&response).unwrap().contains("Max-Age=0"));
    assert_eq!(app.state.session_count(), 0);
}

#[tokio::test]
async fn test_dashboard_renders_fixed_content() {
    let api = MockServer::start().await;
    let app = TestApp::new(&api);

    let response = app.send(get_authed("/dashboard")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Total Revenue"));
    assert!(html.contains("$12,345.67"));
    assert!(html.contains("Announcements"));
    assert!(html.contains("No notes yet."));
}

#[tokio::test]
async fn test_notes_add_edit_delete_flow() {
    let api = MockServer::start().await;
    let app = TestApp::new(&api);

    let response = app
        .send(post_form(
            "/dashboard/notes",
            "title=++Restock+&description=Order+mugs",
            true,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    assert_eq!(app.note_titles(), vec!["Restock"]);

    let id = app.first_note_id();
    app.send(post_form(&format!("/dashboard/notes/{id}/edit"), "", true))
        .await;
    let html = body_text(app.send(get_authed("/dashboard")).await).await;
    assert!(html.contains("Update Note"));
    assert!(html.contains(r#"value="Restock""#));

    app.send(post_form(
        "/dashboard/notes",
        "title=Restock+today&description=Order+mugs",
        true,
    ))
    .await;
    assert_eq!(app.note_titles(), vec!["Restock today"]);
    assert_eq!(app.first_note_id(), id);

    let html = body_text(app.send(get_authed("/dashboard")).await).await;
    assert!(html.contains("Add Note"));

    app.send(post_form(&format!("/dashboard/notes/{id}/delete"), "", true))
        .await;
    assert!(app.note_titles().is_empty());
}

#[tokio::test]
async fn test_blank_note_is_ignored() {
    let api = MockServer::start().await;
    let app = TestApp::new(&api);

    let response = app
        .send(post_form("/dashboard/notes", "title=+++&description=", true))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(app.note_titles().is_empty());
}

#[tokio::test]
async fn test_cancel_edit_keeps_note() {
    let api = MockServer::start().await;
    let app = TestApp::new(&api);

    app.send(post_form("/dashboard/notes", "title=A&description=B", true))
        .await;
    let id = app.first_note_id();
    app.send(post_form(&format!("/dashboard/notes/{id}/edit"), "", true))
        .await;
    app.send(post_form("/dashboard/notes/cancel", "", true)).await;

    app.send(post_form("/dashboard/notes", "title=C&description=D", true))
        .await;
    assert_eq!(app.note_titles(), vec!["A", "C"]);
}

#[tokio::test]
async fn test_delete_unknown_note_is_silent() {
    let api = MockServer::start().await;
    let app = TestApp::new(&api);

    let response = app
        .send(post_form("/dashboard/notes/424242/delete", "", true))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_health_check() {
    let api = MockServer::start().await;
    let app = TestApp::new(&api);

    let response = app.send(get("/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["active_sessions"], 0);
}

#[tokio::test]
async fn test_unknown_route_is_404_page() {
    let api = MockServer::start().await;
    let app = TestApp::new(&api);

    let response = app.send(get("/nowhere")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("/nowhere"));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let api = MockServer::start().await;
    let app = TestApp::new(&api);

    let request = axum::http::Request::builder()
        .uri("/health")
        .header("x-request-id", "req_from_client")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.headers()["x-request-id"], "req_from_client");

    let response = app.send(get("/health")).await;
    let generated = response.headers()["x-request-id"].to_str().unwrap();
    assert!(generated.starts_with("req_"));
}
