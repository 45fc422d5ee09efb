//! HTTP client for the remote admin API
//!
//! Every response is decoded into the typed records from
//! [`sellcord_core::types`]; a payload that does not match fails with
//! [`Error::Decode`] instead of leaking missing fields into the pages.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use sellcord_core::{
    Config, Error, Result, SessionToken,
    types::{ApiEnvelope, ApiMessage, LoginRequest, LoginResponse, User, UserStatusAction},
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// API client for the admin endpoints
#[derive(Debug, Clone)]
pub struct AdminApiClient {
    client: Client,
    base_url: String,
}

impl AdminApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Configuration {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Create a client from the `admin_api` configuration section
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.api_base_url(),
            Duration::from_secs(config.admin_api.timeout_seconds),
        )
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange admin credentials for a session token
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] when the API answers 400, 401 or
    /// 403, or a status, transport or decode error otherwise.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<SessionToken> {
        let url = format!("{}/v1/auth/admin/login", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(credentials)
            .send()
            .await
            .map_err(|e| Error::Http(format!("login request failed: {e}")))?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            debug!(%status, "admin API refused login");
            return Err(Error::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(status_error(response).await);
        }

        let body: LoginResponse = decode(response, "login response").await?;
        SessionToken::new(body.accesstoken)
            .ok_or_else(|| Error::InvalidResponse("login response carried no usable token".to_string()))
    }

    /// Fetch every platform user
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] if the token is rejected, or a
    /// transport, status or decode error otherwise.
    pub async fn list_users(&self, token: &SessionToken) -> Result<Vec<User>> {
        let url = format!("{}/v1/admin/users", self.base_url);
        let request = self.client.get(&url).bearer_auth(token.as_str());

        let response = send(request, "user list").await?;
        let envelope: ApiEnvelope<Vec<User>> = decode(response, "user list").await?;
        envelope.into_data("user list")
    }

    /// Fetch one user together with their store configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for unknown ids, [`Error::Unauthorized`]
    /// if the token is rejected, or a transport, status or decode error
    /// otherwise.
    pub async fn get_user(&self, token: &SessionToken, user_id: &str) -> Result<User> {
        let url = format!("{}/v1/admin/user", self.base_url);
        let request = self
            .client
            .get(&url)
            .query(&[("id", user_id)])
            .bearer_auth(token.as_str());

        let context = format!("user {user_id}");
        let response = send(request, &context).await?;
        let envelope: ApiEnvelope<User> = decode(response, &context).await?;
        envelope.into_data(&context)
    }

    /// Terminate or reinstate a user
    ///
    /// Both endpoints are idempotent state flips.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] if the token is rejected, or a
    /// transport or status error carrying the API's message otherwise.
    pub async fn set_user_status(
        &self,
        token: &SessionToken,
        user_id: &str,
        action: UserStatusAction,
    ) -> Result<()> {
        let url = format!("{}/v1/admin/{}", self.base_url, action.as_str());
        let request = self
            .client
            .put(&url)
            .query(&[("id", user_id)])
            .bearer_auth(token.as_str());

        send(request, &format!("user {user_id}")).await?;
        debug!(user_id, %action, "user status changed");
        Ok(())
    }

    /// Terminate a user
    ///
    /// # Errors
    ///
    /// See [`AdminApiClient::set_user_status`].
    pub async fn terminate_user(&self, token: &SessionToken, user_id: &str) -> Result<()> {
        self.set_user_status(token, user_id, UserStatusAction::Terminate)
            .await
    }

    /// Reinstate a terminated user
    ///
    /// # Errors
    ///
    /// See [`AdminApiClient::set_user_status`].
    pub async fn reinstate_user(&self, token: &SessionToken, user_id: &str) -> Result<()> {
        self.set_user_status(token, user_id, UserStatusAction::Reinstate)
            .await
    }
}

/// Send a bearer-authenticated request and map failure statuses
async fn send(request: RequestBuilder, context: &str) -> Result<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| Error::Http(format!("{context}: {e}")))?;

    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            warn!(context, status = %response.status(), "admin API rejected session token");
            Err(Error::Unauthorized)
        }
        StatusCode::NOT_FOUND => Err(Error::NotFound {
            resource: context.to_string(),
        }),
        _ => Err(status_error(response).await),
    }
}

/// Build a status error, preferring the `message` field of the body
async fn status_error(response: Response) -> Error {
    let status = response.status();
    let body = response.bytes().await.unwrap_or_default();
    let message = serde_json::from_slice::<ApiMessage>(&body)
        .ok()
        .and_then(|m| m.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Action failed")
                .to_string()
        });

    Error::Status {
        status: status.as_u16(),
        message,
    }
}

/// Decode a JSON body into a typed record
async fn decode<T: DeserializeOwned>(response: Response, context: &str) -> Result<T> {
    let body = response
        .bytes()
        .await
        .map_err(|e| Error::Http(format!("{context}: failed to read body: {e}")))?;

    serde_json::from_slice(&body).map_err(|source| Error::Decode {
        context: context.to_string(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn user_json(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "password": "hash",
            "terminated": false,
            "verified": true,
            "avatar_url": "https://cdn.example.com/ada.png",
            "storeId": "s-1",
            "lastLogin": "2024-03-15T14:25:30Z",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-03-01T12:00:00Z"
        })
    }

    fn client_for(server: &MockServer) -> AdminApiClient {
        AdminApiClient::new(server.uri(), Duration::from_secs(5)).unwrap()
    }

    fn token() -> SessionToken {
        SessionToken::new("tok-123").unwrap()
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/auth/admin/login"))
            .and(body_json(json!({"username": "admin", "password": "pw"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accesstoken": "abc"})))
            .expect(1)
            .mount(&server)
            .await;

        let credentials = LoginRequest {
            username: "admin".to_string(),
            password: "pw".to_string(),
        };
        let token = client_for(&server).login(&credentials).await.unwrap();

        assert_eq!(token.as_str(), "abc");
    }

    #[rstest]
    #[case(400)]
    #[case(401)]
    #[case(403)]
    #[tokio::test]
    async fn test_login_rejected(#[case] status: u16) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/auth/admin/login"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({"message": "nope"})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .login(&LoginRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_rate_limited_is_not_wrong_password() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/auth/admin/login"))
            .respond_with(
                ResponseTemplate::new(429).set_body_json(json!({"message": "Too many attempts"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .login(&LoginRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Status { status: 429, .. }));
        assert_eq!(err.user_message(), "Too many attempts");
    }

    #[tokio::test]
    async fn test_login_without_token_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/auth/admin/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accesstoken": ""})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .login(&LoginRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_list_users_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/admin/users"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "success",
                "data": [user_json("u-1"), user_json("u-2")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let users = client_for(&server).list_users(&token()).await.unwrap();

        let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["u-1", "u-2"]);
    }

    #[tokio::test]
    async fn test_list_users_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/admin/users"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client_for(&server).list_users(&token()).await.unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_list_users_non_success_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/admin/users"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "error", "data": []})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).list_users(&token()).await.unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_list_users_malformed_record_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/admin/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "success",
                "data": [{"id": "u-1", "name": "missing everything else"}]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).list_users(&token()).await.unwrap_err();
        match err {
            Error::Decode { context, .. } => assert_eq!(context, "user list"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_user_with_store() {
        let server = MockServer::start().await;
        let mut body = user_json("u-9");
        body["store"] = json!({
            "id": "s-9",
            "name": "Nine Lives",
            "description": "Cat supplies",
            "secret_key": "sk_live",
            "icon": null,
            "banner": null,
            "background_image": null,
            "terminated": false,
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        });

        Mock::given(method("GET"))
            .and(path("/v1/admin/user"))
            .and(query_param("id", "u-9"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"message": "success", "data": body})),
            )
            .mount(&server)
            .await;

        let user = client_for(&server).get_user(&token(), "u-9").await.unwrap();

        assert_eq!(user.id, "u-9");
        assert_eq!(user.store.unwrap().name, "Nine Lives");
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/admin/user"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server).get_user(&token(), "ghost").await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_terminate_and_reinstate_hit_their_endpoints() {
        let server = MockServer::start().await;
        for endpoint in ["/v1/admin/terminate", "/v1/admin/reinstate"] {
            Mock::given(method("PUT"))
                .and(path(endpoint))
                .and(query_param("id", "u-1"))
                .and(header("authorization", "Bearer tok-123"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "success"})))
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = client_for(&server);
        client.terminate_user(&token(), "u-1").await.unwrap();
        client.reinstate_user(&token(), "u-1").await.unwrap();
    }

    #[tokio::test]
    async fn test_status_error_uses_api_message() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v1/admin/terminate"))
            .respond_with(
                ResponseTemplate::new(409).set_body_json(json!({"message": "User already terminated"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .terminate_user(&token(), "u-1")
            .await
            .unwrap_err();

        match err {
            Error::Status { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "User already terminated");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_api_is_http_error() {
        // Nothing listens on port 9 (discard) in the test environment
        let client = AdminApiClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = client.list_users(&token()).await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = AdminApiClient::new("http://api.example.com/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://api.example.com");
    }
}
