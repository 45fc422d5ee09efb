//! Web server setup and configuration

use crate::{middleware::request_logging_middleware, routes::build_routes, state::AppState};
use axum::{Router, http::StatusCode, middleware::from_fn};
use sellcord_core::{Config, Result};
use std::{sync::Arc, time::Duration};
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer};

/// Build the complete web application with all routes and state
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the admin API client
/// cannot be built.
pub fn build_app(config: Config) -> Result<Router> {
    let state = Arc::new(AppState::new(config)?);
    Ok(build_router(state))
}

/// Build the router around existing state
pub fn build_router(state: Arc<AppState>) -> Router {
    // Must exceed the admin API timeout
    let request_timeout = Duration::from_secs(state.config.admin_api.timeout_seconds.saturating_add(5));

    build_routes(&state)
        .layer(from_fn(request_logging_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}
