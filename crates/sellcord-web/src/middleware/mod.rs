//! Middleware for session guarding and request logging

pub mod guard;
pub mod logging;

pub use guard::{require_no_session, require_session, session_token};
pub use logging::request_logging_middleware;
