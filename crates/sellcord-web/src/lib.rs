//! `SellCord` admin console
//!
//! Server-rendered pages for platform administrators: login, a dashboard
//! with per-session notes, and user management backed by the remote admin
//! API.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod api_client;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod views;

// Re-export the main functions
pub use api_client::AdminApiClient;
pub use server::{build_app, build_router};
pub use state::AppState;
