//! Core types and logic for the `SellCord` admin front-end
//!
//! Everything here is synchronous and free of I/O: configuration, the error
//! type, typed admin API records, the session guard, the notes store and the
//! user list filter. The web crate wires these into request handlers.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod config;
pub mod error;
pub mod filter;
pub mod notes;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use config::{Config, LoggingConfig};
pub use error::{Error, Result};
pub use filter::{TriState, UserFilter};
pub use notes::{ActionOutcome, Note, NoteAction, NoteDraft, NoteId, NotesController, NotesStore};
pub use session::{Destination, MountHook, Navigator, SessionToken};
pub use types::{StoreConfig, User, UserStatusAction};

/// Initialize the logging system
///
/// The `RUST_LOG` environment variable takes precedence over the configured
/// level. `format` selects between JSON lines and human-readable text.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
pub fn init_logging(logging: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.level.as_str().into());

    let registry = tracing_subscriber::registry().with(filter);

    let result = if logging.format.eq_ignore_ascii_case("text") {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    };

    result.map_err(|e| Error::Configuration {
        message: format!("failed to initialize logging: {e}"),
    })
}
