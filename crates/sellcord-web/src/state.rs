//! Application state management

use crate::api_client::AdminApiClient;
use dashmap::DashMap;
use sellcord_core::{Config, NotesController, Result, SessionToken};
use std::time::{Duration, Instant};
use tracing::debug;

/// Notes of one session and when that session last touched them
#[derive(Debug)]
struct SessionNotes {
    controller: NotesController,
    last_seen: Instant,
}

impl SessionNotes {
    fn new(now: Instant) -> Self {
        Self {
            controller: NotesController::default(),
            last_seen: now,
        }
    }
}

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Client for the remote admin API
    pub api_client: AdminApiClient,
    /// Dashboard notes, one controller per session token
    sessions: DashMap<SessionToken, SessionNotes>,
    /// Sessions idle for this long lose their notes
    idle_timeout: Duration,
    /// When the server started
    started_at: Instant,
}

impl AppState {
    /// Create new application state
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let api_client = AdminApiClient::from_config(&config)?;
        let idle_timeout = Duration::from_secs(config.session.idle_timeout_seconds);

        Ok(Self {
            config,
            api_client,
            sessions: DashMap::new(),
            idle_timeout,
            started_at: Instant::now(),
        })
    }

    /// Name of the session cookie
    #[must_use]
    pub fn cookie_name(&self) -> &str {
        &self.config.session.cookie_name
    }

    /// Run `f` against the session's notes controller, creating it on first use
    ///
    /// The map entry stays locked for the duration of `f`, so each session
    /// has a single writer at a time.
    pub fn with_notes<R>(&self, token: &SessionToken, f: impl FnOnce(&mut NotesController) -> R) -> R {
        let now = Instant::now();
        self.evict_idle(now);
        let mut entry = self
            .sessions
            .entry(token.clone())
            .or_insert_with(|| SessionNotes::new(now));
        entry.last_seen = now;
        f(&mut entry.controller)
    }

    /// Run `f` against the session's notes controller if the session has one
    ///
    /// Returns `None` without storing anything for sessions that never
    /// added a note.
    pub fn with_existing_notes<R>(
        &self,
        token: &SessionToken,
        f: impl FnOnce(&mut NotesController) -> R,
    ) -> Option<R> {
        let now = Instant::now();
        self.evict_idle(now);
        let mut entry = self.sessions.get_mut(token)?;
        entry.last_seen = now;
        Some(f(&mut entry.controller))
    }

    /// Read the session's notes; sessions without notes see an empty controller
    pub fn read_notes<R>(&self, token: &SessionToken, f: impl FnOnce(&NotesController) -> R) -> R {
        let now = Instant::now();
        self.evict_idle(now);
        match self.sessions.get_mut(token) {
            Some(mut entry) => {
                entry.last_seen = now;
                f(&entry.controller)
            }
            None => f(&NotesController::default()),
        }
    }

    /// Drop the notes of every session idle since before `now - idle_timeout`
    ///
    /// Returns how many sessions were dropped.
    pub fn evict_idle(&self, now: Instant) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| now.saturating_duration_since(session.last_seen) < self.idle_timeout);
        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            debug!(evicted, "dropped notes of idle sessions");
        }
        evicted
    }

    /// Forget everything stored for a session
    pub fn end_session(&self, token: &SessionToken) {
        if self.sessions.remove(token).is_some() {
            debug!("dropped notes for ended session");
        }
    }

    /// Number of sessions holding notes
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Seconds since the server started
    #[must_use]
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
