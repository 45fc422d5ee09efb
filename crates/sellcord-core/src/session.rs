//! Session token handling and the page-mount guards
//!
//! The guards only look at whether a token is stored, never at whether it is
//! still valid. An expired token passes and is rejected later by the admin
//! API with a 401, which page handlers turn into a logout.

use std::fmt;

/// Cookie name used when none is configured
pub const DEFAULT_COOKIE_NAME: &str = "accessToken";

/// Opaque credential issued by the admin API on login
///
/// Always non-empty and safe to place in a cookie value.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw token
    ///
    /// Returns `None` for empty tokens and for tokens containing characters
    /// that cannot appear in a cookie value.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() || !raw.chars().all(is_cookie_value_char) {
            return None;
        }
        Some(Self(raw))
    }

    /// The raw token, as sent in the `Authorization` header
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep the credential out of logs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken(<{} chars>)", self.0.len())
    }
}

/// RFC 6265 `cookie-octet`
const fn is_cookie_value_char(c: char) -> bool {
    matches!(c, '\x21' | '\x23'..='\x2B' | '\x2D'..='\x3A' | '\x3C'..='\x5B' | '\x5D'..='\x7E')
}

/// Read the session token from a `Cookie` request header
///
/// A missing header (nothing can be read) and a missing or empty cookie all
/// yield `None`.
#[must_use]
pub fn token_from_cookie_header(header: Option<&str>, cookie_name: &str) -> Option<SessionToken> {
    header?
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| SessionToken::new(value.trim().trim_matches('"')))
}

/// `Set-Cookie` value that stores the session token
#[must_use]
pub fn session_cookie(cookie_name: &str, token: &SessionToken, secure: bool) -> String {
    let secure_flag = if secure { "; Secure" } else { "" };
    format!(
        "{cookie_name}={}; Path=/; HttpOnly; SameSite=Lax{secure_flag}",
        token.as_str()
    )
}

/// `Set-Cookie` value that removes the session token
#[must_use]
pub fn clear_session_cookie(cookie_name: &str, secure: bool) -> String {
    let secure_flag = if secure { "; Secure" } else { "" };
    format!("{cookie_name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0{secure_flag}")
}

/// Fixed places a guard can send the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The login page
    Login,
    /// The dashboard
    Dashboard,
}

impl Destination {
    /// Path of the destination page
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
        }
    }
}

/// "Go to path" capability supplied by the host
pub trait Navigator {
    /// Navigate to a destination
    fn go_to(&mut self, destination: Destination);
}

/// Navigator that records every navigation it is asked to perform
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingNavigator {
    visits: Vec<Destination>,
}

impl RecordingNavigator {
    /// Create an empty recorder
    #[must_use]
    pub const fn new() -> Self {
        Self { visits: Vec::new() }
    }

    /// Navigations in the order they were requested
    #[must_use]
    pub fn visits(&self) -> &[Destination] {
        &self.visits
    }

    /// First requested navigation, if any
    #[must_use]
    pub fn first(&self) -> Option<Destination> {
        self.visits.first().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&mut self, destination: Destination) {
        self.visits.push(destination);
    }
}

/// Send visitors without a session to the login page
pub fn require_authenticated<N: Navigator + ?Sized>(token: Option<&SessionToken>, navigator: &mut N) {
    if token.is_none() {
        navigator.go_to(Destination::Login);
    }
}

/// Send visitors with a session to the dashboard
pub fn require_anonymous<N: Navigator + ?Sized>(token: Option<&SessionToken>, navigator: &mut N) {
    if token.is_some() {
        navigator.go_to(Destination::Dashboard);
    }
}

/// Which guard a page mounts with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardKind {
    /// Protected page
    Authenticated,
    /// Public-only page such as the login form
    Anonymous,
}

/// A guard waiting to run once after the page mounts
///
/// [`MountHook::mount`] consumes the hook, so a guard cannot fire twice for
/// the same mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a mount hook does nothing until it is mounted"]
pub struct MountHook {
    kind: GuardKind,
}

impl MountHook {
    /// Hook for a protected page
    pub const fn authenticated() -> Self {
        Self {
            kind: GuardKind::Authenticated,
        }
    }

    /// Hook for a public-only page
    pub const fn anonymous() -> Self {
        Self {
            kind: GuardKind::Anonymous,
        }
    }

    /// Guard kind
    #[must_use]
    pub const fn kind(self) -> GuardKind {
        self.kind
    }

    /// Run the guard
    pub fn mount<N: Navigator + ?Sized>(self, token: Option<&SessionToken>, navigator: &mut N) -> Cleanup {
        match self.kind {
            GuardKind::Authenticated => require_authenticated(token, navigator),
            GuardKind::Anonymous => require_anonymous(token, navigator),
        }
        Cleanup
    }
}

/// Cleanup returned by a mounted guard; guards hold no resources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cleanup;

impl Cleanup {
    /// Run the cleanup
    pub const fn run(self) {}
}
