//! Local filtering of the user list

use crate::types::User;
use serde::{Deserialize, Serialize};

/// `all | true | false` selector used by the status dropdowns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriState {
    /// Do not filter on this flag
    #[default]
    All,
    /// Keep users with the flag set
    True,
    /// Keep users with the flag cleared
    False,
}

impl TriState {
    /// Whether a flag value passes this selector
    #[must_use]
    pub const fn accepts(self, value: bool) -> bool {
        match self {
            Self::All => true,
            Self::True => value,
            Self::False => !value,
        }
    }

    /// Query-string value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::True => "true",
            Self::False => "false",
        }
    }
}

/// Filter applied to the user list, taken from the page's query string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFilter {
    /// Case-insensitive substring matched against name and email
    #[serde(default)]
    pub search: String,

    /// Verified status selector
    #[serde(default)]
    pub verified: TriState,

    /// Terminated status selector
    #[serde(default)]
    pub terminated: TriState,
}

impl UserFilter {
    /// Whether a single user passes every criterion
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        self.matches_search(user)
            && self.verified.accepts(user.verified)
            && self.terminated.accepts(user.terminated)
    }

    fn matches_search(&self, user: &User) -> bool {
        let needle = self.search.trim();
        if needle.is_empty() {
            return true;
        }

        let needle = needle.to_lowercase();
        user.name.to_lowercase().contains(&needle) || user.email.to_lowercase().contains(&needle)
    }

    /// Users passing the filter, in their original order
    #[must_use]
    pub fn apply<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        users.iter().filter(|user| self.matches(user)).collect()
    }

    /// Whether any criterion is set
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty()
            || self.verified != TriState::All
            || self.terminated != TriState::All
    }
}
