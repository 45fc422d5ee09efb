//! Typed records exchanged with the remote admin API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// User identifier as issued by the admin API
pub type UserId = String;

/// Message value the admin API uses to report success
pub const SUCCESS_MESSAGE: &str = "success";

/// A platform user as returned by the user list and user detail endpoints
///
/// Fields the API sends but the console never shows (the password hash) are
/// not part of the record and are dropped during decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Whether the account is terminated
    pub terminated: bool,

    /// Whether the email address is verified
    pub verified: bool,

    /// Avatar image URL
    #[serde(default)]
    pub avatar_url: Option<String>,

    /// Identifier of the user's store
    #[serde(rename = "storeId", default)]
    pub store_id: Option<String>,

    /// Last successful login, absent for users that never logged in
    #[serde(rename = "lastLogin", default)]
    pub last_login: Option<DateTime<Utc>>,

    /// Account creation time
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    /// Last modification time
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,

    /// Store configuration, only present on the detail endpoint
    #[serde(
        rename = "store",
        alias = "store_config",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub store: Option<StoreConfig>,
}

/// Configuration of a merchant's store
///
/// The store's secret key is deliberately not decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store identifier
    pub id: String,

    /// Store name
    pub name: String,

    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,

    /// Icon URL
    #[serde(default)]
    pub icon: Option<String>,

    /// Banner URL
    #[serde(default)]
    pub banner: Option<String>,

    /// Background image URL
    #[serde(default)]
    pub background_image: Option<String>,

    /// Whether the store is terminated
    pub terminated: bool,

    /// Store creation time
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    /// Last modification time
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl StoreConfig {
    /// Description to display, with a placeholder for blank descriptions
    #[must_use]
    pub fn display_description(&self) -> &str {
        match self.description.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text,
            _ => "No description",
        }
    }
}

/// Standard `{ message, data }` envelope used by the list and detail endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    /// `"success"` on success
    pub message: String,

    /// Payload
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, requiring a success message and a present `data`
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidResponse`] if the message is not
    /// `"success"` or the payload is missing.
    pub fn into_data(self, context: &str) -> crate::Result<T> {
        if self.message != SUCCESS_MESSAGE {
            return Err(crate::Error::InvalidResponse(format!(
                "{context}: unexpected message '{}'",
                self.message
            )));
        }

        self.data.ok_or_else(|| {
            crate::Error::InvalidResponse(format!("{context}: response carried no data"))
        })
    }
}

/// Error body returned by the admin API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiMessage {
    /// Human-readable message
    #[serde(default)]
    pub message: Option<String>,
}

/// Credentials submitted by the login form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Admin username
    #[validate(length(min = 1, message = "Username is required"))]
    #[serde(default)]
    pub username: String,

    /// Admin password
    #[validate(length(min = 1, message = "Password is required"))]
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    /// Per-field messages for a failed validation, in form order
    #[must_use]
    pub fn field_errors(&self) -> LoginFormErrors {
        let mut errors = LoginFormErrors::default();
        let Err(report) = self.validate() else {
            return errors;
        };

        for (field, field_errors) in report.field_errors() {
            let message = field_errors
                .first()
                .and_then(|e| e.message.as_ref())
                .map(ToString::to_string);
            match &*field {
                "username" => errors.username = message,
                "password" => errors.password = message,
                _ => {}
            }
        }

        errors
    }
}

/// Validation messages shown under the login form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginFormErrors {
    /// Message for the username field
    pub username: Option<String>,
    /// Message for the password field
    pub password: Option<String>,
}

impl LoginFormErrors {
    /// Whether no field has an error
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

/// Successful login response
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Session token
    #[serde(alias = "accessToken", alias = "access_token")]
    pub accesstoken: String,
}

/// Account state changes an admin can apply to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatusAction {
    /// Terminate the account
    Terminate,
    /// Reinstate a terminated account
    Reinstate,
}

impl UserStatusAction {
    /// Path segment used by both the admin API and the console routes
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Terminate => "terminate",
            Self::Reinstate => "reinstate",
        }
    }

    /// Title of the confirmation page
    #[must_use]
    pub const fn confirm_title(self) -> &'static str {
        match self {
            Self::Terminate => "Confirm Termination",
            Self::Reinstate => "Confirm Reinstatement",
        }
    }

    /// Message shown after the API accepted the change
    #[must_use]
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::Terminate => "User terminated successfully.",
            Self::Reinstate => "User has been reinstated.",
        }
    }

    /// The user's `terminated` flag once the action has been applied
    #[must_use]
    pub const fn resulting_terminated(self) -> bool {
        matches!(self, Self::Terminate)
    }
}

impl std::fmt::Display for UserStatusAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserStatusAction {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "terminate" => Ok(Self::Terminate),
            "reinstate" => Ok(Self::Reinstate),
            other => Err(crate::Error::Validation {
                field: "action".to_string(),
                message: format!("unknown user action '{other}'"),
            }),
        }
    }
}
