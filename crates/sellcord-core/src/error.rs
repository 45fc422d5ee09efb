//! Error types for the `SellCord` admin front-end

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the admin front-end
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message
        message: String,
    },

    /// Validation error
    #[error("Validation error: {field} - {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// The request never produced an HTTP response
    #[error("Request to admin API failed: {0}")]
    Http(String),

    /// The admin API answered with a non-success status
    #[error("Admin API returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Message from the response body, or the canonical reason
        message: String,
    },

    /// The admin API rejected the session token
    #[error("Session rejected by admin API")]
    Unauthorized,

    /// The login endpoint refused the submitted credentials
    #[error("Wrong username or password")]
    InvalidCredentials,

    /// A response body did not match the expected record shape
    #[error("Failed to decode {context}: {source}")]
    Decode {
        /// What was being decoded
        context: String,
        /// Underlying decoding error
        #[source]
        source: serde_json::Error,
    },

    /// The response decoded but did not report success
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Not found error
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Resource that was not found
        resource: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error means the stored session is no longer usable
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Message suitable for showing on a page
    ///
    /// Transport and decode details stay in the logs; the page gets a short
    /// sentence.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(_) => "Unable to reach the admin API. Please try again.".to_string(),
            Self::Decode { .. } | Self::InvalidResponse(_) => {
                "The admin API returned an unexpected response.".to_string()
            }
            Self::Unauthorized => "Your session has expired. Please log in again.".to_string(),
            Self::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}
