//! Configuration management for the admin front-end

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Web server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Remote admin API configuration
    #[serde(default)]
    pub admin_api: AdminApiConfig,

    /// Session cookie configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Web server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Remote admin API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminApiConfig {
    /// Base URL, without a trailing `/v1`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Session cookie configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie holding the session token
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Add the `Secure` attribute to the session cookie
    #[serde(default)]
    pub secure_cookie: bool,

    /// Seconds without a request after which a session's notes are dropped
    #[serde(default = "default_idle_timeout_seconds")]
    pub idle_timeout_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or text)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

const fn default_timeout_seconds() -> u64 {
    30
}

const fn default_idle_timeout_seconds() -> u64 {
    8 * 60 * 60
}

fn default_cookie_name() -> String {
    crate::session::DEFAULT_COOKIE_NAME.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for AdminApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            secure_cookie: false,
            idle_timeout_seconds: default_idle_timeout_seconds(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from an optional `config` file and `SELLCORD_*`
    /// environment variables
    ///
    /// Nested keys use a double underscore, e.g.
    /// `SELLCORD_ADMIN_API__BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, parsed or validated.
    pub fn load() -> crate::Result<Self> {
        let config: Self = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("SELLCORD")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot express
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending field.
    pub fn validate(&self) -> crate::Result<()> {
        if self.session.cookie_name.trim().is_empty() {
            return Err(crate::Error::Validation {
                field: "session.cookie_name".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if self.session.idle_timeout_seconds == 0 {
            return Err(crate::Error::Validation {
                field: "session.idle_timeout_seconds".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        if !(self.admin_api.base_url.starts_with("http://")
            || self.admin_api.base_url.starts_with("https://"))
        {
            return Err(crate::Error::Validation {
                field: "admin_api.base_url".to_string(),
                message: format!("'{}' is not an http(s) URL", self.admin_api.base_url),
            });
        }

        if self.admin_api.timeout_seconds == 0 {
            return Err(crate::Error::Validation {
                field: "admin_api.timeout_seconds".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Admin API base URL without a trailing slash
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        self.admin_api.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);

        assert_eq!(config.admin_api.base_url, "http://localhost:8080");
        assert_eq!(config.admin_api.timeout_seconds, 30);

        assert_eq!(config.session.cookie_name, "accessToken");
        assert!(!config.session.secure_cookie);
        assert_eq!(config.session.idle_timeout_seconds, 28_800);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "json");

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_deserialization() {
        let json_str = r#"{
            "server": {"host": "127.0.0.1"},
            "admin_api": {"base_url": "https://api.example.com/"}
        }"#;

        let config: Config = serde_json::from_str(json_str).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000); // Uses default
        assert_eq!(config.api_base_url(), "https://api.example.com");
        assert_eq!(config.session.cookie_name, "accessToken");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_empty_cookie_name_rejected() {
        let mut config = Config::default();
        config.session.cookie_name = "  ".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("session.cookie_name"));
    }

    #[test]
    fn test_zero_idle_timeout_rejected() {
        let mut config = Config::default();
        config.session.idle_timeout_seconds = 0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("session.idle_timeout_seconds"));
    }

    #[test]
    fn test_non_http_base_url_rejected() {
        let mut config = Config::default();
        config.admin_api.base_url = "ftp://admin.example.com".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("admin_api.base_url"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.admin_api.timeout_seconds = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.session.secure_cookie = true;
        config.logging.format = "text".to_string();

        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&serialized).unwrap();

        assert!(deserialized.session.secure_cookie);
        assert_eq!(deserialized.logging.format, "text");
        assert_eq!(deserialized.server.port, config.server.port);
    }
}
