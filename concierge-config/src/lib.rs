//! Concierge configuration management using Figment
//!
//! Loads the immutable server configuration once at process start, from three
//! sources with later sources winning:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file (`concierge.toml` in the working directory, or an
//!    explicit path)
//! 3. Environment variables prefixed `CONCIERGE_`, with nested keys split on
//!    `__` (e.g. `CONCIERGE_AUTH__TOKEN` sets `auth.token`)
//!
//! The resulting [`ServerConfig`] is validated and then passed by reference
//! into the server; nothing in it changes for the process lifetime.

mod error;

pub use error::ConfigError;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file discovered in the working directory when no explicit
/// path is given.
pub const DEFAULT_CONFIG_FILE: &str = "concierge.toml";

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "CONCIERGE_";

/// Complete server configuration, fixed at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bearer credential settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Identity reported by the validate tool.
    #[serde(default)]
    pub identity: IdentityConfig,
    /// Resume document settings.
    #[serde(default)]
    pub resume: ResumeConfig,
    /// HTTP server bind settings.
    #[serde(default)]
    pub server: BindConfig,
    /// Outbound fetch settings.
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Shared-secret settings for the token gate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// The bearer token every caller must present. Required, non-empty.
    pub token: String,
}

/// Identity settings for the validate tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Phone number in `<country_code><number>` format (e.g. "916366797779").
    pub number: String,
}

/// Resume document settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeConfig {
    /// Path to the markdown resume document.
    pub path: PathBuf,
}

impl Default for ResumeConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("resume.md"),
        }
    }
}

/// HTTP server bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to. Port 0 requests a random port.
    pub port: u16,
}

impl Default for BindConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8085,
        }
    }
}

/// Settings for the outbound HTTP client used by the fetch tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Identifying User-Agent sent with every outbound request.
    pub user_agent: String,
    /// End-to-end request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum number of redirects to follow.
    pub max_redirects: u32,
    /// Line width used when rendering HTML to markdown.
    pub max_line_width: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Concierge-Bot/1.0".to_string(),
            timeout_secs: 30,
            max_redirects: 10,
            max_line_width: 120,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            auth: AuthConfig::default(),
            identity: IdentityConfig::default(),
            resume: ResumeConfig::default(),
            server: BindConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the default file location and environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Load configuration from an explicit TOML file path and environment.
    ///
    /// A missing file is not an error; defaults and environment variables
    /// still apply.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config: ServerConfig = Figment::new()
            .merge(Serialized::defaults(ServerConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        config.validate()?;
        tracing::debug!(
            bind = %config.bind_addr(),
            resume = %config.resume.path.display(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Validate cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.token.trim().is_empty() {
            return Err(ConfigError::validation(
                "auth.token must be set to a non-empty bearer secret",
            ));
        }
        if self.identity.number.is_empty()
            || !self.identity.number.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ConfigError::validation(
                "identity.number must be digits in <country_code><number> format",
            ));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::validation(
                "fetch.timeout_secs must be greater than zero",
            ));
        }
        Ok(())
    }

    /// The `host:port` string the HTTP server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
