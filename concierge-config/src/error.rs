//! Error types for the Concierge configuration system

use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration parsing failed
    #[error("Failed to parse configuration: {source}")]
    Parse {
        #[from]
        source: figment::Error,
    },

    /// Configuration validation failed
    #[error("Configuration validation failed: {message}")]
    Validation { message: String },
}

impl ConfigError {
    /// Shorthand for a validation failure with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        ConfigError::Validation {
            message: message.into(),
        }
    }
}
