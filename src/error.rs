//! Error types for the route index builder.

use thiserror::Error;

/// Faults raised by an aspect resolver.
///
/// Resolvers are expected to be total for well-formed content; these variants
/// surface malformed payloads and unavailable collaborators to the caller.
#[derive(Debug, Error)]
pub enum AspectError {
    #[error("Malformed content at {locator}: {reason}")]
    Malformed { locator: String, reason: String },

    #[error("Aspect resolver unavailable: {0}")]
    Unavailable(String),
}

/// Index building errors
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Aspect resolution failed: {0}")]
    Aspect(#[from] AspectError),

    #[error("Index build cancelled for content item {0}")]
    Cancelled(String),

    #[error("Invalid content item: {0}")]
    InvalidContentItem(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<config::ConfigError> for IndexError {
    fn from(err: config::ConfigError) -> Self {
        IndexError::ConfigError(err.to_string())
    }
}
