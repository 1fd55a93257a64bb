/// Core error types for RETRO.WAV
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A playlist needs at least one track
    #[error("Playlist is empty")]
    EmptyPlaylist,

    /// Configuration could not be read or deserialized
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration was read but holds unusable values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CoreError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
