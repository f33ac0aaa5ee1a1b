use thiserror::Error;

/// The universal error type for the Siproxylin application.
#[derive(Error, Debug)]
pub enum SiproxylinError {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Version descriptor error: {0}")]
    Version(#[from] crate::version::VersionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A specialized Result type for Siproxylin operations.
pub type Result<T> = std::result::Result<T, SiproxylinError>;
