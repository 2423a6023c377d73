//! Error types for sl-core
//!
//! One taxonomy covers both halves of the crate: the analysis pipeline
//! (invalid input, bucket missing, authorization, retryable faults) and
//! the endpoint configuration store.

use thiserror::Error;

/// Result type alias for sl-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sl-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Bucket name rejected before any listing call was attempted
    #[error("Invalid bucket name: {0}")]
    InvalidBucketName(String),

    /// Bucket does not exist
    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    /// Authorization failure from the storage backend
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Retryable network or service fault
    #[error("Transient storage error: {0}")]
    Transient(String),

    /// Endpoint not found in the configuration store
    #[error("Endpoint not found: {0}")]
    EndpointNotFound(String),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Whether retrying the whole operation may succeed.
    ///
    /// Retry policy belongs to callers; the engine itself never retries.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Error::Transient(_))
    }
}
