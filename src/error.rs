//! Error types for the render service

use thiserror::Error;

/// Result type alias for render service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the render service
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to initialize the engine
    #[error("Engine initialization failed: {0}")]
    InitializationError(String),

    /// The engine could not load a URL
    #[error("Failed to load URL: {0}")]
    LoadError(String),

    /// The request payload was malformed or missing the target URL
    #[error("Invalid job payload: {0}")]
    PayloadError(String),

    /// A load did not reach a terminal state within the deadline
    #[error("Load timed out after {0}ms")]
    Timeout(u64),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
