use thiserror::Error;

/// Result type alias for voxmeter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while starting or running a voice session
#[derive(Debug, Error)]
pub enum Error {
    /// A required configuration value is empty or unset.
    ///
    /// Raised before any connection or permission attempt; the message names
    /// the missing value.
    #[error("{0}")]
    ConfigurationMissing(&'static str),

    /// Microphone access was refused by the user or platform
    #[error("microphone permission denied: {0}")]
    PermissionDenied(String),

    /// The voice backend reported a failure during or after connection
    #[error("connection error: {0}")]
    Connection(String),
}
