//! Error types for the playback engine

/// Main error type for playback operations.
///
/// The scripted crash is a designed state transition, not an error, and never
/// appears here. Out-of-range advances are no-ops. What remains is rejected
/// user input and invalid configuration.
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    /// Selection of an event that has not been revealed yet
    #[error("Event {0} is not visible yet")]
    HiddenEvent(usize),

    /// Event or display-item index outside the log
    #[error("Index {0} is out of range")]
    InvalidIndex(usize),

    /// Toggling expansion on a display item that is not a group
    #[error("Display item {0} is not a group")]
    NotAGroup(usize),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type alias for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
