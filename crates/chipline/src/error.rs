//! Error types for the chip row.

/// Result type alias for chip row operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the chip row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The resize monitor was asked to stop while not observing.
    #[error("resize monitor is not observing")]
    NotObserving,

    /// The resize monitor was asked to start while already observing.
    #[error("resize monitor is already observing")]
    AlreadyObserving,
}
