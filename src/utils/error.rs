//! Error types for playhead
//!
//! The runtime surface of this crate is deliberately infallible: expected
//! races (no adapter attached yet, duration still unknown) are modeled as
//! guarded no-ops, never as errors. The only fallible point is construction,
//! where malformed options are rejected.

use thiserror::Error;

/// Main error type for playhead
#[derive(Error, Debug)]
pub enum PlayerError {
    /// Configuration errors, raised at construction time only
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PlayerError {
    /// Create a configuration error from string
    pub fn config<S: Into<String>>(msg: S) -> Self {
        PlayerError::Config(msg.into())
    }
}

/// Convenience type alias for Results in playhead
pub type Result<T> = std::result::Result<T, PlayerError>;
