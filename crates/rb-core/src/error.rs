//! Construction-boundary error type.
//!
//! The sleep/wake engine itself has no recoverable errors — API misuse is a
//! programmer error and panics with a stable message.  `ConfigError` exists
//! only for the one place a caller can hand us bad data before any invariant
//! is at stake: space configuration.

use thiserror::Error;

/// Rejected [`SpaceConfig`][crate::SpaceConfig] values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{what} must be non-negative, got {value}")]
    NegativeThreshold { what: &'static str, value: f32 },

    #[error("{what} must not be NaN")]
    NotANumber { what: &'static str },

    #[error("gravity must be finite, got ({x}, {y})")]
    NonFiniteGravity { x: f32, y: f32 },
}
