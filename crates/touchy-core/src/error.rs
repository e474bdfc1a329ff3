//! Error types.
//!
//! Raw touch samples never produce errors; only configuration and
//! registration can fail.

use crate::event::GestureKind;
use thiserror::Error;

/// Invalid gesture configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{kind} requires {expected} touches, got {got}")]
    UnsupportedTouchCount {
        kind: GestureKind,
        expected: &'static str,
        got: usize,
    },
    #[error("{kind}: {field} must be finite and non-negative, got {value}")]
    InvalidThreshold {
        kind: GestureKind,
        field: &'static str,
        value: f64,
    },
    #[error("Failed to parse options: {0}")]
    Parse(String),
}

/// Engine errors.
#[derive(Debug, Error)]
pub enum TouchyError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Script error: {0}")]
    Script(String),
}

/// Result type for engine operations.
pub type TouchyResult<T> = Result<T, TouchyError>;
