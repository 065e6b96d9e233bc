//! Error types for simulation state operations.

use thiserror::Error;

/// Errors that can occur while manipulating simulation state.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// Invalid body ID referenced.
    #[error("invalid body ID: {0}")]
    InvalidBodyId(u64),

    /// Invalid coordinate ID referenced.
    #[error("invalid coordinate ID: {0}")]
    InvalidCoordinate(u64),

    /// A vector had the wrong number of entries.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// Scale factors must be positive and finite.
    #[error("invalid scale factor {factor} for body {body}")]
    InvalidScaleFactor {
        /// The body the factor applies to.
        body: u64,
        /// The offending factor component.
        factor: f64,
    },

    /// Invalid timestep.
    #[error("invalid timestep: {0} (must be positive and finite)")]
    InvalidTimestep(f64),

    /// Invalid configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },
}

impl SimError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Check if this is a configuration error.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. } | Self::InvalidTimestep(_))
    }
}
