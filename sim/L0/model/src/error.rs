//! Error types for model orchestration.

use sim_component::ComponentError;
use sim_types::SimError;
use thiserror::Error;

/// Errors surfaced by a [`Model`](crate::Model).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    /// A component failed setup.
    #[error(transparent)]
    Component(#[from] ComponentError),

    /// A state or configuration operation failed.
    #[error(transparent)]
    Sim(#[from] SimError),

    /// The operation needs a completed `init_system`.
    #[error("model '{model}' has not been initialized")]
    NotInitialized {
        /// Model name.
        model: String,
    },

    /// No output is published under the path.
    #[error("no output named '{path}'")]
    UnknownOutput {
        /// The requested path.
        path: String,
    },
}

impl ModelError {
    /// Whether this error came out of component setup.
    #[must_use]
    pub fn is_setup_error(&self) -> bool {
        matches!(self, Self::Component(_))
    }
}
