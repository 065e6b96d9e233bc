//! Error types for component setup.

use sim_types::SimError;
use thiserror::Error;

use crate::lifecycle::LifecycleStage;

/// Errors surfaced while a model is being set up.
///
/// Every variant names the offending component so setup diagnostics point
/// at the element to fix.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ComponentError {
    /// A property violates an invariant that needs model context to check.
    #[error("component '{component}': invalid property '{property}': {reason}")]
    InvalidProperty {
        /// Component name.
        component: String,
        /// Property name.
        property: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A named input does not resolve to any output in the model.
    #[error("component '{component}': input '{input}' does not name an output in the model")]
    UnresolvedInput {
        /// Component name.
        component: String,
        /// The unresolved output path.
        input: String,
    },

    /// A lifecycle stage ran out of order.
    #[error("component '{component}': cannot enter {attempted:?} from {current:?}")]
    StageOrder {
        /// Component name.
        component: String,
        /// Stage the component is in.
        current: LifecycleStage,
        /// Stage that was attempted.
        attempted: LifecycleStage,
    },

    /// The component has no owning model.
    #[error("component '{component}' is not connected to a model")]
    NotConnected {
        /// Component name.
        component: String,
    },

    /// Two components or outputs share a path.
    #[error("duplicate component path '{path}'")]
    DuplicateName {
        /// The clashing path.
        path: String,
    },

    /// A state or geometry operation failed.
    #[error(transparent)]
    Sim(#[from] SimError),
}

impl ComponentError {
    /// Create an invalid property error.
    pub fn invalid_property(
        component: impl Into<String>,
        property: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidProperty {
            component: component.into(),
            property: property.into(),
            reason: reason.into(),
        }
    }

    /// Create an unresolved input error.
    pub fn unresolved_input(component: impl Into<String>, input: impl Into<String>) -> Self {
        Self::UnresolvedInput {
            component: component.into(),
            input: input.into(),
        }
    }

    /// Create a not-connected error.
    pub fn not_connected(component: impl Into<String>) -> Self {
        Self::NotConnected {
            component: component.into(),
        }
    }

    /// Whether this error is a structural/configuration error (fatal to setup).
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::InvalidProperty { .. } | Self::UnresolvedInput { .. } | Self::DuplicateName { .. }
        )
    }
}
