//! The model-level context components hold a weak back-reference to.

use std::sync::Arc;

use sim_types::Kinematics;

use crate::output::OutputDirectory;

/// What a connected component may ask of its owning model.
///
/// Built by the orchestrator at the start of each setup cycle and handed
/// to components during connection. Components keep only a weak
/// reference, so a context outliving its model is never observed.
#[derive(Debug)]
pub struct ModelContext {
    name: String,
    kinematics: Arc<dyn Kinematics>,
    outputs: OutputDirectory,
}

impl ModelContext {
    /// Create a model context.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kinematics: Arc<dyn Kinematics>,
        outputs: OutputDirectory,
    ) -> Self {
        Self {
            name: name.into(),
            kinematics,
            outputs,
        }
    }

    /// Model name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The model's kinematics.
    #[must_use]
    pub fn kinematics(&self) -> &dyn Kinematics {
        self.kinematics.as_ref()
    }

    /// Every output published in the model.
    #[must_use]
    pub fn outputs(&self) -> &OutputDirectory {
        &self.outputs
    }
}
