//! Lifecycle stages and the per-component bookkeeping that tracks them.

use std::sync::{Arc, Weak};

use tracing::debug;

use crate::error::ComponentError;
use crate::model::ModelContext;

/// Ordered setup stages every component passes through.
///
/// ```text
/// Constructed ──► Connected ──► AddedToSystem ──► StateInitialized
/// ```
///
/// Each stage runs once per model setup cycle. Numeric evaluation is only
/// valid once [`LifecycleStage::StateInitialized`] is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LifecycleStage {
    /// Properties hold their defaults; no structural dependency exists.
    Constructed,
    /// Structural wiring resolved and model captured.
    Connected,
    /// State slots reserved.
    AddedToSystem,
    /// State initialized from properties; ready for evaluation.
    StateInitialized,
}

impl LifecycleStage {
    /// The stage that must precede this one.
    #[must_use]
    pub const fn predecessor(self) -> Option<Self> {
        match self {
            Self::Constructed => None,
            Self::Connected => Some(Self::Constructed),
            Self::AddedToSystem => Some(Self::Connected),
            Self::StateInitialized => Some(Self::AddedToSystem),
        }
    }
}

/// Name, stage and owning-model back-reference shared by all components.
#[derive(Debug, Clone)]
pub struct ComponentBase {
    name: String,
    owner: Option<String>,
    stage: LifecycleStage,
    model: Weak<ModelContext>,
}

impl ComponentBase {
    /// A freshly constructed component.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: None,
            stage: LifecycleStage::Constructed,
            model: Weak::new(),
        }
    }

    /// Component name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the component.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Name of the component that owns this one, if any.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Record the owning component.
    pub fn set_owner(&mut self, owner: impl Into<String>) {
        self.owner = Some(owner.into());
    }

    /// Current lifecycle stage.
    #[must_use]
    pub fn stage(&self) -> LifecycleStage {
        self.stage
    }

    /// Whether numeric evaluation is valid.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.stage == LifecycleStage::StateInitialized
    }

    /// The owning model, if connected and still alive.
    ///
    /// Absent during registration-time instantiation; callers must check.
    #[must_use]
    pub fn model(&self) -> Option<Arc<ModelContext>> {
        self.model.upgrade()
    }

    /// The owning model, or a [`ComponentError::NotConnected`].
    pub fn require_model(&self) -> Result<Arc<ModelContext>, ComponentError> {
        self.model()
            .ok_or_else(|| ComponentError::not_connected(&self.name))
    }

    /// Move to `next`, which must directly follow the current stage.
    pub fn advance(&mut self, next: LifecycleStage) -> Result<(), ComponentError> {
        if next.predecessor() != Some(self.stage) {
            return Err(ComponentError::StageOrder {
                component: self.name.clone(),
                current: self.stage,
                attempted: next,
            });
        }
        debug!(component = %self.name, stage = ?next, "lifecycle stage complete");
        self.stage = next;
        Ok(())
    }

    /// Capture the owning model (if any) and enter [`LifecycleStage::Connected`].
    pub fn mark_connected(
        &mut self,
        model: Option<&Arc<ModelContext>>,
    ) -> Result<(), ComponentError> {
        self.advance(LifecycleStage::Connected)?;
        self.model = model.map_or_else(Weak::new, Arc::downgrade);
        Ok(())
    }

    /// Drop back to [`LifecycleStage::Constructed`] ahead of a new setup cycle.
    pub fn reset(&mut self) {
        self.stage = LifecycleStage::Constructed;
        self.model = Weak::new();
    }
}
