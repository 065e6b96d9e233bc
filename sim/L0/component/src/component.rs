//! The component capability trait and the explicit tree-walk helpers each
//! lifecycle stage uses to reach owned subcomponents.
//!
//! # Propagation
//!
//! A component lists the subcomponents it owns through
//! [`Component::subcomponents_mut`]. The default stage implementations call
//! the matching helper ([`connect_subcomponents`],
//! [`add_subcomponents_to_system`], [`init_subcomponents`]), which runs the
//! stage on every listed child first and then advances the component's own
//! stage. A component that overrides a stage calls the helper itself, then
//! does its own work.

use std::sync::Arc;

use sim_types::{SimState, SystemLayout};

use crate::Result;
use crate::lifecycle::{ComponentBase, LifecycleStage};
use crate::model::ModelContext;

/// A structural element that passes through the setup lifecycle.
pub trait Component: std::fmt::Debug {
    /// Shared bookkeeping.
    fn base(&self) -> &ComponentBase;

    /// Shared bookkeeping, mutably.
    fn base_mut(&mut self) -> &mut ComponentBase;

    /// Component name.
    fn name(&self) -> &str {
        self.base().name()
    }

    /// Owned subcomponents, in a stable order.
    fn subcomponents(&self) -> Vec<&dyn Component> {
        Vec::new()
    }

    /// Owned subcomponents, mutably, in the same order as
    /// [`Component::subcomponents`].
    fn subcomponents_mut(&mut self) -> Vec<&mut dyn Component> {
        Vec::new()
    }

    /// Resolve structural wiring and capture the owning model.
    ///
    /// `model` is `None` for registration-time instantiation, in which case
    /// only structural wiring happens.
    fn connect_to_model(&mut self, model: Option<&Arc<ModelContext>>) -> Result<()> {
        connect_subcomponents(self, model)
    }

    /// Reserve whatever per-state slots the component needs.
    fn add_to_system(&mut self, layout: &mut SystemLayout) -> Result<()> {
        add_subcomponents_to_system(self, layout)
    }

    /// Write property values into a freshly allocated state.
    fn init_state_from_properties(&mut self, state: &mut SimState) -> Result<()> {
        init_subcomponents(self, state)
    }

    /// Copy state-scoped values back into object-level properties.
    fn set_properties_from_state(&mut self, state: &SimState) {
        for sub in self.subcomponents_mut() {
            sub.set_properties_from_state(state);
        }
    }

    /// Names of the scalar outputs this component publishes.
    fn outputs(&self) -> &'static [&'static str] {
        &[]
    }

    /// Value of output `index` (into [`Component::outputs`]) at `state`.
    fn calc_output(&self, _index: usize, _state: &SimState) -> Option<f64> {
        None
    }
}

/// Connect every subcomponent, then mark `component` connected.
pub fn connect_subcomponents<C: Component + ?Sized>(
    component: &mut C,
    model: Option<&Arc<ModelContext>>,
) -> Result<()> {
    for sub in component.subcomponents_mut() {
        sub.connect_to_model(model)?;
    }
    component.base_mut().mark_connected(model)
}

/// Add every subcomponent to the system, then advance `component`.
pub fn add_subcomponents_to_system<C: Component + ?Sized>(
    component: &mut C,
    layout: &mut SystemLayout,
) -> Result<()> {
    for sub in component.subcomponents_mut() {
        sub.add_to_system(layout)?;
    }
    component.base_mut().advance(LifecycleStage::AddedToSystem)
}

/// Initialize every subcomponent's state, then advance `component`.
pub fn init_subcomponents<C: Component + ?Sized>(
    component: &mut C,
    state: &mut SimState,
) -> Result<()> {
    for sub in component.subcomponents_mut() {
        sub.init_state_from_properties(state)?;
    }
    component.base_mut().advance(LifecycleStage::StateInitialized)
}

/// Return a whole subtree to [`LifecycleStage::Constructed`].
pub fn reset_lifecycle(component: &mut dyn Component) {
    for sub in component.subcomponents_mut() {
        reset_lifecycle(sub);
    }
    component.base_mut().reset();
}

/// Whether a whole subtree is ready for numeric evaluation.
#[must_use]
pub fn is_tree_ready(component: &dyn Component) -> bool {
    component.base().is_ready()
        && component
            .subcomponents()
            .into_iter()
            .all(|sub| is_tree_ready(sub))
}
