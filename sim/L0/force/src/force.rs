//! The force capability and the helpers force elements use to write into
//! the shared accumulators.

use std::any::Any;

use nalgebra::{DVector, Point3, Vector3};
use sim_component::Component;
use sim_types::{BodyForces, BodyId, CoordinateId, SimState};

use crate::scale::Scalable;

/// A component that contributes forces each step.
///
/// Force elements read the state and write only into the caller-owned
/// accumulators. They never mutate the state or their own configuration
/// while computing forces.
pub trait Force: Component {
    /// Add this element's contribution to the accumulators.
    ///
    /// Only valid once the element's lifecycle has completed.
    fn compute_force(
        &self,
        state: &SimState,
        body_forces: &mut BodyForces,
        generalized_forces: &mut DVector<f64>,
    );

    /// Potential energy stored in the element.
    fn compute_potential_energy(&self, _state: &SimState) -> f64 {
        0.0
    }

    /// Scaling hooks, if the element takes part in geometry rescaling.
    fn as_scalable_mut(&mut self) -> Option<&mut dyn Scalable> {
        None
    }

    /// View as a plain component.
    fn as_component(&self) -> &dyn Component;

    /// View as a plain component, mutably.
    fn as_component_mut(&mut self) -> &mut dyn Component;

    /// For downcasting to the concrete element.
    fn as_any(&self) -> &dyn Any;

    /// For downcasting to the concrete element, mutably.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Apply a world-frame `force` at `point` (in `body`'s frame).
///
/// The accumulator stores spatial forces about each body origin in ground,
/// so the moment of the force about that origin is added as well.
pub fn apply_force_to_point(
    state: &SimState,
    body: BodyId,
    point: &Point3<f64>,
    force: &Vector3<f64>,
    body_forces: &mut BodyForces,
) {
    let offset = state.body_pose(body).rotation * point.coords;
    body_forces.add(body, offset.cross(force), *force);
}

/// Apply a world-frame torque to `body`.
pub fn apply_torque(body: BodyId, torque: &Vector3<f64>, body_forces: &mut BodyForces) {
    body_forces.add(body, *torque, Vector3::zeros());
}

/// Apply a generalized force along `coordinate`.
pub fn apply_generalized_force(
    coordinate: CoordinateId,
    force: f64,
    generalized_forces: &mut DVector<f64>,
) {
    debug_assert!(
        coordinate.index() < generalized_forces.len(),
        "coordinate {coordinate} out of range"
    );
    if let Some(slot) = generalized_forces.get_mut(coordinate.index()) {
        *slot += force;
    }
}
