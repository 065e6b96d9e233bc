//! Body and coordinate identifiers, and the spatial force accumulator.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for a rigid body in the simulation.
///
/// Body 0 is ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyId(pub u64);

impl BodyId {
    /// The ground body.
    pub const GROUND: Self = Self(0);

    /// Create a new body ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Index into per-body arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u64> for BodyId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Body({})", self.0)
    }
}

/// Identifier for a generalized coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoordinateId(pub u64);

impl CoordinateId {
    /// Create a new coordinate ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Index into the generalized coordinate vector.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CoordinateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Coordinate({})", self.0)
    }
}

/// A spatial force acting on one body, expressed in the ground frame about
/// the body origin.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpatialForce {
    /// Moment about the body origin (N·m).
    pub torque: Vector3<f64>,
    /// Force (N).
    pub force: Vector3<f64>,
}

impl Default for SpatialForce {
    fn default() -> Self {
        Self::zero()
    }
}

impl SpatialForce {
    /// Zero spatial force.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            torque: Vector3::zeros(),
            force: Vector3::zeros(),
        }
    }

    /// Create a spatial force from its parts.
    #[must_use]
    pub fn new(torque: Vector3<f64>, force: Vector3<f64>) -> Self {
        Self { torque, force }
    }

    /// Whether both parts are exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.torque == Vector3::zeros() && self.force == Vector3::zeros()
    }
}

/// Per-body force accumulator shared by every force element evaluated for
/// one step.
///
/// Elements only ever add into it; the orchestrator owns and clears it.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyForces {
    forces: Vec<SpatialForce>,
}

impl BodyForces {
    /// Create an accumulator with one zero entry per body.
    #[must_use]
    pub fn zeros(num_bodies: usize) -> Self {
        Self {
            forces: vec![SpatialForce::zero(); num_bodies],
        }
    }

    /// Number of bodies covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forces.len()
    }

    /// Whether the accumulator covers no bodies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    /// Add a torque and force to a body.
    ///
    /// Bodies outside the accumulator are a wiring defect; they are caught
    /// in debug builds and ignored otherwise.
    pub fn add(&mut self, body: BodyId, torque: Vector3<f64>, force: Vector3<f64>) {
        debug_assert!(
            body.index() < self.forces.len(),
            "{body} outside force accumulator of {} bodies",
            self.forces.len()
        );
        if let Some(entry) = self.forces.get_mut(body.index()) {
            entry.torque += torque;
            entry.force += force;
        }
    }

    /// The accumulated spatial force on a body.
    #[must_use]
    pub fn get(&self, body: BodyId) -> Option<&SpatialForce> {
        self.forces.get(body.index())
    }

    /// Iterate over `(body, spatial force)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &SpatialForce)> {
        self.forces
            .iter()
            .enumerate()
            .map(|(i, f)| (BodyId::new(i as u64), f))
    }

    /// Number of bodies with a non-zero entry.
    #[must_use]
    pub fn num_nonzero(&self) -> usize {
        self.forces.iter().filter(|f| !f.is_zero()).count()
    }

    /// Sum of all linear forces.
    #[must_use]
    pub fn total_force(&self) -> Vector3<f64> {
        self.forces.iter().map(|f| f.force).sum()
    }

    /// Reset every entry to zero.
    pub fn clear(&mut self) {
        self.forces.fill(SpatialForce::zero());
    }
}
