//! Externally owned simulation state with typed extension slots.
//!
//! [`SimState`] is the mutable counterpart to a model: one is created per
//! simulation run after the model has been assembled. It carries time, the
//! generalized coordinates, the body poses realized from them, and a small
//! table of per-state values that components reserved in a
//! [`SystemLayout`] while the system was being assembled.
//!
//! # Stages
//!
//! Quantities are only valid up to the [`Stage`] they were computed at.
//! Writing time or coordinates drops the state back to [`Stage::Time`];
//! body poses must be realized again before anything geometric is read.

use nalgebra::{DVector, Isometry3};

use crate::body::{BodyId, CoordinateId};
use crate::error::SimError;
use crate::kinematics::Kinematics;

/// Realization stage of a [`SimState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Freshly allocated; slots hold their defaults.
    Empty,
    /// Time and coordinates are set.
    Time,
    /// Body poses have been realized from the coordinates.
    Position,
}

/// Handle to a real-valued extension slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RealSlot(usize);

/// Handle to a boolean extension slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlagSlot(usize);

/// Slot reservations collected while a system is assembled.
///
/// Every state created from a layout carries one entry per reservation,
/// initialized to the reserved default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemLayout {
    reals: Vec<(String, f64)>,
    flags: Vec<(String, bool)>,
}

impl SystemLayout {
    /// Create an empty layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a real-valued slot.
    pub fn reserve_real(&mut self, label: impl Into<String>, default: f64) -> RealSlot {
        self.reals.push((label.into(), default));
        RealSlot(self.reals.len() - 1)
    }

    /// Reserve a boolean slot.
    pub fn reserve_flag(&mut self, label: impl Into<String>, default: bool) -> FlagSlot {
        self.flags.push((label.into(), default));
        FlagSlot(self.flags.len() - 1)
    }

    /// Number of real slots reserved.
    #[must_use]
    pub fn num_reals(&self) -> usize {
        self.reals.len()
    }

    /// Number of flag slots reserved.
    #[must_use]
    pub fn num_flags(&self) -> usize {
        self.flags.len()
    }

    /// Label a real slot was reserved under (diagnostics only).
    #[must_use]
    pub fn real_label(&self, slot: RealSlot) -> Option<&str> {
        self.reals.get(slot.0).map(|(label, _)| label.as_str())
    }

    /// Label a flag slot was reserved under (diagnostics only).
    #[must_use]
    pub fn flag_label(&self, slot: FlagSlot) -> Option<&str> {
        self.flags.get(slot.0).map(|(label, _)| label.as_str())
    }
}

/// Mutable simulation state.
///
/// Slot accessors index directly: a slot handle is only meaningful for
/// states built from the layout that issued it, and using it elsewhere
/// is a wiring defect.
#[derive(Debug, Clone, PartialEq)]
pub struct SimState {
    time: f64,
    q: DVector<f64>,
    body_poses: Vec<Isometry3<f64>>,
    reals: Vec<f64>,
    flags: Vec<bool>,
    stage: Stage,
}

impl SimState {
    /// Allocate a state for a system with the given layout and dimensions.
    #[must_use]
    pub fn new(layout: &SystemLayout, num_coordinates: usize, num_bodies: usize) -> Self {
        Self {
            time: 0.0,
            q: DVector::zeros(num_coordinates),
            body_poses: vec![Isometry3::identity(); num_bodies],
            reals: layout.reals.iter().map(|(_, v)| *v).collect(),
            flags: layout.flags.iter().map(|(_, v)| *v).collect(),
            stage: Stage::Empty,
        }
    }

    /// Current realization stage.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Simulation time (s).
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Set the simulation time.
    ///
    /// Body poses depend on the coordinates only, so realized positions
    /// stay valid.
    pub fn set_time(&mut self, time: f64) {
        self.time = time;
        self.stage = self.stage.max(Stage::Time);
    }

    /// Generalized coordinates.
    #[must_use]
    pub fn q(&self) -> &DVector<f64> {
        &self.q
    }

    /// Number of generalized coordinates.
    #[must_use]
    pub fn num_coordinates(&self) -> usize {
        self.q.len()
    }

    /// Number of bodies, ground included.
    #[must_use]
    pub fn num_bodies(&self) -> usize {
        self.body_poses.len()
    }

    /// Value of one coordinate.
    pub fn coordinate(&self, coordinate: CoordinateId) -> crate::Result<f64> {
        self.q
            .get(coordinate.index())
            .copied()
            .ok_or(SimError::InvalidCoordinate(coordinate.0))
    }

    /// Set one coordinate; invalidates realized positions.
    pub fn set_coordinate(&mut self, coordinate: CoordinateId, value: f64) -> crate::Result<()> {
        let slot = self
            .q
            .get_mut(coordinate.index())
            .ok_or(SimError::InvalidCoordinate(coordinate.0))?;
        *slot = value;
        self.stage = Stage::Time;
        Ok(())
    }

    /// Replace all coordinates; invalidates realized positions.
    pub fn set_q(&mut self, q: DVector<f64>) -> crate::Result<()> {
        if q.len() != self.q.len() {
            return Err(SimError::DimensionMismatch {
                expected: self.q.len(),
                actual: q.len(),
            });
        }
        self.q = q;
        self.stage = Stage::Time;
        Ok(())
    }

    /// Realize body poses from the coordinates.
    pub fn realize_position(&mut self, kinematics: &dyn Kinematics) {
        for (i, pose) in self.body_poses.iter_mut().enumerate() {
            *pose = kinematics.body_pose(BodyId::new(i as u64), &self.q);
        }
        self.stage = Stage::Position;
    }

    /// Pose of a body in ground.
    ///
    /// Only meaningful once the state is at [`Stage::Position`]. Unknown
    /// bodies resolve to the identity.
    #[must_use]
    pub fn body_pose(&self, body: BodyId) -> Isometry3<f64> {
        debug_assert!(
            self.stage >= Stage::Position,
            "body pose read before positions were realized"
        );
        self.body_poses
            .get(body.index())
            .copied()
            .unwrap_or_else(Isometry3::identity)
    }

    /// Read a real-valued slot.
    #[must_use]
    pub fn real(&self, slot: RealSlot) -> f64 {
        self.reals[slot.0]
    }

    /// Write a real-valued slot.
    pub fn set_real(&mut self, slot: RealSlot, value: f64) {
        self.reals[slot.0] = value;
    }

    /// Read a boolean slot.
    #[must_use]
    pub fn flag(&self, slot: FlagSlot) -> bool {
        self.flags[slot.0]
    }

    /// Write a boolean slot.
    pub fn set_flag(&mut self, slot: FlagSlot, value: bool) {
        self.flags[slot.0] = value;
    }
}
