//! Contract to the multibody engine for position kinematics.
//!
//! The engine itself (integration, constraints, generalized coordinate
//! bookkeeping) lives outside these crates. Force elements only need to turn
//! coordinates into body poses, which is all [`Kinematics`] asks for.

use nalgebra::{DVector, Isometry3, Translation3, Unit, UnitQuaternion, Vector3};

use crate::body::BodyId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maps generalized coordinates to body poses.
pub trait Kinematics: std::fmt::Debug + Send + Sync {
    /// Number of bodies, ground included.
    fn num_bodies(&self) -> usize;

    /// Number of generalized coordinates.
    fn num_coordinates(&self) -> usize;

    /// Pose of `body` in ground for coordinates `q`.
    fn body_pose(&self, body: BodyId, q: &DVector<f64>) -> Isometry3<f64>;
}

/// A body attached to ground through a prismatic joint.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Slider {
    /// Body origin in ground when the coordinate is zero.
    pub origin: Vector3<f64>,
    /// Sliding direction.
    pub axis: Unit<Vector3<f64>>,
}

/// Ground plus bodies that each slide along a fixed axis.
///
/// Body `i` (for `i >= 1`) is driven by coordinate `i - 1`:
///
/// ```text
/// p_i = origin_i + q[i-1] · axis_i
/// ```
///
/// Orientation is always the identity. This is the simplest kinematic tree
/// that still moves attachment points, which is what path-based force
/// elements need.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SliderKinematics {
    sliders: Vec<Slider>,
}

impl SliderKinematics {
    /// Ground only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a body sliding along `axis` from `origin`.
    #[must_use]
    pub fn with_slider(mut self, origin: Vector3<f64>, axis: Vector3<f64>) -> Self {
        self.sliders.push(Slider {
            origin,
            axis: Unit::new_normalize(axis),
        });
        self
    }

    /// The configured sliders, in body order starting at body 1.
    #[must_use]
    pub fn sliders(&self) -> &[Slider] {
        &self.sliders
    }
}

impl Kinematics for SliderKinematics {
    fn num_bodies(&self) -> usize {
        self.sliders.len() + 1
    }

    fn num_coordinates(&self) -> usize {
        self.sliders.len()
    }

    fn body_pose(&self, body: BodyId, q: &DVector<f64>) -> Isometry3<f64> {
        let Some(index) = body.index().checked_sub(1) else {
            return Isometry3::identity();
        };
        let Some(slider) = self.sliders.get(index) else {
            return Isometry3::identity();
        };
        let displacement = q.get(index).copied().unwrap_or(0.0);
        let position = slider.origin + slider.axis.into_inner() * displacement;

        Isometry3::from_parts(Translation3::from(position), UnitQuaternion::identity())
    }
}
