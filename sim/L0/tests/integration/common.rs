//! Shared fixtures: a one-slider knee with an `acl` ligament.

use nalgebra::{Point3, Vector3};
use sim_force::{Ligament, PointPath};
use sim_model::Model;
use sim_types::{BodyId, SliderKinematics};

/// Femur (ground) to tibia (body 1); the tibia slides along +x from x = 1.
pub fn knee_kinematics() -> SliderKinematics {
    SliderKinematics::new().with_slider(Vector3::new(1.0, 0.0, 0.0), Vector3::x())
}

/// Straight ligament from the ground origin to the tibia origin.
///
/// Its length is `1 + q`.
pub fn acl(resting_length: f64, force_scale: f64) -> Ligament {
    Ligament::new(
        "acl",
        PointPath::straight(
            BodyId::GROUND,
            Point3::origin(),
            BodyId::new(1),
            Point3::origin(),
        ),
    )
    .with_resting_length(resting_length)
    .with_max_isometric_force(force_scale)
}

/// Knee model holding a single `acl`.
pub fn knee(acl: Ligament) -> Model {
    Model::new("knee", knee_kinematics()).with_force(acl)
}
