//! Three-phase scaling keeps ligament strain consistent with the geometry.

use approx::assert_relative_eq;
use nalgebra::{DVector, Point3, Vector3};
use sim_force::{Ligament, PathPoint, PointPath};
use sim_model::{Model, ModelError};
use sim_report::{Reporter, ReporterConfig, TableReporter};
use sim_types::{BodyId, ScaleSet};

use crate::common::{acl, knee, knee_kinematics};

/// Ligament spanning body 1 from local x = −1 to x = 1; its length is 2
/// regardless of the slider.
fn bridged(resting_length: f64) -> Model {
    let path = PointPath::new(
        PathPoint::new(BodyId::new(1), Point3::new(-1.0, 0.0, 0.0)),
        PathPoint::new(BodyId::new(1), Point3::new(1.0, 0.0, 0.0)),
    );
    Model::new("bridge", knee_kinematics()).with_force(
        Ligament::new("acl", path)
            .with_resting_length(resting_length)
            .with_max_isometric_force(100.0),
    )
}

#[test]
fn doubling_length_doubles_resting_length() {
    let mut model = bridged(1.6);
    let mut state = model.init_system().expect("setup");
    let strain_before = model.output_value("acl/strain", &state).expect("strain");

    model
        .scale(&mut state, &ScaleSet::new().with_uniform(BodyId::new(1), 2.0))
        .expect("scale");

    let lig = model.force_as::<Ligament>("acl").expect("acl");
    assert_relative_eq!(lig.length(&state), 4.0, epsilon = 1e-12);
    assert_relative_eq!(lig.resting_length(), 3.2, epsilon = 1e-12);
    assert_relative_eq!(lig.strain(&state), strain_before, epsilon = 1e-12);
}

#[test]
fn unit_scale_leaves_resting_length_alone() {
    let mut model = knee(acl(0.9, 100.0));
    let mut state = model.init_system().expect("setup");
    model
        .set_coordinates(&mut state, DVector::from_vec(vec![0.3]))
        .expect("coordinates");

    model
        .scale(&mut state, &ScaleSet::new().with_uniform(BodyId::new(1), 1.0))
        .expect("scale");

    let lig = model.force_as::<Ligament>("acl").expect("acl");
    assert_eq!(lig.resting_length(), 0.9);
}

#[test]
fn non_uniform_factors_scale_per_axis() {
    let path = PointPath::straight(
        BodyId::GROUND,
        Point3::new(1.0, 0.0, 0.0),
        BodyId::new(1),
        Point3::new(0.0, 1.0, 0.0),
    )
    .with_via_point(PathPoint::new(BodyId::new(1), Point3::new(0.0, 0.5, 0.0)));
    let mut model = Model::new("knee", knee_kinematics())
        .with_force(Ligament::new("acl", path).with_resting_length(0.5));
    let mut state = model.init_system().expect("setup");
    let before = model.output_value("acl/length", &state).expect("length");
    assert_relative_eq!(before, 1.0, epsilon = 1e-12);

    model
        .scale(
            &mut state,
            &ScaleSet::new().with_body(BodyId::new(1), Vector3::new(5.0, 3.0, 1.0)),
        )
        .expect("scale");

    let lig = model.force_as::<Ligament>("acl").expect("acl");
    assert_relative_eq!(lig.length(&state), 3.0, epsilon = 1e-12);
    assert_relative_eq!(lig.resting_length(), 1.5, epsilon = 1e-12);
}

#[test]
fn reporter_sees_scaled_properties() {
    let mut model = bridged(1.0).with_reporter(TableReporter::new(
        "probe",
        ReporterConfig::new()
            .every_step()
            .with_outputs(["acl/resting_length", "acl/path/length"]),
    ));
    let mut state = model.init_system().expect("setup");
    model.realize_report(&state);

    model
        .scale(&mut state, &ScaleSet::new().with_uniform(BodyId::new(1), 1.5))
        .expect("scale");
    state.set_time(1.0);
    model.realize_report(&state);

    let table = model.reporter("probe").expect("probe").report_table();
    assert_eq!(table.num_rows(), 2);
    assert_relative_eq!(table.row(1).expect("row")[0], 1.5, epsilon = 1e-12);
    assert_relative_eq!(table.row(1).expect("row")[1], 3.0, epsilon = 1e-12);
}

#[test]
fn invalid_scale_set_is_rejected_before_any_change() {
    let mut model = bridged(1.6);
    let mut state = model.init_system().expect("setup");

    let err = model
        .scale(&mut state, &ScaleSet::new().with_uniform(BodyId::new(1), 0.0))
        .expect_err("scale should fail");

    assert!(matches!(err, ModelError::Sim(_)));
    let lig = model.force_as::<Ligament>("acl").expect("acl");
    assert_eq!(lig.resting_length(), 1.6);
    assert_relative_eq!(lig.length(&state), 2.0, epsilon = 1e-12);
}
