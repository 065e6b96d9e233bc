//! Ligament force evaluation through a full model.

use approx::assert_relative_eq;
use nalgebra::{DVector, Vector3};
use sim_force::{ForceLengthCurve, Ligament};
use sim_types::{BodyId, CoordinateId};

use crate::common::{acl, knee};

#[test]
fn slack_ligament_contributes_nothing() {
    let mut model = knee(acl(1.2, 500.0));
    let mut state = model.init_system().expect("setup");

    for q in [-0.5, 0.0, 0.1, 0.19] {
        model
            .set_coordinates(&mut state, DVector::from_vec(vec![q]))
            .expect("coordinates");
        let (forces, generalized) = model.compute_forces(&state);

        assert_eq!(forces.num_nonzero(), 0, "q = {q}");
        assert!(generalized.iter().all(|g| *g == 0.0));
        assert_eq!(model.output_value("acl/tension", &state).expect("tension"), 0.0);
    }
}

#[test]
fn taut_ligament_pulls_bodies_together() {
    let mut model = knee(acl(1.0, 500.0));
    let mut state = model.init_system().expect("setup");
    model
        .set_coordinates(&mut state, DVector::from_vec(vec![0.3]))
        .expect("coordinates");

    let lig = model.force_as::<Ligament>("acl").expect("acl");
    let expected = ForceLengthCurve::default().evaluate(0.3) * 500.0;
    assert_relative_eq!(lig.tension(&state), expected, epsilon = 1e-12);
    assert_relative_eq!(lig.strain(&state), 0.3, epsilon = 1e-12);

    let (forces, _) = model.compute_forces(&state);
    let tibia = forces.get(BodyId::new(1)).expect("tibia force");
    let femur = forces.get(BodyId::GROUND).expect("femur force");
    assert_relative_eq!(tibia.force, Vector3::new(-expected, 0.0, 0.0), epsilon = 1e-9);
    assert_relative_eq!(femur.force, Vector3::new(expected, 0.0, 0.0), epsilon = 1e-9);
    assert_relative_eq!(forces.total_force().norm(), 0.0, epsilon = 1e-9);
}

#[test]
fn linear_spring_tracks_displacement() {
    let mut model = knee(acl(1.0, 1.0).with_linear_stiffness(250.0, 1.1));
    let mut state = model.init_system().expect("setup");

    for q in [0.2, 0.35, 0.5] {
        model
            .set_coordinates(&mut state, DVector::from_vec(vec![q]))
            .expect("coordinates");
        let length = 1.0 + q;
        assert_relative_eq!(
            model.output_value("acl/tension", &state).expect("tension"),
            250.0 * (length - 1.1),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            model.output_value("acl/stiffness", &state).expect("stiffness"),
            250.0,
            epsilon = 1e-9
        );
    }
}

#[test]
fn moment_arm_follows_the_slider() {
    let mut model = knee(acl(1.0, 100.0));
    let mut state = model.init_system().expect("setup");
    model
        .set_coordinates(&mut state, DVector::from_vec(vec![0.25]))
        .expect("coordinates");

    let lig = model.force_as::<Ligament>("acl").expect("acl");
    let arm = lig
        .compute_moment_arm(&state, CoordinateId::new(0))
        .expect("moment arm");
    assert_relative_eq!(arm, -1.0, epsilon = 1e-6);
}

#[test]
fn outputs_are_published_by_path() {
    let mut model = knee(acl(1.0, 100.0));
    let mut state = model.init_system().expect("setup");
    model
        .set_coordinates(&mut state, DVector::from_vec(vec![0.1]))
        .expect("coordinates");

    let mut paths = model.output_paths().expect("paths");
    paths.sort();
    assert_eq!(
        paths,
        vec![
            "acl/length",
            "acl/path/length",
            "acl/resting_length",
            "acl/stiffness",
            "acl/strain",
            "acl/tension",
        ]
    );
    assert_relative_eq!(
        model.output_value("acl/path/length", &state).expect("length"),
        1.1,
        epsilon = 1e-12
    );
    assert_relative_eq!(
        model.output_value("acl/strain", &state).expect("strain"),
        0.1,
        epsilon = 1e-12
    );
}
