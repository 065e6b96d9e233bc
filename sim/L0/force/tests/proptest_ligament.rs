//! Property-based tests for ligament force invariants.
//!
//! Run with: cargo test -p sim-force -- proptest

use std::sync::Arc;

use nalgebra::{DVector, Point3, Vector3};
use proptest::prelude::*;
use sim_component::{Component, ModelContext, OutputDirectory};
use sim_force::{Force, ForceLengthCurve, Ligament, PointPath, Scalable};
use sim_types::{BodyForces, BodyId, Kinematics, ScaleSet, SimState, SliderKinematics, SystemLayout};

// =============================================================================
// Fixture
// =============================================================================

/// Ground origin to a point on body 1, which slides along x from (1, 0, 0).
///
/// Path length is `1 + insertion_x + q`.
fn assembled(ligament: &mut Ligament) -> (Arc<ModelContext>, SimState) {
    let kinematics = SliderKinematics::new().with_slider(Vector3::new(1.0, 0.0, 0.0), Vector3::x());
    let model = Arc::new(ModelContext::new(
        "bench",
        Arc::new(kinematics),
        OutputDirectory::default(),
    ));

    ligament.connect_to_model(Some(&model)).unwrap();
    let mut layout = SystemLayout::new();
    ligament.add_to_system(&mut layout).unwrap();
    let kinematics = model.kinematics();
    let mut state = SimState::new(&layout, kinematics.num_coordinates(), kinematics.num_bodies());
    ligament.init_state_from_properties(&mut state).unwrap();
    state.realize_position(kinematics);
    (model, state)
}

fn ligament(insertion_x: f64) -> Ligament {
    Ligament::new(
        "lig",
        PointPath::straight(
            BodyId::GROUND,
            Point3::origin(),
            BodyId::new(1),
            Point3::new(insertion_x, 0.0, 0.0),
        ),
    )
}

fn move_to(model: &ModelContext, state: &mut SimState, q: f64) {
    state.set_q(DVector::from_vec(vec![q])).unwrap();
    state.realize_position(model.kinematics());
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_slack_is_force_free(
        rest in 0.1..5.0f64,
        scale in 0.0..2000.0f64,
        shortening in 0.001..0.99f64,
    ) {
        let mut lig = ligament(0.0).with_resting_length(rest).with_max_isometric_force(scale);
        let (model, mut state) = assembled(&mut lig);

        // Length 1 + q, chosen at or below rest.
        move_to(&model, &mut state, rest * (1.0 - shortening) - 1.0);

        let mut forces = BodyForces::zeros(2);
        let mut generalized = DVector::zeros(1);
        lig.compute_force(&state, &mut forces, &mut generalized);

        prop_assert_eq!(lig.tension(&state), 0.0);
        prop_assert_eq!(forces.num_nonzero(), 0);
        prop_assert_eq!(generalized, DVector::zeros(1));
    }

    #[test]
    fn proptest_taut_tension_identity(
        rest in 0.1..5.0f64,
        scale in 0.0..2000.0f64,
        stretch in 0.001..1.5f64,
    ) {
        let mut lig = ligament(0.0).with_resting_length(rest).with_max_isometric_force(scale);
        let (model, mut state) = assembled(&mut lig);
        move_to(&model, &mut state, rest * (1.0 + stretch) - 1.0);

        let length = lig.length(&state);
        let strain = lig.strain(&state);
        prop_assert!(strain >= 0.0);
        prop_assert!(((length - rest) / rest - strain).abs() < 1e-12);

        let expected = (ForceLengthCurve::default().evaluate(strain) * scale).max(0.0);
        prop_assert!((lig.tension(&state) - expected).abs() <= 1e-9 * (1.0 + expected));
    }

    #[test]
    fn proptest_linear_stiffness(
        stiffness in 0.0..1.0e4f64,
        rest in 0.1..3.0f64,
        extension in 0.0..1.0f64,
    ) {
        let mut lig = ligament(0.0).with_linear_stiffness(stiffness, rest);
        let (model, mut state) = assembled(&mut lig);
        move_to(&model, &mut state, rest + extension - 1.0);

        let length = lig.length(&state);
        let expected = if length > rest { stiffness * (length - rest) } else { 0.0 };
        prop_assert!((lig.tension(&state) - expected).abs() <= 1e-9 * (1.0 + expected));
    }

    #[test]
    fn proptest_net_force_vanishes(
        rest in 0.1..2.0f64,
        stretch in 0.0..1.0f64,
    ) {
        let mut lig = ligament(0.0).with_resting_length(rest).with_max_isometric_force(1000.0);
        let (model, mut state) = assembled(&mut lig);
        move_to(&model, &mut state, rest * (1.0 + stretch) - 1.0);

        let mut forces = BodyForces::zeros(2);
        lig.compute_force(&state, &mut forces, &mut DVector::zeros(1));
        prop_assert!(forces.total_force().norm() < 1e-9);
    }

    #[test]
    fn proptest_scaling_keeps_strain(
        rest in 0.5..3.0f64,
        insertion in 0.1..2.0f64,
        factor in 0.2..5.0f64,
    ) {
        let mut lig = ligament(insertion).with_resting_length(rest).with_max_isometric_force(100.0);
        let (model, mut state) = assembled(&mut lig);

        // Ground point and body-1 origin do not move; only the insertion's
        // local x is scaled, so the path length is 1 + factor·insertion.
        let before = lig.length(&state);
        let scale_set = ScaleSet::new().with_uniform(BodyId::new(1), factor);
        lig.pre_scale(&mut state, &scale_set).unwrap();
        lig.scale(&state, &scale_set).unwrap();
        state.realize_position(model.kinematics());
        lig.post_scale(&mut state, &scale_set).unwrap();

        let after = lig.length(&state);
        prop_assert!((lig.resting_length() - rest * after / before).abs() < 1e-9 * rest);
        prop_assert_eq!(lig.path().pre_scale_length(&state), 0.0);
    }

    #[test]
    fn proptest_unit_scale_is_identity(rest in 0.1..5.0f64) {
        let mut lig = ligament(0.5).with_resting_length(rest).with_max_isometric_force(10.0);
        let (_model, mut state) = assembled(&mut lig);

        let scale_set = ScaleSet::new().with_uniform(BodyId::new(1), 1.0);
        lig.pre_scale(&mut state, &scale_set).unwrap();
        lig.post_scale(&mut state, &scale_set).unwrap();

        prop_assert_eq!(lig.resting_length(), rest);
    }

    #[test]
    fn proptest_default_curve_non_negative_in_operating_range(strain in 0.0..0.6f64) {
        prop_assert!(ForceLengthCurve::default().evaluate(strain) >= 0.0);
    }
}
