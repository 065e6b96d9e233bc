//! Setup failures surface from `init_system` and name the offender.

use sim_component::ComponentError;
use sim_force::Ligament;
use sim_model::ModelError;
use sim_report::{ReporterConfig, TableReporter};

use crate::common::{acl, knee};

#[test]
fn non_positive_resting_length_fails_setup() {
    for rest in [0.0, -0.5, f64::NAN] {
        let mut model = knee(acl(rest, 100.0));
        let err = model.init_system().expect_err("setup should fail");

        assert!(err.is_setup_error());
        match err {
            ModelError::Component(ComponentError::InvalidProperty {
                component,
                property,
                ..
            }) => {
                assert_eq!(component, "acl");
                assert_eq!(property, "resting_length");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!model.is_initialized());
    }
}

#[test]
fn negative_force_scale_fails_setup() {
    let mut model = knee(acl(1.0, -1.0));
    let err = model.init_system().expect_err("setup should fail");
    assert!(err.to_string().contains("pcsa_force"), "{err}");
}

#[test]
fn unresolved_reporter_input_fails_setup() {
    let mut model = knee(acl(1.0, 100.0)).with_reporter(TableReporter::new(
        "probe",
        ReporterConfig::new().with_output("acl/torque"),
    ));

    let err = model.init_system().expect_err("setup should fail");
    assert_eq!(
        err,
        ModelError::Component(ComponentError::UnresolvedInput {
            component: "probe".into(),
            input: "acl/torque".into(),
        })
    );
}

#[test]
fn fixing_the_property_lets_setup_succeed() {
    let mut model = knee(acl(0.0, 100.0));
    assert!(model.init_system().is_err());

    model
        .force_as_mut::<Ligament>("acl")
        .expect("acl")
        .set_resting_length(0.9);
    let state = model.init_system().expect("setup");

    let tension = model.output_value("acl/tension", &state).expect("tension");
    assert!(tension > 0.0);
}

#[test]
fn operations_before_setup_report_not_initialized() {
    let model = knee(acl(1.0, 100.0));
    assert!(matches!(
        model.output_paths(),
        Err(ModelError::NotInitialized { .. })
    ));
}
