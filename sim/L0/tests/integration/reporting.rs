//! Sampled reporting driven by the model's event loop.

use approx::assert_relative_eq;
use nalgebra::DVector;
use sim_model::Model;
use sim_report::{LogReporter, Reporter, ReporterConfig, ReporterStatus, TableReporter};
use sim_types::SimulationConfig;

use crate::common::{acl, knee};

fn probed(config: ReporterConfig) -> Model {
    knee(acl(1.0, 100.0).with_linear_stiffness(40.0, 1.0))
        .with_reporter(TableReporter::new("probe", config))
}

fn offer(model: &mut Model, state: &mut sim_types::SimState, times: &[f64]) {
    for &t in times {
        state.set_time(t);
        model
            .set_coordinates(state, DVector::from_vec(vec![t]))
            .expect("coordinates");
        model.realize_report(state);
    }
}

fn table_times(model: &Model) -> Vec<f64> {
    model
        .reporter("probe")
        .expect("probe")
        .report_table()
        .times()
        .to_vec()
}

#[test]
fn interval_gating_is_greedy() {
    let mut model = probed(ReporterConfig::new().with_interval(1.0).with_output("acl/tension"));
    let mut state = model.init_system().expect("setup");

    offer(&mut model, &mut state, &[0.0, 0.4, 0.9, 1.0, 1.5, 2.1]);

    assert_eq!(table_times(&model), vec![0.0, 1.0, 2.1]);
    let tension = model
        .reporter("probe")
        .expect("probe")
        .report_table()
        .column("acl/tension")
        .expect("column");
    assert_relative_eq!(tension[0], 0.0);
    assert_relative_eq!(tension[1], 40.0, epsilon = 1e-9);
    assert_relative_eq!(tension[2], 84.0, epsilon = 1e-9);
}

#[test]
fn every_step_records_each_event_in_order() {
    let mut model = probed(
        ReporterConfig::new()
            .every_step()
            .with_outputs(["acl/path/length", "acl/tension"]),
    );
    let mut state = model.init_system().expect("setup");
    let config = SimulationConfig::with_timestep(0.1).span(0.0, 0.5);

    let recorded = model
        .simulate_prescribed(&mut state, &config, |t| DVector::from_vec(vec![t]))
        .expect("run");

    assert_eq!(recorded, 6);
    let table = model.reporter("probe").expect("probe").report_table();
    assert_eq!(table.num_rows(), 6);
    assert_eq!(table.labels(), ["acl/path/length", "acl/tension"]);
    for (i, (time, row)) in table.iter().enumerate() {
        assert_relative_eq!(time, 0.1 * i as f64, epsilon = 1e-12);
        assert_relative_eq!(row[0], 1.0 + time, epsilon = 1e-12);
    }
    assert!(table.times().windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn disabling_suspends_and_resumes_from_last_row() {
    let mut model = probed(ReporterConfig::new().with_interval(1.0).with_output("acl/tension"));
    let mut state = model.init_system().expect("setup");

    offer(&mut model, &mut state, &[0.0, 1.0]);
    model
        .reporter_mut("probe")
        .expect("probe")
        .set_disabled(&mut state, true);
    assert_eq!(
        model.reporter("probe").expect("probe").status(&state),
        ReporterStatus::Disabled
    );

    offer(&mut model, &mut state, &[2.0, 3.0]);
    assert_eq!(table_times(&model), vec![0.0, 1.0]);

    model
        .reporter_mut("probe")
        .expect("probe")
        .set_disabled(&mut state, false);
    offer(&mut model, &mut state, &[3.5, 4.0]);

    // 3.5 is gated against the row at 1.0, not against a reset clock.
    assert_eq!(table_times(&model), vec![0.0, 1.0, 3.5]);
}

#[test]
fn disabled_default_is_per_state() {
    let mut model = probed(
        ReporterConfig::new()
            .every_step()
            .disabled(true)
            .with_output("acl/tension"),
    );
    let mut first = model.init_system().expect("setup");
    offer(&mut model, &mut first, &[0.0]);
    assert!(table_times(&model).is_empty());

    let mut second = model.init_system().expect("setup");
    model
        .reporter_mut("probe")
        .expect("probe")
        .set_disabled(&mut second, false);
    offer(&mut model, &mut second, &[0.5]);

    let probe = model.reporter("probe").expect("probe");
    assert!(probe.is_disabled(&first));
    assert!(!probe.is_disabled(&second));
    assert_eq!(table_times(&model), vec![0.5]);
}

#[test]
fn properties_follow_state_on_request() {
    let mut model = probed(ReporterConfig::new().with_output("acl/tension"));
    let mut state = model.init_system().expect("setup");
    model
        .reporter_mut("probe")
        .expect("probe")
        .set_disabled(&mut state, true);

    model.set_properties_from_state(&state);
    let fresh = model.init_system().expect("setup");
    assert!(model.reporter("probe").expect("probe").is_disabled(&fresh));
}

#[test]
fn status_walks_through_setup_and_recording() {
    let mut model = probed(ReporterConfig::new().with_output("acl/tension"));
    let mut state = model.init_system().expect("setup");

    assert_eq!(
        model.reporter("probe").expect("probe").status(&state),
        ReporterStatus::Armed
    );
    offer(&mut model, &mut state, &[0.0]);
    assert_eq!(
        model.reporter("probe").expect("probe").status(&state),
        ReporterStatus::Recording
    );
}

#[test]
fn several_reporters_gate_independently() {
    let mut model = probed(ReporterConfig::new().with_interval(0.5).with_output("acl/tension"))
        .with_reporter(LogReporter::new(
            "log",
            ReporterConfig::new().every_step().with_output("acl/strain"),
        ));
    let mut state = model.init_system().expect("setup");
    let config = SimulationConfig::with_timestep(0.25).span(0.0, 1.0);

    let recorded = model
        .simulate_prescribed(&mut state, &config, |t| DVector::from_vec(vec![t]))
        .expect("run");

    assert_eq!(recorded, 3 + 5);
    assert_eq!(table_times(&model), vec![0.0, 0.5, 1.0]);
    assert_eq!(
        model.reporter("log").expect("log").report_table().num_rows(),
        5
    );
}

#[test]
fn interval_equal_to_timestep_records_every_event() {
    let mut model = probed(ReporterConfig::new().with_interval(0.1).with_output("acl/tension"));
    let mut state = model.init_system().expect("setup");
    let config = SimulationConfig::with_timestep(0.1).span(0.0, 1.0);

    let recorded = model
        .simulate_prescribed(&mut state, &config, |t| DVector::from_vec(vec![t]))
        .expect("run");

    assert_eq!(recorded, 11);
    let times = table_times(&model);
    assert_eq!(times.len(), 11);
    for (i, time) in times.iter().enumerate() {
        assert_relative_eq!(*time, 0.1 * i as f64, epsilon = 1e-12);
    }
}
