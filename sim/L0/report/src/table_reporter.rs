//! The default reporter: gated rows into a table.

use sim_component::Component;

use crate::config::ReporterConfig;
use crate::reporter::{Reporter, ReporterBase, impl_reporter_component};

/// Samples its inputs into a [`TimeSeriesTable`](crate::TimeSeriesTable).
///
/// # Example
///
/// ```
/// use sim_report::{Reporter, ReporterConfig, ReporterStatus, TableReporter};
/// use sim_types::{SimState, SystemLayout};
///
/// let reporter = TableReporter::new("probe", ReporterConfig::new().with_interval(0.1));
/// let state = SimState::new(&SystemLayout::new(), 0, 1);
///
/// assert_eq!(reporter.status(&state), ReporterStatus::Idle);
/// assert!(reporter.report_table().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct TableReporter {
    reporter: ReporterBase,
}

impl TableReporter {
    /// Create a table reporter.
    #[must_use]
    pub fn new(name: impl Into<String>, config: ReporterConfig) -> Self {
        Self {
            reporter: ReporterBase::new(name, config),
        }
    }

    /// Drop every recorded row and restart gating.
    pub fn clear(&mut self) {
        self.reporter.clear();
    }
}

impl_reporter_component!(TableReporter);

impl Reporter for TableReporter {
    fn reporter_base(&self) -> &ReporterBase {
        &self.reporter
    }

    fn reporter_base_mut(&mut self) -> &mut ReporterBase {
        &mut self.reporter
    }

    fn as_component(&self) -> &dyn Component {
        self
    }

    fn as_component_mut(&mut self) -> &mut dyn Component {
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::reporter::ReporterStatus;
    use sim_component::{
        ComponentBase, ComponentError, ModelContext, OutputDirectory, OutputSource,
    };
    use sim_types::{SimState, SliderKinematics, SystemLayout};
    use std::sync::Arc;

    /// Publishes `clock/time` and `clock/double`.
    #[derive(Debug)]
    struct Clock {
        base: ComponentBase,
    }

    impl Component for Clock {
        fn base(&self) -> &ComponentBase {
            &self.base
        }
        fn base_mut(&mut self) -> &mut ComponentBase {
            &mut self.base
        }
        fn outputs(&self) -> &'static [&'static str] {
            &["time", "double"]
        }
        fn calc_output(&self, index: usize, state: &SimState) -> Option<f64> {
            match index {
                0 => Some(state.time()),
                1 => Some(2.0 * state.time()),
                _ => None,
            }
        }
    }

    struct Bench {
        clock: Clock,
        reporter: TableReporter,
        state: SimState,
        _model: Arc<ModelContext>,
    }

    impl Bench {
        fn new(config: ReporterConfig) -> Self {
            let mut clock = Clock {
                base: ComponentBase::new("clock"),
            };
            let outputs = OutputDirectory::collect(&[&clock as &dyn Component]).unwrap();
            let model = Arc::new(ModelContext::new(
                "bench",
                Arc::new(SliderKinematics::new()),
                outputs,
            ));

            let mut reporter = TableReporter::new("probe", config);
            let mut layout = SystemLayout::new();
            clock.connect_to_model(Some(&model)).unwrap();
            reporter.connect_to_model(Some(&model)).unwrap();
            clock.add_to_system(&mut layout).unwrap();
            reporter.add_to_system(&mut layout).unwrap();
            let mut state = SimState::new(&layout, 0, 1);
            clock.init_state_from_properties(&mut state).unwrap();
            reporter.init_state_from_properties(&mut state).unwrap();

            Self {
                clock,
                reporter,
                state,
                _model: model,
            }
        }

        fn offer(&mut self, time: f64) -> bool {
            self.state.set_time(time);
            let source = OutputSource::new(vec![&self.clock as &dyn Component]);
            self.reporter.report(&self.state, &source)
        }

        fn times(&self) -> Vec<f64> {
            self.reporter.report_table().times().to_vec()
        }
    }

    fn config(interval: f64) -> ReporterConfig {
        ReporterConfig::new()
            .with_interval(interval)
            .with_outputs(["clock/time", "clock/double"])
    }

    #[test]
    fn test_interval_gating() {
        let mut bench = Bench::new(config(1.0));
        for t in [0.0, 0.4, 0.9, 1.0, 1.5, 2.1] {
            bench.offer(t);
        }
        assert_eq!(bench.times(), vec![0.0, 1.0, 2.1]);
    }

    #[test]
    fn test_interval_equal_to_step_keeps_every_event() {
        let mut bench = Bench::new(config(0.1));
        for i in 0..=10 {
            assert!(bench.offer(f64::from(i) * 0.1), "event {i} dropped");
        }
        assert_eq!(bench.reporter.report_table().num_rows(), 11);
    }

    #[test]
    fn test_event_just_short_of_interval_is_skipped() {
        let mut bench = Bench::new(config(1.0));
        bench.offer(0.0);
        assert!(!bench.offer(0.999_999));
        assert!(bench.offer(1.0 - 1e-12));
        assert_eq!(bench.times(), vec![0.0, 1.0 - 1e-12]);
    }

    #[test]
    fn test_every_step_records_each_event() {
        for interval in [ReporterConfig::EVERY_STEP, f64::NAN] {
            let mut bench = Bench::new(config(interval));
            let events = [0.0, 0.01, 0.02, 0.5, 0.51];
            for t in events {
                assert!(bench.offer(t));
            }
            assert_eq!(bench.times(), events.to_vec());
        }
    }

    #[test]
    fn test_rows_follow_input_order() {
        let mut bench = Bench::new(
            ReporterConfig::new()
                .every_step()
                .with_outputs(["clock/double", "clock/time"]),
        );
        bench.offer(0.25);

        let table = bench.reporter.report_table();
        assert_eq!(table.labels(), &["clock/double", "clock/time"]);
        assert_eq!(table.row(0), Some(&[0.5, 0.25][..]));
    }

    #[test]
    fn test_disable_suspends_and_resumes() {
        let mut bench = Bench::new(config(1.0));
        bench.offer(0.0);
        bench.offer(1.0);

        let Bench {
            reporter, state, ..
        } = &mut bench;
        reporter.set_disabled(state, true);
        assert!(reporter.is_disabled(state));
        assert_eq!(reporter.status(state), ReporterStatus::Disabled);

        assert!(!bench.offer(2.0));
        assert!(!bench.offer(3.0));
        assert_eq!(bench.times(), vec![0.0, 1.0]);

        bench.reporter.set_disabled(&mut bench.state, false);
        // Gating resumes from the last recorded row at 1.0.
        assert!(!bench.offer(1.5));
        assert!(bench.offer(3.2));
        assert_eq!(bench.times(), vec![0.0, 1.0, 3.2]);
    }

    #[test]
    fn test_same_time_replaces_and_earlier_is_skipped() {
        let mut bench = Bench::new(config(ReporterConfig::EVERY_STEP));
        assert!(bench.offer(0.0));
        assert!(bench.offer(1.0));
        assert!(bench.offer(1.0));
        assert!(!bench.offer(0.5));

        assert_eq!(bench.times(), vec![0.0, 1.0]);
        assert_eq!(bench.reporter.reporter_base().last_report_time(), 1.0);
    }

    #[test]
    fn test_status_transitions() {
        let reporter = TableReporter::new("probe", config(1.0));
        let state = SimState::new(&SystemLayout::new(), 0, 1);
        assert_eq!(reporter.status(&state), ReporterStatus::Idle);

        let mut bench = Bench::new(config(1.0));
        assert_eq!(bench.reporter.status(&bench.state), ReporterStatus::Armed);
        bench.offer(0.0);
        assert_eq!(bench.reporter.status(&bench.state), ReporterStatus::Recording);
    }

    #[test]
    fn test_disabled_default_seeds_state() {
        let bench = Bench::new(config(1.0).disabled(true));
        assert!(bench.reporter.is_disabled(&bench.state));
    }

    #[test]
    fn test_properties_from_state() {
        let mut bench = Bench::new(config(1.0));
        bench.reporter.set_disabled(&mut bench.state, true);
        assert!(!bench.reporter.reporter_base().config().is_disabled);

        bench.reporter.set_properties_from_state(&bench.state);
        assert!(bench.reporter.reporter_base().config().is_disabled);
    }

    #[test]
    fn test_disabled_falls_back_to_property_before_slot() {
        let mut reporter = TableReporter::new("probe", config(1.0));
        let mut state = SimState::new(&SystemLayout::new(), 0, 1);
        assert!(!reporter.is_disabled(&state));

        reporter.set_disabled(&mut state, true);
        assert!(reporter.is_disabled(&state));
        assert!(reporter.reporter_base().config().is_disabled);
    }

    #[test]
    fn test_unresolved_input_fails_connect() {
        let model = Arc::new(ModelContext::new(
            "bench",
            Arc::new(SliderKinematics::new()),
            OutputDirectory::default(),
        ));
        let mut reporter = TableReporter::new(
            "probe",
            ReporterConfig::new().with_output("acl/tension"),
        );

        let err = reporter.connect_to_model(Some(&model)).unwrap_err();
        assert_eq!(
            err,
            ComponentError::UnresolvedInput {
                component: "probe".into(),
                input: "acl/tension".into()
            }
        );
    }

    #[test]
    fn test_connect_without_model_defers_resolution() {
        let mut reporter = TableReporter::new(
            "probe",
            ReporterConfig::new().with_output("acl/tension"),
        );
        reporter.connect_to_model(None).unwrap();
        assert!(reporter.reporter_base().inputs().is_empty());
    }

    #[test]
    fn test_clear_restarts_gating() {
        let mut bench = Bench::new(config(1.0));
        bench.offer(5.0);
        bench.reporter.clear();

        assert!(bench.reporter.report_table().is_empty());
        assert!(bench.offer(0.0));
        assert_eq!(bench.times(), vec![0.0]);
    }
}
