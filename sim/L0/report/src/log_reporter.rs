//! Reporter that also writes each recorded row to the log.

use sim_component::{Component, OutputSource};
use sim_types::SimState;
use tracing::info;

use crate::config::ReporterConfig;
use crate::reporter::{Reporter, ReporterBase, impl_reporter_component};

/// A [`TableReporter`](crate::TableReporter) that emits every recorded row as
/// a structured `info` event.
///
/// Columns are logged in the order of the configured output names.
#[derive(Debug, Clone)]
pub struct LogReporter {
    reporter: ReporterBase,
}

impl LogReporter {
    /// Create a log reporter.
    #[must_use]
    pub fn new(name: impl Into<String>, config: ReporterConfig) -> Self {
        Self {
            reporter: ReporterBase::new(name, config),
        }
    }
}

impl_reporter_component!(LogReporter);

impl Reporter for LogReporter {
    fn reporter_base(&self) -> &ReporterBase {
        &self.reporter
    }

    fn reporter_base_mut(&mut self) -> &mut ReporterBase {
        &mut self.reporter
    }

    fn implement_report(&mut self, state: &SimState, source: &OutputSource<'_>) -> bool {
        if !self.reporter.record(state, source) {
            return false;
        }
        let table = self.reporter.table();
        info!(
            reporter = %self.reporter.component().name(),
            time = state.time(),
            columns = ?table.labels(),
            values = ?table.last_row().unwrap_or_default(),
            "report"
        );
        true
    }

    fn as_component(&self) -> &dyn Component {
        self
    }

    fn as_component_mut(&mut self) -> &mut dyn Component {
        self
    }
}
